//! CLI command implementations
//!
//! Every command resolves configuration the same way:
//!
//! 1. `--config <path>` when given, otherwise `TOULMINI_*` environment
//! 2. `--set key=value` overrides, applied in order
//!
//! Requests arrive on stdin as one JSON document. Gate, assemble and table
//! requests carry `query` plus one key per component; each component may be a
//! JSON object or a string of raw JSON.

use std::io;

use serde_json::{json, Value};

use crate::components::{validate_component, ComponentKind, Vocabulary};
use crate::config::Config;
use crate::gates::{GateStep, Payloads, PhaseGate};
use crate::observability::Event;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{parse_object, read_request, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments, runs the command and writes exactly one JSON response to
/// stdout. A failed command also returns its error so the process exits
/// non-zero.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let mut stdout = io::stdout();

    let outcome = if cli.command.reads_request() {
        read_request().and_then(|input| execute(&cli, &input))
    } else {
        execute(&cli, "")
    };

    match outcome {
        Ok(data) => write_response(&mut stdout, data),
        Err(e) => {
            write_error(&mut stdout, &e)?;
            Err(e)
        }
    }
}

/// Resolve configuration from file or environment, then apply overrides
pub fn resolve_config(cli: &Cli) -> CliResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    for (key, value) in &cli.overrides {
        config = config.with_override(key, value)?;
    }
    Ok(config)
}

/// Run `cli`'s command against request text `input`
pub fn execute(cli: &Cli, input: &str) -> CliResult<Value> {
    let config = resolve_config(cli)?;
    let gate = PhaseGate::new(config);
    let strict_mode = gate.config().strict_mode.to_string();
    gate.logger().event(
        Event::ConfigResolved,
        &[
            ("log_level", gate.config().log_level.as_str()),
            ("strict_mode", strict_mode.as_str()),
        ],
    );
    run_command(&cli.command, &gate, input)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: &Command, gate: &PhaseGate, input: &str) -> CliResult<Value> {
    match cmd {
        Command::Validate { kind } => validate(kind, input),
        Command::Assemble => assemble(gate, input),
        Command::Gate { step } => open_gate(gate, step, input),
        Command::Table => table(gate, input),
        Command::Config => Ok(serde_json::to_value(gate.config())?),
    }
}

/// Validate one component payload
pub fn validate(kind: &str, input: &str) -> CliResult<Value> {
    let kind: ComponentKind = kind.parse()?;
    let component = validate_component(kind, input)?;
    Ok(json!({
        "kind": kind.as_str(),
        "strength": component.strength(),
        "component": component,
    }))
}

/// Build and export the complete chain
pub fn assemble(gate: &PhaseGate, input: &str) -> CliResult<Value> {
    let (query, payloads) = chain_request(input)?;
    let chain = gate.assemble(&query, &payloads)?;
    Ok(chain.export())
}

/// Run one phase gate and return its ticket
pub fn open_gate(gate: &PhaseGate, step: &str, input: &str) -> CliResult<Value> {
    let step: GateStep = step.parse()?;
    let (query, payloads) = chain_request(input)?;
    let ticket = gate.open(step, &query, &payloads)?;
    Ok(serde_json::to_value(ticket)?)
}

/// Build a chain from the components present and render its table
pub fn table(gate: &PhaseGate, input: &str) -> CliResult<Value> {
    let (query, payloads) = chain_request(input)?;
    let chain = gate.build(&query, &payloads)?;
    Ok(json!({
        "phase": chain.phase(),
        "is_complete": chain.is_complete(),
        "table": chain.render_table(),
    }))
}

fn chain_request(input: &str) -> CliResult<(String, Payloads)> {
    let request = parse_object(input)?;
    let query = request
        .get("query")
        .and_then(Value::as_str)
        .ok_or_else(|| CliError::bad_request("Missing string field 'query'"))?
        .to_string();
    Ok((query, Payloads::from_request(&request)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{Logger, Severity};
    use std::fs;
    use tempfile::TempDir;

    const QUERY: &str = "Should cities ban cars from downtown?";

    fn quiet_gate(config: Config) -> PhaseGate {
        PhaseGate::with_logger(config, Logger::in_memory(Severity::Debug))
    }

    fn grounds_request() -> String {
        json!({
            "query": QUERY,
            "data": {
                "facts": ["Oslo saw zero pedestrian deaths in 2019 after removing cars."],
                "citations": [{"source": "Oslo Kommune", "reference": "Traffic report 2019"}],
                "evidence_type": "statistical"
            },
            "claim": "{\"statement\": \"Car-free downtowns improve pedestrian safety.\", \"scope\": \"general\"}"
        })
        .to_string()
    }

    #[test]
    fn test_validate_reports_strength() {
        let input = json!({
            "warrant": {
                "principle": "If a hazard is removed from a space, then injuries from it generally fall.",
                "logic_type": "deductive",
                "strength": "strong"
            }
        })
        .to_string();
        let data = validate("warrant", &input).unwrap();
        assert_eq!(data["kind"], "warrant");
        assert_eq!(data["strength"], "strong");
        assert_eq!(data["component"]["logic_type"], "deductive");
    }

    #[test]
    fn test_validate_unknown_kind() {
        let err = validate("evidence", "{}").unwrap_err();
        assert_eq!(err.code(), "TOULMIN_SHAPE_VIOLATION");
    }

    #[test]
    fn test_gate_command_returns_ticket() {
        let gate = quiet_gate(Config::default());
        let data = open_gate(&gate, "logic-bridge", &grounds_request()).unwrap();
        assert_eq!(data["phase"], 2);
        assert_eq!(data["next_step"], "stress_test");
    }

    #[test]
    fn test_table_for_partial_chain() {
        let gate = quiet_gate(Config::default());
        let data = table(&gate, &grounds_request()).unwrap();
        assert_eq!(data["phase"], 1);
        assert!(data["table"].as_str().unwrap().contains("**CLAIM**"));
    }

    #[test]
    fn test_missing_query_is_bad_request() {
        let gate = quiet_gate(Config::default());
        let err = assemble(&gate, "{\"data\": {}}").unwrap_err();
        assert!(matches!(err, CliError::BadRequest(_)));
    }

    #[test]
    fn test_config_file_and_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("toulmini.json");
        fs::write(&config_path, json!({"strict_mode": false}).to_string()).unwrap();

        let cli = Cli::try_parse_args([
            "toulmini",
            "--config",
            config_path.to_str().unwrap(),
            "--set",
            "log_level=error",
            "config",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert!(!config.strict_mode);
        assert!(config.fail_on_weak_warrant);
        assert_eq!(config.log_level, "ERROR");
    }

    #[test]
    fn test_overrides_on_both_sides_of_subcommand() {
        let cli = Cli::try_parse_args([
            "toulmini",
            "--set",
            "strict_mode=false",
            "gate",
            "logic_bridge",
            "--set",
            "log_level=error",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert!(!config.strict_mode);
        assert_eq!(config.log_level, "ERROR");
        assert!(!config.policy().gates_warrant());
    }

    #[test]
    fn test_unreadable_config_is_configuration_error() {
        let cli = Cli::try_parse_args([
            "toulmini",
            "--config",
            "/nonexistent/toulmini.json",
            "config",
        ])
        .unwrap();
        let err = resolve_config(&cli).unwrap_err();
        assert_eq!(err.code(), "TOULMIN_INVALID_CONFIGURATION");
    }
}
