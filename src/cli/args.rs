//! CLI argument definitions using clap
//!
//! Commands:
//! - toulmini validate <kind>
//! - toulmini assemble
//! - toulmini gate <step>
//! - toulmini table
//! - toulmini config

use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Argument id shared by the top-level and per-subcommand `--set`
const OVERRIDES_ID: &str = "overrides";

/// Toulmini - a strict, deterministic validator for Toulmin argument chains
#[derive(Parser, Debug)]
#[command(name = "toulmini")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file (environment variables are used when absent)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override one configuration key, e.g. --set strict_mode=false
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one component payload read from stdin
    Validate {
        /// Component kind: data, claim, warrant, backing, rebuttal, qualifier, verdict
        kind: String,
    },

    /// Build the full seven-part chain from {query, data, claim, ...}
    Assemble,

    /// Run a stateless phase gate: initiate, logic_bridge, stress_test, render_verdict
    Gate {
        step: String,
    },

    /// Build a chain from the components present and print its markdown table
    Table,

    /// Print the resolved configuration
    Config,
}

impl Command {
    /// Whether the command reads a request from stdin
    pub fn reads_request(&self) -> bool {
        !matches!(self, Command::Config)
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse `args`, keeping every `--set` in command-line order.
    ///
    /// `--set` is accepted before and after the subcommand. Values given
    /// before it come first.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command_with_overrides().try_get_matches_from(args)?;
        let mut cli = Cli::from_arg_matches(&matches)?;
        if let Some((_, sub)) = matches.subcommand() {
            if let Some(values) = sub.get_many::<(String, String)>(OVERRIDES_ID) {
                cli.overrides.extend(values.cloned());
            }
        }
        Ok(cli)
    }
}

fn command_with_overrides() -> clap::Command {
    let mut cmd = Cli::command();
    let names: Vec<String> = cmd
        .get_subcommands()
        .map(|sub| sub.get_name().to_string())
        .collect();
    for name in names {
        cmd = cmd.mut_subcommand(name, |sub| sub.arg(override_arg()));
    }
    cmd
}

fn override_arg() -> Arg {
    Arg::new(OVERRIDES_ID)
        .long("set")
        .value_name("KEY=VALUE")
        .action(ArgAction::Append)
        .value_parser(parse_key_value)
        .help("Override one configuration key, e.g. --set strict_mode=false")
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
