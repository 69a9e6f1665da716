//! Stateless phase gates
//!
//! Each gate receives the query plus every prior payload, rebuilds the chain
//! from scratch and tells the producer what to emit next. Nothing is kept
//! between calls, so re-received Warrant and Backing meet the breaker again.

use crate::chain::ToulminChain;
use crate::components::{validate_component, ComponentKind, Vocabulary, VerdictStatus};
use crate::config::Config;
use crate::error::{ToulminError, ToulminResult};
use crate::observability::{Event, Logger};

use super::payloads::Payloads;
use super::ticket::{GateStep, PhaseTicket};

/// A sustained verdict below this qualifier confidence draws an advisory
pub const SUSTAIN_CONFIDENCE_FLOOR: u8 = 30;

pub struct PhaseGate {
    config: Config,
    logger: Logger,
}

impl PhaseGate {
    /// Gate logging to stderr at the config's threshold
    pub fn new(config: Config) -> Self {
        let logger = config.logger();
        Self { config, logger }
    }

    pub fn with_logger(config: Config, logger: Logger) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Phase 1: checks the query and asks for Data and Claim.
    pub fn initiate(&self, query: &str) -> ToulminResult<PhaseTicket> {
        self.open(GateStep::Initiate, query, &Payloads::new())
    }

    /// Phase 2: re-validates Data and Claim, asks for Warrant and Backing.
    pub fn logic_bridge(&self, query: &str, payloads: &Payloads) -> ToulminResult<PhaseTicket> {
        self.open(GateStep::LogicBridge, query, payloads)
    }

    /// Phase 3: re-validates through Backing, asks for Rebuttal and Qualifier.
    pub fn stress_test(&self, query: &str, payloads: &Payloads) -> ToulminResult<PhaseTicket> {
        self.open(GateStep::StressTest, query, payloads)
    }

    /// Phase 4: re-validates the six-part chain, asks for the Verdict.
    pub fn render_verdict(&self, query: &str, payloads: &Payloads) -> ToulminResult<PhaseTicket> {
        self.open(GateStep::RenderVerdict, query, payloads)
    }

    /// Runs the gate for `step`.
    ///
    /// # Errors
    ///
    /// - DependencyError listing every blank payload (lower-case names,
    ///   canonical order), raised before any payload is parsed
    /// - ShapeError for the first payload that fails validation
    /// - CircuitBreakerError when a re-received component is rejected
    pub fn open(
        &self,
        step: GateStep,
        query: &str,
        payloads: &Payloads,
    ) -> ToulminResult<PhaseTicket> {
        let chain = self.rebuild(
            step.as_str(),
            step.requires(),
            query,
            payloads,
            step.missing_suggestion(),
        )?;
        Ok(PhaseTicket::for_step(
            step,
            chain.query(),
            self.config.enable_council,
            self.warning_for(step),
        ))
    }

    /// Builds the complete seven-part chain.
    pub fn assemble(&self, query: &str, payloads: &Payloads) -> ToulminResult<ToulminChain> {
        let chain = self.rebuild(
            "assemble",
            ComponentKind::ALL,
            query,
            payloads,
            "Provide all seven components to assemble a chain",
        )?;
        self.advise_on_verdict(&chain);
        Ok(chain)
    }

    /// Builds a chain from whichever payloads are present.
    ///
    /// A gap in the canonical order surfaces as the chain's own dependency
    /// error.
    pub fn build(&self, query: &str, payloads: &Payloads) -> ToulminResult<ToulminChain> {
        let present = payloads.present();
        let chain = self.rebuild("build", &present, query, payloads, "")?;
        self.advise_on_verdict(&chain);
        Ok(chain)
    }

    fn rebuild(
        &self,
        target: &str,
        required: &[ComponentKind],
        query: &str,
        payloads: &Payloads,
        suggestion: &str,
    ) -> ToulminResult<ToulminChain> {
        let missing = payloads.missing(required);
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(|k| k.as_str().to_string()).collect();
            let mut err = ToulminError::dependency(target, names);
            if !suggestion.is_empty() {
                err = err.with_suggestion(suggestion);
            }
            let missing = err.missing().join(",");
            self.logger.event(
                Event::ComponentRejected,
                &[("target", target), ("code", err.code().code()), ("missing", missing.as_str())],
            );
            return Err(err);
        }

        let mut chain = ToulminChain::new(query, self.config.policy()).map_err(|err| {
            self.logger.event(
                Event::ComponentRejected,
                &[("target", target), ("code", err.code().code())],
            );
            err
        })?;
        let chain_id = chain.id().to_string();
        self.logger
            .event(Event::ChainCreated, &[("chain_id", chain_id.as_str()), ("target", target)]);

        for &kind in required {
            let raw = payloads.get(kind).unwrap_or_default();
            chain = validate_component(kind, raw)
                .and_then(|component| chain.submit(component))
                .map_err(|err| self.log_rejection(&chain_id, kind, err))?;
            let phase = chain.phase().to_string();
            self.logger.event(
                Event::ComponentAccepted,
                &[
                    ("chain_id", chain_id.as_str()),
                    ("component", kind.as_str()),
                    ("phase", phase.as_str()),
                ],
            );
        }

        chain
            .run_logic_checks()
            .map_err(|err| self.log_rejection(&chain_id, ComponentKind::Warrant, err))?;
        let phase = chain.phase().to_string();
        self.logger.event(
            Event::LogicChecksPassed,
            &[("chain_id", chain_id.as_str()), ("phase", phase.as_str())],
        );

        Ok(chain)
    }

    /// Logs a rejection and hands the error back.
    fn log_rejection(
        &self,
        chain_id: &str,
        kind: ComponentKind,
        err: ToulminError,
    ) -> ToulminError {
        let component = err.component().unwrap_or(kind);
        let mut fields = vec![
            ("chain_id", chain_id.to_string()),
            ("code", err.code().code().to_string()),
            ("component", component.as_str().to_string()),
        ];
        let event = if err.is_termination() {
            if let Some(strength) = err.strength() {
                fields.push(("strength", strength.as_str().to_string()));
            }
            Event::BreakerTripped
        } else {
            if let Some(details) = err.details() {
                fields.push(("field", details.field.clone()));
            }
            Event::ComponentRejected
        };
        let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.logger.event(event, &borrowed);
        err
    }

    fn advise_on_verdict(&self, chain: &ToulminChain) {
        let (Some(verdict), Some(qualifier)) = (chain.verdict(), chain.qualifier()) else {
            return;
        };
        if verdict.status() == VerdictStatus::Sustained
            && qualifier.confidence_pct() < SUSTAIN_CONFIDENCE_FLOOR
        {
            let chain_id = chain.id().to_string();
            let confidence = qualifier.confidence_pct().to_string();
            self.logger.event(
                Event::VerdictAdvisory,
                &[
                    ("chain_id", chain_id.as_str()),
                    ("confidence_pct", confidence.as_str()),
                    ("status", verdict.status().as_str()),
                    ("advice", "low confidence suggests an overruled or remanded verdict"),
                ],
            );
        }
    }

    fn warning_for(&self, step: GateStep) -> Option<String> {
        let policy = self.config.policy();
        match step {
            GateStep::LogicBridge if policy.gates_warrant() || policy.gates_backing() => Some(
                "A 'weak' or 'irrelevant' warrant or backing strength will TERMINATE the chain"
                    .to_string(),
            ),
            GateStep::StressTest => {
                Some("An 'absolute' rebuttal strength will TERMINATE the chain".to_string())
            }
            _ => None,
        }
    }
}
