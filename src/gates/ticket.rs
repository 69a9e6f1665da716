//! Phase tickets and gate steps

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::components::ComponentKind;
use crate::error::{ToulminError, ValidationDetails};

/// The four stateless gates, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStep {
    Initiate,
    LogicBridge,
    StressTest,
    RenderVerdict,
}

impl GateStep {
    pub const ALL: [GateStep; 4] = [
        GateStep::Initiate,
        GateStep::LogicBridge,
        GateStep::StressTest,
        GateStep::RenderVerdict,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GateStep::Initiate => "initiate",
            GateStep::LogicBridge => "logic_bridge",
            GateStep::StressTest => "stress_test",
            GateStep::RenderVerdict => "render_verdict",
        }
    }

    /// Phase the producer works on after passing this gate
    pub fn phase(&self) -> u8 {
        match self {
            GateStep::Initiate => 1,
            GateStep::LogicBridge => 2,
            GateStep::StressTest => 3,
            GateStep::RenderVerdict => 4,
        }
    }

    /// Payloads the gate must receive
    pub fn requires(&self) -> &'static [ComponentKind] {
        use ComponentKind::*;
        match self {
            GateStep::Initiate => &[],
            GateStep::LogicBridge => &[Data, Claim],
            GateStep::StressTest => &[Data, Claim, Warrant, Backing],
            GateStep::RenderVerdict => &[Data, Claim, Warrant, Backing, Rebuttal, Qualifier],
        }
    }

    /// Components the producer must emit next
    pub fn expects(&self) -> &'static [ComponentKind] {
        use ComponentKind::*;
        match self {
            GateStep::Initiate => &[Data, Claim],
            GateStep::LogicBridge => &[Warrant, Backing],
            GateStep::StressTest => &[Rebuttal, Qualifier],
            GateStep::RenderVerdict => &[Verdict],
        }
    }

    pub fn next(&self) -> Option<GateStep> {
        match self {
            GateStep::Initiate => Some(GateStep::LogicBridge),
            GateStep::LogicBridge => Some(GateStep::StressTest),
            GateStep::StressTest => Some(GateStep::RenderVerdict),
            GateStep::RenderVerdict => None,
        }
    }

    /// Remediation attached to a missing-payload error
    pub(crate) fn missing_suggestion(&self) -> &'static str {
        match self {
            GateStep::Initiate => "Provide a query",
            GateStep::LogicBridge => "Complete Phase 1 (initiate) first",
            GateStep::StressTest => "Complete Phase 1 and Phase 2 before stress testing",
            GateStep::RenderVerdict => "Cannot render verdict without the complete 6-part chain",
        }
    }
}

impl fmt::Display for GateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateStep {
    type Err = ToulminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        GateStep::ALL
            .iter()
            .copied()
            .find(|step| step.as_str() == wanted)
            .ok_or_else(|| {
                let allowed: Vec<&str> = GateStep::ALL.iter().map(GateStep::as_str).collect();
                ToulminError::shape(
                    None,
                    ValidationDetails::new(
                        "step",
                        format!("one of: {}", allowed.join(", ")),
                        format!("'{}'", s),
                    ),
                )
            })
    }
}

/// What a gate hands back to the producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseTicket {
    pub step: GateStep,
    pub phase: u8,
    pub query: String,
    /// Components expected in the producer's next output
    pub expects: Vec<ComponentKind>,
    pub expected_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<GateStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Whether a council of experts may be consulted before emitting
    pub council: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
}

impl PhaseTicket {
    pub(crate) fn for_step(
        step: GateStep,
        query: &str,
        council: bool,
        warning: Option<String>,
    ) -> Self {
        let expects = step.expects().to_vec();
        Self {
            step,
            phase: step.phase(),
            query: query.to_string(),
            expected_output: expected_output(&expects),
            expects,
            next_step: step.next(),
            warning,
            council,
            is_final: step.next().is_none(),
        }
    }
}

/// "JSON with 'warrant' and 'backing' objects"
fn expected_output(kinds: &[ComponentKind]) -> String {
    let quoted: Vec<String> = kinds.iter().map(|k| format!("'{}'", k)).collect();
    match quoted.as_slice() {
        [single] => format!("JSON with {} object", single),
        _ => format!("JSON with {} objects", quoted.join(" and ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_chain_in_order() {
        let mut step = GateStep::Initiate;
        let mut seen = vec![step];
        while let Some(next) = step.next() {
            assert!(next.phase() > step.phase());
            step = next;
            seen.push(step);
        }
        assert_eq!(seen, GateStep::ALL.to_vec());
    }

    #[test]
    fn test_step_parse_accepts_dashes() {
        assert_eq!("logic-bridge".parse::<GateStep>().unwrap(), GateStep::LogicBridge);
        assert_eq!(" RENDER_VERDICT ".parse::<GateStep>().unwrap(), GateStep::RenderVerdict);
        assert!("finish".parse::<GateStep>().is_err());
    }

    #[test]
    fn test_expected_output_wording() {
        let ticket = PhaseTicket::for_step(GateStep::LogicBridge, "A query here", true, None);
        assert_eq!(ticket.expected_output, "JSON with 'warrant' and 'backing' objects");
        let ticket = PhaseTicket::for_step(GateStep::RenderVerdict, "A query here", true, None);
        assert_eq!(ticket.expected_output, "JSON with 'verdict' object");
        assert!(ticket.is_final);
        assert_eq!(ticket.next_step, None);
    }

    #[test]
    fn test_ticket_serializes_final_flag() {
        let ticket = PhaseTicket::for_step(GateStep::Initiate, "A query here", false, None);
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["step"], "initiate");
        assert_eq!(value["next_step"], "logic_bridge");
        assert_eq!(value["final"], false);
        assert!(value.get("warning").is_none());
    }
}
