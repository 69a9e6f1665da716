//! Observable lifecycle events
//!
//! Events are explicit and typed. Each carries a default severity; callers
//! may log at another level when the context warrants it.

use std::fmt;

use super::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration resolved from environment, file and overrides
    ConfigResolved,
    /// A chain was created for a query
    ChainCreated,
    /// A component passed validation and entered the chain
    ComponentAccepted,
    /// A component failed schema or dependency checks
    ComponentRejected,
    /// The circuit breaker terminated the chain
    BreakerTripped,
    /// Every populated graded slot passed the breaker
    LogicChecksPassed,
    /// A verdict was accepted that its qualifier argues against
    VerdictAdvisory,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigResolved => "CONFIG_RESOLVED",
            Event::ChainCreated => "CHAIN_CREATED",
            Event::ComponentAccepted => "COMPONENT_ACCEPTED",
            Event::ComponentRejected => "COMPONENT_REJECTED",
            Event::BreakerTripped => "BREAKER_TRIPPED",
            Event::LogicChecksPassed => "LOGIC_CHECKS_PASSED",
            Event::VerdictAdvisory => "VERDICT_ADVISORY",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::ConfigResolved | Event::ComponentAccepted | Event::LogicChecksPassed => {
                Severity::Debug
            }
            Event::ChainCreated => Severity::Info,
            Event::ComponentRejected | Event::VerdictAdvisory => Severity::Warning,
            Event::BreakerTripped => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        for event in [
            Event::ConfigResolved,
            Event::ChainCreated,
            Event::ComponentAccepted,
            Event::ComponentRejected,
            Event::BreakerTripped,
            Event::LogicChecksPassed,
            Event::VerdictAdvisory,
        ] {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'), "{}", name);
        }
    }

    #[test]
    fn test_breaker_trip_is_error() {
        assert_eq!(Event::BreakerTripped.severity(), Severity::Error);
    }
}
