//! Breaker policy snapshot

use serde::Serialize;

/// The policy flags the circuit breaker consults.
///
/// A `Copy` snapshot: a chain captures one at construction, so a change to
/// process configuration cannot split a decision halfway through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakerPolicy {
    /// Master switch. When false every configurable check is skipped.
    pub strict_mode: bool,
    /// Reject weak or irrelevant warrants (strict mode only)
    pub fail_on_weak_warrant: bool,
    /// Reject weak or irrelevant backing (strict mode only)
    pub fail_on_weak_backing: bool,
}

impl Default for BreakerPolicy {
    fn default() -> Self {
        Self::strict()
    }
}

impl BreakerPolicy {
    /// All breakers armed
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            fail_on_weak_warrant: true,
            fail_on_weak_backing: true,
        }
    }

    /// Strict mode off. The per-component flags keep their strict values but
    /// are never consulted.
    pub fn permissive() -> Self {
        Self {
            strict_mode: false,
            ..Self::strict()
        }
    }

    pub fn gates_warrant(&self) -> bool {
        self.strict_mode && self.fail_on_weak_warrant
    }

    pub fn gates_backing(&self) -> bool {
        self.strict_mode && self.fail_on_weak_backing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        assert_eq!(BreakerPolicy::default(), BreakerPolicy::strict());
        assert!(BreakerPolicy::default().gates_warrant());
        assert!(BreakerPolicy::default().gates_backing());
    }

    #[test]
    fn test_strict_mode_is_master_switch() {
        let policy = BreakerPolicy::permissive();
        assert!(policy.fail_on_weak_warrant);
        assert!(!policy.gates_warrant());
        assert!(!policy.gates_backing());
    }

    #[test]
    fn test_flags_gate_independently() {
        let policy = BreakerPolicy {
            fail_on_weak_backing: false,
            ..BreakerPolicy::strict()
        };
        assert!(policy.gates_warrant());
        assert!(!policy.gates_backing());
    }
}
