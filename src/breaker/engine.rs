//! Strength-based rejection
//!
//! Decision table for Warrant and Backing:
//!
//! | strict_mode | fail flag | strength            | outcome |
//! |-------------|-----------|---------------------|---------|
//! | false       | any       | any                 | pass    |
//! | true        | false     | any                 | pass    |
//! | true        | true      | strong, absolute    | pass    |
//! | true        | true      | weak, irrelevant    | reject  |
//!
//! Rebuttal: `absolute` is always rejected. It is a logical conclusion (the
//! claim cannot stand), so no policy flag relaxes it.

use crate::components::{
    excerpt, Backing, Component, ComponentKind, Rebuttal, StrengthLevel, Warrant,
};
use crate::error::{ToulminError, ToulminResult};

use super::policy::BreakerPolicy;

/// Longest label quoted in a rejection
const LABEL_CHARS: usize = 100;

/// Applies a [`BreakerPolicy`] to graded components.
///
/// Holds no state beyond the policy; checks are pure and independent of any
/// chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CircuitBreaker {
    policy: BreakerPolicy,
}

impl CircuitBreaker {
    pub fn new(policy: BreakerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> BreakerPolicy {
        self.policy
    }

    /// Rejects a weak or irrelevant warrant when the policy gates warrants.
    pub fn check_warrant(&self, warrant: &Warrant) -> ToulminResult<()> {
        let strength = warrant.strength();
        if self.policy.gates_warrant() && strength.is_inadequate() {
            return Err(ToulminError::circuit_breaker(
                ComponentKind::Warrant,
                strength,
                excerpt(warrant.principle(), LABEL_CHARS),
                "REJECTED",
                "Provide a general principle that logically compels the claim from the data",
            ));
        }
        Ok(())
    }

    /// Rejects weak or irrelevant backing when the policy gates backing.
    pub fn check_backing(&self, backing: &Backing) -> ToulminResult<()> {
        let strength = backing.strength();
        if self.policy.gates_backing() && strength.is_inadequate() {
            return Err(ToulminError::circuit_breaker(
                ComponentKind::Backing,
                strength,
                excerpt(backing.authority(), LABEL_CHARS),
                "REJECTED",
                "Provide stronger statutory, scientific, or expert authority with citations",
            ));
        }
        Ok(())
    }

    /// Rejects an absolute rebuttal regardless of policy.
    pub fn check_rebuttal(&self, rebuttal: &Rebuttal) -> ToulminResult<()> {
        match rebuttal.strength() {
            StrengthLevel::Absolute => {
                let label = rebuttal
                    .exceptions()
                    .first()
                    .map(|case| excerpt(case, LABEL_CHARS))
                    .unwrap_or_default();
                Err(ToulminError::circuit_breaker(
                    ComponentKind::Rebuttal,
                    StrengthLevel::Absolute,
                    label,
                    "FATAL",
                    "The claim cannot stand against this rebuttal. Revise the claim or render an overruled verdict",
                ))
            }
            StrengthLevel::Strong | StrengthLevel::Weak | StrengthLevel::Irrelevant => Ok(()),
        }
    }

    /// Checks the logical bridge (warrant, then backing).
    pub fn check_bridge(&self, warrant: &Warrant, backing: &Backing) -> ToulminResult<()> {
        self.check_warrant(warrant)?;
        self.check_backing(backing)
    }

    /// Dispatches on the component kind. Ungraded components always pass.
    pub fn check(&self, component: &Component) -> ToulminResult<()> {
        match component {
            Component::Warrant(w) => self.check_warrant(w),
            Component::Backing(b) => self.check_backing(b),
            Component::Rebuttal(r) => self.check_rebuttal(r),
            Component::Data(_)
            | Component::Claim(_)
            | Component::Qualifier(_)
            | Component::Verdict(_) => Ok(()),
        }
    }
}
