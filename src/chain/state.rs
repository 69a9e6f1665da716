//! Chain slot storage
//!
//! Dependencies are strictly sequential, so the only legal slot combinations
//! are prefixes of the canonical order Data, Claim, Warrant, Backing, Rebuttal,
//! Qualifier, Verdict. [`ChainState`] has one variant per prefix; a Backing
//! without a Warrant cannot be represented.
//!
//! [`ChainSlots`] is the open form (seven optionals) used to build a state.
//! Converting slots to a state is the single place dependency invariants are
//! enforced.

use crate::components::{
    Backing, Claim, Component, ComponentKind, Data, Qualifier, Rebuttal, Verdict, Warrant,
};
use crate::error::{ToulminError, ToulminResult};

/// Phase One pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Grounds {
    pub data: Data,
    pub claim: Claim,
}

/// Phase Two pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Bridge {
    pub warrant: Warrant,
    pub backing: Backing,
}

/// Phase Three pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Challenge {
    pub rebuttal: Rebuttal,
    pub qualifier: Qualifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum ChainState {
    #[default]
    Empty,
    Grounded(Data),
    Asserted(Grounds),
    Warranted(Grounds, Warrant),
    Backed(Grounds, Bridge),
    Rebutted(Grounds, Bridge, Rebuttal),
    Qualified(Grounds, Bridge, Challenge),
    Complete(Grounds, Bridge, Challenge, Verdict),
}

/// Open, unchecked form of a chain's seven slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainSlots {
    pub data: Option<Data>,
    pub claim: Option<Claim>,
    pub warrant: Option<Warrant>,
    pub backing: Option<Backing>,
    pub rebuttal: Option<Rebuttal>,
    pub qualifier: Option<Qualifier>,
    pub verdict: Option<Verdict>,
}

impl ChainSlots {
    /// Places `component` in its slot, replacing any previous occupant.
    pub fn set(&mut self, component: Component) {
        match component {
            Component::Data(v) => self.data = Some(v),
            Component::Claim(v) => self.claim = Some(v),
            Component::Warrant(v) => self.warrant = Some(v),
            Component::Backing(v) => self.backing = Some(v),
            Component::Rebuttal(v) => self.rebuttal = Some(v),
            Component::Qualifier(v) => self.qualifier = Some(v),
            Component::Verdict(v) => self.verdict = Some(v),
        }
    }

    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.set(component.into());
        self
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Data => self.data.is_some(),
            ComponentKind::Claim => self.claim.is_some(),
            ComponentKind::Warrant => self.warrant.is_some(),
            ComponentKind::Backing => self.backing.is_some(),
            ComponentKind::Rebuttal => self.rebuttal.is_some(),
            ComponentKind::Qualifier => self.qualifier.is_some(),
            ComponentKind::Verdict => self.verdict.is_some(),
        }
    }

    /// Prerequisites of `kind` absent from these slots, in canonical order
    pub fn missing_prerequisites(&self, kind: ComponentKind) -> Vec<ComponentKind> {
        kind.prerequisites()
            .iter()
            .copied()
            .filter(|pre| !self.has(*pre))
            .collect()
    }

    /// First dependency violation, checked in canonical order.
    pub fn check_dependencies(&self) -> ToulminResult<()> {
        for &kind in <ComponentKind as crate::components::Vocabulary>::ALL {
            if !self.has(kind) {
                continue;
            }
            let missing = self.missing_prerequisites(kind);
            if !missing.is_empty() {
                return Err(dependency_error(kind, &missing));
            }
        }
        Ok(())
    }
}

pub(crate) fn dependency_error(kind: ComponentKind, missing: &[ComponentKind]) -> ToulminError {
    ToulminError::dependency(
        kind.title(),
        missing.iter().map(|m| m.title().to_string()).collect(),
    )
}

impl ChainState {
    /// Builds the state for a set of slots.
    ///
    /// # Errors
    ///
    /// Returns TOULMIN_MISSING_DEPENDENCY naming the first component whose
    /// prerequisites are absent.
    pub fn from_slots(slots: ChainSlots) -> ToulminResult<Self> {
        slots.check_dependencies()?;

        let ChainSlots {
            data,
            claim,
            warrant,
            backing,
            rebuttal,
            qualifier,
            verdict,
        } = slots;

        use ChainState::*;
        let state = match (data, claim, warrant, backing, rebuttal, qualifier, verdict) {
            (None, None, None, None, None, None, None) => Empty,
            (Some(data), None, None, None, None, None, None) => Grounded(data),
            (Some(data), Some(claim), None, None, None, None, None) => {
                Asserted(Grounds { data, claim })
            }
            (Some(data), Some(claim), Some(warrant), None, None, None, None) => {
                Warranted(Grounds { data, claim }, warrant)
            }
            (Some(data), Some(claim), Some(warrant), Some(backing), None, None, None) => {
                Backed(Grounds { data, claim }, Bridge { warrant, backing })
            }
            (Some(data), Some(claim), Some(warrant), Some(backing), Some(rebuttal), None, None) => {
                Rebutted(Grounds { data, claim }, Bridge { warrant, backing }, rebuttal)
            }
            (
                Some(data),
                Some(claim),
                Some(warrant),
                Some(backing),
                Some(rebuttal),
                Some(qualifier),
                None,
            ) => Qualified(
                Grounds { data, claim },
                Bridge { warrant, backing },
                Challenge { rebuttal, qualifier },
            ),
            (
                Some(data),
                Some(claim),
                Some(warrant),
                Some(backing),
                Some(rebuttal),
                Some(qualifier),
                Some(verdict),
            ) => Complete(
                Grounds { data, claim },
                Bridge { warrant, backing },
                Challenge { rebuttal, qualifier },
                verdict,
            ),
            // check_dependencies admits only prefixes
            _ => {
                return Err(ToulminError::dependency(
                    "chain",
                    vec!["a contiguous prefix of components".to_string()],
                ))
            }
        };
        Ok(state)
    }

    /// Reopens the state into its slots.
    pub fn into_slots(self) -> ChainSlots {
        let mut slots = ChainSlots::default();
        let (grounds, bridge, challenge, verdict) = match self {
            ChainState::Empty => return slots,
            ChainState::Grounded(data) => {
                slots.data = Some(data);
                return slots;
            }
            ChainState::Asserted(g) => (g, None, None, None),
            ChainState::Warranted(g, warrant) => {
                slots.warrant = Some(warrant);
                (g, None, None, None)
            }
            ChainState::Backed(g, b) => (g, Some(b), None, None),
            ChainState::Rebutted(g, b, rebuttal) => {
                slots.rebuttal = Some(rebuttal);
                (g, Some(b), None, None)
            }
            ChainState::Qualified(g, b, c) => (g, Some(b), Some(c), None),
            ChainState::Complete(g, b, c, v) => (g, Some(b), Some(c), Some(v)),
        };

        slots.data = Some(grounds.data);
        slots.claim = Some(grounds.claim);
        if let Some(bridge) = bridge {
            slots.warrant = Some(bridge.warrant);
            slots.backing = Some(bridge.backing);
        }
        if let Some(challenge) = challenge {
            slots.rebuttal = Some(challenge.rebuttal);
            slots.qualifier = Some(challenge.qualifier);
        }
        slots.verdict = verdict;
        slots
    }

    pub fn data(&self) -> Option<&Data> {
        match self {
            ChainState::Empty => None,
            ChainState::Grounded(data) => Some(data),
            _ => self.grounds().map(|g| &g.data),
        }
    }

    pub fn claim(&self) -> Option<&Claim> {
        self.grounds().map(|g| &g.claim)
    }

    pub fn warrant(&self) -> Option<&Warrant> {
        match self {
            ChainState::Warranted(_, warrant) => Some(warrant),
            _ => self.bridge().map(|b| &b.warrant),
        }
    }

    pub fn backing(&self) -> Option<&Backing> {
        self.bridge().map(|b| &b.backing)
    }

    pub fn rebuttal(&self) -> Option<&Rebuttal> {
        match self {
            ChainState::Rebutted(_, _, rebuttal) => Some(rebuttal),
            _ => self.challenge().map(|c| &c.rebuttal),
        }
    }

    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.challenge().map(|c| &c.qualifier)
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            ChainState::Complete(_, _, _, verdict) => Some(verdict),
            _ => None,
        }
    }

    fn grounds(&self) -> Option<&Grounds> {
        match self {
            ChainState::Empty | ChainState::Grounded(_) => None,
            ChainState::Asserted(g)
            | ChainState::Warranted(g, _)
            | ChainState::Backed(g, _)
            | ChainState::Rebutted(g, _, _)
            | ChainState::Qualified(g, _, _)
            | ChainState::Complete(g, _, _, _) => Some(g),
        }
    }

    fn bridge(&self) -> Option<&Bridge> {
        match self {
            ChainState::Backed(_, b)
            | ChainState::Rebutted(_, b, _)
            | ChainState::Qualified(_, b, _)
            | ChainState::Complete(_, b, _, _) => Some(b),
            _ => None,
        }
    }

    fn challenge(&self) -> Option<&Challenge> {
        match self {
            ChainState::Qualified(_, _, c) | ChainState::Complete(_, _, c, _) => Some(c),
            _ => None,
        }
    }

    /// Progress marker, 0 through 4.
    ///
    /// A half-filled phase reports the previous phase, so the value never
    /// decreases as components arrive in canonical order.
    pub fn phase(&self) -> u8 {
        match self {
            ChainState::Empty | ChainState::Grounded(_) => 0,
            ChainState::Asserted(_) | ChainState::Warranted(..) => 1,
            ChainState::Backed(..) | ChainState::Rebutted(..) => 2,
            ChainState::Qualified(..) => 3,
            ChainState::Complete(..) => 4,
        }
    }

    /// Number of populated slots
    pub fn depth(&self) -> usize {
        match self {
            ChainState::Empty => 0,
            ChainState::Grounded(_) => 1,
            ChainState::Asserted(_) => 2,
            ChainState::Warranted(..) => 3,
            ChainState::Backed(..) => 4,
            ChainState::Rebutted(..) => 5,
            ChainState::Qualified(..) => 6,
            ChainState::Complete(..) => 7,
        }
    }
}
