//! Closed vocabularies used by the component records
//!
//! Every enumerated field of a component is one of these types. Parsing is
//! case-insensitive; the canonical form is lower-case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ToulminError, ValidationDetails};

/// A closed set of lower-case labels.
pub trait Vocabulary: Sized + Copy + 'static {
    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Canonical label
    fn as_str(&self) -> &'static str;

    /// Parses a label, ignoring case and surrounding whitespace
    fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL.iter().copied().find(|v| v.as_str() == wanted)
    }

    /// Comma-separated list of the allowed labels, for error messages
    fn allowed() -> String {
        Self::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
    }
}

/// Declared logical adequacy of a Warrant, Backing or Rebuttal.
///
/// Ordered from least to most forceful. For Warrant and Backing more is better;
/// for Rebuttal the value grades the attack, so more is worse for the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Irrelevant,
    Weak,
    Strong,
    Absolute,
}

impl StrengthLevel {
    /// Weak or irrelevant: not enough to carry an inference
    pub fn is_inadequate(&self) -> bool {
        match self {
            StrengthLevel::Weak | StrengthLevel::Irrelevant => true,
            StrengthLevel::Strong | StrengthLevel::Absolute => false,
        }
    }
}

impl Vocabulary for StrengthLevel {
    const ALL: &'static [Self] = &[
        StrengthLevel::Absolute,
        StrengthLevel::Strong,
        StrengthLevel::Weak,
        StrengthLevel::Irrelevant,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::Absolute => "absolute",
            StrengthLevel::Strong => "strong",
            StrengthLevel::Weak => "weak",
            StrengthLevel::Irrelevant => "irrelevant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    Empirical,
    Statistical,
    Testimonial,
    Documentary,
    Expert,
}

impl Vocabulary for EvidenceType {
    const ALL: &'static [Self] = &[
        EvidenceType::Empirical,
        EvidenceType::Statistical,
        EvidenceType::Testimonial,
        EvidenceType::Documentary,
        EvidenceType::Expert,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            EvidenceType::Empirical => "empirical",
            EvidenceType::Statistical => "statistical",
            EvidenceType::Testimonial => "testimonial",
            EvidenceType::Documentary => "documentary",
            EvidenceType::Expert => "expert",
        }
    }
}

/// How far a claim reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimScope {
    Universal,
    General,
    Specific,
    Singular,
}

impl Vocabulary for ClaimScope {
    const ALL: &'static [Self] = &[
        ClaimScope::Universal,
        ClaimScope::General,
        ClaimScope::Specific,
        ClaimScope::Singular,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ClaimScope::Universal => "universal",
            ClaimScope::General => "general",
            ClaimScope::Specific => "specific",
            ClaimScope::Singular => "singular",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicType {
    Deductive,
    Inductive,
    Abductive,
}

impl Vocabulary for LogicType {
    const ALL: &'static [Self] = &[
        LogicType::Deductive,
        LogicType::Inductive,
        LogicType::Abductive,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            LogicType::Deductive => "deductive",
            LogicType::Inductive => "inductive",
            LogicType::Abductive => "abductive",
        }
    }
}

/// Degree of force attached to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualifierDegree {
    Certainly,
    Presumably,
    Probably,
    Possibly,
    Apparently,
}

impl Vocabulary for QualifierDegree {
    const ALL: &'static [Self] = &[
        QualifierDegree::Certainly,
        QualifierDegree::Presumably,
        QualifierDegree::Probably,
        QualifierDegree::Possibly,
        QualifierDegree::Apparently,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            QualifierDegree::Certainly => "certainly",
            QualifierDegree::Presumably => "presumably",
            QualifierDegree::Probably => "probably",
            QualifierDegree::Possibly => "possibly",
            QualifierDegree::Apparently => "apparently",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    /// The argument holds
    Sustained,
    /// The argument fails
    Overruled,
    /// Insufficient evidence, needs further investigation
    Remanded,
}

impl VerdictStatus {
    /// Words whose presence in the reasoning contradicts this status.
    ///
    /// Lexical heuristic only: a sustained verdict that legitimately discusses
    /// a counterargument which "fails" is a known false positive.
    pub fn contradicting_terms(&self) -> &'static [&'static str] {
        match self {
            VerdictStatus::Sustained => &["fails", "rejected"],
            VerdictStatus::Overruled => &["succeeds", "sustained"],
            VerdictStatus::Remanded => &[],
        }
    }
}

impl Vocabulary for VerdictStatus {
    const ALL: &'static [Self] = &[
        VerdictStatus::Sustained,
        VerdictStatus::Overruled,
        VerdictStatus::Remanded,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Sustained => "sustained",
            VerdictStatus::Overruled => "overruled",
            VerdictStatus::Remanded => "remanded",
        }
    }
}

/// The seven Toulmin components, in canonical submission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Data,
    Claim,
    Warrant,
    Backing,
    Rebuttal,
    Qualifier,
    Verdict,
}

impl ComponentKind {
    /// Capitalised name used in dependency errors and tables
    pub fn title(&self) -> &'static str {
        match self {
            ComponentKind::Data => "Data",
            ComponentKind::Claim => "Claim",
            ComponentKind::Warrant => "Warrant",
            ComponentKind::Backing => "Backing",
            ComponentKind::Rebuttal => "Rebuttal",
            ComponentKind::Qualifier => "Qualifier",
            ComponentKind::Verdict => "Verdict",
        }
    }

    /// Components that must be present before this one is accepted.
    ///
    /// Each component depends on its immediate predecessor, except the
    /// verdict which depends on all six.
    pub fn prerequisites(&self) -> &'static [ComponentKind] {
        use ComponentKind::*;
        match self {
            Data => &[],
            Claim => &[Data],
            Warrant => &[Claim],
            Backing => &[Warrant],
            Rebuttal => &[Backing],
            Qualifier => &[Rebuttal],
            Verdict => &[Data, Claim, Warrant, Backing, Rebuttal, Qualifier],
        }
    }

    /// Whether the circuit breaker grades this component's strength
    pub fn is_strength_graded(&self) -> bool {
        matches!(
            self,
            ComponentKind::Warrant | ComponentKind::Backing | ComponentKind::Rebuttal
        )
    }
}

impl Vocabulary for ComponentKind {
    const ALL: &'static [Self] = &[
        ComponentKind::Data,
        ComponentKind::Claim,
        ComponentKind::Warrant,
        ComponentKind::Backing,
        ComponentKind::Rebuttal,
        ComponentKind::Qualifier,
        ComponentKind::Verdict,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Data => "data",
            ComponentKind::Claim => "claim",
            ComponentKind::Warrant => "warrant",
            ComponentKind::Backing => "backing",
            ComponentKind::Rebuttal => "rebuttal",
            ComponentKind::Qualifier => "qualifier",
            ComponentKind::Verdict => "verdict",
        }
    }
}

impl FromStr for ComponentKind {
    type Err = ToulminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ToulminError::shape(
                None,
                ValidationDetails::new(
                    "kind",
                    format!("one of: {}", Self::allowed()),
                    format!("'{}'", s),
                ),
            )
        })
    }
}

macro_rules! display_as_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_label!(
    StrengthLevel,
    EvidenceType,
    ClaimScope,
    LogicType,
    QualifierDegree,
    VerdictStatus,
    ComponentKind
);
