//! The seven Toulmin component records
//!
//! Records are immutable: fields are private and every constructor validates.
//! Constructors trim free text before measuring it, so a value that exists is a
//! value that passed. Validation order inside a constructor is syntactic
//! (counts, lengths) first, then semantic (marker words), then record-level.
//!
//! Lengths are counted in characters, not bytes.

use serde::Serialize;

use super::types::{
    ClaimScope, ComponentKind, EvidenceType, LogicType, QualifierDegree, StrengthLevel,
    VerdictStatus,
};
use crate::error::{ToulminError, ToulminResult, ValidationDetails};

pub const FACT_MIN_CHARS: usize = 10;
pub const CLAIM_STATEMENT_CHARS: (usize, usize) = (10, 500);
pub const WARRANT_PRINCIPLE_CHARS: (usize, usize) = (20, 800);
/// A principle at least this long is presumed general even without an indicator word
pub const WARRANT_PRESUMED_GENERAL_CHARS: usize = 100;
pub const BACKING_AUTHORITY_CHARS: (usize, usize) = (10, 1000);
pub const EDGE_CASE_MIN_CHARS: usize = 10;
pub const RATIONALE_CHARS: (usize, usize) = (10, 500);
pub const REASONING_CHARS: (usize, usize) = (50, 2000);
pub const FINAL_STATEMENT_CHARS: (usize, usize) = (10, 300);
pub const VERDICT_MIN_COMPONENT_REFERENCES: usize = 3;

const GENERAL_INDICATORS: &[&str] = &[
    "if",
    "when",
    "whenever",
    "generally",
    "typically",
    "because",
    "since",
    "as a rule",
    "it follows",
];

const CONDITIONAL_MARKERS: &[&str] = &[
    "if", "when", "unless", "except", "in case", "should", "were", "would",
];

const EXPLANATORY_CONNECTIVES: &[&str] = &[
    "because",
    "since",
    "given",
    "considering",
    "due to",
    "based on",
];

/// Component names a verdict's reasoning is expected to cite
const REASONING_COMPONENTS: &[&str] =
    &["data", "claim", "warrant", "backing", "rebuttal", "qualifier"];

/// Case-insensitive substring match against a word list.
fn contains_any(text: &str, words: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    words.iter().any(|w| lowered.contains(w))
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn check_length(
    kind: ComponentKind,
    field: &str,
    value: &str,
    (min, max): (usize, usize),
) -> ToulminResult<()> {
    let len = char_len(value);
    if len < min {
        return Err(ToulminError::shape(Some(kind), ValidationDetails::too_short(field, min, len)));
    }
    if len > max {
        return Err(ToulminError::shape(Some(kind), ValidationDetails::too_long(field, max, len)));
    }
    Ok(())
}

fn check_not_empty<T>(
    kind: ComponentKind,
    field: &str,
    items: &[T],
    what: &str,
) -> ToulminResult<()> {
    if items.is_empty() {
        return Err(ToulminError::shape(Some(kind), ValidationDetails::empty_list(field, what)));
    }
    Ok(())
}

fn trim_all(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|s| s.trim().to_string()).collect()
}

/// First `max` characters of `text`, for error labels
pub(crate) fn excerpt(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// An immutable evidence reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    source: String,
    reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl Citation {
    /// Errors are reported without an owning component; callers embedding a
    /// citation re-scope them with [`ToulminError::nested`].
    pub fn new(
        source: impl Into<String>,
        reference: impl Into<String>,
        url: Option<String>,
    ) -> ToulminResult<Self> {
        let source = source.into().trim().to_string();
        let reference = reference.into().trim().to_string();
        let url = url.map(|u| u.trim().to_string());

        for (field, value) in [("source", &source), ("reference", &reference)] {
            if value.is_empty() {
                return Err(ToulminError::shape(None, ValidationDetails::too_short(field, 1, 0)));
            }
        }
        if url.as_deref() == Some("") {
            return Err(ToulminError::shape(
                None,
                ValidationDetails::new("url", "a non-empty URL or null", "empty string"),
            ));
        }

        Ok(Self { source, reference, url })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl std::fmt::Display for Citation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.source, self.reference)
    }
}

/// DATA (grounds): cited facts supporting the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Data {
    facts: Vec<String>,
    citations: Vec<Citation>,
    evidence_type: EvidenceType,
}

impl Data {
    pub fn new(
        facts: Vec<String>,
        citations: Vec<Citation>,
        evidence_type: EvidenceType,
    ) -> ToulminResult<Self> {
        let kind = ComponentKind::Data;
        let facts = trim_all(facts);

        check_not_empty(kind, "facts", &facts, "fact")?;
        for (i, fact) in facts.iter().enumerate() {
            let len = char_len(fact);
            if len < FACT_MIN_CHARS {
                return Err(ToulminError::shape(
                    Some(kind),
                    ValidationDetails::too_short(format!("facts[{}]", i), FACT_MIN_CHARS, len),
                )
                .with_suggestion("Each fact must be a substantive, verifiable statement"));
            }
        }
        check_not_empty(kind, "citations", &citations, "citation")?;

        Ok(Self {
            facts,
            citations,
            evidence_type,
        })
    }

    pub fn facts(&self) -> &[String] {
        &self.facts
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn evidence_type(&self) -> EvidenceType {
        self.evidence_type
    }
}

/// CLAIM: the assertion derived from the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claim {
    statement: String,
    scope: ClaimScope,
}

impl Claim {
    pub fn new(statement: impl Into<String>, scope: ClaimScope) -> ToulminResult<Self> {
        let kind = ComponentKind::Claim;
        let statement = statement.into().trim().to_string();

        check_length(kind, "statement", &statement, CLAIM_STATEMENT_CHARS)?;
        if statement.ends_with('?') {
            return Err(ToulminError::shape(
                Some(kind),
                ValidationDetails::new("statement", "an assertion", "a question ending in '?'"),
            )
            .with_suggestion(
                "Claims are assertions, not questions. Restate it as a declarative sentence",
            ));
        }

        Ok(Self { statement, scope })
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn scope(&self) -> ClaimScope {
        self.scope
    }
}

/// WARRANT: the general principle bridging data to claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warrant {
    principle: String,
    logic_type: LogicType,
    strength: StrengthLevel,
}

impl Warrant {
    /// The generality check is a lexical heuristic: it looks for indicator
    /// words such as "if" or "generally" anywhere in the text, so "specific"
    /// satisfies it. Principles of 100+ characters are presumed general.
    pub fn new(
        principle: impl Into<String>,
        logic_type: LogicType,
        strength: StrengthLevel,
    ) -> ToulminResult<Self> {
        let kind = ComponentKind::Warrant;
        let principle = principle.into().trim().to_string();

        check_length(kind, "principle", &principle, WARRANT_PRINCIPLE_CHARS)?;
        if !contains_any(&principle, GENERAL_INDICATORS)
            && char_len(&principle) < WARRANT_PRESUMED_GENERAL_CHARS
        {
            return Err(ToulminError::shape(
                Some(kind),
                ValidationDetails::new(
                    "principle",
                    "a general principle",
                    "no general-principle indicator",
                ),
            )
            .with_suggestion("Use constructions like 'If X, then Y' or 'When X, generally Y'"));
        }

        Ok(Self {
            principle,
            logic_type,
            strength,
        })
    }

    pub fn principle(&self) -> &str {
        &self.principle
    }

    pub fn logic_type(&self) -> LogicType {
        self.logic_type
    }

    pub fn strength(&self) -> StrengthLevel {
        self.strength
    }
}

/// BACKING: authoritative support for the warrant itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backing {
    authority: String,
    citations: Vec<Citation>,
    strength: StrengthLevel,
}

impl Backing {
    pub fn new(
        authority: impl Into<String>,
        citations: Vec<Citation>,
        strength: StrengthLevel,
    ) -> ToulminResult<Self> {
        let kind = ComponentKind::Backing;
        let authority = authority.into().trim().to_string();

        check_length(kind, "authority", &authority, BACKING_AUTHORITY_CHARS)?;
        check_not_empty(kind, "citations", &citations, "citation")?;

        Ok(Self {
            authority,
            citations,
            strength,
        })
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn strength(&self) -> StrengthLevel {
        self.strength
    }
}

/// REBUTTAL: conditions under which the warrant fails.
///
/// `strength` grades the attack, so `absolute` means the claim cannot stand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rebuttal {
    exceptions: Vec<String>,
    counterexamples: Vec<String>,
    strength: StrengthLevel,
}

impl Rebuttal {
    pub fn new(
        exceptions: Vec<String>,
        counterexamples: Vec<String>,
        strength: StrengthLevel,
    ) -> ToulminResult<Self> {
        let kind = ComponentKind::Rebuttal;
        let exceptions = trim_all(exceptions);
        let counterexamples = trim_all(counterexamples);

        check_not_empty(kind, "exceptions", &exceptions, "exception")?;
        for (i, case) in exceptions.iter().enumerate() {
            let len = char_len(case);
            if len < EDGE_CASE_MIN_CHARS {
                return Err(ToulminError::shape(
                    Some(kind),
                    ValidationDetails::too_short(
                        format!("exceptions[{}]", i),
                        EDGE_CASE_MIN_CHARS,
                        len,
                    ),
                ));
            }
        }
        for (i, case) in exceptions.iter().enumerate() {
            if !contains_any(case, CONDITIONAL_MARKERS) {
                return Err(ToulminError::shape(
                    Some(kind),
                    ValidationDetails::new(
                        format!("exceptions[{}]", i),
                        format!(
                            "a conditional containing one of: {}",
                            CONDITIONAL_MARKERS.join(", ")
                        ),
                        "no conditional marker",
                    ),
                )
                .with_suggestion("Use 'If X, then the warrant fails' format"));
            }
        }

        Ok(Self {
            exceptions,
            counterexamples,
            strength,
        })
    }

    pub fn exceptions(&self) -> &[String] {
        &self.exceptions
    }

    pub fn counterexamples(&self) -> &[String] {
        &self.counterexamples
    }

    pub fn strength(&self) -> StrengthLevel {
        self.strength
    }
}

/// QUALIFIER: degree of certainty given the rebuttals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Qualifier {
    degree: QualifierDegree,
    confidence_pct: u8,
    rationale: String,
}

impl Qualifier {
    pub fn new(
        degree: QualifierDegree,
        confidence_pct: i64,
        rationale: impl Into<String>,
    ) -> ToulminResult<Self> {
        let kind = ComponentKind::Qualifier;
        let rationale = rationale.into().trim().to_string();

        let confidence_pct = u8::try_from(confidence_pct)
            .ok()
            .filter(|pct| *pct <= 100)
            .ok_or_else(|| {
                ToulminError::shape(
                    Some(kind),
                    ValidationDetails::new(
                        "confidence_pct",
                        "integer in [0, 100]",
                        confidence_pct.to_string(),
                    ),
                )
            })?;
        check_length(kind, "rationale", &rationale, RATIONALE_CHARS)?;
        if !contains_any(&rationale, EXPLANATORY_CONNECTIVES) {
            return Err(ToulminError::shape(
                Some(kind),
                ValidationDetails::new(
                    "rationale",
                    format!(
                        "an explanation containing one of: {}",
                        EXPLANATORY_CONNECTIVES.join(", ")
                    ),
                    "no explanatory connective",
                ),
            )
            .with_suggestion("Use 'Because X, the claim is qualified as Y'"));
        }

        Ok(Self {
            degree,
            confidence_pct,
            rationale,
        })
    }

    pub fn degree(&self) -> QualifierDegree {
        self.degree
    }

    pub fn confidence_pct(&self) -> u8 {
        self.confidence_pct
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }
}

/// VERDICT: final synthesis of the six prior components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    status: VerdictStatus,
    reasoning: String,
    final_statement: String,
}

impl Verdict {
    /// Both the component-reference count and the status consistency check are
    /// substring heuristics over the reasoning text, not semantic analysis.
    pub fn new(
        status: VerdictStatus,
        reasoning: impl Into<String>,
        final_statement: impl Into<String>,
    ) -> ToulminResult<Self> {
        let kind = ComponentKind::Verdict;
        let reasoning = reasoning.into().trim().to_string();
        let final_statement = final_statement.into().trim().to_string();

        check_length(kind, "reasoning", &reasoning, REASONING_CHARS)?;
        check_length(kind, "final_statement", &final_statement, FINAL_STATEMENT_CHARS)?;

        let lowered = reasoning.to_lowercase();
        let referenced = REASONING_COMPONENTS
            .iter()
            .filter(|name| lowered.contains(*name))
            .count();
        if referenced < VERDICT_MIN_COMPONENT_REFERENCES {
            return Err(ToulminError::shape(
                Some(kind),
                ValidationDetails::new(
                    "reasoning",
                    format!(
                        "references to at least {} components",
                        VERDICT_MIN_COMPONENT_REFERENCES
                    ),
                    format!("{} referenced", referenced),
                ),
            )
            .with_suggestion(format!("Address: {}", REASONING_COMPONENTS.join(", "))));
        }

        if let Some(term) = status
            .contradicting_terms()
            .iter()
            .find(|term| lowered.contains(*term))
        {
            return Err(ToulminError::shape(
                Some(kind),
                ValidationDetails::new(
                    "reasoning",
                    format!("reasoning consistent with status '{}'", status),
                    format!("contradicting term '{}'", term),
                ),
            )
            .with_suggestion("VERDICT INCONSISTENT: align the status with the reasoning"));
        }

        Ok(Self {
            status,
            reasoning,
            final_statement,
        })
    }

    pub fn status(&self) -> VerdictStatus {
        self.status
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn final_statement(&self) -> &str {
        &self.final_statement
    }
}

/// Any one validated component, tagged by kind.
///
/// Serializes as the bare record; the kind is not written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Component {
    Data(Data),
    Claim(Claim),
    Warrant(Warrant),
    Backing(Backing),
    Rebuttal(Rebuttal),
    Qualifier(Qualifier),
    Verdict(Verdict),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Data(_) => ComponentKind::Data,
            Component::Claim(_) => ComponentKind::Claim,
            Component::Warrant(_) => ComponentKind::Warrant,
            Component::Backing(_) => ComponentKind::Backing,
            Component::Rebuttal(_) => ComponentKind::Rebuttal,
            Component::Qualifier(_) => ComponentKind::Qualifier,
            Component::Verdict(_) => ComponentKind::Verdict,
        }
    }

    /// Declared strength, for the three graded components
    pub fn strength(&self) -> Option<StrengthLevel> {
        match self {
            Component::Warrant(w) => Some(w.strength()),
            Component::Backing(b) => Some(b.strength()),
            Component::Rebuttal(r) => Some(r.strength()),
            _ => None,
        }
    }
}

macro_rules! component_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Component {
                fn from(value: $variant) -> Self {
                    Component::$variant(value)
                }
            }
        )*
    };
}

component_from!(Data, Claim, Warrant, Backing, Rebuttal, Qualifier, Verdict);
