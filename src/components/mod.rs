//! Component schemas for the Toulmin chain
//!
//! Seven typed records (Data, Claim, Warrant, Backing, Rebuttal, Qualifier,
//! Verdict) plus the shared Citation and StrengthLevel types.
//!
//! # Design Principles
//!
//! - Records are immutable and only exist in a validated state
//! - Validation fails closed with the offending field named
//! - No coercion between JSON types
//! - Strength is a closed ordered enum, never a free string
//! - Validation never reads policy

mod reader;
mod records;
mod types;
mod validator;

pub use records::{
    Backing, Citation, Claim, Component, Data, Qualifier, Rebuttal, Verdict, Warrant,
    BACKING_AUTHORITY_CHARS, CLAIM_STATEMENT_CHARS, EDGE_CASE_MIN_CHARS, FACT_MIN_CHARS,
    FINAL_STATEMENT_CHARS, RATIONALE_CHARS, REASONING_CHARS, VERDICT_MIN_COMPONENT_REFERENCES,
    WARRANT_PRESUMED_GENERAL_CHARS, WARRANT_PRINCIPLE_CHARS,
};
pub(crate) use records::excerpt;
pub use types::{
    ClaimScope, ComponentKind, EvidenceType, LogicType, QualifierDegree, StrengthLevel,
    VerdictStatus, Vocabulary,
};
pub use validator::{validate_component, validate_value};
