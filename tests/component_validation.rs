//! Component Validation Tests
//!
//! - Validation is deterministic
//! - Every failure names the offending field
//! - No coercion between JSON types
//! - Record-level rules run after field rules

mod common;

use common::*;
use serde_json::json;
use toulmini::{validate_component, validate_value, ComponentKind, StrengthLevel, ToulminErrorCode};

fn field_of(kind: ComponentKind, value: serde_json::Value) -> String {
    let err = validate_value(kind, &value).unwrap_err();
    assert_eq!(err.code(), ToulminErrorCode::ShapeViolation);
    err.details().unwrap().field.clone()
}

// =============================================================================
// Structural Tests
// =============================================================================

#[test]
fn test_malformed_json_rejected() {
    let err = validate_component(ComponentKind::Claim, "Here is the JSON: {").unwrap_err();
    assert_eq!(err.code(), ToulminErrorCode::ShapeViolation);
    assert_eq!(err.details().unwrap().field, "$root");
    assert_eq!(err.to_json()["error_type"], "ShapeError");
}

#[test]
fn test_validation_is_deterministic() {
    let raw = warrant_json("strong").to_string();
    let first = validate_component(ComponentKind::Warrant, &raw).unwrap();
    let second = validate_component(ComponentKind::Warrant, &raw).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.strength(), Some(StrengthLevel::Strong));
}

#[test]
fn test_envelope_accepted() {
    let wrapped = json!({"warrant": warrant_json("strong")});
    let bare = validate_value(ComponentKind::Warrant, &warrant_json("strong")).unwrap();
    assert_eq!(validate_value(ComponentKind::Warrant, &wrapped).unwrap(), bare);
}

#[test]
fn test_missing_field_named() {
    let mut claim = claim_json();
    claim.as_object_mut().unwrap().remove("scope");
    assert_eq!(field_of(ComponentKind::Claim, claim), "scope");
}

#[test]
fn test_no_string_to_integer_coercion() {
    let mut qualifier = qualifier_json(80);
    qualifier["confidence_pct"] = json!("80");
    assert_eq!(field_of(ComponentKind::Qualifier, qualifier), "confidence_pct");
}

#[test]
fn test_confidence_out_of_range() {
    assert_eq!(field_of(ComponentKind::Qualifier, qualifier_json(101)), "confidence_pct");
    assert_eq!(field_of(ComponentKind::Qualifier, qualifier_json(-1)), "confidence_pct");
}

#[test]
fn test_oversized_integer_reported_out_of_range() {
    let mut qualifier = qualifier_json(80);
    qualifier["confidence_pct"] = json!(u64::MAX);
    let err = validate_value(ComponentKind::Qualifier, &qualifier).unwrap_err();
    let details = err.details().unwrap();
    assert_eq!(details.field, "confidence_pct");
    assert_ne!(details.actual, "integer");
}

#[test]
fn test_nested_citation_field_path() {
    let mut data = data_json();
    data["citations"][0]["source"] = json!("   ");
    let field = field_of(ComponentKind::Data, data);
    assert!(field.starts_with("citations[0]"), "{}", field);
}

#[test]
fn test_unknown_strength_lists_allowed() {
    let err = validate_value(ComponentKind::Backing, &backing_json("moderate")).unwrap_err();
    let expected = &err.details().unwrap().expected;
    for level in ["absolute", "strong", "weak", "irrelevant"] {
        assert!(expected.contains(level), "{}", expected);
    }
}

#[test]
fn test_strength_is_case_insensitive() {
    let backing = validate_value(ComponentKind::Backing, &backing_json("STRONG")).unwrap();
    assert_eq!(backing.strength(), Some(StrengthLevel::Strong));
}

// =============================================================================
// Semantic Tests
// =============================================================================

#[test]
fn test_claim_question_rejected() {
    let claim = json!({"statement": "Is human activity driving warming?", "scope": "general"});
    let err = validate_value(ComponentKind::Claim, &claim).unwrap_err();
    assert!(err.suggestion().unwrap().contains("assertions"));
}

#[test]
fn test_warrant_needs_general_indicator() {
    let warrant = json!({
        "principle": "Temperature data shows a rise.",
        "logic_type": "inductive",
        "strength": "strong"
    });
    assert_eq!(field_of(ComponentKind::Warrant, warrant), "principle");
}

#[test]
fn test_edge_case_needs_conditional_marker() {
    let rebuttal = json!({
        "exceptions": ["Solar output is a confounder."],
        "strength": "weak"
    });
    assert_eq!(field_of(ComponentKind::Rebuttal, rebuttal), "exceptions[0]");
}

#[test]
fn test_edge_cases_alias_accepted() {
    let rebuttal = json!({
        "edge_cases": ["If solar output increased, the attribution would weaken."],
        "strength": "weak"
    });
    assert!(validate_value(ComponentKind::Rebuttal, &rebuttal).is_ok());
}

#[test]
fn test_sustained_verdict_with_rejected_inconsistent() {
    let verdict = json!({
        "status": "sustained",
        "reasoning": "The data and the warrant look fine, but the backing was rejected by reviewers on the claim.",
        "final_statement": "Human activity dominates recent warming."
    });
    let err = validate_value(ComponentKind::Verdict, &verdict).unwrap_err();
    assert_eq!(err.code(), ToulminErrorCode::ShapeViolation);
    assert!(err.suggestion().unwrap().contains("INCONSISTENT"));
}

#[test]
fn test_verdict_must_reference_components() {
    let verdict = json!({
        "status": "remanded",
        "reasoning": "More evidence is needed before anything can be concluded about this topic.",
        "final_statement": "Further study is required."
    });
    let err = validate_value(ComponentKind::Verdict, &verdict).unwrap_err();
    assert_eq!(err.details().unwrap().field, "reasoning");
}

#[test]
fn test_undeclared_fields_ignored() {
    let mut claim = claim_json();
    claim["confidence"] = json!("high");
    assert!(validate_value(ComponentKind::Claim, &claim).is_ok());
}
