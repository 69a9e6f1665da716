//! Component validation entry point
//!
//! Validation order:
//! 1. JSON decode
//! 2. Envelope unwrap (`{"warrant": {...}}` is accepted for a warrant)
//! 3. Structural decode of every field
//! 4. Record constructor: syntactic, semantic, then record-level rules
//!
//! Validation is pure and deterministic. It never consults policy: strength
//! grading belongs to the circuit breaker.

use serde_json::Value;

use super::reader::FieldReader;
use super::records::{Backing, Claim, Component, Data, Qualifier, Rebuttal, Verdict, Warrant};
use super::types::{ComponentKind, Vocabulary};
use crate::error::{ToulminError, ToulminResult};

/// Field name of the rebuttal's exception list, followed by its alias
const EXCEPTION_FIELDS: &[&str] = &["exceptions", "edge_cases"];

/// Parses and validates a raw JSON payload as a component of `kind`.
///
/// # Errors
///
/// Returns a shape violation (TOULMIN_SHAPE_VIOLATION) naming the offending
/// field if the payload is not JSON, lacks a field, has a wrong type, or breaks
/// a component rule.
pub fn validate_component(kind: ComponentKind, raw_json: &str) -> ToulminResult<Component> {
    let value: Value = serde_json::from_str(raw_json)
        .map_err(|e| ToulminError::malformed_json(kind, raw_json, e))?;
    validate_value(kind, &value)
}

/// Validates an already-decoded JSON value as a component of `kind`.
pub fn validate_value(kind: ComponentKind, value: &Value) -> ToulminResult<Component> {
    let reader = FieldReader::new(kind, unwrap_envelope(kind, value))?;

    let component: Component = match kind {
        ComponentKind::Data => Data::new(
            reader.string_list("facts")?,
            reader.citations("citations")?,
            reader.vocabulary("evidence_type")?,
        )?
        .into(),
        ComponentKind::Claim => {
            Claim::new(reader.string("statement")?, reader.vocabulary("scope")?)?.into()
        }
        ComponentKind::Warrant => Warrant::new(
            reader.string("principle")?,
            reader.vocabulary("logic_type")?,
            reader.vocabulary("strength")?,
        )?
        .into(),
        ComponentKind::Backing => Backing::new(
            reader.string("authority")?,
            reader.citations("citations")?,
            reader.vocabulary("strength")?,
        )?
        .into(),
        ComponentKind::Rebuttal => Rebuttal::new(
            reader.string_list(reader.first_present(EXCEPTION_FIELDS))?,
            reader.optional_string_list("counterexamples")?,
            reader.vocabulary("strength")?,
        )?
        .into(),
        ComponentKind::Qualifier => Qualifier::new(
            reader.vocabulary("degree")?,
            reader.integer("confidence_pct")?,
            reader.string("rationale")?,
        )?
        .into(),
        ComponentKind::Verdict => Verdict::new(
            reader.vocabulary("status")?,
            reader.string("reasoning")?,
            reader.string("final_statement")?,
        )?
        .into(),
    };

    Ok(component)
}

/// Producers wrap a component in an object keyed by its name. No record has a
/// field named after its own kind, so a single matching key is unambiguous.
fn unwrap_envelope(kind: ComponentKind, value: &Value) -> &Value {
    match value.as_object() {
        Some(obj) if obj.len() == 1 => obj.get(kind.as_str()).unwrap_or(value),
        _ => value,
    }
}
