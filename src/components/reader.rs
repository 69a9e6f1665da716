//! Structural decoding of component payloads
//!
//! Turns a JSON object into typed field values, reporting the first offending
//! field path. No coercion: strings must be strings, integers must be integers.
//! Undeclared fields are ignored.

use serde_json::{Map, Value};

use super::records::Citation;
use super::types::{ComponentKind, Vocabulary};
use crate::error::{ToulminError, ToulminResult, ValidationDetails};

pub(crate) struct FieldReader<'a> {
    kind: ComponentKind,
    obj: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    /// The payload must be a JSON object.
    pub fn new(kind: ComponentKind, value: &'a Value) -> ToulminResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            ToulminError::shape(
                Some(kind),
                ValidationDetails::type_mismatch("$root", "object", json_type_name(value)),
            )
        })?;
        Ok(Self { kind, obj })
    }

    fn error(&self, details: ValidationDetails) -> ToulminError {
        ToulminError::shape(Some(self.kind), details)
    }

    fn mismatch(&self, field: impl Into<String>, expected: &str, value: &Value) -> ToulminError {
        self.error(ValidationDetails::type_mismatch(field, expected, json_type_name(value)))
    }

    fn required(&self, field: &str) -> ToulminResult<&'a Value> {
        match self.obj.get(field) {
            None => Err(self.error(ValidationDetails::missing_field(field))),
            Some(Value::Null) => Err(self.error(ValidationDetails::null_value(field))),
            Some(value) => Ok(value),
        }
    }

    /// Absent and null are the same thing for optional fields
    fn optional(&self, field: &str) -> Option<&'a Value> {
        self.obj.get(field).filter(|v| !v.is_null())
    }

    /// The first of `names` present in the payload, else the first name.
    /// Used for fields that accept an alias.
    pub fn first_present<'n>(&self, names: &[&'n str]) -> &'n str {
        names
            .iter()
            .copied()
            .find(|name| self.obj.contains_key(*name))
            .unwrap_or(names[0])
    }

    pub fn string(&self, field: &str) -> ToulminResult<String> {
        let value = self.required(field)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(field, "string", value))
    }

    pub fn optional_string(&self, field: &str) -> ToulminResult<Option<String>> {
        match self.optional(field) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.mismatch(field, "string or null", value)),
        }
    }

    pub fn string_list(&self, field: &str) -> ToulminResult<Vec<String>> {
        let value = self.required(field)?;
        self.strings_in(field, value)
    }

    /// Absent or null decodes as an empty list
    pub fn optional_string_list(&self, field: &str) -> ToulminResult<Vec<String>> {
        match self.optional(field) {
            None => Ok(Vec::new()),
            Some(value) => self.strings_in(field, value),
        }
    }

    fn strings_in(&self, field: &str, value: &Value) -> ToulminResult<Vec<String>> {
        let items = value
            .as_array()
            .ok_or_else(|| self.mismatch(field, "array", value))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = format!("{}[{}]", field, i);
                match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Null => Err(self.error(ValidationDetails::null_value(path))),
                    other => Err(self.mismatch(path, "string", other)),
                }
            })
            .collect()
    }

    /// A signed 64-bit integer. Floats are type mismatches; integers past
    /// `i64::MAX` are out of range.
    pub fn integer(&self, field: &str) -> ToulminResult<i64> {
        let value = self.required(field)?;
        if let Some(n) = value.as_i64() {
            return Ok(n);
        }
        if value.is_u64() {
            return Err(self.error(ValidationDetails::new(
                field,
                format!("integer no greater than {}", i64::MAX),
                value.to_string(),
            )));
        }
        Err(self.mismatch(field, "integer", value))
    }

    /// A closed-vocabulary label; the error lists the allowed set
    pub fn vocabulary<T: Vocabulary>(&self, field: &str) -> ToulminResult<T> {
        let raw = self.string(field)?;
        T::parse(&raw).ok_or_else(|| {
            self.error(ValidationDetails::new(
                field,
                format!("one of: {}", T::allowed()),
                format!("'{}'", raw),
            ))
        })
    }

    pub fn citations(&self, field: &str) -> ToulminResult<Vec<Citation>> {
        let value = self.required(field)?;
        let items = value
            .as_array()
            .ok_or_else(|| self.mismatch(field, "array", value))?;

        let mut citations = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let path = format!("{}[{}]", field, i);
            let citation = FieldReader::new(self.kind, item)
                .and_then(|nested| {
                    Citation::new(
                        nested.string("source")?,
                        nested.string("reference")?,
                        nested.optional_string("url")?,
                    )
                })
                .map_err(|e| e.nested(self.kind, &path))?;
            citations.push(citation);
        }
        Ok(citations)
    }
}

/// JSON type name for error messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::types::ClaimScope;
    use serde_json::json;

    #[test]
    fn test_root_must_be_object() {
        let value = json!(["not", "an", "object"]);
        let err = FieldReader::new(ComponentKind::Claim, &value).err().unwrap();
        assert_eq!(err.details().unwrap().actual, "array");
    }

    #[test]
    fn test_missing_and_null_fields() {
        let value = json!({"statement": null});
        let reader = FieldReader::new(ComponentKind::Claim, &value).unwrap();
        assert_eq!(reader.string("statement").unwrap_err().details().unwrap().actual, "null");
        assert_eq!(reader.string("scope").unwrap_err().details().unwrap().actual, "missing");
    }

    #[test]
    fn test_integer_rejects_float() {
        let value = json!({"confidence_pct": 80.5});
        let reader = FieldReader::new(ComponentKind::Qualifier, &value).unwrap();
        let err = reader.integer("confidence_pct").unwrap_err();
        assert_eq!(err.details().unwrap().actual, "float");
    }

    #[test]
    fn test_integer_past_i64_is_out_of_range() {
        let value = json!({"confidence_pct": u64::MAX});
        let reader = FieldReader::new(ComponentKind::Qualifier, &value).unwrap();
        let err = reader.integer("confidence_pct").unwrap_err();
        let details = err.details().unwrap();
        assert_eq!(details.actual, u64::MAX.to_string());
        assert!(details.expected.contains(&i64::MAX.to_string()));
    }

    #[test]
    fn test_vocabulary_lists_allowed_values() {
        let value = json!({"scope": "Cosmic"});
        let reader = FieldReader::new(ComponentKind::Claim, &value).unwrap();
        let err = reader.vocabulary::<ClaimScope>("scope").unwrap_err();
        assert!(err.details().unwrap().expected.contains("universal, general, specific, singular"));
    }

    #[test]
    fn test_citation_errors_carry_nested_path() {
        let value = json!({"citations": [{"source": "A", "reference": "B"}, {"source": "C"}]});
        let reader = FieldReader::new(ComponentKind::Backing, &value).unwrap();
        let err = reader.citations("citations").unwrap_err();
        assert_eq!(err.details().unwrap().field, "citations[1].reference");
        assert_eq!(err.component(), Some(ComponentKind::Backing));
    }

    #[test]
    fn test_string_list_element_types() {
        let value = json!({"facts": ["ok fact here", 7]});
        let reader = FieldReader::new(ComponentKind::Data, &value).unwrap();
        assert_eq!(reader.string_list("facts").unwrap_err().details().unwrap().field, "facts[1]");
    }

    #[test]
    fn test_first_present_alias() {
        let value = json!({"edge_cases": []});
        let reader = FieldReader::new(ComponentKind::Rebuttal, &value).unwrap();
        assert_eq!(reader.first_present(&["exceptions", "edge_cases"]), "edge_cases");

        let empty = json!({});
        let reader = FieldReader::new(ComponentKind::Rebuttal, &empty).unwrap();
        assert_eq!(reader.first_present(&["exceptions", "edge_cases"]), "exceptions");
    }
}
