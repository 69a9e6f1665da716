//! Error taxonomy for toulmini
//!
//! Error codes:
//! - TOULMIN_SHAPE_VIOLATION (REJECT)
//! - TOULMIN_MISSING_DEPENDENCY (REJECT)
//! - TOULMIN_CIRCUIT_BREAKER (REJECT, terminates the chain)
//! - TOULMIN_INVALID_CONFIGURATION (FATAL)
//!
//! Every error is a structured value. Nothing in the core downgrades an error
//! to a log line; the caller decides how to surface it.

use std::fmt;

use serde_json::{json, Map, Value};

use crate::components::{ComponentKind, StrengthLevel, Vocabulary};

/// Severity levels for toulmini errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The submission is rejected, the chain is unchanged
    Reject,
    /// The resolution attempt cannot continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToulminErrorCode {
    /// Payload failed structural, field or cross-field constraints
    ShapeViolation,
    /// A prerequisite component is absent
    MissingDependency,
    /// Structurally valid component rejected on strength grounds
    CircuitBreaker,
    /// Invalid process-wide policy value
    InvalidConfiguration,
}

impl ToulminErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ToulminErrorCode::ShapeViolation => "TOULMIN_SHAPE_VIOLATION",
            ToulminErrorCode::MissingDependency => "TOULMIN_MISSING_DEPENDENCY",
            ToulminErrorCode::CircuitBreaker => "TOULMIN_CIRCUIT_BREAKER",
            ToulminErrorCode::InvalidConfiguration => "TOULMIN_INVALID_CONFIGURATION",
        }
    }

    /// Returns the caller-facing error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ToulminErrorCode::ShapeViolation => "ShapeError",
            ToulminErrorCode::MissingDependency => "DependencyError",
            ToulminErrorCode::CircuitBreaker => "CircuitBreakerError",
            ToulminErrorCode::InvalidConfiguration => "ConfigurationError",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ToulminErrorCode::InvalidConfiguration => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for ToulminErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Field-level failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "citations[0].source")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or condition found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn too_short(field: impl Into<String>, min: usize, actual: usize) -> Self {
        Self::new(
            field,
            format!("at least {} characters", min),
            format!("{} characters", actual),
        )
    }

    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::new(
            field,
            format!("at most {} characters", max),
            format!("{} characters", actual),
        )
    }

    pub fn empty_list(field: impl Into<String>, what: &str) -> Self {
        Self::new(field, format!("at least 1 {}", what), "empty list")
    }

    /// Re-roots the field path under `prefix`
    fn nested_under(mut self, prefix: &str) -> Self {
        self.field = format!("{}.{}", prefix, self.field);
        self
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// toulmini error type with full context
#[derive(Debug, Clone)]
pub struct ToulminError {
    code: ToulminErrorCode,
    message: String,
    suggestion: Option<String>,
    /// Component the error is about, if any
    component: Option<ComponentKind>,
    /// Field-level details for shape violations
    details: Option<ValidationDetails>,
    /// Declared strength that tripped a breaker
    strength: Option<StrengthLevel>,
    /// Human label of the rejected component (principle, authority, ...)
    label: Option<String>,
    /// Operation that could not proceed (dependency errors)
    target: Option<String>,
    /// Missing prerequisites (dependency errors)
    missing: Vec<String>,
}

impl ToulminError {
    fn with_code(code: ToulminErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestion: None,
            component: None,
            details: None,
            strength: None,
            label: None,
            target: None,
            missing: Vec::new(),
        }
    }

    /// Create a shape violation for one field of a component
    pub fn shape(component: Option<ComponentKind>, details: ValidationDetails) -> Self {
        let mut err = Self::with_code(
            ToulminErrorCode::ShapeViolation,
            shape_message(component, &details),
        );
        err.component = component;
        err.details = Some(details);
        err
    }

    /// Create a shape violation for a payload that is not valid JSON
    pub fn malformed_json(component: ComponentKind, raw: &str, reason: impl fmt::Display) -> Self {
        let preview: String = if raw.trim().is_empty() {
            "(empty)".to_string()
        } else {
            raw.chars().take(200).collect()
        };
        Self::shape(
            Some(component),
            ValidationDetails::new("$root", "valid JSON object", preview),
        )
        .with_suggestion(format!(
            "The {} payload must be valid JSON with no preamble. Parser said: {}",
            component.as_str(),
            reason
        ))
    }

    /// Create a dependency error for `target` missing the listed prerequisites
    pub fn dependency(target: impl Into<String>, missing: Vec<String>) -> Self {
        let target = target.into();
        let mut err = Self::with_code(
            ToulminErrorCode::MissingDependency,
            format!("Cannot accept '{}': missing {}", target, missing.join(", ")),
        );
        err.suggestion = Some(format!("Complete prior phases before submitting {}", target));
        err.target = Some(target);
        err.missing = missing;
        err
    }

    /// Create a circuit breaker rejection (the chain's termination signal)
    pub fn circuit_breaker(
        component: ComponentKind,
        strength: StrengthLevel,
        label: impl Into<String>,
        verdict: &str,
        suggestion: impl Into<String>,
    ) -> Self {
        let label = label.into();
        let mut err = Self::with_code(
            ToulminErrorCode::CircuitBreaker,
            format!(
                "TERMINATION_SIGNAL: {} {}: strength '{}' for '{}'",
                component.as_str().to_uppercase(),
                verdict,
                strength,
                label
            ),
        );
        err.suggestion = Some(suggestion.into());
        err.component = Some(component);
        err.strength = Some(strength);
        err.label = Some(label);
        err
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::with_code(ToulminErrorCode::InvalidConfiguration, message.into())
    }

    /// Attach a remediation suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Re-scope a shape violation raised by a nested value (e.g. a citation)
    /// to its owning component and field path.
    pub fn nested(mut self, component: ComponentKind, prefix: &str) -> Self {
        if let Some(details) = self.details.take() {
            let details = details.nested_under(prefix);
            self.message = shape_message(Some(component), &details);
            self.details = Some(details);
        }
        self.component = Some(component);
        self
    }

    pub fn code(&self) -> ToulminErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn component(&self) -> Option<ComponentKind> {
        self.component
    }

    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }

    pub fn strength(&self) -> Option<StrengthLevel> {
        self.strength
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// True when a breaker tripped: retrying the same payload cannot succeed
    pub fn is_termination(&self) -> bool {
        self.code == ToulminErrorCode::CircuitBreaker
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Machine-readable context, keys in deterministic order
    pub fn context(&self) -> Value {
        let mut ctx = Map::new();
        if let Some(component) = self.component {
            ctx.insert("component".into(), json!(component.as_str()));
        }
        if let Some(details) = &self.details {
            ctx.insert("field".into(), json!(details.field));
            ctx.insert("expected".into(), json!(details.expected));
            ctx.insert("actual".into(), json!(details.actual));
        }
        if let Some(strength) = self.strength {
            ctx.insert("strength".into(), json!(strength.as_str()));
            ctx.insert("rejected".into(), json!(true));
        }
        if let Some(label) = &self.label {
            ctx.insert("label".into(), json!(label));
        }
        if let Some(target) = &self.target {
            ctx.insert("target".into(), json!(target));
            ctx.insert("missing".into(), json!(self.missing));
        }
        Value::Object(ctx)
    }

    /// JSON envelope for the tool layer
    pub fn to_json(&self) -> Value {
        json!({
            "error_type": self.code.kind(),
            "code": self.code.code(),
            "message": self.message,
            "suggestion": self.suggestion,
            "context": self.context(),
        })
    }
}

fn shape_message(component: Option<ComponentKind>, details: &ValidationDetails) -> String {
    match component {
        Some(kind) => format!("Invalid {}: {}", kind.as_str(), details),
        None => format!("Invalid payload: {}", details),
    }
}

impl fmt::Display for ToulminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code.code(), self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " | SUGGESTION: {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToulminError {}

/// Result type for toulmini operations
pub type ToulminResult<T> = Result<T, ToulminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ToulminErrorCode::ShapeViolation.code(), "TOULMIN_SHAPE_VIOLATION");
        assert_eq!(ToulminErrorCode::MissingDependency.code(), "TOULMIN_MISSING_DEPENDENCY");
        assert_eq!(ToulminErrorCode::CircuitBreaker.code(), "TOULMIN_CIRCUIT_BREAKER");
        assert_eq!(
            ToulminErrorCode::InvalidConfiguration.code(),
            "TOULMIN_INVALID_CONFIGURATION"
        );
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(ToulminErrorCode::ShapeViolation.severity(), Severity::Reject);
        assert_eq!(ToulminErrorCode::CircuitBreaker.severity(), Severity::Reject);
        assert_eq!(ToulminErrorCode::InvalidConfiguration.severity(), Severity::Fatal);
    }

    #[test]
    fn test_shape_error_carries_field() {
        let err = ToulminError::shape(
            Some(ComponentKind::Claim),
            ValidationDetails::too_short("statement", 10, 4),
        );
        assert_eq!(err.details().map(|d| d.field.as_str()), Some("statement"));
        assert!(err.message().contains("claim"));
        assert_eq!(err.context()["field"], "statement");
    }

    #[test]
    fn test_nested_rescopes_field_path() {
        let err = ToulminError::shape(None, ValidationDetails::missing_field("source"))
            .nested(ComponentKind::Backing, "citations[2]");
        assert_eq!(err.component(), Some(ComponentKind::Backing));
        assert_eq!(err.context()["field"], "citations[2].source");
        assert!(err.message().starts_with("Invalid backing"));
    }

    #[test]
    fn test_dependency_lists_missing() {
        let err = ToulminError::dependency("Backing", vec!["Warrant".into()]);
        assert_eq!(err.missing(), ["Warrant".to_string()]);
        assert_eq!(err.context()["missing"], json!(["Warrant"]));
        assert!(err.to_string().contains("SUGGESTION"));
    }

    #[test]
    fn test_breaker_is_termination() {
        let err = ToulminError::circuit_breaker(
            ComponentKind::Warrant,
            StrengthLevel::Weak,
            "If it is yellow it is cheese",
            "REJECTED",
            "Provide a stronger principle",
        );
        assert!(err.is_termination());
        assert!(err.message().contains("TERMINATION_SIGNAL"));
        assert!(err.message().contains("WARRANT REJECTED"));
        assert_eq!(err.context()["strength"], "weak");
        assert_eq!(err.to_json()["error_type"], "CircuitBreakerError");
    }

    #[test]
    fn test_malformed_json_preview_is_bounded() {
        let raw = "x".repeat(500);
        let err = ToulminError::malformed_json(ComponentKind::Data, &raw, "expected value");
        assert_eq!(err.details().map(|d| d.actual.len()), Some(200));

        let empty = ToulminError::malformed_json(ComponentKind::Data, "  ", "EOF");
        assert_eq!(empty.context()["actual"], "(empty)");
    }
}
