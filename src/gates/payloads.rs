//! Raw component payloads handed to a gate

use std::collections::BTreeMap;

use serde_json::Value;

use crate::components::{ComponentKind, Vocabulary};

/// Raw JSON text per component, as a producer emitted it.
///
/// A blank payload counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payloads {
    raw: BTreeMap<ComponentKind, String>,
}

impl Payloads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ComponentKind, raw: impl Into<String>) -> Self {
        self.insert(kind, raw);
        self
    }

    pub fn insert(&mut self, kind: ComponentKind, raw: impl Into<String>) {
        self.raw.insert(kind, raw.into());
    }

    /// Payload for `kind`, or `None` when absent or blank
    pub fn get(&self, kind: ComponentKind) -> Option<&str> {
        self.raw
            .get(&kind)
            .map(String::as_str)
            .filter(|raw| !raw.trim().is_empty())
    }

    /// Entries of `required` with no usable payload, in the order given
    pub fn missing(&self, required: &[ComponentKind]) -> Vec<ComponentKind> {
        required.iter().copied().filter(|k| self.get(*k).is_none()).collect()
    }

    /// Kinds with a usable payload, in canonical order
    pub fn present(&self) -> Vec<ComponentKind> {
        ComponentKind::ALL
            .iter()
            .copied()
            .filter(|k| self.get(*k).is_some())
            .collect()
    }

    /// Collects payloads from a request object keyed by component name.
    ///
    /// String values are taken as raw JSON text; objects are re-encoded; null
    /// is absent. Other keys are ignored.
    pub fn from_request(request: &Value) -> Self {
        let mut payloads = Self::new();
        for &kind in ComponentKind::ALL {
            match request.get(kind.as_str()) {
                None | Some(Value::Null) => {}
                Some(Value::String(raw)) => payloads.insert(kind, raw.as_str()),
                Some(other) => payloads.insert(kind, other.to_string()),
            }
        }
        payloads
    }
}
