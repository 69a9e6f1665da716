//! Observability subsystem
//!
//! Structured JSON logging of lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation outcomes
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! The chain and breaker never log. The phase-gate layer logs around them.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

impl Logger {
    /// Log a lifecycle event at its default severity
    pub fn event(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(event.severity(), event.as_str(), fields);
    }
}
