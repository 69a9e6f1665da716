//! toulmini - A strict, deterministic validator for Toulmin argument chains
//!
//! A producer (typically a language model) emits an argument one component at
//! a time. toulmini validates each component against its schema, enforces the
//! order Data, Claim, Warrant, Backing, Rebuttal, Qualifier, Verdict, and trips
//! a circuit breaker when a declared strength is too weak to carry the claim.
//!
//! ```ignore
//! use toulmini::{BreakerPolicy, ComponentKind, ToulminChain, validate_component};
//!
//! let chain = ToulminChain::new("Is remote work more productive?", BreakerPolicy::strict())?;
//! let data = validate_component(ComponentKind::Data, data_json)?;
//! let chain = chain.submit(data)?;
//! ```

pub mod breaker;
pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod gates;
pub mod observability;

pub use breaker::{BreakerPolicy, CircuitBreaker};
pub use chain::{ChainSlots, ToulminChain};
pub use components::{validate_component, validate_value, Component, ComponentKind, StrengthLevel};
pub use config::Config;
pub use error::{Severity, ToulminError, ToulminErrorCode, ToulminResult, ValidationDetails};
pub use gates::{GateStep, Payloads, PhaseGate, PhaseTicket};
