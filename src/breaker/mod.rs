//! Circuit breaker engine
//!
//! Grades the declared strength of Warrant, Backing and Rebuttal against the
//! configured [`BreakerPolicy`]. Independent of the chain: the chain calls it on
//! every submission and again in its logic-check sweep.

mod engine;
mod policy;

pub use engine::CircuitBreaker;
pub use policy::BreakerPolicy;
