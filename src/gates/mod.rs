//! Stateless phase gates
//!
//! The producer walks four gates in order:
//!
//! 1. `initiate` - query only, expects Data and Claim
//! 2. `logic_bridge` - Data, Claim; expects Warrant and Backing
//! 3. `stress_test` - through Backing; expects Rebuttal and Qualifier
//! 4. `render_verdict` - through Qualifier; expects the Verdict
//!
//! `assemble` then validates the full seven-part chain. Gates are the only
//! layer that logs.

mod gate;
mod payloads;
mod ticket;

pub use gate::{PhaseGate, SUSTAIN_CONFIDENCE_FLOOR};
pub use payloads::Payloads;
pub use ticket::{GateStep, PhaseTicket};
