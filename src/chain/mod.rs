//! Toulmin chain state machine
//!
//! Holds up to seven validated components for one query and enforces the
//! dependency order between them:
//!
//! ```text
//! Data -> Claim -> Warrant -> Backing -> Rebuttal -> Qualifier -> Verdict
//! ```
//!
//! Phase is a projection of which slots are populated:
//!
//! | Phase | Populated                            |
//! |-------|--------------------------------------|
//! | 0     | nothing, or Data alone               |
//! | 1     | Data, Claim (and maybe Warrant)      |
//! | 2     | through Backing (and maybe Rebuttal) |
//! | 3     | through Qualifier                    |
//! | 4     | Verdict                              |
//!
//! The circuit breaker runs when Warrant, Backing or Rebuttal is submitted and
//! again in [`ToulminChain::run_logic_checks`].

mod machine;
mod render;
mod state;

pub use machine::{ToulminChain, QUERY_MIN_CHARS};
pub use render::TABLE_CELL_CHARS;
pub use state::ChainSlots;
