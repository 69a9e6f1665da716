//! CLI module for toulmini
//!
//! Provides command-line interface for:
//! - validate: Check one component payload
//! - assemble: Build and export a complete chain
//! - gate: Run one stateless phase gate
//! - table: Render a chain as a markdown table
//! - config: Show the resolved configuration

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{assemble, execute, open_gate, resolve_config, run, run_command, table, validate};
pub use errors::{CliError, CliResult};
pub use io::{parse_object, read_request, write_error, write_response};
