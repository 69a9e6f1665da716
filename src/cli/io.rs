//! JSON I/O handling for CLI
//!
//! - Input: single JSON document via stdin (may span lines)
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read the raw request text from stdin
pub fn read_request() -> CliResult<String> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::bad_request("Empty input"));
    }
    Ok(input)
}

/// Parse request text as a JSON object
pub fn parse_object(input: &str) -> CliResult<Value> {
    let value: Value = serde_json::from_str(input)?;
    if !value.is_object() {
        return Err(CliError::bad_request("Request must be a JSON object"));
    }
    Ok(value)
}

/// Write a success response
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(writer: &mut W, err: &CliError) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, &err.to_response())?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
