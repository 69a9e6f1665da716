//! CLI-specific error types

use std::io;

use serde_json::{json, Value};
use thiserror::Error;

use crate::error::ToulminError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Core(#[from] ToulminError),
}

impl CliError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        CliError::BadRequest(msg.into())
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Io(_) => "TOULMIN_CLI_IO_ERROR",
            CliError::Json(_) => "TOULMIN_CLI_JSON_ERROR",
            CliError::BadRequest(_) => "TOULMIN_CLI_BAD_REQUEST",
            CliError::Core(e) => e.code().code(),
        }
    }

    /// Error envelope written to stdout
    pub fn to_response(&self) -> Value {
        match self {
            CliError::Core(e) => {
                let mut body = e.to_json();
                if let Some(obj) = body.as_object_mut() {
                    obj.insert("status".into(), json!("error"));
                }
                body
            }
            other => json!({
                "status": "error",
                "code": other.code(),
                "message": other.to_string(),
            }),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
