// Request orchestration module
// Author: Gabriel Demetrios Lafis

mod models;
mod orchestrator;
mod transport;

pub use models::*;
pub use orchestrator::*;
pub use transport::*;

use std::error::Error;
use std::fmt;

use crate::security::SecurityError;

/// Represents an error in the request module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    Validation(String),
    RateLimited(String),
    Network(String),
    Timeout(u64),
    HttpStatus { status: u16, status_text: String },
    Parse(String),
    Other(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            RequestError::RateLimited(msg) => write!(f, "{}", msg),
            RequestError::Network(msg) => write!(f, "Network error: {}", msg),
            RequestError::Timeout(ms) => write!(f, "Request timeout after {} ms", ms),
            RequestError::HttpStatus { status, status_text } => {
                write!(f, "HTTP {}: {}", status, status_text)
            },
            RequestError::Parse(msg) => write!(f, "{}", msg),
            RequestError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for RequestError {}

impl From<SecurityError> for RequestError {
    fn from(err: SecurityError) -> Self {
        RequestError::Validation(err.to_string())
    }
}
