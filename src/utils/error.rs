// Error handling utilities
// Author: Gabriel Demetrios Lafis

use std::error::Error;
use std::fmt;

use crate::request::RequestError;
use crate::security::SecurityError;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Security(SecurityError),
    Request(RequestError),
    Config(String),
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Security(err) => write!(f, "Security error: {}", err),
            AppError::Request(err) => write!(f, "Request error: {}", err),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl Error for AppError {}

impl From<SecurityError> for AppError {
    fn from(err: SecurityError) -> Self {
        AppError::Security(err)
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        AppError::Request(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
