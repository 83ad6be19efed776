//! Error types for the point tracker
//!
//! Configuration and lookup failures are errors. Pool exhaustion is not:
//! it is reported as `None` by `ObjectPool::acquire`.

use std::fmt;

/// Result type for point tracker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Point tracker errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid setup parameters (missing prototype, etc.)
    Configuration(String),

    /// Initialization failed (duplicate pool, tracker set up twice, etc.)
    InitializationFailed(String),

    /// Invalid resource (unknown entity, missing mesh, unknown pool, etc.)
    InvalidResource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
