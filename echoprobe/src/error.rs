use std::fmt;
use thiserror::Error;

/// Configuration errors raised before any round runs.
///
/// These are never recovered inside the engine: a run that hits one of them
/// performs zero adapter calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FuzzError {
    /// The domain describes an empty value space
    #[error("Invalid domain: {message}")]
    InvalidDomain { message: String },

    /// The run configuration cannot be executed
    #[error("Invalid config: {field} {message}")]
    InvalidConfig { field: String, message: String },

    /// A seed string could not be parsed
    #[error("Invalid seed '{input}': expected a decimal or 0x-prefixed hex u64")]
    InvalidSeed { input: String },
}

impl FuzzError {
    pub fn invalid_domain(message: impl Into<String>) -> Self {
        Self::InvalidDomain {
            message: message.into(),
        }
    }

    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failure reported by a target adapter for a single write or read.
///
/// The engine turns these into a recorded round outcome instead of
/// propagating them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterError {
    pub cause: String,
}

impl AdapterError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    /// Wrap any error, keeping its full source chain in the cause text
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut cause = err.to_string();
        let mut source = err.source();
        while let Some(inner) = source {
            cause.push_str(": ");
            cause.push_str(&inner.to_string());
            source = inner.source();
        }
        Self { cause }
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Adapter error: {}", self.cause)
    }
}

impl std::error::Error for AdapterError {}
