//! Error types for PetStats core.

use std::{error::Error, fmt, io};

/// Error type for statistics operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A pet or visit store could not answer.
    Collaborator(String),
    /// Stored records are missing data or disagree with each other.
    DataIntegrity(String),
    /// A count handed to the aggregator was out of range.
    InvalidInput(String),
    /// Any other failure while aggregating.
    Computation(String),
    /// A configuration value could not be used.
    Config(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collaborator(message) => write!(f, "store unavailable: {message}"),
            Self::DataIntegrity(message) => write!(f, "data integrity violation: {message}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Computation(message) => write!(f, "statistics computation failed: {message}"),
            Self::Config(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for StatsError {}

impl From<io::Error> for StatsError {
    fn from(value: io::Error) -> Self {
        Self::Collaborator(value.to_string())
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

/// Convenience result type for PetStats core.
pub type Result<T> = std::result::Result<T, StatsError>;
