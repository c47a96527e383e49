use serde::Serialize;
use std::fmt;

/// The adapter call that failed within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Write,
    Read,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Write => write!(f, "write"),
            Stage::Read => write!(f, "read"),
        }
    }
}

/// Terminal state of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The read-back value matched the written one
    Pass,
    /// The read-back value differed from the written one
    Mismatch,
    /// The write or the read did not complete
    AdapterError { stage: Stage, cause: String },
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    /// Get the failing stage and cause, None otherwise
    pub fn adapter_error(&self) -> Option<(Stage, &str)> {
        match self {
            Outcome::AdapterError { stage, cause } => Some((*stage, cause.as_str())),
            _ => None,
        }
    }
}

/// One write-then-read-then-compare cycle
///
/// Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Round<V> {
    /// 0-based position within the run
    pub index: u64,
    /// The generated value that was written
    pub input: V,
    /// What the read returned; absent when the write or read failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<V>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl<V> Round<V> {
    pub fn pass(index: u64, input: V, observed: V) -> Self {
        Self {
            index,
            input,
            observed: Some(observed),
            outcome: Outcome::Pass,
        }
    }

    pub fn mismatch(index: u64, input: V, observed: V) -> Self {
        Self {
            index,
            input,
            observed: Some(observed),
            outcome: Outcome::Mismatch,
        }
    }

    pub fn adapter_error(index: u64, input: V, stage: Stage, cause: impl Into<String>) -> Self {
        Self {
            index,
            input,
            observed: None,
            outcome: Outcome::AdapterError {
                stage,
                cause: cause.into(),
            },
        }
    }

    pub fn is_pass(&self) -> bool {
        self.outcome.is_pass()
    }
}
