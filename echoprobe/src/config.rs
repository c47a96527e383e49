use crate::{FuzzError, FuzzResult};
use serde::Serialize;

/// Which rounds a run keeps in its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Retention {
    /// Every round, in order
    #[default]
    All,
    /// Only rounds that did not pass; counters still cover every round
    FailuresOnly,
}

/// Settings for a single fuzz run
///
/// Immutable for the duration of the run.
#[derive(Debug, Clone, Serialize)]
pub struct FuzzConfig {
    /// Number of write/read cycles to attempt
    /// Must be positive
    pub rounds: u64,

    /// Halt after the first round that is not a pass
    pub stop_on_first_failure: bool,

    /// Which rounds to keep in the result
    pub retention: Retention,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            stop_on_first_failure: false,
            retention: Retention::All,
        }
    }
}

impl FuzzConfig {
    /// Create a new FuzzConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rounds(mut self, rounds: u64) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_stop_on_first_failure(mut self, stop: bool) -> Self {
        self.stop_on_first_failure = stop;
        self
    }

    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn validate(&self) -> FuzzResult<()> {
        if self.rounds == 0 {
            return Err(FuzzError::invalid_config(
                "rounds",
                "must be a positive integer",
            ));
        }
        Ok(())
    }
}
