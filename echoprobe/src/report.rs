//! Turning a run into a verdict a human (or a CI log) can act on.

use crate::round::{Outcome, Round, Stage};
use crate::{RunResult, Seed, Verdict};
use serde::Serialize;
use std::fmt;

/// What went wrong in the first failing round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureDetail {
    Mismatch {
        index: u64,
        expected: String,
        observed: String,
    },
    AdapterError {
        index: u64,
        expected: String,
        stage: Stage,
        cause: String,
    },
}

impl FailureDetail {
    pub fn index(&self) -> u64 {
        match self {
            FailureDetail::Mismatch { index, .. } | FailureDetail::AdapterError { index, .. } => {
                *index
            }
        }
    }

    fn from_round<V: fmt::Display>(round: &Round<V>) -> Option<Self> {
        match &round.outcome {
            Outcome::Pass => None,
            Outcome::Mismatch => Some(FailureDetail::Mismatch {
                index: round.index,
                expected: round.input.to_string(),
                observed: round
                    .observed
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "?".to_string()),
            }),
            Outcome::AdapterError { stage, cause } => Some(FailureDetail::AdapterError {
                index: round.index,
                expected: round.input.to_string(),
                stage: *stage,
                cause: cause.clone(),
            }),
        }
    }
}

/// Verdict record for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub verdict: Verdict,
    pub seed: Seed,
    pub rounds_requested: u64,
    pub rounds_completed: u64,
    pub passed: u64,
    pub failed: u64,
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_failure: Option<FailureDetail>,
}

/// Summarize a run without touching it
pub fn summarize<V: fmt::Display>(result: &RunResult<V>) -> Summary {
    Summary {
        verdict: result.verdict(),
        seed: result.seed,
        rounds_requested: result.rounds_requested,
        rounds_completed: result.rounds_completed,
        passed: result.tally.passed,
        failed: result.tally.failed(),
        cancelled: result.cancelled,
        first_failure: result.first_failure().and_then(FailureDetail::from_round),
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.first_failure {
            None => write!(
                f,
                "{}: {}/{} rounds passed",
                self.verdict, self.passed, self.rounds_completed
            )?,
            Some(FailureDetail::Mismatch {
                index,
                expected,
                observed,
            }) => write!(
                f,
                "{} at round {}: expected {}, observed {}",
                self.verdict, index, expected, observed
            )?,
            Some(FailureDetail::AdapterError {
                index,
                stage,
                cause,
                ..
            }) => write!(
                f,
                "{} at round {}: {} failed: {}",
                self.verdict, index, stage, cause
            )?,
        }

        if self.cancelled {
            write!(
                f,
                " (cancelled after {}/{} rounds)",
                self.rounds_completed, self.rounds_requested
            )?;
        }
        write!(f, " (seed {})", self.seed)
    }
}
