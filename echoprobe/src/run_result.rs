use crate::config::Retention;
use crate::generator::Seed;
use crate::round::{Outcome, Round};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Overall verdict of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Per-outcome counters over every completed round, retained or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Tally {
    pub passed: u64,
    pub mismatched: u64,
    pub adapter_errors: u64,
}

impl Tally {
    pub fn failed(&self) -> u64 {
        self.mismatched + self.adapter_errors
    }

    fn count(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Mismatch => self.mismatched += 1,
            Outcome::AdapterError { .. } => self.adapter_errors += 1,
        }
    }
}

/// Aggregate of all rounds in one engine run
///
/// Round indices are unique and strictly increasing. Under
/// [`Retention::All`] they are also contiguous from 0.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult<V> {
    pub seed: Seed,
    pub domain: String,
    pub rounds_requested: u64,
    pub rounds_completed: u64,
    pub retention: Retention,
    pub rounds: Vec<Round<V>>,
    pub tally: Tally,
    /// A stop was requested before the round budget ran out
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl<V> RunResult<V> {
    pub(crate) fn new(
        seed: Seed,
        domain: String,
        rounds_requested: u64,
        retention: Retention,
    ) -> Self {
        let capacity = match retention {
            Retention::All => rounds_requested.min(4096) as usize,
            Retention::FailuresOnly => 0,
        };
        Self {
            seed,
            domain,
            rounds_requested,
            rounds_completed: 0,
            retention,
            rounds: Vec::with_capacity(capacity),
            tally: Tally::default(),
            cancelled: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub(crate) fn record(&mut self, round: Round<V>) {
        debug_assert_eq!(round.index, self.rounds_completed);
        self.tally.count(&round.outcome);
        self.rounds_completed += 1;

        if self.retention == Retention::All || !round.is_pass() {
            self.rounds.push(round);
        }
    }

    pub(crate) fn finish(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
        self.finished_at = Some(Utc::now());
    }

    /// Pass iff no completed round was a mismatch or adapter error
    pub fn verdict(&self) -> Verdict {
        if self.tally.failed() == 0 {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        self.verdict() == Verdict::Pass
    }

    /// The earliest round that did not pass
    pub fn first_failure(&self) -> Option<&Round<V>> {
        self.rounds.iter().find(|r| !r.is_pass())
    }

    pub fn failures(&self) -> impl Iterator<Item = &Round<V>> {
        self.rounds.iter().filter(|r| !r.is_pass())
    }
}
