//! Value spaces the generator draws from.

use crate::{FuzzError, FuzzResult};
use rand_core::RngCore;
use serde::Serialize;
use std::fmt;

/// A space of legal generated inputs together with its equality rule.
pub trait Domain {
    type Value: Clone + PartialEq + fmt::Debug + fmt::Display + Serialize;

    /// Reject domains that cannot produce a value
    fn validate(&self) -> FuzzResult<()>;

    /// Draw one value uniformly from the domain
    fn sample<R: RngCore + ?Sized>(&self, rng: &mut R) -> Self::Value;

    /// Whether a read-back value counts as the written one.
    ///
    /// Scalar domains compare exactly.
    fn equivalent(&self, expected: &Self::Value, observed: &Self::Value) -> bool {
        expected == observed
    }

    /// Short human-readable description, e.g. `[1, 1000]`
    fn label(&self) -> String;
}

/// Inclusive integer bounds `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntRange {
    min: i64,
    max: i64,
}

impl Default for IntRange {
    fn default() -> Self {
        Self { min: 1, max: 1000 }
    }
}

impl IntRange {
    pub fn new(min: i64, max: i64) -> FuzzResult<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Build without checking bounds; `validate` catches it later
    pub fn unchecked(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of values in the range, `2^64` for the full `i64` range
    pub fn span(&self) -> u128 {
        (self.max as i128 - self.min as i128 + 1) as u128
    }
}

impl Domain for IntRange {
    type Value = i64;

    fn validate(&self) -> FuzzResult<()> {
        if self.min > self.max {
            return Err(FuzzError::invalid_domain(format!(
                "min ({}) must not exceed max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    // Widening-multiply rejection sampling over a single u64 draw per attempt.
    // Kept explicit so a seed replays identically regardless of rand versions.
    fn sample<R: RngCore + ?Sized>(&self, rng: &mut R) -> i64 {
        let span = self.span();
        if span > u64::MAX as u128 {
            return rng.next_u64() as i64;
        }

        let span = span as u64;
        let threshold = span.wrapping_neg() % span;
        loop {
            let product = rng.next_u64() as u128 * span as u128;
            if (product as u64) >= threshold {
                let offset = (product >> 64) as i128;
                return (self.min as i128 + offset) as i64;
            }
        }
    }

    fn label(&self) -> String {
        format!("[{}, {}]", self.min, self.max)
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
