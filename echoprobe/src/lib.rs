//! # echoprobe
//!
//! **Write it, read it back, check it stuck.**
//!
//! echoprobe is a randomized consistency fuzzer for anything that exposes a
//! "set value" and "get value" pair. It drives the target with seeded random
//! inputs and checks that each write is observable by the following read.
//!
//! ## Quick Start
//!
//! ```rust
//! use echoprobe::{summarize, Engine, FuzzConfig, FuzzResult, IntRange, MemoryCell, Seed};
//!
//! fn main() -> FuzzResult<()> {
//!     let engine = Engine::new(FuzzConfig::new().with_rounds(5));
//!     let domain = IntRange::new(1, 1000)?;
//!
//!     let result = engine.run(domain, Seed(42), MemoryCell::new())?;
//!     assert!(result.is_pass());
//!     println!("{}", summarize(&result));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Domains
//! A [`Domain`] is the space generated values come from, plus the equality rule
//! used to compare a read-back value with the written one.
//!
//! ### Adapters
//! An [`Adapter`] performs `write` and `read` against the system under test.
//! Transport, confirmation waits and timeouts live behind it.
//!
//! ### Rounds
//! Each round writes one generated value, reads it back and records `Pass`,
//! `Mismatch` or `AdapterError`. A [`Seed`] replays the exact same inputs.

pub mod adapter;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod generator;
pub mod report;
pub mod round;
pub mod run_result;

pub use adapter::{Adapter, Faulty, MemoryCell};
pub use config::{FuzzConfig, Retention};
pub use domain::{Domain, IntRange};
pub use engine::{Engine, StopSignal};
pub use error::{AdapterError, FuzzError};
pub use generator::{Generator, Seed};
pub use report::{summarize, FailureDetail, Summary};
pub use round::{Outcome, Round, Stage};
pub use run_result::{RunResult, Tally, Verdict};

/// Result type for echoprobe operations
pub type FuzzResult<T> = Result<T, FuzzError>;

#[cfg(test)]
mod tests;
