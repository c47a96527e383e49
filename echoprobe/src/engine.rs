use crate::{
    Adapter, Domain, FuzzConfig, FuzzError, FuzzResult, Generator, Round, RunResult, Seed, Stage,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cloneable flag a caller can raise to end a run early.
///
/// The engine checks it before starting each round after the first, so the
/// in-flight round always completes and no partial round is recorded. A
/// signal belongs to one run; a run refuses a signal that is already raised.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// The fuzz loop.
///
/// Holds configuration only; nothing carries over between runs, so one
/// engine can drive any number of independent targets.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: FuzzConfig,
}

impl Engine {
    pub fn new(config: FuzzConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FuzzConfig {
        &self.config
    }

    /// Run the configured number of rounds against `adapter`
    ///
    /// Configuration and domain errors are returned before the adapter is
    /// touched. Adapter failures never surface as `Err`; they are recorded
    /// as round outcomes.
    pub fn run<D, A>(&self, domain: D, seed: Seed, adapter: A) -> FuzzResult<RunResult<D::Value>>
    where
        D: Domain,
        A: Adapter<D::Value>,
    {
        let mut generator = Generator::new(domain, seed)?;
        self.drive(&mut generator, adapter, None)
    }

    /// Same as [`Engine::run`], ending early once `stop` is raised
    ///
    /// Fails with `InvalidConfig` if `stop` is already raised, so a stale
    /// signal cannot produce a run without rounds.
    pub fn run_until<D, A>(
        &self,
        domain: D,
        seed: Seed,
        adapter: A,
        stop: &StopSignal,
    ) -> FuzzResult<RunResult<D::Value>>
    where
        D: Domain,
        A: Adapter<D::Value>,
    {
        let mut generator = Generator::new(domain, seed)?;
        self.drive(&mut generator, adapter, Some(stop))
    }

    /// Same as [`Engine::run`] but draws from a caller-owned generator
    pub fn run_with_generator<D, A>(
        &self,
        generator: &mut Generator<D>,
        adapter: A,
    ) -> FuzzResult<RunResult<D::Value>>
    where
        D: Domain,
        A: Adapter<D::Value>,
    {
        self.drive(generator, adapter, None)
    }

    fn drive<D, A>(
        &self,
        generator: &mut Generator<D>,
        mut adapter: A,
        stop: Option<&StopSignal>,
    ) -> FuzzResult<RunResult<D::Value>>
    where
        D: Domain,
        A: Adapter<D::Value>,
    {
        self.config.validate()?;
        if stop.is_some_and(StopSignal::is_stopped) {
            return Err(FuzzError::invalid_config(
                "stop_signal",
                "was raised before the run started",
            ));
        }

        let rounds = self.config.rounds;
        let seed = generator.seed();
        let domain_label = generator.domain().label();
        info!(
            "Starting run: {} rounds over {} with seed {}",
            rounds, domain_label, seed
        );

        let mut result = RunResult::new(seed, domain_label, rounds, self.config.retention);
        let mut cancelled = false;

        for index in 0..rounds {
            if index > 0 && stop.is_some_and(StopSignal::is_stopped) {
                info!("Stop requested, ending run after {} rounds", index);
                cancelled = true;
                break;
            }

            let round = self.play_round(index, generator, &mut adapter);
            let failed = !round.is_pass();
            result.record(round);

            if failed && self.config.stop_on_first_failure {
                info!("Stopping at first failure (round {})", index);
                break;
            }
        }

        result.finish(cancelled);
        info!(
            "Run finished: {} after {}/{} rounds ({} passed, {} mismatched, {} adapter errors)",
            result.verdict(),
            result.rounds_completed,
            rounds,
            result.tally.passed,
            result.tally.mismatched,
            result.tally.adapter_errors
        );

        Ok(result)
    }

    /// Writing -> (WriteFailed | Reading) -> (ReadFailed | Comparing) -> (Match | Mismatch)
    fn play_round<D, A>(
        &self,
        index: u64,
        generator: &mut Generator<D>,
        adapter: &mut A,
    ) -> Round<D::Value>
    where
        D: Domain,
        A: Adapter<D::Value>,
    {
        let value = generator.next_value();
        debug!(round = index, value = %value, "writing");

        if let Err(e) = adapter.write(&value) {
            warn!(round = index, cause = %e.cause, "write failed");
            return Round::adapter_error(index, value, Stage::Write, e.cause);
        }

        let observed = match adapter.read() {
            Ok(observed) => observed,
            Err(e) => {
                warn!(round = index, cause = %e.cause, "read failed");
                return Round::adapter_error(index, value, Stage::Read, e.cause);
            }
        };

        if generator.domain().equivalent(&value, &observed) {
            Round::pass(index, value, observed)
        } else {
            warn!(
                round = index,
                expected = %value,
                observed = %observed,
                "read-back mismatch"
            );
            Round::mismatch(index, value, observed)
        }
    }
}
