use crate::run_result::RunResult;
use crate::{
    summarize, Engine, FailureDetail, FuzzConfig, IntRange, MemoryCell, Retention, Round, Seed,
    Stage, Verdict,
};

fn result_with(rounds: Vec<Round<i64>>, requested: u64) -> RunResult<i64> {
    let mut result = RunResult::new(Seed(7), "[1, 1000]".to_string(), requested, Retention::All);
    for round in rounds {
        result.record(round);
    }
    result.finish(false);
    result
}

#[test]
fn test_summarize_pass() {
    let result = Engine::new(FuzzConfig::new().with_rounds(5))
        .run(IntRange::default(), Seed(42), MemoryCell::new())
        .unwrap();
    let summary = summarize(&result);

    assert_eq!(summary.verdict, Verdict::Pass);
    assert_eq!(summary.first_failure, None);
    assert_eq!(summary.to_string(), "PASS: 5/5 rounds passed (seed 42)");
}

#[test]
fn test_summarize_mismatch() {
    let result = result_with(
        vec![
            Round::pass(0, 10, 10),
            Round::mismatch(1, 817, 433),
            Round::mismatch(2, 5, 817),
        ],
        3,
    );
    let summary = summarize(&result);

    assert_eq!(summary.verdict, Verdict::Fail);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(
        summary.first_failure,
        Some(FailureDetail::Mismatch {
            index: 1,
            expected: "817".to_string(),
            observed: "433".to_string(),
        })
    );
    assert_eq!(
        summary.to_string(),
        "FAIL at round 1: expected 817, observed 433 (seed 7)"
    );
}

#[test]
fn test_summarize_adapter_error() {
    let result = result_with(
        vec![Round::adapter_error(0, 12, Stage::Read, "timed out")],
        1,
    );
    let summary = summarize(&result);

    assert_eq!(summary.first_failure.as_ref().map(|f| f.index()), Some(0));
    assert_eq!(
        summary.to_string(),
        "FAIL at round 0: read failed: timed out (seed 7)"
    );
}

#[test]
fn test_summarize_reports_cancellation() {
    let mut result = RunResult::new(Seed(3), "[1, 1000]".to_string(), 10, Retention::All);
    result.record(Round::pass(0, 1, 1));
    result.finish(true);

    assert_eq!(
        summarize(&result).to_string(),
        "PASS: 1/1 rounds passed (cancelled after 1/10 rounds) (seed 3)"
    );
}

#[test]
fn test_summarize_does_not_mutate() {
    let result = result_with(vec![Round::pass(0, 4, 4), Round::mismatch(1, 4, 5)], 2);
    let before = format!("{:?}", result);
    let first = summarize(&result);
    let second = summarize(&result);

    assert_eq!(first, second);
    assert_eq!(format!("{:?}", result), before);
}
