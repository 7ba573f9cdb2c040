//! Tests for the round state machine.

use strictly_guessing::{
    ANONYMOUS_PLAYER, Direction, FeedbackTier, FixedTargets, GuessOutcome, ManualClock,
    RoundEngine, RoundError, RoundStatus, SeededTargets, TargetSource,
};

fn engine_with_target(target: i64) -> (RoundEngine<FixedTargets, ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_700_000_000_000);
    let engine = RoundEngine::new(FixedTargets::new([target]), clock.clone());
    (engine, clock)
}

#[test]
fn test_start_resets_round() {
    let (mut engine, _clock) = engine_with_target(42);
    let round = engine.start("Ann");
    assert_eq!(round.target().value(), 42);
    assert_eq!(*round.attempts(), 0);
    assert!(round.history().is_empty());
    assert_eq!(*round.status(), RoundStatus::Playing);
    assert_eq!(*round.started_at_ms(), 1_700_000_000_000);
}

#[test]
fn test_guess_before_start_fails() {
    let (mut engine, _clock) = engine_with_target(42);
    assert_eq!(engine.submit_guess("42"), Err(RoundError::NoActiveRound));
}

#[test]
fn test_invalid_guesses_leave_round_untouched() {
    let (mut engine, _clock) = engine_with_target(42);
    engine.start("Ann");
    engine.submit_guess("10").expect("Valid guess");

    for raw in ["0", "101", "abc", "", "-5", "42.0"] {
        let result = engine.submit_guess(raw);
        assert!(
            matches!(result, Err(RoundError::InvalidGuess { .. })),
            "{raw:?} should be rejected"
        );
    }

    let round = engine.round().expect("Round exists");
    assert_eq!(*round.attempts(), 1);
    assert_eq!(round.history().len(), 1);
    assert_eq!(*round.status(), RoundStatus::Playing);
}

#[test]
fn test_misses_append_history_in_order() {
    let (mut engine, _clock) = engine_with_target(50);
    engine.start("Ann");

    let outcome = engine.submit_guess("10").expect("Valid guess");
    assert_eq!(outcome.tier(), FeedbackTier::Cold(Direction::TooLow));
    assert!(matches!(outcome, GuessOutcome::Continue { attempts: 1, .. }));

    engine.submit_guess(" 65 ").expect("Valid guess");
    engine.submit_guess("53").expect("Valid guess");

    let round = engine.round().expect("Round exists");
    let guesses: Vec<u8> = round.history().iter().map(|r| r.guess().value()).collect();
    assert_eq!(guesses, [10, 65, 53]);
    assert_eq!(*round.history()[1].tier(), FeedbackTier::Warm(Direction::TooHigh));
    assert_eq!(*round.history()[2].tier(), FeedbackTier::VeryClose);
    assert_eq!(*round.attempts(), 3);
}

#[test]
fn test_first_try_win_produces_one_result() {
    let (mut engine, clock) = engine_with_target(77);
    engine.start("Ann");
    clock.advance_ms(4_999);

    let outcome = engine.submit_guess("77").expect("Valid guess");
    let GuessOutcome::Won { record, result } = outcome else {
        panic!("Expected a win");
    };

    assert_eq!(*record.tier(), FeedbackTier::Exact);
    assert_eq!(*result.attempts(), 1);
    assert_eq!(*result.time_taken_seconds(), 4);
    assert_eq!(*result.score(), 100 + 16);
    assert_eq!(*result.target_number(), 77);
    assert_eq!(result.player_name(), "Ann");
    assert_eq!(*result.timestamp(), 1_700_000_004_999);
    assert_eq!(*engine.round().expect("Round exists").status(), RoundStatus::Won);
}

#[test]
fn test_score_uses_attempts_and_elapsed_time() {
    let (mut engine, clock) = engine_with_target(30);
    engine.start("Ann");
    for raw in ["90", "10", "20", "35"] {
        engine.submit_guess(raw).expect("Valid guess");
    }
    clock.advance_secs(10);

    let GuessOutcome::Won { result, .. } = engine.submit_guess("30").expect("Valid guess")
    else {
        panic!("Expected a win");
    };
    assert_eq!(*result.attempts(), 5);
    assert_eq!(*result.score(), 70);
}

#[test]
fn test_clock_going_backwards_counts_as_no_time() {
    let (mut engine, clock) = engine_with_target(77);
    engine.start("Ann");
    clock.set_ms(1_699_999_990_000);

    let GuessOutcome::Won { result, .. } = engine.submit_guess("77").expect("Valid guess")
    else {
        panic!("Expected a win");
    };
    assert_eq!(*result.time_taken_seconds(), 0);
    assert_eq!(*result.score(), 120);
    assert_eq!(*result.timestamp(), 1_699_999_990_000);
}

#[test]
fn test_guess_after_win_fails_without_effect() {
    let (mut engine, _clock) = engine_with_target(5);
    engine.start("Ann");
    engine.submit_guess("5").expect("Valid guess");

    assert_eq!(engine.submit_guess("5"), Err(RoundError::RoundAlreadyComplete));
    assert_eq!(engine.submit_guess("abc"), Err(RoundError::RoundAlreadyComplete));

    let round = engine.round().expect("Round exists");
    assert_eq!(*round.attempts(), 1);
    assert_eq!(round.history().len(), 1);
}

#[test]
fn test_start_replaces_unfinished_round() {
    let clock = ManualClock::new(0);
    let mut engine = RoundEngine::new(FixedTargets::new([10, 20]), clock.clone());
    engine.start("Ann");
    engine.submit_guess("50").expect("Valid guess");

    clock.advance_secs(30);
    let round = engine.start("Bob");
    assert_eq!(round.player_name(), "Bob");
    assert_eq!(round.target().value(), 20);
    assert_eq!(*round.attempts(), 0);
    assert_eq!(*round.started_at_ms(), 30_000);
}

#[test]
fn test_start_after_win_allows_play_again() {
    let (mut engine, _clock) = engine_with_target(5);
    engine.start("Ann");
    engine.submit_guess("5").expect("Valid guess");
    engine.start("Ann");
    assert!(engine.submit_guess("6").is_ok());
}

#[test]
fn test_blank_name_becomes_anonymous() {
    let (mut engine, _clock) = engine_with_target(5);
    assert_eq!(engine.start("   ").player_name(), ANONYMOUS_PLAYER);
}

#[test]
fn test_no_attempt_cap() {
    let (mut engine, _clock) = engine_with_target(100);
    engine.start("Ann");
    for _ in 0..50 {
        engine.submit_guess("1").expect("Valid guess");
    }
    let GuessOutcome::Won { result, .. } = engine.submit_guess("100").expect("Valid guess")
    else {
        panic!("Expected a win");
    };
    assert_eq!(*result.attempts(), 51);
    assert_eq!(*result.score(), 10 + 20);
}

#[test]
fn test_recent_returns_tail() {
    let (mut engine, _clock) = engine_with_target(100);
    engine.start("Ann");
    for raw in ["1", "2", "3", "4"] {
        engine.submit_guess(raw).expect("Valid guess");
    }
    let round = engine.round().expect("Round exists");
    let recent: Vec<u8> = round.recent(2).iter().map(|r| r.guess().value()).collect();
    assert_eq!(recent, [3, 4]);
    assert_eq!(round.recent(10).len(), 4);
}

#[test]
fn test_seeded_engine_is_reproducible() {
    let mut a = SeededTargets::new(2024);
    let mut b = SeededTargets::new(2024);
    let targets_a: Vec<u8> = (0..10).map(|_| a.next_target().value()).collect();
    let targets_b: Vec<u8> = (0..10).map(|_| b.next_target().value()).collect();
    assert_eq!(targets_a, targets_b);

    let mut engine = RoundEngine::new(SeededTargets::new(2024), ManualClock::new(0));
    assert_eq!(engine.start("Ann").target().value(), targets_a[0]);
}
