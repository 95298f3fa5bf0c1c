use std::fs;
use std::path::PathBuf;
use thirteenth_core::{
    EndReason, FaceRank, GameConfig, GenrePointBehavior, SuccessCondition, TrophyPileInitial,
};
use thirteenth_sim::{
    run_batch, run_game, run_single, write_json, write_text, BatchConfig, BatchSummary,
    CancelToken, GameTrace, SimError, TextReport,
};

fn config() -> GameConfig {
    GameConfig {
        max_rounds: 300,
        max_strikes: 3,
        num_players: 4,
        genre_points: 13,
        genre_point_behavior: GenrePointBehavior::RerollPlusOne,
        success_condition: SuccessCondition::EqualOrHigher,
        jack_modifier: 1,
        queen_modifier: 2,
        king_modifier: 3,
        success_number_cards: 1,
        failure_number_cards: 1,
        low_fallout_face_card: FaceRank::Jack,
        high_fallout_face_card: FaceRank::Queen,
        include_aces: true,
        include_twos: true,
        include_threes: true,
        include_fours: true,
        include_fives: false,
        include_initial_face_card: true,
        initial_face_card_type: FaceRank::Jack,
        trophy_pile_initial: TrophyPileInitial::Bottom,
        shuffle_trophy_on_fail: false,
        shuffle_trophy_on_face_card: true,
        shuffle_trophy_on_joker: true,
    }
}

fn batch(runs: u64, workers: usize) -> BatchConfig {
    BatchConfig {
        runs,
        seed: 0xC0FFEE,
        workers,
        progress_every: 10,
    }
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("thirteenth-sim-{}", std::process::id()))
}

#[test]
fn summary_does_not_depend_on_worker_count() {
    let token = CancelToken::new();
    let single = run_batch(&config(), &batch(60, 1), &token, |_| {}).expect("one worker");
    let many = run_batch(&config(), &batch(60, 4), &token, |_| {}).expect("four workers");
    assert_eq!(single, many);
    assert_eq!(single.runs, 60);
    assert!(!single.cancelled);
    assert_eq!(single.end_reasons.values().sum::<u64>(), 60);
}

#[test]
fn summary_matches_sequential_replay() {
    let summary = run_batch(&config(), &batch(25, 3), &CancelToken::new(), |_| {}).expect("batch");
    let mut expected = BatchSummary::default();
    for index in 0..25 {
        expected.record(&run_game(&config(), 0xC0FFEE, index));
    }
    assert_eq!(summary, expected);
}

#[test]
fn progress_reports_every_tenth_run_and_the_tail() {
    let mut seen = Vec::new();
    run_batch(&config(), &batch(35, 2), &CancelToken::new(), |progress| {
        seen.push(progress.completed)
    })
    .expect("batch");
    assert_eq!(seen, vec![10, 20, 30, 35]);
}

#[test]
fn cancellation_keeps_a_consistent_partial_summary() {
    let token = CancelToken::new();
    let stopper = token.clone();
    let summary = run_batch(&config(), &batch(100_000, 2), &token, |progress| {
        if progress.completed >= 20 {
            stopper.cancel();
        }
    })
    .expect("batch");
    assert!(summary.cancelled);
    assert!(summary.runs >= 20);
    assert!(summary.runs < 100_000);
    assert_eq!(summary.end_reasons.values().sum::<u64>(), summary.runs);
    assert!(summary.wins <= summary.runs);
}

#[test]
fn invalid_config_fails_before_any_run() {
    let mut bad = config();
    bad.max_rounds = 0;
    let err = run_batch(&bad, &batch(5, 1), &CancelToken::new(), |_| {}).expect_err("invalid");
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn reports_write_to_disk() {
    let dir = temp_dir();
    let summary = run_batch(&config(), &batch(12, 2), &CancelToken::new(), |_| {}).expect("batch");
    let json_path = dir.join("summary.json");
    write_json(&json_path, &summary).expect("json");
    let back: BatchSummary =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("read")).expect("parse");
    assert_eq!(back, summary);

    let text_path = dir.join("summary.txt");
    write_text(&text_path, &summary).expect("text");
    let text = fs::read_to_string(&text_path).expect("read");
    assert!(text.starts_with(&format!("{}/12 wins", summary.wins)));
    assert!(text.contains("End Reasons:"));
}

#[test]
fn trace_round_trips_and_renders() {
    let trace = run_single(&config(), 42).expect("single");
    let path = temp_dir().join("trace.json");
    write_json(&path, &trace).expect("write");
    let back: GameTrace =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(back.result, trace.result);
    assert_eq!(back.events, trace.events);

    let report = trace.to_text_report();
    assert!(report.starts_with("seed: 0x2a"));
    assert!(report.contains(&trace.result.end_reason.to_string()));
    assert!(matches!(
        trace.result.end_reason,
        EndReason::Victory
            | EndReason::ThreatDeckEmpty
            | EndReason::AllPlayersEliminated { .. }
            | EndReason::Timeout
    ));
}
