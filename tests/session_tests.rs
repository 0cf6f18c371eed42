//! Integration tests for whole sessions driven through clicks, items and ticks

use std::time::{Duration, Instant};

use trio_stack::core::{ActionError, ClickOutcome, ConfigError, Deck, Pattern, PatternId, Session};
use trio_stack::types::{Difficulty, LevelConfig, Outcome, PlayArea, Point, SessionState, Size};

fn level(pattern_types: u32, total_patterns: u32, storage_limit: u32) -> LevelConfig {
    LevelConfig {
        pattern_types,
        total_patterns,
        layer_count: 1,
        time_limit_secs: 120,
        hint_limit: 3,
        undo_limit: 3,
        storage_limit,
    }
}

fn started(config: LevelConfig, seed: u32) -> (Session, Instant) {
    let now = Instant::now();
    let mut session = Session::new(config, PlayArea::default(), seed).unwrap();
    session.start(now);
    (session, now)
}

/// One layer of well separated patterns with the given types, left to right
fn row_session(types: &[u32]) -> (Session, Instant) {
    let patterns = types
        .iter()
        .enumerate()
        .map(|(i, &type_id)| {
            let mut p = Pattern::new(type_id, Size::square(50.0));
            p.position = Point::new(100.0 * (i + 1) as f64, 100.0);
            p
        })
        .collect();
    let now = Instant::now();
    let mut session = Session::from_deck(level(2, 6, 7), Deck::from_patterns(patterns)).unwrap();
    session.start(now);
    (session, now)
}

/// Centre of the first pattern that can currently be picked
fn first_free_point(session: &Session) -> Option<Point> {
    session
        .deck()
        .free_patterns()
        .next()
        .map(|id| session.patterns()[id.index()].position)
}

#[test]
fn test_single_triplet_is_won_in_three_clicks() {
    let (mut session, t0) = started(level(1, 3, 3), 42);
    assert_eq!(session.patterns().len(), 3);
    assert!(session.patterns().iter().all(|p| p.type_id == 0));

    let mut outcomes = Vec::new();
    while let Some(point) = first_free_point(&session) {
        outcomes.push(session.handle_click(point, t0).unwrap());
    }

    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], ClickOutcome::Selected(_)));
    assert!(matches!(outcomes[1], ClickOutcome::Selected(_)));
    assert!(matches!(outcomes[2], ClickOutcome::Matched(_)));
    assert!(session.storage().is_empty());
    assert_eq!(session.score(), 10);
    assert_eq!(session.state(), SessionState::Won);
    assert_eq!(session.take_record().unwrap().outcome, Outcome::Won);
}

#[test]
fn test_store_of_one_is_lost_on_first_pick() {
    let size = Size::square(50.0);
    let mut a = Pattern::new(0, size);
    a.position = Point::new(100.0, 100.0);
    let mut b = Pattern::new(1, size);
    b.position = Point::new(300.0, 100.0);

    let t0 = Instant::now();
    let mut session =
        Session::from_deck(level(2, 6, 1), Deck::from_patterns(vec![a, b])).unwrap();
    session.start(t0);

    assert_eq!(
        session.handle_click(a.position, t0),
        Ok(ClickOutcome::StorageFull)
    );
    assert_eq!(session.storage().len(), 1);
    assert_eq!(session.state(), SessionState::Lost);
    assert_eq!(
        session.handle_click(b.position, t0),
        Err(ActionError::NotPlaying)
    );
}

#[test]
fn test_store_never_exceeds_limit() {
    for difficulty in Difficulty::ALL {
        for seed in 0..20 {
            let (mut session, t0) = started(difficulty.level_config(), seed);
            let limit = session.storage_limit();

            while session.state() == SessionState::Playing {
                let Some(point) = first_free_point(&session) else {
                    break;
                };
                session.handle_click(point, t0).unwrap();
                assert!(session.storage().len() <= limit);
            }
        }
    }
}

#[test]
fn test_every_click_on_a_free_pattern_makes_progress() {
    let (mut session, t0) = started(Difficulty::Hard.level_config(), 7);
    let mut clicks = 0;

    while session.state() == SessionState::Playing {
        let Some(point) = first_free_point(&session) else {
            break;
        };
        let before = session.deck().remaining();
        let outcome = session.handle_click(point, t0).unwrap();
        assert_ne!(outcome, ClickOutcome::Ignored);
        assert_eq!(session.deck().remaining(), before - 1);
        clicks += 1;
    }

    assert!(clicks <= session.patterns().len());
    assert!(session.state().is_terminal());
}

#[test]
fn test_click_outside_everything_is_ignored() {
    let (mut session, t0) = started(Difficulty::Easy.level_config(), 3);
    let outcome = session.handle_click(Point::new(-5000.0, -5000.0), t0);
    assert_eq!(outcome, Ok(ClickOutcome::Ignored));
    assert_eq!(session.history_len(), 0);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let mut config = level(1, 3, 3);
    config.layer_count = 0;
    assert_eq!(
        Session::new(config, PlayArea::default(), 1).unwrap_err(),
        ConfigError::ZeroLayers
    );

    let config = level(0, 3, 3);
    assert_eq!(
        Session::new(config, PlayArea::default(), 1).unwrap_err(),
        ConfigError::ZeroPatternTypes
    );
}

#[test]
fn test_following_a_hint_completes_the_pair() {
    let (mut session, t0) = row_session(&[0, 0, 1, 0, 0, 1, 0]);
    for id in [0, 1] {
        let point = session.patterns()[id].position;
        session.handle_click(point, t0).unwrap();
    }

    let hint = session.use_hint().unwrap();
    assert_eq!(hint, [PatternId(3), PatternId(4), PatternId(6)]);

    let point = session.patterns()[hint[0].index()].position;
    assert_eq!(
        session.handle_click(point, t0),
        Ok(ClickOutcome::Matched([PatternId(0), PatternId(1), PatternId(3)]))
    );
    assert_eq!(session.score(), 10);
    assert!(session.hint().is_none());
}

#[test]
fn test_hint_limit_is_enforced() {
    let (mut session, t0) = row_session(&[0, 0, 0, 0, 0]);
    for id in [0, 1] {
        let point = session.patterns()[id].position;
        session.handle_click(point, t0).unwrap();
    }

    for _ in 0..3 {
        session.use_hint().unwrap();
    }
    assert_eq!(session.use_hint(), Err(ActionError::HintsExhausted));
    assert_eq!(session.hint_uses(), (3, 3));
}

#[test]
fn test_fresh_table_has_no_hint() {
    // Three of a kind on the table are not enough without a pair already stored.
    let (mut session, _) = row_session(&[0, 0, 0, 1, 1, 1]);
    assert_eq!(session.use_hint(), Err(ActionError::NoHintAvailable));
    assert_eq!(session.hint_uses(), (0, 3));
}

#[test]
fn test_dead_end_hint_does_not_spend_a_use() {
    let (mut session, t0) = row_session(&[0, 0, 1, 0]);
    for id in [0, 1] {
        let point = session.patterns()[id].position;
        session.handle_click(point, t0).unwrap();
    }
    // A pair in store, but only one more of its type on the table.
    assert_eq!(session.use_hint(), Err(ActionError::NoHintAvailable));
    assert_eq!(session.hint_uses(), (0, 3));

    let size = Size::square(40.0);
    let mut bottom = Pattern::new(0, size);
    bottom.position = Point::new(100.0, 100.0);
    let mut top = Pattern::new(1, size);
    top.layer = 1;
    top.position = Point::new(100.0, 100.0);

    let mut stuck =
        Session::from_deck(level(2, 6, 7), Deck::from_patterns(vec![bottom, top])).unwrap();
    stuck.start(Instant::now());
    assert_eq!(stuck.use_hint(), Err(ActionError::NoHintAvailable));
    assert_eq!(stuck.hint_uses(), (0, 3));
}

#[test]
fn test_finishing_click_sets_time_taken() {
    let (mut session, t0) = started(level(1, 3, 3), 42);
    let mut at = t0;
    while let Some(point) = first_free_point(&session) {
        at += Duration::from_millis(1_250);
        session.handle_click(point, at).unwrap();
    }

    assert_eq!(session.state(), SessionState::Won);
    assert_eq!(
        session.take_record().unwrap().time_taken,
        Duration::from_millis(3_750)
    );
}

#[test]
fn test_undo_returns_pattern_to_table() {
    let (mut session, t0) = started(Difficulty::Easy.level_config(), 21);
    let point = first_free_point(&session).unwrap();
    let before = session.capture();

    let ClickOutcome::Selected(id) = session.handle_click(point, t0).unwrap() else {
        panic!("first click should only select");
    };
    assert!(session.patterns()[id.index()].cleared);

    session.use_undo().unwrap();
    assert_eq!(session.capture(), before);
    assert!(!session.patterns()[id.index()].cleared);
    assert_eq!(session.undo_uses().0, 1);
}

#[test]
fn test_undo_limit_and_empty_history() {
    let mut config = level(2, 6, 7);
    config.undo_limit = 1;
    let (mut session, t0) = started(config, 2);

    assert_eq!(session.use_undo(), Err(ActionError::NoHistory));
    assert_eq!(session.undo_uses(), (0, 1));

    let point = first_free_point(&session).unwrap();
    session.handle_click(point, t0).unwrap();
    let point = first_free_point(&session).unwrap();
    session.handle_click(point, t0).unwrap();

    session.use_undo().unwrap();
    assert_eq!(session.use_undo(), Err(ActionError::UndosExhausted));
    assert_eq!(session.storage().len(), 1);
}

#[test]
fn test_time_runs_out() {
    let (mut session, t0) = started(level(2, 6, 7), 1);
    assert_eq!(session.tick(t0 + Duration::from_secs(60)), None);
    assert_eq!(session.remaining_time(), Duration::from_secs(60));

    assert_eq!(
        session.tick(t0 + Duration::from_secs(121)),
        Some(Outcome::Lost)
    );
    assert_eq!(session.remaining_time(), Duration::ZERO);
    assert!(session.take_record().is_some());
    assert!(session.take_record().is_none());
}

#[test]
fn test_undo_does_not_refund_time() {
    let (mut session, t0) = started(level(2, 6, 7), 4);
    let point = first_free_point(&session).unwrap();
    session.handle_click(point, t0).unwrap();

    session.tick(t0 + Duration::from_secs(50));
    session.use_undo().unwrap();
    session.tick(t0 + Duration::from_secs(51));
    assert_eq!(session.remaining_time(), Duration::from_secs(69));
}

#[test]
fn test_restart_deals_a_fresh_session() {
    let (mut session, t0) = started(Difficulty::Easy.level_config(), 100);
    let point = first_free_point(&session).unwrap();
    session.handle_click(point, t0).unwrap();
    session.tick(t0 + Duration::from_secs(700));
    assert_eq!(session.state(), SessionState::Lost);

    session.restart(101, t0 + Duration::from_secs(700)).unwrap();
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.remaining_time(), Duration::from_secs(600));
    assert_eq!(session.deck().remaining(), session.patterns().len());
    assert_eq!(session.score(), 0);
    assert!(session.take_record().is_none());
}

#[test]
fn test_same_seed_same_deal() {
    let config = Difficulty::Hell.level_config();
    let a = Session::new(config, PlayArea::default(), 77).unwrap();
    let b = Session::new(config, PlayArea::default(), 77).unwrap();
    assert_eq!(a.patterns(), b.patterns());

    let ids: Vec<PatternId> = a.deck().free_patterns().collect();
    let ids_b: Vec<PatternId> = b.deck().free_patterns().collect();
    assert_eq!(ids, ids_b);
}
