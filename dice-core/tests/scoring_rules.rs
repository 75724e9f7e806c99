//! Rules tests driven through the scripted harness.
//!
//! These cover the scoring contract end to end:
//! - Scoring rolls and busts
//! - Holding below and at the target
//! - Roll history bounds
//! - Ignored commands after the game ends

use dice_core::{
    Action, GameEngine, GameEvent, MatchConfig, PlayerId, RandomRoller, RollHistory, Settings,
    TestHarness,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const A: PlayerId = PlayerId::First;
const B: PlayerId = PlayerId::Second;

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_bust_after_scoring_roll_keeps_banked_total() {
    let mut harness = TestHarness::with_target(10);
    harness.bank(&[5]);
    harness.hold();
    assert_eq!(harness.active(), A);
    assert_eq!(harness.total(A), 5);

    harness.roll(3);
    assert_eq!(harness.turn_score(), 3);
    assert_eq!(harness.active(), A);

    let event = harness.roll(1);
    assert_eq!(event, Some(GameEvent::Busted { player: A, next: B }));
    assert_eq!(harness.total(A), 5);
    assert_eq!(harness.turn_score(), 0);
    assert_eq!(harness.active(), B);
}

#[test]
fn test_hold_past_target_wins() {
    let mut harness = TestHarness::with_target(10);
    harness.bank(&[4, 4]);
    harness.hold();
    assert_eq!(harness.total(A), 8);

    harness.roll(3);
    let event = harness.hold();
    assert_eq!(event, Some(GameEvent::Won { player: A, total: 11 }));
    assert!(harness.is_over());
    assert_eq!(harness.engine.winner(), Some(A));
    assert_eq!(harness.active(), A);
    assert_eq!(harness.total(B), 0);
}

#[test]
fn test_second_player_can_win() {
    let mut harness = TestHarness::with_target(12);
    harness.bank(&[6]);
    harness.bank(&[6, 6]);
    assert!(harness.is_over());
    assert_eq!(harness.engine.winner(), Some(B));
    assert_eq!(harness.total(A), 6);
    assert_eq!(harness.total(B), 12);
}

// =============================================================================
// ROLL RULES
// =============================================================================

#[test]
fn test_one_always_ends_turn() {
    let mut harness = TestHarness::new();
    for player in [A, B, A, B] {
        harness.rolls(&[6, 2]);
        assert_eq!(harness.active(), player);
        harness.roll(1);
        assert_eq!(harness.active(), player.opponent());
        assert_eq!(harness.turn_score(), 0);
        assert_eq!(harness.history(player).last(), Some(&1));
    }
    assert_eq!(harness.total(A), 0);
    assert_eq!(harness.total(B), 0);
}

#[test]
fn test_non_one_faces_accumulate() {
    let mut harness = TestHarness::new();
    let mut expected = 0;
    for face in 2..=6 {
        let event = harness.roll(face);
        expected += u32::from(face);
        assert!(matches!(event, Some(GameEvent::Rolled { turn_score, .. }) if turn_score == expected));
        assert_eq!(harness.active(), A);
    }
    assert_eq!(harness.turn_score(), 20);
    assert_eq!(harness.history(A), vec![2, 3, 4, 5, 6]);
    assert!(harness.history(B).is_empty());
}

#[test]
fn test_history_drops_first_of_eleven() {
    let mut harness = TestHarness::with_target(1000);
    let faces = [2, 3, 4, 5, 6, 2, 3, 4, 5, 6, 4];
    harness.rolls(&faces);

    let history = harness.history(A);
    assert_eq!(history.len(), RollHistory::CAPACITY);
    assert_eq!(history, faces[1..].to_vec());
}

#[test]
fn test_history_survives_turn_change() {
    let mut harness = TestHarness::new();
    harness.rolls(&[4, 1]);
    harness.rolls(&[5, 1]);
    harness.roll(6);
    assert_eq!(harness.history(A), vec![4, 1, 6]);
    assert_eq!(harness.history(B), vec![5, 1]);
}

// =============================================================================
// GAME OVER AND RESET
// =============================================================================

#[test]
fn test_game_over_freezes_state() {
    let mut harness = TestHarness::with_target(6);
    harness.bank(&[6]);
    assert!(harness.is_over());

    let before = harness.engine.snapshot();
    assert!(harness.roll(5).is_none());
    assert!(harness.hold().is_none());
    assert!(harness.engine.apply(Action::Hold).is_none());
    assert_eq!(harness.engine.snapshot(), before);
}

#[test]
fn test_reset_from_game_over() {
    let mut harness = TestHarness::with_target(6);
    harness.bank(&[6]);
    harness.reset();

    let snap = harness.engine.snapshot();
    assert!(snap.in_progress);
    assert_eq!(snap.winner, None);
    assert_eq!(snap.active_player, A);
    assert_eq!(snap.current_score, 0);
    assert_eq!(snap.players[0].total, 0);
    assert_eq!(snap.players[1].total, 0);
    assert!(snap.players[0].history.is_empty());
    assert!(snap.players[1].history.is_empty());
}

#[test]
fn test_configure_then_reset_applies_new_target() {
    let mut harness = TestHarness::with_target(50);
    harness.bank(&[6, 6]);

    harness
        .engine
        .configure(&Settings::new().with_target_score(10))
        .unwrap();
    // Scores survive configure.
    assert_eq!(harness.total(A), 12);
    assert!(harness.engine.in_progress());

    harness.reset();
    harness.bank(&[5, 5]);
    assert!(harness.is_over());
}

// =============================================================================
// INVARIANTS UNDER RANDOM PLAY
// =============================================================================

#[test]
fn test_random_play_keeps_invariants() {
    for seed in 0..20u64 {
        let mut engine = GameEngine::with_roller(
            MatchConfig::default().with_target_score(40),
            RandomRoller::seeded(seed),
        );
        let mut chooser = StdRng::seed_from_u64(seed ^ 0xD1CE);
        let mut totals = [0u32; 2];

        for _ in 0..400 {
            let was_over = !engine.in_progress();
            let active = engine.active_player();
            let pending = engine.current_score();

            let event = if chooser.gen_bool(0.7) {
                engine.roll_now()
            } else {
                engine.hold()
            };

            if was_over {
                assert!(event.is_none());
                continue;
            }

            match event {
                Some(GameEvent::Held { player, banked, total, next }) => {
                    assert_eq!(player, active);
                    assert_eq!(banked, pending);
                    assert!(total < 40);
                    assert_eq!(next, active.opponent());
                }
                Some(GameEvent::Won { player, total }) => {
                    assert_eq!(player, active);
                    assert!(total >= 40);
                    assert_eq!(engine.active_player(), active);
                }
                Some(GameEvent::Busted { next, .. }) => {
                    assert_eq!(next, active.opponent());
                    assert_eq!(engine.current_score(), 0);
                }
                Some(GameEvent::Rolled { face, turn_score, .. }) => {
                    assert!(!face.is_bust());
                    assert_eq!(turn_score, pending + u32::from(face));
                }
                other => panic!("unexpected event {other:?}"),
            }

            for id in PlayerId::ALL {
                let total = engine.player(id).total();
                assert!(total >= totals[id.index()], "totals never decrease");
                totals[id.index()] = total;
                assert!(engine.player(id).history().len() <= RollHistory::CAPACITY);
            }
        }
    }
}
