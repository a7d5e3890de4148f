//! Tests for the flip/match state machine, lifecycle, and scoring.

use std::collections::HashMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_memory::{
    Board, CardState, Clock, Difficulty, Face, Flip, FlipRejection, GameAction, GameController,
    ManualTimeline, Phase, RecordingDisplay, Scheduler, Tier, Timings,
};

type Game = GameController<RecordingDisplay>;

fn game(difficulty: Difficulty) -> Game {
    GameController::seeded(RecordingDisplay::new(), difficulty, 42)
}

/// A game whose clock is too slow to tick during a quick run of matches.
fn frozen_clock_game(difficulty: Difficulty) -> Game {
    let timings = Timings {
        tick_interval: Duration::from_secs(3600),
        ..Timings::default()
    };
    GameController::with_parts(
        RecordingDisplay::new(),
        StdRng::seed_from_u64(42),
        ManualTimeline::new(),
        timings,
        difficulty,
    )
}

/// Index pairs sharing a value, in order of first appearance.
fn pairs(board: &Board) -> Vec<(usize, usize)> {
    let mut first_seen: HashMap<&'static str, usize> = HashMap::new();
    let mut pairs = Vec::new();
    for card in board.cards() {
        match first_seen.get(card.value()) {
            Some(first) => pairs.push((*first, card.index())),
            None => {
                first_seen.insert(card.value(), card.index());
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

fn mismatch(board: &Board) -> (usize, usize) {
    let first = board.cards()[0].value();
    let other = board
        .cards()
        .iter()
        .find(|card| card.value() != first)
        .map(|card| card.index())
        .unwrap();
    (0, other)
}

fn state(game: &Game, index: usize) -> CardState {
    game.session().board().get(index).unwrap().state()
}

#[test]
fn test_new_game_is_idle_and_rendered_hidden() {
    let game = game(Difficulty::Easy);
    let session = game.session();
    assert_eq!(*session.phase(), Phase::Idle);
    assert_eq!(*session.moves(), 0);
    assert_eq!(*session.score(), 0);

    let display = game.display();
    assert_eq!(display.grid(), (3, 4));
    assert!(display.faces().iter().all(|face| *face == Face::Hidden));
    assert_eq!(display.status(), "Click \"Start Game\" to begin!");
    assert_eq!(display.label(), "Start Game");
}

#[test]
fn test_flips_rejected_before_start() {
    let mut game = game(Difficulty::Easy);
    assert_eq!(game.flip_card(0), Err(FlipRejection::NotRunning));
    assert_eq!(state(&game, 0), CardState::Hidden);
}

#[test]
fn test_start_and_pause_lifecycle() {
    let mut game = game(Difficulty::Easy);
    game.start_game();
    assert_eq!(*game.session().phase(), Phase::Running);
    assert!(game.timeline().is_running());
    assert_eq!(game.display().label(), "Pause Game");
    assert_eq!(game.display().status(), "Game started! Find matching pairs.");

    game.pause_game();
    assert_eq!(*game.session().phase(), Phase::Paused);
    assert!(!game.timeline().is_running());
    assert_eq!(game.display().label(), "Resume Game");
    assert_eq!(game.flip_card(0), Err(FlipRejection::NotRunning));

    game.handle(GameAction::ToggleStart);
    assert_eq!(*game.session().phase(), Phase::Running);
    assert_eq!(game.display().status(), "Game resumed!");
}

#[test]
fn test_pause_is_noop_unless_running() {
    let mut game = game(Difficulty::Easy);
    game.pause_game();
    assert_eq!(*game.session().phase(), Phase::Idle);
    assert_eq!(game.display().label(), "Start Game");
}

#[test]
fn test_clock_counts_only_while_running() {
    let mut game = game(Difficulty::Easy);
    game.advance(Duration::from_secs(5));
    assert_eq!(*game.session().elapsed_seconds(), 0);

    game.start_game();
    game.start_game();
    game.advance(Duration::from_secs(3));
    assert_eq!(*game.session().elapsed_seconds(), 3);
    assert_eq!(game.display().counters().elapsed_seconds, 3);

    game.pause_game();
    game.advance(Duration::from_secs(10));
    assert_eq!(*game.session().elapsed_seconds(), 3);

    game.start_game();
    game.advance(Duration::from_millis(2500));
    assert_eq!(*game.session().elapsed_seconds(), 5);
}

#[test]
fn test_mismatch_reverts_after_delay() {
    let mut game = game(Difficulty::Easy);
    let (first, second) = mismatch(game.session().board());
    game.start_game();

    assert_eq!(game.flip_card(first), Ok(Flip::Revealed));
    assert_eq!(game.flip_card(second), Ok(Flip::PairComplete { is_match: false }));
    assert_eq!(*game.session().moves(), 1);
    assert!(game.session().is_locked());
    assert!(matches!(game.display().faces()[second], Face::Shown(_)));

    game.advance(Duration::from_millis(999));
    assert_eq!(state(&game, first), CardState::Flipped);

    game.advance(Duration::from_millis(1));
    assert_eq!(state(&game, first), CardState::Hidden);
    assert_eq!(state(&game, second), CardState::Hidden);
    assert!(game.session().pending().is_empty());
    assert!(!game.session().is_locked());
    assert_eq!(*game.session().moves(), 1);
    assert_eq!(game.display().faces()[first], Face::Hidden);
    assert_eq!(game.display().status(), "No match. Try again!");
}

#[test]
fn test_input_locked_until_resolution() {
    let mut game = game(Difficulty::Medium);
    let (first, second) = mismatch(game.session().board());
    let third = (0..16).find(|index| *index != first && *index != second).unwrap();
    game.start_game();

    game.flip_card(first).unwrap();
    game.flip_card(second).unwrap();
    assert_eq!(game.flip_card(third), Err(FlipRejection::Locked));
    assert_eq!(state(&game, third), CardState::Hidden);
    assert_eq!(game.session().pending().len(), 2);

    game.advance(Duration::from_secs(1));
    assert_eq!(game.flip_card(third), Ok(Flip::Revealed));
}

#[test]
fn test_same_card_twice_and_out_of_range_rejected() {
    let mut game = game(Difficulty::Easy);
    game.start_game();
    game.flip_card(3).unwrap();
    assert_eq!(game.flip_card(3), Err(FlipRejection::AlreadyRevealed { index: 3 }));
    assert_eq!(game.flip_card(12), Err(FlipRejection::OutOfRange { index: 12 }));
    assert_eq!(game.session().pending(), &[3]);
    assert_eq!(*game.session().moves(), 0);
}

#[test]
fn test_matched_cards_stay_matched() {
    let mut game = game(Difficulty::Easy);
    let (first, second) = pairs(game.session().board())[0];
    game.start_game();

    assert_eq!(game.flip_card(first), Ok(Flip::Revealed));
    assert_eq!(game.flip_card(second), Ok(Flip::PairComplete { is_match: true }));
    game.advance(Duration::from_millis(500));

    assert_eq!(state(&game, first), CardState::Matched);
    assert_eq!(*game.session().matches_found(), 1);
    assert_eq!(game.display().status(), "Match found! Keep going!");

    let score = *game.session().score();
    for index in [first, second] {
        assert_eq!(game.flip_card(index), Err(FlipRejection::AlreadyRevealed { index }));
        assert_eq!(state(&game, index), CardState::Matched);
    }
    assert_eq!(*game.session().score(), score);
    assert_eq!(*game.session().matches_found(), 1);
}

#[test]
fn test_perfect_easy_game_scores_every_match_and_bonus() {
    let mut game = frozen_clock_game(Difficulty::Easy);
    let all_pairs = pairs(game.session().board());
    assert_eq!(all_pairs.len(), 6);
    game.start_game();

    let mut expected = 0;
    for (move_number, (first, second)) in (1u32..).zip(all_pairs) {
        game.flip_card(first).unwrap();
        game.flip_card(second).unwrap();
        game.advance(Duration::from_millis(500));

        if move_number < 6 {
            expected += 100 - move_number;
            assert_eq!(*game.session().score(), expected);
        }
    }

    let expected_matches: u32 = (1..=6).map(|moves| 100 - moves).sum();
    let session = game.session();
    assert_eq!(*session.moves(), 6);
    assert_eq!(*session.elapsed_seconds(), 0);
    assert_eq!(*session.phase(), Phase::Won);
    assert_eq!(*session.score(), expected_matches + 300 + 194);
    assert!(!game.timeline().is_running());

    let summary = session.summary().unwrap();
    assert_eq!(summary.tier, Tier::Excellent);
    assert_eq!(summary.score, 1073);

    let display = game.display();
    assert_eq!(display.status(), "You won! Excellent memory! Final Score: 1073");
    assert_eq!(display.label(), "New Game");
    assert_eq!(display.celebrations(), 1);
}

#[test]
fn test_win_happens_exactly_once() {
    let mut game = frozen_clock_game(Difficulty::Easy);
    for (first, second) in pairs(game.session().board()) {
        if *game.session().phase() != Phase::Running {
            game.start_game();
        }
        game.flip_card(first).unwrap();
        game.flip_card(second).unwrap();
        game.advance(Duration::from_millis(500));
    }
    let final_score = *game.session().score();

    game.advance(Duration::from_secs(30));
    game.pause_game();
    assert_eq!(game.flip_card(0), Err(FlipRejection::NotRunning));
    assert_eq!(game.display().celebrations(), 1);
    assert_eq!(*game.session().score(), final_score);
    assert_eq!(*game.session().elapsed_seconds(), 0);
}

#[test]
fn test_start_after_win_deals_new_game() {
    let mut game = frozen_clock_game(Difficulty::Easy);
    game.start_game();
    for (first, second) in pairs(game.session().board()) {
        game.flip_card(first).unwrap();
        game.flip_card(second).unwrap();
        game.advance(Duration::from_millis(500));
    }
    assert_eq!(*game.session().phase(), Phase::Won);

    game.handle(GameAction::ToggleStart);
    assert_eq!(*game.session().phase(), Phase::Running);
    assert_eq!(*game.session().matches_found(), 0);
    assert_eq!(*game.session().score(), 0);
    assert_eq!(game.display().renders(), 2);
}

#[test]
fn test_hint_before_start_only_prompts() {
    let mut game = game(Difficulty::Easy);
    assert!(!game.show_hint());
    assert_eq!(game.display().status(), "Start the game first!");
    assert_eq!(*game.session().score(), 0);
    assert!(game.display().faces().iter().all(|face| *face == Face::Hidden));
}

#[test]
fn test_hint_reveals_then_hides_without_touching_moves() {
    let mut game = frozen_clock_game(Difficulty::Easy);
    let (first, second) = pairs(game.session().board())[0];
    game.start_game();
    game.flip_card(first).unwrap();
    game.flip_card(second).unwrap();
    game.advance(Duration::from_millis(500));
    let score = *game.session().score();
    assert_eq!(score, 99);

    assert!(game.show_hint());
    assert_eq!(*game.session().score(), 49);
    assert_eq!(game.display().status(), "Remember the card positions!");
    assert!(game.display().faces().iter().all(|face| matches!(face, Face::Shown(_))));
    assert_eq!(game.flip_card(5), Err(FlipRejection::HintShowing));

    game.advance(Duration::from_secs(2));
    assert!(!game.session().is_hint_showing());
    assert_eq!(game.display().status(), "Back to the game!");
    for card in game.session().board().cards() {
        let face = game.display().faces()[card.index()];
        if card.is_matched() {
            assert!(matches!(face, Face::Shown(_)));
        } else {
            assert_eq!(face, Face::Hidden);
            assert_eq!(card.state(), CardState::Hidden);
        }
    }
    assert_eq!(*game.session().moves(), 1);
    assert!(game.session().pending().is_empty());
}

#[test]
fn test_hint_expiry_keeps_final_report() {
    let mut game = frozen_clock_game(Difficulty::Easy);
    let pairs = pairs(game.session().board());
    let (last, rest) = pairs.split_last().unwrap();
    game.start_game();
    for &(first, second) in rest {
        game.flip_card(first).unwrap();
        game.flip_card(second).unwrap();
        game.advance(Duration::from_millis(500));
    }

    game.flip_card(last.0).unwrap();
    game.flip_card(last.1).unwrap();
    assert!(game.show_hint());
    game.advance(Duration::from_millis(500));
    assert_eq!(*game.session().phase(), Phase::Won);
    let report = game.display().status().to_string();
    assert!(report.starts_with("You won!"));

    game.advance(Duration::from_secs(2));
    assert!(!game.session().is_hint_showing());
    assert_eq!(game.display().status(), report);
}

#[test]
fn test_hint_expiry_while_paused_keeps_pause_status() {
    let mut game = game(Difficulty::Easy);
    game.start_game();
    game.show_hint();
    game.pause_game();

    game.advance(Duration::from_secs(2));
    assert!(!game.session().is_hint_showing());
    assert!(game.display().faces().iter().all(|face| *face == Face::Hidden));
    assert_eq!(game.display().status(), "Game paused");
}

#[test]
fn test_mismatch_during_hint_stays_face_up_until_hint_ends() {
    let mut game = game(Difficulty::Easy);
    let (first, second) = mismatch(game.session().board());
    game.start_game();
    game.flip_card(first).unwrap();
    game.flip_card(second).unwrap();
    assert!(game.show_hint());

    game.advance(Duration::from_millis(1000));
    for index in [first, second] {
        assert_eq!(state(&game, index), CardState::Hidden);
        assert!(matches!(game.display().faces()[index], Face::Shown(_)));
    }
    assert!(game.session().is_hint_showing());

    game.advance(Duration::from_millis(1000));
    for index in [first, second] {
        assert_eq!(game.display().faces()[index], Face::Hidden);
    }
    assert!(game.session().pending().is_empty());
    assert!(!game.session().is_locked());
}

#[test]
fn test_status_lines_follow_play() {
    let mut game = game(Difficulty::Easy);
    let (first, second) = mismatch(game.session().board());
    game.start_game();
    game.flip_card(first).unwrap();
    game.flip_card(second).unwrap();
    game.advance(Duration::from_secs(1));
    game.pause_game();
    game.toggle_start();

    assert_eq!(
        game.display().status_history(),
        [
            "Click \"Start Game\" to begin!",
            "Game started! Find matching pairs.",
            "No match. Try again!",
            "Game paused",
            "Game resumed!",
        ]
    );
}

#[test]
fn test_hint_penalty_floors_at_zero() {
    let mut game = game(Difficulty::Easy);
    game.start_game();
    game.show_hint();
    assert_eq!(*game.session().score(), 0);
}

#[test]
fn test_hint_keeps_pending_pair() {
    let mut game = game(Difficulty::Easy);
    let (first, second) = mismatch(game.session().board());
    game.start_game();
    game.flip_card(first).unwrap();
    game.show_hint();
    assert_eq!(game.session().pending(), &[first]);

    game.advance(Duration::from_secs(2));
    assert_eq!(state(&game, first), CardState::Flipped);
    assert!(matches!(game.display().faces()[first], Face::Shown(_)));
    assert_eq!(game.flip_card(second), Ok(Flip::PairComplete { is_match: false }));
    assert_eq!(*game.session().moves(), 1);
}

#[test]
fn test_newer_hint_extends_reveal() {
    let mut game = game(Difficulty::Easy);
    game.start_game();
    game.show_hint();
    game.advance(Duration::from_secs(1));
    game.show_hint();

    game.advance(Duration::from_secs(1));
    assert!(game.session().is_hint_showing());
    game.advance(Duration::from_secs(1));
    assert!(!game.session().is_hint_showing());
}

#[test]
fn test_set_difficulty_discards_game() {
    let mut game = frozen_clock_game(Difficulty::Easy);
    let (first, second) = pairs(game.session().board())[0];
    game.start_game();
    game.flip_card(first).unwrap();
    game.flip_card(second).unwrap();
    game.advance(Duration::from_millis(500));
    assert_eq!(*game.session().matches_found(), 1);

    game.handle(GameAction::SelectDifficulty(Difficulty::Hard));
    let session = game.session();
    assert_eq!(*session.difficulty(), Difficulty::Hard);
    assert_eq!(*session.phase(), Phase::Idle);
    assert_eq!(*session.matches_found(), 0);
    assert_eq!(*session.score(), 0);
    assert_eq!(session.board().len(), 24);
    assert_eq!(pairs(session.board()).len(), 12);
    assert_eq!(game.display().grid(), (4, 6));
    assert!(!game.timeline().is_running());
}

#[test]
fn test_reset_cancels_pending_resolution() {
    let mut game = game(Difficulty::Easy);
    let (first, second) = pairs(game.session().board())[0];
    game.start_game();
    game.flip_card(first).unwrap();
    game.flip_card(second).unwrap();

    game.handle(GameAction::Reset);
    assert_eq!(game.timeline().pending(), 0);
    game.advance(Duration::from_secs(1));
    assert_eq!(*game.session().matches_found(), 0);
    assert_eq!(*game.session().score(), 0);
    assert!(game.session().board().cards().iter().all(|card| card.is_hidden()));
}

#[test]
fn test_resolution_fires_while_paused() {
    let mut game = game(Difficulty::Easy);
    let (first, second) = pairs(game.session().board())[0];
    game.start_game();
    game.flip_card(first).unwrap();
    game.flip_card(second).unwrap();
    game.pause_game();

    game.advance(Duration::from_millis(500));
    assert_eq!(*game.session().phase(), Phase::Paused);
    assert_eq!(*game.session().matches_found(), 1);
    assert_eq!(state(&game, first), CardState::Matched);
    assert_eq!(*game.session().elapsed_seconds(), 0);
}

#[test]
fn test_random_play_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut game = game(Difficulty::Medium);
    game.start_game();
    let mut last_score = 0;

    for _ in 0..400 {
        let used_hint = match rng.gen_range(0..10) {
            0 => {
                game.advance(Duration::from_millis(rng.gen_range(0..1500)));
                false
            }
            1 => game.show_hint(),
            _ => {
                let _ = game.flip_card(rng.gen_range(0..20));
                false
            }
        };

        let session = game.session();
        assert!(session.pending().len() <= 2);
        let flipped = session.board().indices_in(CardState::Flipped);
        assert!(flipped.len() <= 2, "{flipped:?}");
        assert!(*session.matches_found() as usize <= session.pair_count());
        assert!(!session.is_locked() || session.pending().len() == 2);
        if !used_hint {
            assert!(*session.score() >= last_score);
        }
        last_score = *session.score();

        if *session.phase() == Phase::Won {
            break;
        }
    }
}
