mod common;

use common::*;
use game_core::{
    ExpiryOutcome, GameEvent, IgnoreReason, LookupOutcome, SubmitOutcome, TickOutcome, TurnGuard,
};
use game_types::{GamePhase, RejectionReason, TIME_UP_WORD};

#[test]
fn test_first_word_accepted() {
    let mut game = create_started_game();

    let result = submit_and_resolve(&mut game, "alpha", true);

    assert_eq!(
        result,
        SubmitResult::Looked(LookupOutcome::Accepted {
            word: "alpha".to_string()
        })
    );
    assert_eq!(game.players()[0].score, 1);
    assert_eq!(game.required_letter(), Some('a'));
    assert_eq!(game.active_player().unwrap().display_name, "Bob");
}

#[test]
fn test_wrong_starting_letter_clamps_score() {
    let mut game = create_started_game();
    submit_and_resolve(&mut game, "alpha", true);

    let result = submit_and_resolve(&mut game, "bravo", true);
    let turn = match result {
        SubmitResult::Local(SubmitOutcome::Rejected { reason, turn }) => {
            assert_eq!(reason, RejectionReason::WrongStartingLetter { required: 'a' });
            turn
        }
        other => panic!("expected local rejection, got {:?}", other),
    };

    assert_eq!(game.players()[1].score, 0);
    assert_eq!(game.active_player().unwrap().display_name, "Bob");

    assert!(game.finish_rejection(turn));
    assert_eq!(game.active_player().unwrap().display_name, "Alice");
}

#[test]
fn test_too_short_never_reaches_dictionary() {
    let mut game = create_started_game();

    let outcome = game.submit("cat").unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected {
            reason: RejectionReason::TooShort { min_length: 4 },
            ..
        }
    ));
    assert!(!game.is_validating());
    assert_eq!(game.history()[0].word, "cat");
}

#[test]
fn test_timer_expiry_with_nothing_pending() {
    let mut game = create_started_game();
    submit_and_resolve(&mut game, "alpha", true);
    submit_and_resolve(&mut game, "apple", true);

    let outcome = run_out_clock(&mut game);

    assert_eq!(outcome, TickOutcome::Expired(ExpiryOutcome::Recorded));
    let last = game.history().last().unwrap();
    assert_eq!(last.word, TIME_UP_WORD);
    assert!(!last.is_valid);
    assert_eq!(last.player_id, game.players()[0].id);
    assert_eq!(game.players()[0].score, 0);
    // Switch is immediate
    assert_eq!(game.active_player().unwrap().display_name, "Bob");
    assert_eq!(game.time_remaining(), game.settings().turn_duration);
}

#[test]
fn test_resubmitted_word_already_used() {
    let mut game = create_started_game();
    submit_and_resolve(&mut game, "alpha", true);
    submit_and_resolve(&mut game, "apple", true);
    submit_and_resolve(&mut game, "eagle", true);

    // Bob tries Alice's opening word in capitals; required letter is 'e'
    let result = submit_and_resolve(&mut game, "ALPHA", true);
    assert!(matches!(
        result,
        SubmitResult::Local(SubmitOutcome::Rejected {
            reason: RejectionReason::AlreadyUsed,
            ..
        })
    ));
}

#[test]
fn test_expiry_during_rejection_delay_is_ignored() {
    let (mut game, events) = create_observed_game();
    game.start().unwrap();

    let turn = match game.submit("cat").unwrap() {
        SubmitOutcome::Rejected { turn, .. } => turn,
        other => panic!("unexpected outcome {:?}", other),
    };

    // Clock runs out while the rejection message is showing
    assert_eq!(run_out_clock(&mut game), TickOutcome::Expired(ExpiryOutcome::Ignored));
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.guard(), TurnGuard::Rejected);

    assert!(game.finish_rejection(turn));
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.active_player().unwrap().display_name, "Bob");
    assert_eq!(events.count(|e| matches!(e, GameEvent::TurnSwitched { .. })), 1);
    assert_eq!(events.count(GameEvent::ends_turn), 1);
}

#[test]
fn test_late_lookup_after_expiry_path_is_discarded() {
    let mut game = create_started_game();

    // Alice times out, then Bob's word goes to the dictionary
    run_out_clock(&mut game);
    let ticket = match game.submit("alpha").unwrap() {
        SubmitOutcome::NeedsLookup(ticket) => ticket,
        other => panic!("unexpected outcome {:?}", other),
    };
    game.complete_lookup(&ticket, true).unwrap();

    // Delivering the same result again must not score twice
    assert_eq!(game.complete_lookup(&ticket, true).unwrap(), LookupOutcome::Stale);
    assert_eq!(game.players()[1].score, 1);
    assert_eq!(game.history().len(), 2);
}

#[test]
fn test_double_submit_while_validating() {
    let mut game = create_started_game();
    let first = game.submit("alpha").unwrap();
    assert!(matches!(first, SubmitOutcome::NeedsLookup(_)));

    assert_eq!(
        game.submit("alpha").unwrap(),
        SubmitOutcome::Ignored(IgnoreReason::TurnLocked)
    );
    assert!(game.history().is_empty());
}

#[test]
fn test_events_for_a_short_game() {
    let (mut game, events) = create_observed_game();
    game.start().unwrap();
    submit_and_resolve(&mut game, "alpha", true);
    submit_and_resolve(&mut game, "apple", false);
    game.reset();

    let recorded = events.get_events();
    assert!(matches!(recorded[0], GameEvent::GameStarted { turn_duration: 30, .. }));
    assert!(matches!(
        recorded[1],
        GameEvent::WordAccepted {
            score: 1,
            required_letter: Some('a'),
            ..
        }
    ));
    assert!(matches!(recorded[2], GameEvent::TurnSwitched { turn_number: 2, .. }));
    assert!(matches!(
        recorded[3],
        GameEvent::WordRejected {
            reason: RejectionReason::NotAWord,
            score: 0,
            ..
        }
    ));
    assert_eq!(recorded.last(), Some(&GameEvent::GameReset));
    assert_eq!(game.phase(), GamePhase::Waiting);
}
