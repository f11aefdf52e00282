//! Tests for the game session state machine.

use tictactable_core::{
    BOARD_CELLS, Cell, GameResult, GameSession, MoveRejection, PartyId, RegisterError,
    RematchRejection, Symbol,
};

fn ann() -> PartyId {
    PartyId::from("ann")
}

fn bo() -> PartyId {
    PartyId::from("bo")
}

/// Ann (X) and Bo (O) seated, Bo to move.
fn seated_session() -> GameSession {
    let mut session = GameSession::seeded(7);
    session.register(ann(), "Ann".to_string()).expect("first seat");
    session.register(bo(), "Bo".to_string()).expect("second seat");
    session
}

fn play(session: &mut GameSession, moves: &[(&PartyId, i64)]) {
    for &(party, cell) in moves {
        session
            .apply_move(party, cell)
            .unwrap_or_else(|e| panic!("move {cell} by {party} rejected: {e}"));
    }
}

fn mover_id(session: &GameSession) -> Option<String> {
    session.current_mover().map(|p| p.id().to_string())
}

#[test]
fn test_first_registration_waits() {
    let mut session = GameSession::seeded(1);
    assert_eq!(session.register(ann(), "Ann".to_string()), Ok(Symbol::X));
    assert_eq!(session.result(), &GameResult::Waiting);
    assert!(session.current_mover().is_none());
}

#[test]
fn test_second_registration_starts_game() {
    let session = seated_session();
    assert_eq!(session.players().len(), 2);
    assert_eq!(session.players()[0].display_name(), "Ann");
    assert_eq!(*session.players()[1].symbol(), Symbol::O);
    assert_eq!(session.result(), &GameResult::InProgress);
    assert_eq!(mover_id(&session).as_deref(), Some("bo"));
}

#[test]
fn test_third_registration_rejected_without_change() {
    let mut session = seated_session();
    play(&mut session, &[(&bo(), 4)]);
    let before = session.snapshot();

    for n in 0..3 {
        let party = PartyId::from(format!("extra-{n}"));
        assert_eq!(
            session.register(party, "Extra".to_string()),
            Err(RegisterError::GameFull)
        );
    }

    assert_eq!(session.players().len(), 2);
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut session = GameSession::seeded(1);
    session.register(ann(), "Ann".to_string()).expect("first seat");
    assert_eq!(
        session.register(ann(), "Ann again".to_string()),
        Err(RegisterError::AlreadyRegistered)
    );
    assert_eq!(session.players().len(), 1);
    assert_eq!(session.result(), &GameResult::Waiting);
}

#[test]
fn test_newcomer_takes_free_symbol() {
    let mut session = seated_session();
    // Ann (X) leaves; Bo keeps O, so the newcomer must get X.
    session.disconnect(&ann());
    assert_eq!(
        session.register(PartyId::from("cy"), "Cy".to_string()),
        Ok(Symbol::X)
    );

    // Now Bo leaves; the remaining seat holds X, so the next gets O.
    session.disconnect(&bo());
    assert_eq!(
        session.register(PartyId::from("di"), "Di".to_string()),
        Ok(Symbol::O)
    );
    assert_eq!(mover_id(&session).as_deref(), Some("di"));
}

#[test]
fn test_win_scenario() {
    let mut session = seated_session();

    play(&mut session, &[(&bo(), 4)]);
    let before = session.snapshot();
    assert_eq!(
        session.apply_move(&ann(), 4),
        Err(MoveRejection::CellOccupied)
    );
    assert_eq!(session.snapshot(), before);

    play(
        &mut session,
        &[(&ann(), 0), (&bo(), 8), (&ann(), 1), (&bo(), 6), (&ann(), 2)],
    );

    match session.result() {
        GameResult::Win { winner } => assert_eq!(winner.id(), &ann()),
        other => panic!("expected a win, got {other:?}"),
    }
    assert!(session.current_mover().is_none());
}

#[test]
fn test_win_on_last_cell_is_not_a_draw() {
    let mut session = seated_session();
    // O X O / X O X / O O X, Bo completes 2-4-6 with the ninth move.
    play(
        &mut session,
        &[
            (&bo(), 0),
            (&ann(), 1),
            (&bo(), 2),
            (&ann(), 3),
            (&bo(), 4),
            (&ann(), 5),
            (&bo(), 7),
            (&ann(), 8),
        ],
    );
    assert_eq!(session.result(), &GameResult::InProgress);

    play(&mut session, &[(&bo(), 6)]);
    assert!(session.board().is_full());
    match session.result() {
        GameResult::Win { winner } => assert_eq!(winner.id(), &bo()),
        other => panic!("expected a win, got {other:?}"),
    }
    assert!(session.current_mover().is_none());
}

#[test]
fn test_draw_scenario_and_moves_after_end() {
    let mut session = seated_session();
    play(
        &mut session,
        &[
            (&bo(), 4),
            (&ann(), 1),
            (&bo(), 0),
            (&ann(), 8),
            (&bo(), 2),
            (&ann(), 6),
            (&bo(), 7),
            (&ann(), 3),
            (&bo(), 5),
        ],
    );
    assert_eq!(session.result(), &GameResult::Draw);
    assert!(session.board().is_full());

    let before = session.snapshot();
    for party in [ann(), bo()] {
        for cell in 0..9 {
            assert_eq!(
                session.apply_move(&party, cell),
                Err(MoveRejection::NotInProgress)
            );
        }
    }
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_turn_integrity() {
    let mut session = seated_session();
    let before = session.snapshot();

    assert_eq!(session.apply_move(&ann(), 0), Err(MoveRejection::NotYourTurn));
    assert_eq!(
        session.apply_move(&PartyId::from("stranger"), 0),
        Err(MoveRejection::NotYourTurn)
    );
    assert_eq!(session.apply_move(&bo(), -1), Err(MoveRejection::OutOfRange));
    assert_eq!(session.apply_move(&bo(), 9), Err(MoveRejection::OutOfRange));
    assert_eq!(session.snapshot(), before);

    play(&mut session, &[(&bo(), 0)]);
    assert_eq!(mover_id(&session).as_deref(), Some("ann"));
    assert_eq!(session.apply_move(&bo(), 1), Err(MoveRejection::NotYourTurn));
}

#[test]
fn test_moves_rejected_while_waiting() {
    let mut session = GameSession::seeded(3);
    session.register(ann(), "Ann".to_string()).expect("first seat");
    assert_eq!(
        session.apply_move(&ann(), 0),
        Err(MoveRejection::NotInProgress)
    );
    assert!(session.board().is_empty(0));
}

#[test]
fn test_rematch_after_win() {
    let mut session = seated_session();
    play(
        &mut session,
        &[(&bo(), 4), (&ann(), 0), (&bo(), 8), (&ann(), 1), (&bo(), 6), (&ann(), 2)],
    );
    let finished = session.snapshot();

    assert_eq!(
        session.rematch(&PartyId::from("stranger")),
        Err(RematchRejection::NotAPlayer)
    );
    assert_eq!(session.snapshot(), finished);

    assert_eq!(session.rematch(&bo()), Ok(()));
    assert!((0..BOARD_CELLS).all(|i| session.board().is_empty(i)));
    assert_eq!(session.result(), &GameResult::InProgress);
    let mover = mover_id(&session).expect("mover after rematch");
    assert!(mover == "ann" || mover == "bo");
}

#[test]
fn test_rematch_mid_game_is_dropped() {
    let mut session = seated_session();
    play(&mut session, &[(&bo(), 4)]);
    let before = session.snapshot();
    assert_eq!(session.rematch(&ann()), Err(RematchRejection::NotFinished));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_rematch_coin_flip_reaches_both_players() {
    let mut session = seated_session();
    play(
        &mut session,
        &[(&bo(), 4), (&ann(), 0), (&bo(), 8), (&ann(), 1), (&bo(), 6), (&ann(), 2)],
    );

    let mut seen = std::collections::HashSet::new();
    for _ in 0..64 {
        session.reset();
        seen.insert(mover_id(&session).expect("mover after reset"));
    }
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_disconnect_mid_game_resets() {
    let mut session = seated_session();
    play(&mut session, &[(&bo(), 4), (&ann(), 0)]);

    let removed = session.disconnect(&ann()).expect("ann was seated");
    assert_eq!(removed.display_name(), "Ann");
    assert_eq!(session.players().len(), 1);
    assert_eq!(session.result(), &GameResult::Waiting);
    assert!(session.current_mover().is_none());
    assert!(session.board().cells().iter().all(|c| *c == Cell::Empty));
}

#[test]
fn test_disconnect_unknown_party_is_noop() {
    let mut session = seated_session();
    play(&mut session, &[(&bo(), 4)]);
    let before = session.snapshot();
    assert!(session.disconnect(&PartyId::from("spectator")).is_none());
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_reset_with_one_or_zero_players() {
    let mut session = GameSession::seeded(5);
    session.reset();
    assert_eq!(session.result(), &GameResult::Waiting);

    session.register(ann(), "Ann".to_string()).expect("first seat");
    session.reset();
    assert_eq!(session.result(), &GameResult::Waiting);
    assert!(session.current_mover().is_none());
}

#[test]
fn test_snapshot_board_references_players() {
    let mut session = seated_session();
    play(&mut session, &[(&bo(), 4), (&ann(), 0)]);

    let state = session.snapshot();
    assert_eq!(state.board.len(), BOARD_CELLS);
    assert_eq!(state.board[4].as_ref().map(|p| p.id()), Some(&bo()));
    assert_eq!(state.board[0].as_ref().map(|p| p.id()), Some(&ann()));
    assert!(state.board[1].is_none());
    assert_eq!(state.current_mover.as_ref().map(|p| p.id()), Some(&bo()));

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["result"]["status"], "playing");
    assert_eq!(json["currentMover"]["displayName"], "Bo");
    assert_eq!(json["board"][4]["symbol"], "O");
    assert!(json["board"][8].is_null());
}
