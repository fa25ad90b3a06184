use std::str::FromStr;

use chess_core::reply::{RandomReply, ReplyPolicy};
use chess_core::{GameOutcome, Move, PlayerColor, Session, SessionState, TerminalReason};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn play(session: &mut Session, moves: &str) {
    for san in moves.split_whitespace() {
        assert!(session.apply_san(san), "{san} was rejected");
    }
}

#[test]
fn test_fools_mate_from_both_sides() {
    let mut white = Session::new(PlayerColor::White);
    play(&mut white, "f3 e5 g4 Qh4#");
    assert_eq!(white.state(), SessionState::Terminal(GameOutcome::Loss));
    assert_eq!(white.terminal_reason(), Some(TerminalReason::Checkmate));
    assert!(white.legal_moves().is_empty());

    let mut black = Session::new(PlayerColor::Black);
    play(&mut black, "f3 e5 g4 Qh4#");
    assert_eq!(black.outcome(), Some(GameOutcome::Win));
}

#[test]
fn test_no_moves_after_game_over() {
    let mut session = Session::default();
    play(&mut session, "f3 e5 g4 Qh4#");
    assert!(!session.apply_move(Move::from_str("a2a3").unwrap()));
    assert!(!session.apply_san("a3"));
    assert_eq!(session.history().len(), 4);
}

#[test]
fn test_stalemate_is_draw() {
    let mut session = Session::default();
    play(
        &mut session,
        "e3 a5 Qh5 Ra6 Qxa5 h5 h4 Rah6 Qxc7 f6 Qxd7+ Kf7 Qxb7 Qd3 Qxb8 Qh7 Qxc8 Kg6 Qe6",
    );
    assert_eq!(session.outcome(), Some(GameOutcome::Draw));
    assert_eq!(session.terminal_reason(), Some(TerminalReason::Stalemate));
}

#[test]
fn test_illegal_moves_change_nothing() {
    let mut session = Session::default();
    play(&mut session, "e4 e5");
    let fen = session.fen();

    assert!(!session.apply_move(Move::from_str("d1h4").unwrap()));
    assert!(!session.apply_move(Move::from_str("d8h4").unwrap()));
    assert!(!session.apply_san("Ke3"));
    assert!(!session.apply_san("garbage"));

    assert_eq!(session.fen(), fen);
    assert_eq!(session.history(), ["e4", "e5"]);
    assert_eq!(session.side_to_move(), PlayerColor::White);
}

#[test]
fn test_undo_after_mate_reopens_game() {
    let mut session = Session::default();
    play(&mut session, "f3 e5 g4 Qh4#");
    session.undo();
    assert_eq!(session.state(), SessionState::InProgress);
    assert_eq!(session.history().len(), 3);
    assert!(session.apply_san("Qf6"));
}

#[test]
fn test_reset_keeps_color() {
    let mut session = Session::new(PlayerColor::Black);
    play(&mut session, "d4 d5");
    session.reset();
    assert!(session.history().is_empty());
    assert_eq!(session.player_color(), PlayerColor::Black);
    assert!(!session.is_human_turn());
}

#[test]
fn test_random_games_reach_a_result() {
    for seed in 0..5 {
        let mut session = Session::default();
        let mut policy = RandomReply::with_rng(StdRng::seed_from_u64(seed));

        while !session.is_terminal() {
            let mv = policy.choose_move(&session).expect("a legal move while in progress");
            assert!(session.legal_moves().contains(&mv));
            assert!(session.apply_move(mv));
            assert!(session.history().len() < 2000);
        }

        assert!(policy.choose_move(&session).is_none());
        let pgn = session.pgn();
        let token = match session.outcome() {
            Some(GameOutcome::Draw) => "1/2-1/2",
            Some(GameOutcome::Win) => "1-0",
            Some(GameOutcome::Loss) => "0-1",
            None => unreachable!(),
        };
        assert!(pgn.contains(&format!("[Result \"{token}\"]")), "{pgn}");
    }
}
