//! Single-writer state machine for one game in progress.

use crate::board::Board;
use crate::chess_move::Move;
use crate::pgn::{self, PgnHeaders};
use crate::types::{GameOutcome, PlayerColor, TerminalReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Terminal(GameOutcome),
}

pub struct Session {
    board: Board,
    history: Vec<String>,
    player_color: PlayerColor,
    terminal: Option<(GameOutcome, TerminalReason)>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PlayerColor::White)
    }
}

impl Session {
    pub fn new(player_color: PlayerColor) -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            player_color,
            terminal: None,
        }
    }

    #[cfg(test)]
    fn from_board(board: Board, player_color: PlayerColor) -> Self {
        Self {
            board,
            history: Vec::new(),
            player_color,
            terminal: None,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.terminal {
            Some((outcome, _)) => SessionState::Terminal(outcome),
            None => SessionState::InProgress,
        }
    }

    /// SAN of every applied move, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn side_to_move(&self) -> PlayerColor {
        if self.history.len() % 2 == 0 {
            PlayerColor::White
        } else {
            PlayerColor::Black
        }
    }

    pub fn player_color(&self) -> PlayerColor {
        self.player_color
    }

    pub fn set_player_color(&mut self, color: PlayerColor) {
        self.player_color = color;
    }

    pub fn is_human_turn(&self) -> bool {
        self.side_to_move() == self.player_color
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.terminal.map(|(outcome, _)| outcome)
    }

    pub fn terminal_reason(&self) -> Option<TerminalReason> {
        self.terminal.map(|(_, reason)| reason)
    }

    pub fn fen(&self) -> String {
        self.board.fen()
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_moves()
    }

    /// Apply a coordinate move. Returns false, with no state change, if the
    /// game is over or the move is illegal.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        if self.is_terminal() {
            return false;
        }
        match self.board.play(mv) {
            Some(san) => {
                self.record(san);
                true
            }
            None => {
                tracing::debug!("Rejected illegal move {mv}");
                false
            }
        }
    }

    /// Apply a move written in SAN, with the same semantics as [`Session::apply_move`].
    pub fn apply_san(&mut self, text: &str) -> bool {
        if self.is_terminal() {
            return false;
        }
        match self.board.play_san(text) {
            Some(san) => {
                self.record(san);
                true
            }
            None => {
                tracing::debug!("Rejected illegal move '{text}'");
                false
            }
        }
    }

    fn record(&mut self, san: String) {
        self.history.push(san);
        debug_assert_eq!(self.side_to_move(), self.board.turn());

        self.terminal = self.board.terminal_reason().map(|reason| {
            let outcome = if reason.is_draw() {
                GameOutcome::Draw
            } else {
                // The side to move after checkmate is the mated side.
                let mated = self.board.turn();
                if mated == self.player_color {
                    GameOutcome::Loss
                } else {
                    GameOutcome::Win
                }
            };
            (outcome, reason)
        });

        if let Some((outcome, reason)) = self.terminal {
            tracing::info!(
                "Game over after {} plies: {} by {}",
                self.history.len(),
                outcome,
                reason
            );
        }
    }

    /// Take back the last move. Clears any terminal state without re-checking it.
    pub fn undo(&mut self) {
        if self.history.is_empty() {
            return;
        }
        if self.board.undo() {
            self.history.pop();
            self.terminal = None;
        }
    }

    /// Start over from the initial position, keeping the human's color.
    pub fn reset(&mut self) {
        *self = Self::new(self.player_color);
    }

    /// Render the game as PGN text.
    pub fn pgn(&self) -> String {
        let headers = PgnHeaders::for_session(self.player_color, self.terminal.map(|(o, _)| o));
        pgn::render_pgn(&headers, &self.history)
    }
}
