//! Exclusively owned handle around the `shakmaty` position.
//!
//! `shakmaty` positions are plain values with no history, so the handle keeps
//! the stack of prior positions for undo and the repetition keys needed for
//! threefold detection.

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::{Chess, EnPassantMode, Position};

use crate::chess_move::Move;
use crate::types::{PlayerColor, TerminalReason};

/// Half-moves without a capture or pawn move after which the game is drawn.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

pub struct Board {
    position: Chess,
    undo_stack: Vec<Chess>,
    /// Repetition key of every position reached, starting position included.
    seen: Vec<String>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        let position = Chess::default();
        let seen = vec![repetition_key(&position)];
        Self {
            position,
            undo_stack: Vec::new(),
            seen,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_fen(fen: &str) -> Self {
        let position: Chess = fen
            .parse::<Fen>()
            .expect("valid FEN")
            .into_position(shakmaty::CastlingMode::Standard)
            .expect("legal position");
        let seen = vec![repetition_key(&position)];
        Self {
            position,
            undo_stack: Vec::new(),
            seen,
        }
    }

    pub fn turn(&self) -> PlayerColor {
        self.position.turn().into()
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(Move::from_engine)
            .collect()
    }

    /// Resolve a coordinate move against the current position.
    ///
    /// A promotion piece on a move that does not promote is ignored.
    fn resolve(&self, mv: Move) -> Option<shakmaty::Move> {
        if let Ok(legal) = mv.to_uci().to_move(&self.position) {
            return Some(legal);
        }
        if mv.promotion.is_some() {
            let plain = Move { promotion: None, ..mv };
            if let Ok(legal) = plain.to_uci().to_move(&self.position) {
                if !legal.is_promotion() {
                    return Some(legal);
                }
            }
        }
        None
    }

    /// Play a coordinate move. Returns its SAN (with check suffix) or `None` if illegal.
    pub fn play(&mut self, mv: Move) -> Option<String> {
        let legal = self.resolve(mv)?;
        Some(self.play_legal(legal))
    }

    /// Play a move given in SAN. Malformed or illegal text returns `None`.
    pub fn play_san(&mut self, text: &str) -> Option<String> {
        let parsed: SanPlus = text.trim().parse().ok()?;
        let legal = parsed.san.to_move(&self.position).ok()?;
        Some(self.play_legal(legal))
    }

    fn play_legal(&mut self, legal: shakmaty::Move) -> String {
        let san = San::from_move(&self.position, legal.clone()).to_string();
        self.undo_stack.push(self.position.clone());
        self.position.play_unchecked(legal);
        self.seen.push(repetition_key(&self.position));

        let suffix = if self.position.is_checkmate() {
            "#"
        } else if self.position.is_check() {
            "+"
        } else {
            ""
        };
        format!("{san}{suffix}")
    }

    /// Restore the position before the last played move. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(prev) => {
                self.position = prev;
                self.seen.pop();
                true
            }
            None => false,
        }
    }

    /// Terminal status of the current position, checkmate first.
    pub fn terminal_reason(&self) -> Option<TerminalReason> {
        if self.position.is_checkmate() {
            Some(TerminalReason::Checkmate)
        } else if self.position.is_stalemate() {
            Some(TerminalReason::Stalemate)
        } else if self.position.is_insufficient_material() {
            Some(TerminalReason::InsufficientMaterial)
        } else if self.repetitions() >= 3 {
            Some(TerminalReason::ThreefoldRepetition)
        } else if self.position.halfmoves() >= FIFTY_MOVE_HALFMOVES {
            Some(TerminalReason::FiftyMoveRule)
        } else {
            None
        }
    }

    fn repetitions(&self) -> usize {
        match self.seen.last() {
            Some(current) => self.seen.iter().filter(|key| *key == current).count(),
            None => 0,
        }
    }
}

/// Placement, side to move, castling rights and en passant square; clocks excluded.
fn repetition_key(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal)
        .to_string()
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}
