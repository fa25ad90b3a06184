//! Move selection for the automated opponent.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chess_move::Move;
use crate::session::Session;

/// Chooses a move for the side to move.
///
/// Implementations must return a legal move, or `None` when the game is over.
pub trait ReplyPolicy: Send {
    fn name(&self) -> &str;

    fn choose_move(&mut self, session: &Session) -> Option<Move>;
}

/// Uniform choice among all legal moves. No evaluation, no search.
pub struct RandomReply<R: Rng = StdRng> {
    rng: R,
}

impl RandomReply<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomReply<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomReply<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> ReplyPolicy for RandomReply<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, session: &Session) -> Option<Move> {
        if session.is_terminal() {
            return None;
        }
        let legal_moves = session.legal_moves();
        legal_moves.choose(&mut self.rng).copied()
    }
}

impl Session {
    /// Pick a reply for the side to move with the baseline random policy.
    pub fn automated_reply(&self) -> Option<Move> {
        RandomReply::new().choose_move(self)
    }
}
