//! Serializes human moves and automated replies against one session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chess_core::metrics::PerformanceMetrics;
use chess_core::record::{GameRecord, GameRecordStore};
use chess_core::reply::ReplyPolicy;
use chess_core::storage::KeyValueStore;
use chess_core::{GameOutcome, Move, Opponent, PlayerColor, Session};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Waiting for the opponent's reply")]
    Busy,

    #[error("It is not your turn")]
    NotYourTurn,

    #[error("Illegal move")]
    Illegal,

    #[error("The game is over")]
    GameOver,
}

/// A move that made it onto the board, human or automated.
#[derive(Debug, Clone, PartialEq)]
pub struct Played {
    pub san: String,
    /// Set when this move ended the game.
    pub outcome: Option<GameOutcome>,
    /// The record appended for the finished game, if any.
    pub record: Option<GameRecord>,
    /// Set when the finished game could not be written to storage.
    pub save_error: Option<String>,
    /// True when the caller should follow up with [`TurnCoordinator::play_reply`].
    pub reply_due: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct TurnCoordinator<S: KeyValueStore, P: ReplyPolicy> {
    session: Mutex<Session>,
    records: Mutex<GameRecordStore<S>>,
    policy: Mutex<P>,
    reply_pending: AtomicBool,
    reply_delay: Duration,
    opponent: Opponent,
}

impl<S: KeyValueStore, P: ReplyPolicy> TurnCoordinator<S, P> {
    pub fn new(session: Session, records: GameRecordStore<S>, policy: P) -> Self {
        Self {
            session: Mutex::new(session),
            records: Mutex::new(records),
            policy: Mutex::new(policy),
            reply_pending: AtomicBool::new(false),
            reply_delay: DEFAULT_REPLY_DELAY,
            opponent: Opponent::Ai,
        }
    }

    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.reply_pending.load(Ordering::SeqCst)
    }

    /// Whether the automated side is due to move, e.g. at the start of a game
    /// where the human plays black.
    pub fn reply_due(&self) -> bool {
        let session = lock(&self.session);
        !session.is_terminal() && !session.is_human_turn()
    }

    pub fn submit_move(&self, mv: Move) -> Result<Played, Rejection> {
        self.submit(|session| session.apply_move(mv))
    }

    pub fn submit_san(&self, text: &str) -> Result<Played, Rejection> {
        self.submit(|session| session.apply_san(text))
    }

    fn submit(&self, apply: impl FnOnce(&mut Session) -> bool) -> Result<Played, Rejection> {
        let mut session = lock(&self.session);

        if self.is_busy() {
            return Err(Rejection::Busy);
        }
        if session.is_terminal() {
            return Err(Rejection::GameOver);
        }
        if !session.is_human_turn() {
            return Err(Rejection::NotYourTurn);
        }
        if !apply(&mut session) {
            return Err(Rejection::Illegal);
        }

        let mut played = self.after_move(&session);
        if played.outcome.is_none() {
            self.reply_pending.store(true, Ordering::SeqCst);
            played.reply_due = true;
        }
        Ok(played)
    }

    /// Wait out the reply delay, then play the automated side's move.
    ///
    /// Returns `None` when no reply is needed, e.g. the game ended or the
    /// position was taken back while waiting.
    pub async fn play_reply(&self) -> Option<Played> {
        if !self.reply_due() {
            self.reply_pending.store(false, Ordering::SeqCst);
            return None;
        }
        self.reply_pending.store(true, Ordering::SeqCst);

        tokio::time::sleep(self.reply_delay).await;

        let played = {
            let mut session = lock(&self.session);
            if session.is_terminal() || session.is_human_turn() {
                None
            } else {
                let choice = lock(&self.policy).choose_move(&session);
                match choice {
                    Some(mv) if session.apply_move(mv) => Some(self.after_move(&session)),
                    Some(mv) => {
                        tracing::error!("Reply policy produced illegal move {mv}");
                        None
                    }
                    None => None,
                }
            }
        };

        self.reply_pending.store(false, Ordering::SeqCst);
        played
    }

    fn after_move(&self, session: &Session) -> Played {
        let san = session.history().last().cloned().unwrap_or_default();
        let outcome = session.outcome();
        let mut played = Played {
            san,
            outcome,
            record: None,
            save_error: None,
            reply_due: false,
        };

        if let Some(record) = outcome.and_then(|_| GameRecord::from_session(session, self.opponent)) {
            // The record stays in memory even when the write fails.
            if let Err(e) = lock(&self.records).append(record.clone()) {
                played.save_error = Some(e.to_string());
            }
            played.record = Some(record);
        }
        played
    }

    /// Take back the human's last move along with any reply made to it.
    ///
    /// Does nothing when the human has not moved yet, so an automated
    /// opening move is never taken back on its own.
    pub fn undo(&self) -> Result<(), Rejection> {
        let mut session = lock(&self.session);
        if self.is_busy() {
            return Err(Rejection::Busy);
        }
        let plies = if session.is_human_turn() { 2 } else { 1 };
        if session.history().len() < plies {
            return Ok(());
        }
        for _ in 0..plies {
            session.undo();
        }
        Ok(())
    }

    /// Start a new game, optionally switching sides.
    pub fn new_game(&self, color: Option<PlayerColor>) {
        let mut session = lock(&self.session);
        if let Some(color) = color {
            session.set_player_color(color);
        }
        session.reset();
        self.reply_pending.store(false, Ordering::SeqCst);
    }

    /// Read the session under the lock.
    pub fn with_session<R>(&self, read: impl FnOnce(&Session) -> R) -> R {
        read(&lock(&self.session))
    }

    pub fn records(&self) -> Vec<GameRecord> {
        lock(&self.records).records().to_vec()
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        lock(&self.records).metrics()
    }
}
