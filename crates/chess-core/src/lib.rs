//! Game-state core for the chess coach: the move-by-move session, the
//! automated opponent, and the local record of finished games.

pub mod analysis;
pub mod board;
pub mod chess_move;
pub mod coaching;
pub mod metrics;
pub mod pgn;
pub mod record;
pub mod reply;
pub mod session;
pub mod storage;
pub mod theme;
pub mod types;

pub use chess_move::{Move, ParseMoveError};
pub use session::{Session, SessionState};
pub use types::{GameOutcome, Opponent, PlayerColor, TerminalReason};
