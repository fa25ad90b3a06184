//! Coordinate move value handed to the session by callers.

use serde::{Deserialize, Serialize};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Role, Square};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    #[error("Invalid square '{0}'")]
    Square(String),

    #[error("Invalid promotion piece '{0}'")]
    Promotion(String),

    #[error("Move text must look like e2e4 or e7e8q, got '{0}'")]
    Format(String),
}

/// A move as `{from, to, promotion?}` in algebraic squares.
///
/// Castling is expressed as the king's two-square step (`e1g1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    #[serde(with = "square_text")]
    pub from: Square,
    #[serde(with = "square_text")]
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "role_text")]
    pub promotion: Option<Role>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to, promotion: None }
    }

    pub fn with_promotion(mut self, role: Role) -> Self {
        self.promotion = Some(role);
        self
    }

    /// Build from a legal engine move, normalizing castling to the king step.
    pub fn from_engine(mv: &shakmaty::Move) -> Option<Self> {
        match mv.to_uci(CastlingMode::Standard) {
            UciMove::Normal { from, to, promotion } => Some(Self { from, to, promotion }),
            _ => None,
        }
    }

    pub(crate) fn to_uci(self) -> UciMove {
        UciMove::Normal {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(ParseMoveError::Format(s.to_string()));
        }

        let from = parse_square(&s[0..2])?;
        let to = parse_square(&s[2..4])?;
        let promotion = match s.get(4..5) {
            Some(p) => Some(parse_promotion(p)?),
            None => None,
        };

        Ok(Self { from, to, promotion })
    }
}

fn parse_square(s: &str) -> Result<Square, ParseMoveError> {
    s.to_ascii_lowercase()
        .parse::<Square>()
        .map_err(|_| ParseMoveError::Square(s.to_string()))
}

fn parse_promotion(s: &str) -> Result<Role, ParseMoveError> {
    s.chars()
        .next()
        .and_then(|c| Role::from_char(c.to_ascii_lowercase()))
        .filter(|role| matches!(role, Role::Queen | Role::Rook | Role::Bishop | Role::Knight))
        .ok_or_else(|| ParseMoveError::Promotion(s.to_string()))
}

mod square_text {
    use serde::{Deserialize, Deserializer, Serializer};
    use shakmaty::Square;

    pub fn serialize<S: Serializer>(sq: &Square, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(sq)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Square, D::Error> {
        let text = String::deserialize(d)?;
        super::parse_square(&text).map_err(serde::de::Error::custom)
    }
}

mod role_text {
    use serde::{Deserialize, Deserializer, Serializer};
    use shakmaty::Role;

    pub fn serialize<S: Serializer>(role: &Option<Role>, s: S) -> Result<S::Ok, S::Error> {
        match role {
            Some(r) => s.serialize_str(&r.char().to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Role>, D::Error> {
        let text = Option::<String>::deserialize(d)?;
        match text.as_deref() {
            None | Some("") => Ok(None),
            Some(p) => super::parse_promotion(p)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
