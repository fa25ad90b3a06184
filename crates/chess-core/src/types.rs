use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of the board, serialized as `"white"` / `"black"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    #[default]
    White,
    Black,
}

impl PlayerColor {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerColor::White => "white",
            PlayerColor::Black => "black",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            PlayerColor::White => PlayerColor::Black,
            PlayerColor::Black => PlayerColor::White,
        }
    }
}

impl From<shakmaty::Color> for PlayerColor {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => PlayerColor::White,
            shakmaty::Color::Black => PlayerColor::Black,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "white" | "w" => Ok(PlayerColor::White),
            "black" | "b" => Ok(PlayerColor::Black),
            other => Err(format!("Unknown color '{other}'")),
        }
    }
}

/// Result of a finished game from the human player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

impl GameOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            GameOutcome::Win => "win",
            GameOutcome::Loss => "loss",
            GameOutcome::Draw => "draw",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" => Ok(GameOutcome::Win),
            "loss" => Ok(GameOutcome::Loss),
            "draw" => Ok(GameOutcome::Draw),
            other => Err(format!("Unknown result '{other}'")),
        }
    }
}

/// Why a game ended. Every reason except checkmate maps to a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalReason {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl TerminalReason {
    pub fn is_draw(self) -> bool {
        !matches!(self, TerminalReason::Checkmate)
    }
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TerminalReason::Checkmate => "checkmate",
            TerminalReason::Stalemate => "stalemate",
            TerminalReason::InsufficientMaterial => "insufficient material",
            TerminalReason::ThreefoldRepetition => "threefold repetition",
            TerminalReason::FiftyMoveRule => "fifty-move rule",
        };
        f.write_str(s)
    }
}

/// Who the human played against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    #[default]
    Ai,
    Human,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_serde() {
        assert_eq!("Black".parse::<PlayerColor>().unwrap(), PlayerColor::Black);
        assert_eq!("w".parse::<PlayerColor>().unwrap(), PlayerColor::White);
        assert!("green".parse::<PlayerColor>().is_err());
        assert_eq!(serde_json::to_string(&PlayerColor::White).unwrap(), "\"white\"");
    }

    #[test]
    fn test_terminal_reason_draws() {
        assert!(!TerminalReason::Checkmate.is_draw());
        assert!(TerminalReason::Stalemate.is_draw());
        assert!(TerminalReason::FiftyMoveRule.is_draw());
        assert_eq!(
            serde_json::to_string(&TerminalReason::ThreefoldRepetition).unwrap(),
            "\"threefold-repetition\""
        );
    }
}
