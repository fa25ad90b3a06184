//! PGN rendering for finished games, plus a lightweight regex-based move extractor.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{GameOutcome, PlayerColor};

const EVENT_NAME: &str = "Chess Coach";
const HUMAN_NAME: &str = "Player";
const AI_NAME: &str = "AI";

/// Seven Tag Roster subset written at the top of every rendered game.
#[derive(Debug, Clone)]
pub struct PgnHeaders {
    pub event: String,
    pub date: String,
    pub white: String,
    pub black: String,
    pub result: String,
}

impl PgnHeaders {
    pub fn for_session(player_color: PlayerColor, outcome: Option<GameOutcome>) -> Self {
        let (white, black) = match player_color {
            PlayerColor::White => (HUMAN_NAME, AI_NAME),
            PlayerColor::Black => (AI_NAME, HUMAN_NAME),
        };
        Self {
            event: EVENT_NAME.to_string(),
            date: chrono::Utc::now().format("%Y.%m.%d").to_string(),
            white: white.to_string(),
            black: black.to_string(),
            result: result_token(player_color, outcome).to_string(),
        }
    }
}

/// PGN result token ("1-0", "0-1", "1/2-1/2", "*") for an outcome seen from `player_color`.
pub fn result_token(player_color: PlayerColor, outcome: Option<GameOutcome>) -> &'static str {
    match (outcome, player_color) {
        (None, _) => "*",
        (Some(GameOutcome::Draw), _) => "1/2-1/2",
        (Some(GameOutcome::Win), PlayerColor::White) | (Some(GameOutcome::Loss), PlayerColor::Black) => "1-0",
        (Some(GameOutcome::Win), PlayerColor::Black) | (Some(GameOutcome::Loss), PlayerColor::White) => "0-1",
    }
}

/// Render headers and SAN moves as PGN text.
pub fn render_pgn(headers: &PgnHeaders, moves: &[String]) -> String {
    let mut out = String::new();
    for (key, value) in [
        ("Event", &headers.event),
        ("Date", &headers.date),
        ("White", &headers.white),
        ("Black", &headers.black),
        ("Result", &headers.result),
    ] {
        out.push_str(&format!("[{key} \"{value}\"]\n"));
    }
    out.push('\n');

    let mut movetext = String::new();
    for (i, san) in moves.iter().enumerate() {
        if i % 2 == 0 {
            if !movetext.is_empty() {
                movetext.push(' ');
            }
            movetext.push_str(&format!("{}. {}", i / 2 + 1, san));
        } else {
            movetext.push_str(&format!(" {san}"));
        }
    }
    if !movetext.is_empty() {
        movetext.push(' ');
    }
    movetext.push_str(&headers.result);

    out.push_str(&movetext);
    out
}

/// Headers, brace comments and parenthesized variations.
static NON_MOVETEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\{[^}]*\}|\([^)]*\)").unwrap());

static SAN_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O").unwrap()
});

/// SAN moves from PGN text, ignoring headers, comments and variations.
pub fn extract_moves(pgn: &str) -> Vec<String> {
    let movetext = NON_MOVETEXT.replace_all(pgn, " ");
    SAN_TOKEN
        .find_iter(&movetext)
        .map(|m| m.as_str().to_string())
        .collect()
}
