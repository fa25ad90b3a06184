//! Coaching analysis of a finished game, as returned by the analysis service.

use serde::{Deserialize, Serialize};

/// Characters of raw text kept as the summary when a response is not structured.
const FALLBACK_SUMMARY_CHARS: usize = 200;
const EMPTY_RESPONSE_SUMMARY: &str = "The coach did not return an analysis for this game.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentKind {
    Blunder,
    Mistake,
    Good,
    Brilliant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMoment {
    pub move_number: u32,
    #[serde(rename = "move")]
    pub notation: String,
    #[serde(rename = "type")]
    pub kind: MomentKind,
    pub description: String,
    #[serde(default)]
    pub evaluation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrengthsAndWeaknesses {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub key_moments: Vec<KeyMoment>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub recurring_patterns: Vec<String>,
    #[serde(default)]
    pub strengths_and_weaknesses: StrengthsAndWeaknesses,
}

impl GameAnalysis {
    /// Minimal stand-in built from unstructured text: a short excerpt and no lists.
    pub fn fallback(text: &str) -> Self {
        let excerpt: String = text.trim().chars().take(FALLBACK_SUMMARY_CHARS).collect();
        let summary = if excerpt.is_empty() {
            EMPTY_RESPONSE_SUMMARY.to_string()
        } else {
            excerpt
        };
        Self {
            summary,
            ..Self::default()
        }
    }

    /// Parse a structured analysis, degrading to [`GameAnalysis::fallback`] on any parse error.
    pub fn parse_or_fallback(text: &str) -> Self {
        match serde_json::from_str::<GameAnalysis>(text.trim()) {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Analysis response was not valid JSON ({e}); using text summary");
                Self::fallback(text)
            }
        }
    }

    pub fn tally(&self) -> MomentTally {
        let mut tally = MomentTally::default();
        for moment in &self.key_moments {
            match moment.kind {
                MomentKind::Blunder => tally.blunders += 1,
                MomentKind::Mistake => tally.mistakes += 1,
                MomentKind::Good => tally.good_moves += 1,
                MomentKind::Brilliant => tally.brilliant_moves += 1,
            }
        }
        tally
    }
}

/// Key-moment counts by category, derived from an analysis for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentTally {
    pub blunders: u32,
    pub mistakes: u32,
    pub good_moves: u32,
    pub brilliant_moves: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURED: &str = r#"{
        "summary": "A sharp game decided by a tactical oversight.",
        "keyMoments": [
            {"moveNumber": 12, "move": "Qxb7", "type": "blunder", "description": "Greedy pawn grab", "evaluation": -3.5},
            {"moveNumber": 18, "move": "Rxf7", "type": "brilliant", "description": "Exchange sac", "evaluation": 2.0}
        ],
        "suggestions": ["Check opponent threats before capturing"],
        "recurringPatterns": ["Early queen sorties"],
        "strengthsAndWeaknesses": {"strengths": ["Attack"], "weaknesses": ["Defense"]}
    }"#;

    #[test]
    fn test_parse_structured() {
        let analysis = GameAnalysis::parse_or_fallback(STRUCTURED);
        assert_eq!(analysis.key_moments.len(), 2);
        assert_eq!(analysis.key_moments[0].kind, MomentKind::Blunder);
        assert_eq!(analysis.key_moments[0].notation, "Qxb7");
        assert_eq!(analysis.strengths_and_weaknesses.weaknesses, vec!["Defense"]);

        let tally = analysis.tally();
        assert_eq!(tally.blunders, 1);
        assert_eq!(tally.brilliant_moves, 1);
        assert_eq!(tally.mistakes, 0);
    }

    #[test]
    fn test_unstructured_text_degrades() {
        let text = "Overall you played well but missed a fork on move 14. ".repeat(10);
        let analysis = GameAnalysis::parse_or_fallback(&text);
        assert!(!analysis.summary.is_empty());
        assert_eq!(analysis.summary.chars().count(), 200);
        assert!(analysis.key_moments.is_empty());
        assert!(analysis.suggestions.is_empty());
        assert!(analysis.recurring_patterns.is_empty());
    }

    #[test]
    fn test_blank_text_still_has_summary() {
        let analysis = GameAnalysis::parse_or_fallback("   ");
        assert_eq!(analysis.summary, EMPTY_RESPONSE_SUMMARY);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(GameAnalysis::fallback("short")).unwrap();
        assert!(json.get("keyMoments").is_some());
        assert!(json.get("strengthsAndWeaknesses").is_some());
        assert!(json.get("gameId").is_none());
    }
}
