//! Dashboard statistics derived from the stored game records.

use serde::{Deserialize, Serialize};

use crate::record::GameRecord;
use crate::types::GameOutcome;

const BASE_RATING: u32 = 1200;
/// Games compared on each side of the trend window.
const TREND_WINDOW: usize = 5;
/// Accuracy swing, in percentage points, needed to call a trend.
const TREND_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f64,
    pub average_accuracy: f64,
    pub tactical_rating: u32,
    pub positional_rating: u32,
    pub endgame_rating: u32,
    pub recent_trend: Trend,
    /// Plies across all recorded games.
    pub total_moves: u32,
    pub total_blunders: u32,
    pub total_brilliant_moves: u32,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            total_games: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            win_rate: 0.0,
            average_accuracy: 0.0,
            tactical_rating: BASE_RATING,
            positional_rating: BASE_RATING,
            endgame_rating: BASE_RATING,
            recent_trend: Trend::Stable,
            total_moves: 0,
            total_blunders: 0,
            total_brilliant_moves: 0,
        }
    }
}

impl PerformanceMetrics {
    /// Summarize `records`, which must be ordered newest first.
    pub fn from_records(records: &[GameRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let count = |outcome: GameOutcome| records.iter().filter(|r| r.result == outcome).count();
        let wins = count(GameOutcome::Win);
        let losses = count(GameOutcome::Loss);
        let draws = count(GameOutcome::Draw);
        let total = records.len();

        Self {
            total_games: total,
            wins,
            losses,
            draws,
            win_rate: (wins as f64 / total as f64 * 1000.0).round() / 10.0,
            average_accuracy: mean_accuracy(records),
            tactical_rating: BASE_RATING + wins as u32 * 10,
            positional_rating: BASE_RATING + wins as u32 * 8,
            endgame_rating: BASE_RATING + wins as u32 * 12,
            recent_trend: trend(records),
            total_moves: records.iter().map(|r| r.move_count).sum(),
            total_blunders: records.iter().map(|r| r.blunders).sum(),
            total_brilliant_moves: records.iter().map(|r| r.brilliant_moves).sum(),
        }
    }
}

fn mean_accuracy(records: &[GameRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.accuracy).sum::<f64>() / records.len() as f64
}

fn trend(records: &[GameRecord]) -> Trend {
    if records.len() < TREND_WINDOW * 2 {
        return Trend::Stable;
    }
    let recent = mean_accuracy(&records[..TREND_WINDOW]);
    let older = mean_accuracy(&records[TREND_WINDOW..TREND_WINDOW * 2]);

    if recent > older + TREND_THRESHOLD {
        Trend::Improving
    } else if recent < older - TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Opponent, PlayerColor};

    fn record(result: GameOutcome, accuracy: f64) -> GameRecord {
        GameRecord {
            id: "g".into(),
            pgn: String::new(),
            result,
            accuracy,
            date: chrono::Utc::now(),
            opponent: Opponent::Ai,
            player_color: PlayerColor::White,
            move_count: 20,
            blunders: 0,
            mistakes: 0,
            good_moves: 0,
            brilliant_moves: 0,
        }
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = PerformanceMetrics::from_records(&[]);
        assert_eq!(metrics.total_games, 0);
        assert_eq!(metrics.tactical_rating, 1200);
        assert_eq!(metrics.recent_trend, Trend::Stable);
        assert_eq!(metrics.total_moves, 0);
    }

    #[test]
    fn test_counts_and_ratings() {
        let records = vec![
            record(GameOutcome::Win, 80.0),
            record(GameOutcome::Loss, 60.0),
            record(GameOutcome::Win, 70.0),
            record(GameOutcome::Draw, 90.0),
        ];
        let metrics = PerformanceMetrics::from_records(&records);
        assert_eq!((metrics.wins, metrics.losses, metrics.draws), (2, 1, 1));
        assert_eq!(metrics.win_rate, 50.0);
        assert_eq!(metrics.average_accuracy, 75.0);
        assert_eq!(metrics.tactical_rating, 1220);
        assert_eq!(metrics.positional_rating, 1216);
        assert_eq!(metrics.endgame_rating, 1224);
    }

    #[test]
    fn test_trend_needs_ten_games() {
        let records: Vec<_> = (0..9).map(|_| record(GameOutcome::Win, 90.0)).collect();
        assert_eq!(PerformanceMetrics::from_records(&records).recent_trend, Trend::Stable);
    }

    #[test]
    fn test_trend_direction() {
        let mut records: Vec<_> = (0..5).map(|_| record(GameOutcome::Win, 85.0)).collect();
        records.extend((0..5).map(|_| record(GameOutcome::Loss, 70.0)));
        assert_eq!(PerformanceMetrics::from_records(&records).recent_trend, Trend::Improving);

        records.reverse();
        assert_eq!(PerformanceMetrics::from_records(&records).recent_trend, Trend::Declining);
    }

    #[test]
    fn test_totals_across_games() {
        let mut first = record(GameOutcome::Win, 80.0);
        first.blunders = 2;
        first.brilliant_moves = 1;
        let mut second = record(GameOutcome::Loss, 60.0);
        second.move_count = 35;
        second.blunders = 3;

        let metrics = PerformanceMetrics::from_records(&[first, second]);
        assert_eq!(metrics.total_moves, 55);
        assert_eq!(metrics.total_blunders, 5);
        assert_eq!(metrics.total_brilliant_moves, 1);

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["totalMoves"], 55);
        assert_eq!(json["totalBrilliantMoves"], 1);
    }
}
