use serde::{Deserialize, Serialize};

/// Rush ranks worse than this earn the matchup bump
const SOFT_DEFENSE_RANK: u32 = 20;
const SOFT_DEFENSE_BUMP: f64 = 10.0;
const RANGE_HALF_WIDTH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Running back vs. run defense projection shown by the `rb_vs_dline` widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub player_name: String,
    pub team: String,
    pub opponent: String,
    pub projected_range: [i64; 2],
    pub confidence: Confidence,
    pub explanation: String,
    pub recent_yards: Vec<u32>,
    /// 1 = best run defense, 32 = worst
    pub defense_rush_rank: u32,
}

/// Rushing-yard range from recent games and the opponent's rush defense rank
pub fn projected_range(recent_yards: &[u32], defense_rush_rank: u32) -> [i64; 2] {
    if recent_yards.is_empty() {
        return [0, 0];
    }
    let avg = recent_yards.iter().map(|&y| y as f64).sum::<f64>() / recent_yards.len() as f64;
    let bump = if defense_rush_rank > SOFT_DEFENSE_RANK {
        SOFT_DEFENSE_BUMP
    } else {
        0.0
    };

    let low = (avg + bump - RANGE_HALF_WIDTH).round() as i64;
    let high = (avg + bump + RANGE_HALF_WIDTH).round() as i64;
    [low.max(0), high.max(0)]
}

/// The sample matchup the widget ships with
pub fn sample_projection() -> Projection {
    let recent_yards = vec![76, 89, 64, 102];
    let defense_rush_rank = 27;

    Projection {
        player_name: "Saquon Barkley".to_string(),
        team: "Giants".to_string(),
        opponent: "Commanders".to_string(),
        projected_range: projected_range(&recent_yards, defense_rush_rank),
        confidence: Confidence::Medium,
        explanation:
            "Projection based on last 4 games and opponent's bottom-tier rush defense."
                .to_string(),
        recent_yards,
        defense_rush_rank,
    }
}
