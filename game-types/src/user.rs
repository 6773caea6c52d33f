use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub created_at: String, // ISO 8601 string
}

/// Aggregate counters derived from completed games. Computed on demand,
/// never stored, so they cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerStats {
    pub games_played: u64,
    pub games_won: u64,
    pub win_rate: f64,
}

impl PlayerStats {
    pub fn new(games_played: u64, games_won: u64) -> Self {
        let win_rate = if games_played == 0 {
            0.0
        } else {
            (games_won as f64 / games_played as f64 * 10_000.0).round() / 100.0
        };
        PlayerStats {
            games_played,
            games_won,
            win_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyReport {
    pub date: String, // YYYY-MM-DD
    pub users_count: u64,
    pub total_games: u64,
    pub games_won: u64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyBucket {
    pub date: String,
    pub total: u64,
    pub won: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserReport {
    pub user_id: Uuid,
    pub total_games: u64,
    pub games_won: u64,
    pub daily: Vec<DailyBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub total_users: u64,
    pub total_games: u64,
    pub active_words: u64,
    pub games_today: u64,
    pub users_today: u64,
}
