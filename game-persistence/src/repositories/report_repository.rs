use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{games, prelude::*};
use game_types::{DailyBucket, DailyReport, DashboardSummary, GameStatus, PlayerStats, UserReport};

/// Derived reporting over completed games. Nothing here is stored; every
/// figure is recomputed from the games table on demand.
#[derive(Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

/// UTC day boundaries for `date`, `[start, end)`.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    (start, start + Duration::days(1))
}

impl ReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn completed_filter() -> sea_orm::Condition {
        sea_orm::Condition::all().add(
            games::Column::Status.is_in([GameStatus::Won.as_str(), GameStatus::Lost.as_str()]),
        )
    }

    pub async fn player_stats(&self, user_id: Uuid) -> Result<PlayerStats> {
        let games_played = Games::find()
            .filter(games::Column::UserId.eq(user_id))
            .filter(Self::completed_filter())
            .count(&self.db)
            .await?;
        let games_won = Games::find()
            .filter(games::Column::UserId.eq(user_id))
            .filter(games::Column::Status.eq(GameStatus::Won.as_str()))
            .count(&self.db)
            .await?;
        Ok(PlayerStats::new(games_played, games_won))
    }

    pub async fn daily_report(&self, date: NaiveDate) -> Result<DailyReport> {
        let (start, end) = day_bounds(date);
        let completed = Games::find()
            .filter(Self::completed_filter())
            .filter(games::Column::CreatedAt.gte(start.fixed_offset()))
            .filter(games::Column::CreatedAt.lt(end.fixed_offset()))
            .all(&self.db)
            .await?;

        let users: HashSet<Uuid> = completed.iter().map(|g| g.user_id).collect();
        let total_games = completed.len() as u64;
        let games_won = completed
            .iter()
            .filter(|g| g.status == GameStatus::Won.as_str())
            .count() as u64;
        let success_rate = if total_games == 0 {
            0.0
        } else {
            (games_won as f64 / total_games as f64 * 10_000.0).round() / 100.0
        };

        Ok(DailyReport {
            date: date.to_string(),
            users_count: users.len() as u64,
            total_games,
            games_won,
            success_rate,
        })
    }

    pub async fn user_report(&self, user_id: Uuid) -> Result<UserReport> {
        let completed = Games::find()
            .filter(games::Column::UserId.eq(user_id))
            .filter(Self::completed_filter())
            .all(&self.db)
            .await?;

        let mut buckets: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
        for game in &completed {
            let date = game.created_at.with_timezone(&Utc).date_naive();
            let entry = buckets.entry(date).or_insert((0, 0));
            entry.0 += 1;
            if game.status == GameStatus::Won.as_str() {
                entry.1 += 1;
            }
        }

        let games_won = completed
            .iter()
            .filter(|g| g.status == GameStatus::Won.as_str())
            .count() as u64;

        Ok(UserReport {
            user_id,
            total_games: completed.len() as u64,
            games_won,
            // Most recent day first
            daily: buckets
                .into_iter()
                .rev()
                .map(|(date, (total, won))| DailyBucket {
                    date: date.to_string(),
                    total,
                    won,
                })
                .collect(),
        })
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let total_users = Users::find().count(&self.db).await?;
        let total_games = Games::find()
            .filter(Self::completed_filter())
            .count(&self.db)
            .await?;
        let active_words = Words::find()
            .filter(crate::entities::words::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;

        let (start, end) = day_bounds(Utc::now().date_naive());
        let today = Games::find()
            .filter(games::Column::CreatedAt.gte(start.fixed_offset()))
            .filter(games::Column::CreatedAt.lt(end.fixed_offset()))
            .all(&self.db)
            .await?;
        let users_today: HashSet<Uuid> = today.iter().map(|g| g.user_id).collect();

        Ok(DashboardSummary {
            total_users,
            total_games,
            active_words,
            games_today: today.len() as u64,
            users_today: users_today.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use crate::repositories::{GameRepository, UserRepository, WordRepository};
    use game_core::GameSession;
    use migration::{Migrator, MigratorTrait};

    struct Setup {
        users: UserRepository,
        words: WordRepository,
        games: GameRepository,
        reports: ReportRepository,
    }

    async fn setup_test_db() -> Setup {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        Setup {
            users: UserRepository::new(db.clone()),
            words: WordRepository::new(db.clone()),
            games: GameRepository::new(db.clone()),
            reports: ReportRepository::new(db),
        }
    }

    /// Plays one game to completion: a win when `win`, otherwise a
    /// two-guess loss.
    async fn play_game(setup: &Setup, user_id: Uuid, win: bool) {
        let (word, _) = setup.words.add_word("ABOUT").await.unwrap();
        let game = setup.games.create_game(user_id, &word, 2).await.unwrap();
        let mut session = GameSession::new(2);

        let guesses: &[&str] = if win { &["ABOUT"] } else { &["ALLOW", "CRANE"] };
        for guess in guesses {
            let submitted = session.submit_guess("ABOUT", guess).unwrap();
            let completed_at = submitted.just_completed.then(Utc::now);
            setup
                .games
                .record_guess(game.id, &submitted, completed_at)
                .await
                .unwrap()
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_player_stats_derived_from_completed_games() {
        let setup = setup_test_db().await;
        let user_id = Uuid::new_v4();
        setup.users.ensure_user(user_id, "alice").await.unwrap();

        // No completed games yet
        let stats = setup.reports.player_stats(user_id).await.unwrap();
        assert_eq!(stats, PlayerStats::new(0, 0));

        play_game(&setup, user_id, true).await;
        play_game(&setup, user_id, false).await;
        play_game(&setup, user_id, false).await;

        let stats = setup.reports.player_stats(user_id).await.unwrap();
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.win_rate, 33.33);
    }

    #[tokio::test]
    async fn test_active_games_excluded_from_stats() {
        let setup = setup_test_db().await;
        let user_id = Uuid::new_v4();
        setup.users.ensure_user(user_id, "alice").await.unwrap();

        let (word, _) = setup.words.add_word("CRANE").await.unwrap();
        setup.games.create_game(user_id, &word, 5).await.unwrap();

        let stats = setup.reports.player_stats(user_id).await.unwrap();
        assert_eq!(stats.games_played, 0);
    }

    #[tokio::test]
    async fn test_daily_report_counts_todays_completions() {
        let setup = setup_test_db().await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        setup.users.ensure_user(alice, "alice").await.unwrap();
        setup.users.ensure_user(bob, "bob").await.unwrap();

        play_game(&setup, alice, true).await;
        play_game(&setup, bob, false).await;

        let report = setup
            .reports
            .daily_report(Utc::now().date_naive())
            .await
            .unwrap();
        assert_eq!(report.users_count, 2);
        assert_eq!(report.total_games, 2);
        assert_eq!(report.games_won, 1);
        assert_eq!(report.success_rate, 50.0);

        // A day with no games reports zeroes
        let empty = setup
            .reports
            .daily_report(Utc::now().date_naive() - Duration::days(1))
            .await
            .unwrap();
        assert_eq!(empty.total_games, 0);
        assert_eq!(empty.success_rate, 0.0);
    }

    #[tokio::test]
    async fn test_user_report_buckets_by_day() {
        let setup = setup_test_db().await;
        let user_id = Uuid::new_v4();
        setup.users.ensure_user(user_id, "alice").await.unwrap();

        play_game(&setup, user_id, true).await;
        play_game(&setup, user_id, false).await;

        let report = setup.reports.user_report(user_id).await.unwrap();
        assert_eq!(report.total_games, 2);
        assert_eq!(report.games_won, 1);
        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.daily[0].total, 2);
        assert_eq!(report.daily[0].won, 1);
    }

    #[tokio::test]
    async fn test_dashboard_summary() {
        let setup = setup_test_db().await;
        let user_id = Uuid::new_v4();
        setup.users.ensure_user(user_id, "alice").await.unwrap();

        play_game(&setup, user_id, true).await;
        let (word, _) = setup.words.add_word("CRANE").await.unwrap();
        setup.words.set_active(word.id, false).await.unwrap();

        let summary = setup.reports.dashboard_summary().await.unwrap();
        assert_eq!(summary.total_users, 1);
        assert_eq!(summary.total_games, 1);
        assert_eq!(summary.active_words, 1); // ABOUT stays active
        assert_eq!(summary.games_today, 1);
        assert_eq!(summary.users_today, 1);
    }
}
