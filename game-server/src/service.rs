use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use game_core::{GameSession, choose_hint, pick_word, validate_guess};
use game_persistence::repositories::{
    GameRepository, ReportRepository, UserRepository, WordRepository, day_bounds,
};
use game_types::{
    DailyReport, DashboardSummary, GameError, GameStatus, GameView, Guess, Hint, PlayerStats,
    User, UserReport, Word,
};

use crate::auth::Identity;
use crate::session_store::HintSessionStore;

/// Result of one accepted guess, shaped for the play endpoint.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GuessOutcome {
    pub guess: Guess,
    pub status: GameStatus,
    pub remaining_guesses: i32,
    /// Revealed only once the game has completed.
    pub target_word: Option<String>,
}

/// Orchestrates the game rules over the repositories.
///
/// Writes to a game are serialized two ways: a per-game async mutex
/// keeps this process's handlers from interleaving, and the guarded
/// update in [`GameRepository::record_guess`] rejects any writer whose
/// view of the guess counter went stale anyway. Game starts take a
/// per-user mutex so the daily-limit and single-active-game checks and
/// the insert behave as one step.
pub struct GameService {
    users: UserRepository,
    words: WordRepository,
    games: GameRepository,
    reports: ReportRepository,
    hints: HintSessionStore,
    game_locks: DashMap<Uuid, Arc<Mutex<()>>>,
    user_locks: DashMap<Uuid, Arc<Mutex<()>>>,
    daily_game_limit: u32,
    max_guesses: i32,
}

fn lock_for(registry: &DashMap<Uuid, Arc<Mutex<()>>>, id: Uuid) -> Arc<Mutex<()>> {
    registry
        .entry(id)
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Repository failures are infrastructure, not rule violations; log the
/// cause and hand the client a retryable error.
fn store_failure(context: &str, err: anyhow::Error) -> GameError {
    tracing::error!("{context}: {err:#}");
    GameError::TransientStoreFailure {
        message: context.to_string(),
    }
}

impl GameService {
    pub fn new(
        db: sea_orm::DatabaseConnection,
        daily_game_limit: u32,
        max_guesses: i32,
    ) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            words: WordRepository::new(db.clone()),
            games: GameRepository::new(db.clone()),
            reports: ReportRepository::new(db),
            hints: HintSessionStore::new(),
            game_locks: DashMap::new(),
            user_locks: DashMap::new(),
            daily_game_limit,
            max_guesses,
        }
    }

    /// Provision-on-first-sight for an authenticated identity.
    pub async fn ensure_user(&self, identity: &Identity) -> Result<User, GameError> {
        self.users
            .ensure_user(identity.user_id, &identity.username)
            .await
            .map_err(|e| store_failure("failed to load user", e))
    }

    pub async fn start_game(&self, user: &User) -> Result<GameView, GameError> {
        let lock = lock_for(&self.user_locks, user.id);
        let _guard = lock.lock().await;

        if let Some(active) = self
            .games
            .find_active_for_user(user.id)
            .await
            .map_err(|e| store_failure("failed to check active game", e))?
        {
            return Err(GameError::GameAlreadyActive { game_id: active.id });
        }

        let (start, end) = day_bounds(Utc::now().date_naive());
        let today = self
            .games
            .count_created_between(user.id, start, end)
            .await
            .map_err(|e| store_failure("failed to count games", e))?;
        if today >= self.daily_game_limit as u64 {
            return Err(GameError::DailyLimitExceeded {
                limit: self.daily_game_limit,
            });
        }

        let pool = self
            .words
            .list_active()
            .await
            .map_err(|e| store_failure("failed to load word pool", e))?;
        let word = {
            let mut rng = rand::thread_rng();
            pick_word(&pool, &mut rng)?.clone()
        };

        let game = self
            .games
            .create_game(user.id, &word, self.max_guesses)
            .await
            .map_err(|e| store_failure("failed to create game", e))?;
        tracing::info!(game_id = %game.id, user_id = %user.id, "game started");

        Ok(GameView::from_game(&game, Vec::new()))
    }

    pub async fn submit_guess(
        &self,
        user: &User,
        game_id: Uuid,
        raw_guess: &str,
    ) -> Result<GuessOutcome, GameError> {
        let lock = lock_for(&self.game_locks, game_id);
        let _guard = lock.lock().await;

        let game = self.load_owned_game(user, game_id).await?;
        let word = validate_guess(raw_guess)?;

        let mut session = GameSession::from_parts(game.status, game.guesses_count, game.max_guesses);
        let submitted = session.submit_guess(&game.target_word, &word)?;
        let completed_at = submitted.just_completed.then(Utc::now);

        let guess = self
            .games
            .record_guess(game_id, &submitted, completed_at)
            .await
            .map_err(|e| store_failure("failed to record guess", e))?
            // Lost the compare-and-swap; a concurrent writer got there first.
            .ok_or(GameError::GameNotActive)?;

        if submitted.just_completed {
            tracing::info!(
                game_id = %game_id,
                status = submitted.status.as_str(),
                guesses = submitted.guess_number,
                "game completed"
            );
        }

        Ok(GuessOutcome {
            guess,
            status: submitted.status,
            remaining_guesses: game.max_guesses - submitted.guess_number,
            target_word: submitted
                .status
                .is_terminal()
                .then(|| game.target_word.clone()),
        })
    }

    pub async fn request_hint(&self, user: &User, game_id: Uuid) -> Result<Hint, GameError> {
        let lock = lock_for(&self.game_locks, game_id);
        let _guard = lock.lock().await;

        let game = self.load_owned_game(user, game_id).await?;
        let guesses = self
            .games
            .list_guesses(game_id)
            .await
            .map_err(|e| store_failure("failed to load guesses", e))?;
        let feedback: Vec<_> = guesses.into_iter().map(|g| g.feedback).collect();

        let hint = {
            let mut rng = rand::thread_rng();
            choose_hint(
                game.status,
                &game.target_word,
                &feedback,
                self.hints.hint_used(user.id, game_id),
                &mut rng,
            )?
        };

        self.hints.mark_used(user.id, game_id);
        Ok(hint)
    }

    pub async fn game_view(&self, user: &User, game_id: Uuid) -> Result<GameView, GameError> {
        let game = self.load_owned_game(user, game_id).await?;
        let guesses = self
            .games
            .list_guesses(game_id)
            .await
            .map_err(|e| store_failure("failed to load guesses", e))?;
        Ok(GameView::from_game(&game, guesses))
    }

    pub async fn history(&self, user: &User) -> Result<Vec<GameView>, GameError> {
        let games = self
            .games
            .list_completed_for_user(user.id)
            .await
            .map_err(|e| store_failure("failed to load history", e))?;

        let mut views = Vec::with_capacity(games.len());
        for game in &games {
            let guesses = self
                .games
                .list_guesses(game.id)
                .await
                .map_err(|e| store_failure("failed to load guesses", e))?;
            views.push(GameView::from_game(game, guesses));
        }
        Ok(views)
    }

    pub async fn player_stats(&self, user: &User) -> Result<PlayerStats, GameError> {
        self.reports
            .player_stats(user.id)
            .await
            .map_err(|e| store_failure("failed to compute stats", e))
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, GameError> {
        self.reports
            .dashboard_summary()
            .await
            .map_err(|e| store_failure("failed to compute summary", e))
    }

    pub async fn daily_report(&self, date: NaiveDate) -> Result<DailyReport, GameError> {
        self.reports
            .daily_report(date)
            .await
            .map_err(|e| store_failure("failed to compute daily report", e))
    }

    pub async fn user_report(&self, user_id: Uuid) -> Result<UserReport, GameError> {
        self.reports
            .user_report(user_id)
            .await
            .map_err(|e| store_failure("failed to compute user report", e))
    }

    pub async fn list_words(&self) -> Result<Vec<Word>, GameError> {
        self.words
            .list_all()
            .await
            .map_err(|e| store_failure("failed to list words", e))
    }

    /// Admin word intake goes through the same normalization as guesses.
    pub async fn add_word(&self, raw_word: &str) -> Result<(Word, bool), GameError> {
        let word = validate_guess(raw_word)?;
        self.words
            .add_word(&word)
            .await
            .map_err(|e| store_failure("failed to add word", e))
    }

    pub async fn set_word_active(&self, id: Uuid, is_active: bool) -> Result<Word, GameError> {
        self.words
            .set_active(id, is_active)
            .await
            .map_err(|e| store_failure("failed to update word", e))?
            .ok_or(GameError::NotFound)
    }

    /// Fetch a game and enforce ownership. A foreign game reads as
    /// missing so the response does not leak its existence.
    async fn load_owned_game(
        &self,
        user: &User,
        game_id: Uuid,
    ) -> Result<game_types::Game, GameError> {
        let game = self
            .games
            .find_by_id(game_id)
            .await
            .map_err(|e| store_failure("failed to load game", e))?
            .ok_or(GameError::NotFound)?;
        if game.user_id != user.id {
            return Err(GameError::NotFound);
        }
        Ok(game)
    }
}
