use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{games, guesses, prelude::*, words};
use game_core::SubmittedGuess;
use game_types::{Game, GameStatus, Guess, Word};

#[derive(Clone)]
pub struct GameRepository {
    db: DatabaseConnection,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_game(model: games::Model, target_word: String) -> Result<Game> {
        let status = GameStatus::parse(&model.status)
            .ok_or_else(|| anyhow!("unknown game status {:?}", model.status))?;
        Ok(Game {
            id: model.id,
            user_id: model.user_id,
            word_id: model.word_id,
            target_word,
            status,
            guesses_count: model.guesses_count,
            max_guesses: model.max_guesses,
            created_at: model.created_at.to_rfc3339(),
            completed_at: model.completed_at.map(|t| t.to_rfc3339()),
        })
    }

    fn model_to_guess(model: guesses::Model) -> Result<Guess> {
        Ok(Guess {
            id: model.id,
            game_id: model.game_id,
            guess_number: model.guess_number,
            word: model.word,
            feedback: serde_json::from_value(model.feedback)?,
            created_at: model.created_at.to_rfc3339(),
        })
    }

    fn joined_to_game(pair: (games::Model, Option<words::Model>)) -> Result<Game> {
        let (model, word) = pair;
        let word = word.ok_or_else(|| anyhow!("game {} has no word row", model.id))?;
        Self::model_to_game(model, word.word)
    }

    pub async fn create_game(&self, user_id: Uuid, word: &Word, max_guesses: i32) -> Result<Game> {
        let model = games::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            word_id: Set(word.id),
            status: Set(GameStatus::Active.as_str().to_string()),
            guesses_count: Set(0),
            max_guesses: Set(max_guesses),
            created_at: Set(Utc::now().into()),
            completed_at: Set(None),
        };
        let inserted = model.insert(&self.db).await?;
        Self::model_to_game(inserted, word.word.clone())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>> {
        let Some(pair) = Games::find_by_id(id)
            .find_also_related(Words)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(Self::joined_to_game(pair)?))
    }

    pub async fn find_active_for_user(&self, user_id: Uuid) -> Result<Option<Game>> {
        let Some(pair) = Games::find()
            .filter(games::Column::UserId.eq(user_id))
            .filter(games::Column::Status.eq(GameStatus::Active.as_str()))
            .find_also_related(Words)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(Self::joined_to_game(pair)?))
    }

    /// Games a user created in `[start, end)`; drives the daily limit.
    pub async fn count_created_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        Ok(Games::find()
            .filter(games::Column::UserId.eq(user_id))
            .filter(games::Column::CreatedAt.gte(start.fixed_offset()))
            .filter(games::Column::CreatedAt.lt(end.fixed_offset()))
            .count(&self.db)
            .await?)
    }

    /// Persist one accepted guess atomically: the game row advances with
    /// a guarded update (status must still be ACTIVE and the stored
    /// counter must match the counter the guess was computed from), and
    /// the guess row is inserted in the same transaction.
    ///
    /// Returns `None` when the guard matched no row, i.e. a concurrent
    /// submission already advanced or completed the game.
    pub async fn record_guess(
        &self,
        game_id: Uuid,
        submitted: &SubmittedGuess,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Guess>> {
        let txn = self.db.begin().await?;

        let mut update = Games::update_many()
            .col_expr(
                games::Column::GuessesCount,
                Expr::value(submitted.guess_number),
            )
            .col_expr(
                games::Column::Status,
                Expr::value(submitted.status.as_str()),
            )
            .filter(games::Column::Id.eq(game_id))
            .filter(games::Column::Status.eq(GameStatus::Active.as_str()))
            .filter(games::Column::GuessesCount.eq(submitted.guess_number - 1));

        if let Some(ts) = completed_at {
            update = update.col_expr(games::Column::CompletedAt, Expr::value(ts.fixed_offset()));
        }

        let result = update.exec(&txn).await?;
        if result.rows_affected == 0 {
            tracing::warn!(
                game_id = %game_id,
                guess_number = submitted.guess_number,
                "guess rejected, game row no longer matches"
            );
            txn.rollback().await?;
            return Ok(None);
        }

        let model = guesses::ActiveModel {
            id: Set(Uuid::new_v4()),
            game_id: Set(game_id),
            guess_number: Set(submitted.guess_number),
            word: Set(submitted.word.clone()),
            feedback: Set(serde_json::to_value(&submitted.feedback)?),
            created_at: Set(Utc::now().into()),
        };
        let inserted = model.insert(&txn).await?;

        txn.commit().await?;
        Self::model_to_guess(inserted).map(Some)
    }

    pub async fn list_guesses(&self, game_id: Uuid) -> Result<Vec<Guess>> {
        let models = Guesses::find()
            .filter(guesses::Column::GameId.eq(game_id))
            .order_by_asc(guesses::Column::GuessNumber)
            .all(&self.db)
            .await?;
        models.into_iter().map(Self::model_to_guess).collect()
    }

    pub async fn list_completed_for_user(&self, user_id: Uuid) -> Result<Vec<Game>> {
        let pairs = Games::find()
            .filter(games::Column::UserId.eq(user_id))
            .filter(
                games::Column::Status
                    .is_in([GameStatus::Won.as_str(), GameStatus::Lost.as_str()]),
            )
            .order_by_desc(games::Column::CreatedAt)
            .find_also_related(Words)
            .all(&self.db)
            .await?;
        pairs.into_iter().map(Self::joined_to_game).collect()
    }
}
