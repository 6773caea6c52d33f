use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{prelude::*, words};
use game_types::Word;

#[derive(Clone)]
pub struct WordRepository {
    db: DatabaseConnection,
}

impl WordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_word(model: words::Model) -> Word {
        Word {
            id: model.id,
            word: model.word,
            is_active: model.is_active,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Word>> {
        let model = Words::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Self::model_to_word))
    }

    pub async fn list_active(&self) -> Result<Vec<Word>> {
        let models = Words::find()
            .filter(words::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Self::model_to_word).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<Word>> {
        let models = Words::find()
            .order_by_asc(words::Column::Word)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Self::model_to_word).collect())
    }

    pub async fn count_active(&self) -> Result<u64> {
        Ok(Words::find()
            .filter(words::Column::IsActive.eq(true))
            .count(&self.db)
            .await?)
    }

    /// Insert a normalized word; returns the row and whether it was
    /// freshly created.
    pub async fn add_word(&self, word: &str) -> Result<(Word, bool)> {
        if let Some(existing) = Words::find()
            .filter(words::Column::Word.eq(word))
            .one(&self.db)
            .await?
        {
            return Ok((Self::model_to_word(existing), false));
        }

        let model = words::ActiveModel {
            id: Set(Uuid::new_v4()),
            word: Set(word.to_string()),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
        };
        let inserted = model.insert(&self.db).await?;
        Ok((Self::model_to_word(inserted), true))
    }

    /// Flip or set the active flag; `None` when the word does not exist.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Word>> {
        let Some(model) = Words::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: words::ActiveModel = model.into();
        active.is_active = Set(is_active);
        let updated = active.update(&self.db).await?;
        Ok(Some(Self::model_to_word(updated)))
    }

    /// Insert any words from `words` that are not present yet; returns
    /// the number created.
    pub async fn seed_words(&self, words: &[&str]) -> Result<u64> {
        let mut created = 0;
        for word in words {
            let (_, was_created) = self.add_word(word).await?;
            if was_created {
                created += 1;
            }
        }
        Ok(created)
    }
}
