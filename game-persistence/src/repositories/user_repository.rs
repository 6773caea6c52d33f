use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{prelude::*, users};
use game_types::User;

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_user(model: users::Model) -> User {
        User {
            id: model.id,
            username: model.username,
            is_admin: model.is_admin,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let model = Users::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Self::model_to_user))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let model = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(Self::model_to_user))
    }

    /// Get-or-create by id. Users are provisioned on first sight; the
    /// identity itself comes from the auth collaborator upstream.
    pub async fn ensure_user(&self, id: Uuid, username: &str) -> Result<User> {
        if let Some(existing) = self.find_by_id(id).await? {
            return Ok(existing);
        }

        let model = users::ActiveModel {
            id: Set(id),
            username: Set(username.to_string()),
            is_admin: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };
        let inserted = model.insert(&self.db).await?;
        Ok(Self::model_to_user(inserted))
    }

    pub async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<Option<User>> {
        let Some(model) = Users::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = model.into();
        active.is_admin = Set(is_admin);
        let updated = active.update(&self.db).await?;
        Ok(Some(Self::model_to_user(updated)))
    }
}
