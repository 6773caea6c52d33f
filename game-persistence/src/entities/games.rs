use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub word_id: Uuid,
    pub status: String,
    pub guesses_count: i32,
    pub max_guesses: i32,
    pub created_at: DateTimeWithTimeZone,
    pub completed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::words::Entity",
        from = "Column::WordId",
        to = "super::words::Column::Id"
    )]
    Word,
    #[sea_orm(has_many = "super::guesses::Entity")]
    Guesses,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::words::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Word.def()
    }
}

impl Related<super::guesses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guesses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
