use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vocabulary_word")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub term: String,
    /// `"<user_id>:<lowercased term>"`, unique so a user cannot save a term twice.
    #[sea_orm(unique)]
    pub term_key: String,
    pub meaning: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub example: Option<String>,
    pub mastery: i32,
    pub next_review_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Builds the `term_key` value for `term` owned by `user_id`.
pub fn term_key(user_id: i32, term: &str) -> String {
    format!("{}:{}", user_id, term.trim().to_lowercase())
}
