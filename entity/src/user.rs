use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub subject: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub level: String,
    pub admin: bool,
    pub plan: String,
    pub points: i32,
    pub points_reset_at: DateTimeUtc,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub subscription_status: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::coaching_session::Entity")]
    CoachingSession,
    #[sea_orm(has_many = "super::point_transaction::Entity")]
    PointTransaction,
    #[sea_orm(has_many = "super::vocabulary_word::Entity")]
    VocabularyWord,
}

impl Related<super::coaching_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoachingSession.def()
    }
}

impl Related<super::point_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PointTransaction.def()
    }
}

impl Related<super::vocabulary_word::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VocabularyWord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
