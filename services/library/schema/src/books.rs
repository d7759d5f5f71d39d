use sea_orm::entity::prelude::*;

/// A physical book on the shelf.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub author: Option<String>,
    pub location: String,
    /// `Available` or `Unavailable`.
    pub status: String,
    #[sea_orm(unique)]
    pub unique_code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::borrows::Entity")]
    Borrows,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::borrows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrows.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
