use sea_orm::entity::prelude::*;

/// Overdue notice for an active borrow. Book and borrower fields are snapshots.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_name: String,
    pub borrower_name: String,
    pub register_number: String,
    pub borrow_date: chrono::NaiveDate,
    pub due_date: chrono::NaiveDate,
    pub days_overdue: i32,
    /// `Active` or `Cleared`.
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::books::Entity",
        from = "Column::BookId",
        to = "super::books::Column::Id"
    )]
    Book,
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
