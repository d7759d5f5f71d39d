use sea_orm::entity::prelude::*;

/// A borrow transaction. `book_name` is a snapshot taken at borrow time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "borrows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_name: String,
    pub borrower_name: String,
    pub register_number: String,
    pub borrow_date: chrono::NaiveDate,
    pub due_date: chrono::NaiveDate,
    pub returned_date: Option<chrono::NaiveDate>,
    /// `Active` or `Returned`.
    pub status: String,
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
