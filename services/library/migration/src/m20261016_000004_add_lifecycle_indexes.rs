use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Borrows::Table)
                    .col(Borrows::RegisterNumber)
                    .col(Borrows::Status)
                    .name("idx_borrows_register_number_status")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Borrows::Table)
                    .col(Borrows::BookId)
                    .col(Borrows::Status)
                    .name("idx_borrows_book_id_status")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Borrows::Table)
                    .col(Borrows::Status)
                    .col(Borrows::DueDate)
                    .name("idx_borrows_status_due_date")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Notifications::Table)
                    .col(Notifications::BookId)
                    .col(Notifications::Status)
                    .name("idx_notifications_book_id_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_notifications_book_id_status")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_borrows_status_due_date").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_borrows_book_id_status").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_borrows_register_number_status")
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Borrows {
    Table,
    BookId,
    RegisterNumber,
    DueDate,
    Status,
}

#[derive(Iden)]
enum Notifications {
    Table,
    BookId,
    Status,
}
