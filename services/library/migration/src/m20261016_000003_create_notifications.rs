use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::BookId).uuid().not_null())
                    .col(ColumnDef::new(Notifications::BookName).string().not_null())
                    .col(
                        ColumnDef::new(Notifications::BorrowerName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RegisterNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::BorrowDate).date().not_null())
                    .col(ColumnDef::new(Notifications::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(Notifications::DaysOverdue)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::BookId)
                            .to(Books::Table, Books::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Notifications {
    Table,
    Id,
    BookId,
    BookName,
    BorrowerName,
    RegisterNumber,
    BorrowDate,
    DueDate,
    DaysOverdue,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
}
