use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Borrows::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Borrows::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Borrows::BookId).uuid().not_null())
                    .col(ColumnDef::new(Borrows::BookName).string().not_null())
                    .col(ColumnDef::new(Borrows::BorrowerName).string().not_null())
                    .col(ColumnDef::new(Borrows::RegisterNumber).string().not_null())
                    .col(ColumnDef::new(Borrows::BorrowDate).date().not_null())
                    .col(ColumnDef::new(Borrows::DueDate).date().not_null())
                    .col(ColumnDef::new(Borrows::ReturnedDate).date().null())
                    .col(
                        ColumnDef::new(Borrows::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Borrows::Table, Borrows::BookId)
                            .to(Books::Table, Books::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Borrows::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Borrows {
    Table,
    Id,
    BookId,
    BookName,
    BorrowerName,
    RegisterNumber,
    BorrowDate,
    DueDate,
    ReturnedDate,
    Status,
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
}
