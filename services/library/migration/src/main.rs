use sea_orm_migration::prelude::*;

use shelfmark_library_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
