use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_file_ledger::FileLedger;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Backs the "first row missing from <dc>" scan
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_file_ledger_ma01")
                    .table(FileLedger::Table)
                    .col(FileLedger::Ma01)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_file_ledger_tx01")
                    .table(FileLedger::Table)
                    .col(FileLedger::Tx01)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx_file_ledger_ma01", "idx_file_ledger_tx01"] {
            manager
                .drop_index(Index::drop().name(name).table(FileLedger::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}
