//! Create `file_ledger` table.
//!
//! One row per asset, with one presence column per data center.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FileLedger::Table)
                    .if_not_exists()
                    .col(string(FileLedger::Fid).primary_key())
                    .col(timestamp_with_time_zone(FileLedger::Created).not_null())
                    .col(string(FileLedger::Origin).not_null())
                    .col(boolean(FileLedger::Ma01).not_null().default(false))
                    .col(boolean(FileLedger::Tx01).not_null().default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FileLedger::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum FileLedger { Table, Fid, Created, Origin, Ma01, Tx01 }
