//! Query executor: translates ledger operations into parameterized SQL and
//! picks how strongly each statement must be acknowledged.
//!
//! Presence columns come from [`DataCenter::column`]; `fid`, timestamps and
//! boolean literals are always bound parameters. Nothing here retries.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    AccessMode, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IsolationLevel, QueryFilter, TransactionTrait,
};

use models::{file_ledger, Asset, DataCenter};

/// Acknowledgement level for a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    /// Any single replica; may observe stale data.
    One,
    /// Visible to every later reader before the call returns.
    All,
}

#[derive(Clone)]
pub struct QueryExecutor {
    db: DatabaseConnection,
}

impl QueryExecutor {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// `All` runs in a SERIALIZABLE transaction on PostgreSQL. SQLite already
    /// serializes writers and rejects an explicit level, so none is requested.
    async fn begin_all(&self) -> Result<DatabaseTransaction, DbErr> {
        match self.db.get_database_backend() {
            DatabaseBackend::Postgres => {
                self.db
                    .begin_with_config(Some(IsolationLevel::Serializable), Some(AccessMode::ReadWrite))
                    .await
            }
            _ => self.db.begin().await,
        }
    }

    /// SELECT … WHERE <dc> = false LIMIT 1
    pub async fn find_missing(&self, dc: DataCenter, consistency: Consistency) -> Result<Option<Asset>, DbErr> {
        let query = file_ledger::Entity::find().filter(dc.column().eq(false));
        match consistency {
            Consistency::One => query.one(&self.db).await,
            Consistency::All => {
                let txn = self.begin_all().await?;
                let row = query.one(&txn).await?;
                txn.commit().await?;
                Ok(row)
            }
        }
    }

    /// INSERT … ON CONFLICT (fid) DO NOTHING. Returns whether a row was written.
    pub async fn insert_if_absent(&self, asset: Asset, consistency: Consistency) -> Result<bool, DbErr> {
        let am = file_ledger::ActiveModel {
            fid: Set(asset.fid),
            created: Set(asset.created),
            origin: Set(asset.origin),
            ma01: Set(asset.ma01),
            tx01: Set(asset.tx01),
        };
        let insert = file_ledger::Entity::insert(am).on_conflict(
            OnConflict::column(file_ledger::Column::Fid)
                .do_nothing()
                .to_owned(),
        );
        let rows = match consistency {
            Consistency::One => insert.exec_without_returning(&self.db).await?,
            Consistency::All => {
                let txn = self.begin_all().await?;
                let rows = insert.exec_without_returning(&txn).await?;
                txn.commit().await?;
                rows
            }
        };
        Ok(rows == 1)
    }

    /// UPDATE file_ledger SET <dc> = true WHERE fid = $1. Returns rows affected.
    pub async fn set_flag(&self, dc: DataCenter, fid: &str, consistency: Consistency) -> Result<u64, DbErr> {
        let update = file_ledger::Entity::update_many()
            .col_expr(dc.column(), Expr::value(true))
            .filter(file_ledger::Column::Fid.eq(fid));
        let res = match consistency {
            Consistency::One => update.exec(&self.db).await?,
            Consistency::All => {
                let txn = self.begin_all().await?;
                let res = update.exec(&txn).await?;
                txn.commit().await?;
                res
            }
        };
        Ok(res.rows_affected)
    }
}
