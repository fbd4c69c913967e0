use std::time::Instant;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::debug;

use common::metrics;
use models::{Asset, DataCenter};

use crate::errors::ServiceError;
use crate::ledger::executor::{Consistency, QueryExecutor};
use crate::ledger::repository::LedgerStore;

/// SeaORM-backed ledger. Reads run at `One`; the conditional insert and the
/// flag update run at `All`.
#[derive(Clone)]
pub struct SeaOrmLedger {
    exec: QueryExecutor,
}

impl SeaOrmLedger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { exec: QueryExecutor::new(db) }
    }
}

#[async_trait]
impl LedgerStore for SeaOrmLedger {
    async fn find_missing(&self, dc: DataCenter) -> Result<Option<Asset>, ServiceError> {
        let start = Instant::now();
        let res = self.exec.find_missing(dc, Consistency::One).await;
        metrics::observe_query("find_missing", start.elapsed());
        debug!(%dc, found = matches!(res, Ok(Some(_))), "find_missing");
        Ok(res?)
    }

    async fn insert_if_absent(&self, asset: Asset) -> Result<bool, ServiceError> {
        let start = Instant::now();
        let res = self.exec.insert_if_absent(asset, Consistency::All).await;
        metrics::observe_query("insert_if_absent", start.elapsed());
        Ok(res?)
    }

    async fn set_flag(&self, dc: DataCenter, fid: &str) -> Result<u64, ServiceError> {
        let start = Instant::now();
        let res = self.exec.set_flag(dc, fid, Consistency::All).await;
        metrics::observe_query("set_flag", start.elapsed());
        Ok(res?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::{TimeZone, Utc};
    use sea_orm::{EntityTrait, PaginatorTrait};
    use std::sync::Arc;

    fn asset(fid: &str, origin: &str, ma01: bool, tx01: bool) -> Asset {
        Asset { fid: fid.into(), created: Utc::now(), origin: origin.into(), ma01, tx01 }
    }

    #[tokio::test]
    async fn missing_asset_disappears_once_flagged() -> anyhow::Result<()> {
        let ledger = SeaOrmLedger::new(get_db().await?);
        for dc in DataCenter::ALL {
            let fid = format!("{dc}.fid");
            let row = asset(&fid, "ma01", dc != DataCenter::Ma01, dc != DataCenter::Tx01);
            assert!(ledger.insert_if_absent(row).await?);

            let found = ledger.find_missing(dc).await?.expect("row missing from dc");
            assert_eq!(found.fid, fid);
            assert!(!found.is_present_in(dc));

            assert_eq!(ledger.set_flag(dc, &fid).await?, 1);
            assert!(ledger.find_missing(dc).await?.is_none());
        }
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_insert_keeps_first_row() -> anyhow::Result<()> {
        let ledger = SeaOrmLedger::new(get_db().await?);
        let mut first = asset("dup.fid", "ma01", true, false);
        first.created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert!(ledger.insert_if_absent(first.clone()).await?);
        assert!(!ledger.insert_if_absent(asset("dup.fid", "tx01", false, true)).await?);

        let kept = ledger.find_missing(DataCenter::Tx01).await?.expect("first row kept");
        assert_eq!(kept.origin, "ma01");
        assert!(kept.ma01);
        assert_eq!(kept.created, first.created);
        Ok(())
    }

    #[tokio::test]
    async fn flag_on_unknown_fid_creates_nothing() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ledger = SeaOrmLedger::new(db.clone());
        assert_eq!(ledger.set_flag(DataCenter::Ma01, "ghost.fid").await?, 0);
        assert_eq!(models::file_ledger::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn flag_set_twice_stays_true() -> anyhow::Result<()> {
        let ledger = SeaOrmLedger::new(get_db().await?);
        ledger.insert_if_absent(asset("twice.fid", "tx01", false, true)).await?;
        ledger.set_flag(DataCenter::Ma01, "twice.fid").await?;
        ledger.set_flag(DataCenter::Ma01, "twice.fid").await?;
        assert!(ledger.find_missing(DataCenter::Ma01).await?.is_none());
        assert!(ledger.find_missing(DataCenter::Tx01).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_registration_has_one_winner() -> anyhow::Result<()> {
        let ledger = Arc::new(SeaOrmLedger::new(get_db().await?));
        let mut handles = Vec::new();
        for origin in ["ma01", "tx01", "ma01", "tx01"] {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(async move {
                ledger.insert_if_absent(asset("race.fid", origin, false, false)).await
            }));
        }
        let mut wins = 0;
        for h in handles {
            if h.await?? {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        Ok(())
    }
}
