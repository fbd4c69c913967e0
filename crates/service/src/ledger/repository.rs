use async_trait::async_trait;

use models::{Asset, DataCenter};

use crate::errors::ServiceError;

/// The ledger store contract. One long-lived implementation is shared by
/// every request, so implementations must be safe for concurrent use.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Some row whose presence flag for `dc` is false. No ordering guarantee.
    async fn find_missing(&self, dc: DataCenter) -> Result<Option<Asset>, ServiceError>;
    /// Insert unless `fid` exists. Returns whether the insert took effect.
    async fn insert_if_absent(&self, asset: Asset) -> Result<bool, ServiceError>;
    /// Mark `fid` as present in `dc`. Returns rows affected.
    async fn set_flag(&self, dc: DataCenter, fid: &str) -> Result<u64, ServiceError>;
}

/// Simple in-memory store for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MemoryLedger {
        rows: Mutex<BTreeMap<String, Asset>>, // key: fid
        unavailable: AtomicBool,
    }

    impl MemoryLedger {
        /// Make every subsequent call fail as if the store were down.
        pub fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.rows().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        pub fn get(&self, fid: &str) -> Option<Asset> {
            self.rows().get(fid).cloned()
        }

        fn rows(&self) -> MutexGuard<'_, BTreeMap<String, Asset>> {
            self.rows.lock().unwrap_or_else(|e| e.into_inner())
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("store unavailable".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl LedgerStore for MemoryLedger {
        async fn find_missing(&self, dc: DataCenter) -> Result<Option<Asset>, ServiceError> {
            self.check()?;
            Ok(self.rows().values().find(|a| !a.is_present_in(dc)).cloned())
        }

        async fn insert_if_absent(&self, asset: Asset) -> Result<bool, ServiceError> {
            self.check()?;
            let mut rows = self.rows();
            if rows.contains_key(&asset.fid) {
                return Ok(false);
            }
            rows.insert(asset.fid.clone(), asset);
            Ok(true)
        }

        async fn set_flag(&self, dc: DataCenter, fid: &str) -> Result<u64, ServiceError> {
            self.check()?;
            match self.rows().get_mut(fid) {
                Some(asset) => {
                    match dc {
                        DataCenter::Ma01 => asset.ma01 = true,
                        DataCenter::Tx01 => asset.tx01 = true,
                    }
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }
}
