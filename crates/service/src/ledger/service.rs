use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use models::DataCenter;

use crate::errors::ServiceError;
use crate::ledger::domain::{BadFile, FileRef, NewAsset, PresenceUpdate, Registration};
use crate::ledger::repository::LedgerStore;

/// Ledger business service independent of web framework.
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self { Self { store } }

    /// Some asset not yet present in `dc`, or `AllGood` when there is none.
    #[instrument(skip(self), fields(dc = %dc))]
    pub async fn bad_file(&self, dc: DataCenter) -> Result<BadFile, ServiceError> {
        Ok(match self.store.find_missing(dc).await? {
            Some(asset) => BadFile::Missing(asset),
            None => BadFile::AllGood,
        })
    }

    /// Register a brand-new asset, stamped with the current server time.
    ///
    /// # Examples
    /// ```
    /// use service::ledger::{LedgerService, domain::{NewAsset, Registration}, repository::mock::MemoryLedger};
    /// use std::sync::Arc;
    /// let svc = LedgerService::new(Arc::new(MemoryLedger::default()));
    /// let input = NewAsset { fid: "1234.fid".into(), origin: "ma01".into(), ma01: true, tx01: false };
    /// assert_eq!(tokio_test::block_on(svc.register(input.clone())).unwrap(), Registration::Inserted);
    /// assert_eq!(tokio_test::block_on(svc.register(input)).unwrap(), Registration::Duplicate);
    /// ```
    #[instrument(skip(self, input), fields(fid = %input.fid, origin = %input.origin))]
    pub async fn register(&self, input: NewAsset) -> Result<Registration, ServiceError> {
        input.validate()?;
        let asset = input.into_asset(Utc::now());
        if self.store.insert_if_absent(asset).await? {
            info!("asset_registered");
            Ok(Registration::Inserted)
        } else {
            warn!("asset_already_registered");
            Ok(Registration::Duplicate)
        }
    }

    /// Mark `fid` as present in `dc`. An unknown `fid` is not an error.
    #[instrument(skip(self, input), fields(dc = %dc, fid = %input.fid))]
    pub async fn mark_present(&self, dc: DataCenter, input: FileRef) -> Result<PresenceUpdate, ServiceError> {
        input.validate()?;
        let rows_affected = self.store.set_flag(dc, &input.fid).await?;
        if rows_affected == 0 {
            warn!("presence_set_on_unknown_fid");
        }
        Ok(PresenceUpdate { dc, fid: input.fid, rows_affected })
    }
}
