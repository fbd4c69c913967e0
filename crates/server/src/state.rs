use std::sync::Arc;

use service::ledger::{LedgerService, LedgerStore};

/// Shared by every handler; the store handle is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub ledger: LedgerService,
}

impl AppState {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { ledger: LedgerService::new(store) }
    }
}
