//! Ledger module: domain payloads, store contract, query executor and service.

pub mod domain;
pub mod executor;
pub mod repository;
pub mod repo;
pub mod service;

pub use executor::{Consistency, QueryExecutor};
pub use repo::seaorm::SeaOrmLedger;
pub use repository::LedgerStore;
pub use service::LedgerService;
