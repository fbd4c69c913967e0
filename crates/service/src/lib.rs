//! Service layer for the file ledger.
//! - `ledger::repository` is the store contract the HTTP layer depends on.
//! - `ledger::executor` owns consistency selection and parameter binding.
//! - `ledger::service` turns store results into typed outcomes.

pub mod errors;
pub mod ledger;
#[cfg(test)]
pub mod test_support;
