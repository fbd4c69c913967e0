
/// `file_ledger` entity against an in-memory store
pub mod file_ledger_tests;
