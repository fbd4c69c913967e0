pub mod errors;
pub mod db;
pub mod data_center;
pub mod file_ledger;

pub use data_center::DataCenter;
pub use file_ledger::Asset;

#[cfg(test)]
mod tests;
