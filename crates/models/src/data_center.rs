//! The closed set of replication sites the ledger tracks.
//!
//! Each site owns exactly one presence column in `file_ledger`; queries pick
//! the column through [`DataCenter::column`] and never from request text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::file_ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataCenter {
    Ma01,
    Tx01,
}

impl DataCenter {
    pub const ALL: [DataCenter; 2] = [DataCenter::Ma01, DataCenter::Tx01];

    pub fn as_str(self) -> &'static str {
        match self {
            DataCenter::Ma01 => "ma01",
            DataCenter::Tx01 => "tx01",
        }
    }

    /// Presence column for this site.
    pub fn column(self) -> file_ledger::Column {
        match self {
            DataCenter::Ma01 => file_ledger::Column::Ma01,
            DataCenter::Tx01 => file_ledger::Column::Tx01,
        }
    }
}

impl fmt::Display for DataCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataCenter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataCenter::ALL
            .into_iter()
            .find(|dc| dc.as_str() == s)
            .ok_or_else(|| ModelError::UnknownDataCenter(s.to_string()))
    }
}
