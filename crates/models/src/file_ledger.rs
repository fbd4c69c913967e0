use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data_center::DataCenter;

/// One tracked asset. Serializes with the ledger's wire keys
/// (`Fid`, `Created`, `Origin`, `Ma01`, `Tx01`).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file_ledger")]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub fid: String,
    pub created: DateTimeUtc,
    pub origin: String,
    pub ma01: bool,
    pub tx01: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub type Asset = Model;

impl Model {
    pub fn is_present_in(&self, dc: DataCenter) -> bool {
        match dc {
            DataCenter::Ma01 => self.ma01,
            DataCenter::Tx01 => self.tx01,
        }
    }
}
