use anyhow::Result;
use chrono::{TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::data_center::DataCenter;
use crate::db::connect_with_config;
use crate::file_ledger;

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&configs::DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn insert_and_read_back() -> Result<()> {
    let db = setup_test_db().await?;
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let am = file_ledger::ActiveModel {
        fid: Set("a.fid".into()),
        created: Set(created),
        origin: Set("ma01".into()),
        ma01: Set(true),
        tx01: Set(false),
    };
    am.insert(&db).await?;

    let found = file_ledger::Entity::find_by_id("a.fid".to_string()).one(&db).await?;
    let found = found.expect("row exists");
    assert_eq!(found.created, created);
    assert_eq!(found.origin, "ma01");
    assert!(found.is_present_in(DataCenter::Ma01));
    assert!(!found.is_present_in(DataCenter::Tx01));
    Ok(())
}

#[tokio::test]
async fn migrations_are_rerunnable() -> Result<()> {
    let db = setup_test_db().await?;
    migration::Migrator::up(&db, None).await?;
    assert!(file_ledger::Entity::find().one(&db).await?.is_none());
    Ok(())
}

#[test]
fn serializes_with_wire_keys() {
    let asset = file_ledger::Model {
        fid: "1234.fid".into(),
        created: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        origin: "tx01".into(),
        ma01: false,
        tx01: true,
    };
    let v = serde_json::to_value(&asset).unwrap();
    assert_eq!(v["Fid"], "1234.fid");
    assert_eq!(v["Created"], "2024-03-01T12:00:00Z");
    assert_eq!(v["Origin"], "tx01");
    assert_eq!(v["Ma01"], false);
    assert_eq!(v["Tx01"], true);
    assert_eq!(v.as_object().unwrap().len(), 5);
}
