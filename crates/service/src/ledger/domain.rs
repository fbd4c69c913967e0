use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use models::{Asset, DataCenter};

use crate::errors::ServiceError;

/// Registration payload for `POST /file/new`.
///
/// A client-supplied `Created` is ignored; the server stamps the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "lowercase"))]
pub struct NewAsset {
    pub fid: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub ma01: bool,
    #[serde(default)]
    pub tx01: bool,
}

impl NewAsset {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_fid(&self.fid)
    }

    pub fn into_asset(self, created: DateTime<Utc>) -> Asset {
        Asset { fid: self.fid, created, origin: self.origin, ma01: self.ma01, tx01: self.tx01 }
    }
}

/// Presence-update payload for `POST /file/add/:dc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "lowercase"))]
pub struct FileRef {
    pub fid: String,
}

impl FileRef {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_fid(&self.fid)
    }
}

/// Decode a request payload, matching object keys without regard to case.
///
/// `Fid`, `fid` and `FID` all name the same field. When a key appears more
/// than once under different spellings, the last one wins.
pub fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    let value = match serde_json::from_slice::<Value>(body)? {
        Value::Object(obj) => {
            let mut folded = Map::with_capacity(obj.len());
            for (k, v) in obj {
                folded.insert(k.to_lowercase(), v);
            }
            Value::Object(folded)
        }
        other => other,
    };
    serde_json::from_value(value)
}

fn validate_fid(fid: &str) -> Result<(), ServiceError> {
    if fid.trim().is_empty() {
        return Err(ServiceError::Validation("Fid must not be empty".into()));
    }
    Ok(())
}

/// Result of asking for an asset that a data center does not hold yet.
#[derive(Debug, Clone, PartialEq)]
pub enum BadFile {
    Missing(Asset),
    AllGood,
}

/// Result of a conditional registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    /// A row with this `fid` already existed and was left untouched.
    Duplicate,
}

/// Result of flipping a presence flag. `rows_affected` is 0 when the `fid`
/// is not in the ledger; that is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceUpdate {
    pub dc: DataCenter,
    pub fid: String,
    pub rows_affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_asset_ignores_client_created() {
        let raw = r#"{"Fid":"1234.fid","Created":"1999-01-01T00:00:00Z","Origin":"ma01","Ma01":true,"Tx01":false}"#;
        let input: NewAsset = decode_payload(raw.as_bytes()).unwrap();
        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let asset = input.into_asset(stamp);
        assert_eq!(asset.created, stamp);
        assert_eq!(asset.fid, "1234.fid");
        assert!(asset.ma01 && !asset.tx01);
    }

    #[test]
    fn new_asset_defaults_missing_flags() {
        let input: NewAsset = decode_payload(br#"{"Fid":"x"}"#).unwrap();
        assert_eq!(input.origin, "");
        assert!(!input.ma01 && !input.tx01);
        input.validate().unwrap();
    }

    #[test]
    fn blank_fid_is_rejected() {
        let input: FileRef = decode_payload(br#"{"Fid":"  "}"#).unwrap();
        assert!(matches!(input.validate(), Err(ServiceError::Validation(_))));
        assert!(decode_payload::<FileRef>(br#"{"fid_typo":"x"}"#).is_err());
        assert!(decode_payload::<FileRef>(br#"["x"]"#).is_err());
    }

    #[test]
    fn keys_match_in_any_case() {
        let lower: NewAsset = decode_payload(br#"{"fid":"a.fid","origin":"ma01","ma01":true}"#).unwrap();
        assert_eq!(lower.fid, "a.fid");
        assert_eq!(lower.origin, "ma01");
        assert!(lower.ma01 && !lower.tx01);

        let mixed: NewAsset = decode_payload(br#"{"Fid":"b.fid","Origin":"ma01","ma01":true,"TX01":true}"#).unwrap();
        assert!(mixed.ma01 && mixed.tx01);

        let upper: FileRef = decode_payload(br#"{"FID":"c.fid"}"#).unwrap();
        assert_eq!(upper.fid, "c.fid");
    }

    #[test]
    fn last_spelling_of_a_key_wins() {
        let input: NewAsset = decode_payload(br#"{"Fid":"x","Ma01":true,"ma01":false}"#).unwrap();
        assert!(!input.ma01);
    }

    #[test]
    fn serializes_with_pascal_case_keys() {
        let v = serde_json::to_value(FileRef { fid: "x".into() }).unwrap();
        assert_eq!(v, serde_json::json!({"Fid": "x"}));
    }
}
