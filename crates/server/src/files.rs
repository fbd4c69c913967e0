//! Handlers for the `/file/*` endpoints.
//!
//! Bodies are decoded from raw bytes so clients posting JSON without an
//! `application/json` content type (`curl -d`) keep working. Object keys
//! match regardless of case.

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, info, warn};

use common::metrics;
use models::DataCenter;
use service::ledger::domain::{decode_payload, BadFile, FileRef, NewAsset, Registration};

use crate::errors::{ApiError, WriteOp};
use crate::state::AppState;

fn client_ip(peer: Option<&ConnectInfo<SocketAddr>>) -> String {
    peer.map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".into())
}

fn parse_dc(raw: &str) -> Result<DataCenter, ApiError> {
    raw.parse::<DataCenter>()
        .map_err(|_| ApiError::UnknownDataCenter(raw.to_string()))
}

fn decode<T: DeserializeOwned>(op: WriteOp, client: &str, body: &[u8]) -> Result<T, ApiError> {
    decode_payload(body).map_err(|e| {
        warn!(%client, op = op.key(), err = %e, "failed to decode body");
        ApiError::BadRequest { op, reason: e.to_string() }
    })
}

/// GET /file/bad/:dc
pub async fn get_bad_file(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    Path(dc): Path<String>,
) -> Result<Response, ApiError> {
    let dc = parse_dc(&dc)?;
    let client = client_ip(peer.as_ref());

    match state.ledger.bad_file(dc).await {
        Ok(BadFile::Missing(asset)) => {
            info!(
                %client,
                %dc,
                fid = %asset.fid,
                created = %asset.created,
                origin = %asset.origin.to_uppercase(),
                ma01 = asset.ma01,
                tx01 = asset.tx01,
                "requested bad file"
            );
            metrics::record_request("get_bad_file", "missing");
            Ok(Json(asset).into_response())
        }
        Ok(BadFile::AllGood) => {
            info!(%client, %dc, "requested bad file: none missing");
            metrics::record_request("get_bad_file", "all_good");
            Ok(Json(json!({"all": "good"})).into_response())
        }
        Err(e) => {
            error!(%client, %dc, err = %e, "failed to fetch file info");
            metrics::record_request("get_bad_file", "error");
            Err(ApiError::Unavailable)
        }
    }
}

/// POST /file/new
pub async fn add_new_file(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let op = WriteOp::Insert;
    let client = client_ip(peer.as_ref());
    let input: NewAsset = decode(op, &client, &body)?;

    info!(
        %client,
        fid = %input.fid,
        origin = %input.origin.to_uppercase(),
        ma01 = input.ma01,
        tx01 = input.tx01,
        "adding new file"
    );

    match state.ledger.register(input).await {
        Ok(Registration::Inserted) => {
            metrics::record_request("add_new_file", "inserted");
            Ok(op.success())
        }
        Ok(Registration::Duplicate) => {
            warn!(%client, "insert not applied: fid already registered");
            metrics::record_request("add_new_file", "duplicate");
            Err(ApiError::WriteFailed { op })
        }
        Err(e) if e.is_client_error() => {
            warn!(%client, err = %e, "rejected new file");
            metrics::record_request("add_new_file", "rejected");
            Err(ApiError::BadRequest { op, reason: e.to_string() })
        }
        Err(e) => {
            error!(%client, err = %e, "failed to insert");
            metrics::record_request("add_new_file", "error");
            Err(ApiError::WriteFailed { op })
        }
    }
}

/// POST /file/add/:dc
pub async fn update_file(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    Path(dc): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let op = WriteOp::Update;
    let dc = parse_dc(&dc)?;
    let client = client_ip(peer.as_ref());
    let input: FileRef = decode(op, &client, &body)?;

    info!(%client, fid = %input.fid, dc = %dc.as_str().to_uppercase(), "toggling file as present");

    match state.ledger.mark_present(dc, input).await {
        Ok(update) => {
            let outcome = if update.rows_affected == 0 { "unknown_fid" } else { "updated" };
            metrics::record_request("update_file", outcome);
            Ok(op.success())
        }
        Err(e) if e.is_client_error() => {
            warn!(%client, err = %e, "rejected presence update");
            metrics::record_request("update_file", "rejected");
            Err(ApiError::BadRequest { op, reason: e.to_string() })
        }
        Err(e) => {
            error!(%client, %dc, err = %e, "failed to update");
            metrics::record_request("update_file", "error");
            Err(ApiError::WriteFailed { op })
        }
    }
}
