use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Which write endpoint a failure belongs to; selects the body key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Insert,
    Update,
}

impl WriteOp {
    pub fn key(self) -> &'static str {
        match self {
            WriteOp::Insert => "insert",
            WriteOp::Update => "update",
        }
    }

    /// `{"insert":"success"}` / `{"update":"success"}`
    pub fn success(self) -> Response {
        Json(json!({ self.key(): "success" })).into_response()
    }

    fn fail_body(self) -> Json<serde_json::Value> {
        Json(json!({ self.key(): "fail" }))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown data center: {0}")]
    UnknownDataCenter(String),
    #[error("malformed {} request: {reason}", .op.key())]
    BadRequest { op: WriteOp, reason: String },
    /// Store error or duplicate on a write path. Still a 200: callers read the body.
    #[error("{} failed", .op.key())]
    WriteFailed { op: WriteOp },
    #[error("ledger unavailable")]
    Unavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UnknownDataCenter(_) => {
                (StatusCode::NOT_FOUND, Json(json!({"error": self.to_string()}))).into_response()
            }
            ApiError::BadRequest { op, .. } => (StatusCode::BAD_REQUEST, op.fail_body()).into_response(),
            ApiError::WriteFailed { op } => (StatusCode::OK, op.fail_body()).into_response(),
            ApiError::Unavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": self.to_string()}))).into_response()
            }
        }
    }
}
