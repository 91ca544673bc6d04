use std::fmt;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

pub fn err_not_found<T>() -> StandardResponse<T> {
    Err(FailureResponse::NotFound("試合が見つかりません".to_string()))
}

pub fn bad_request<T>(msg: impl Into<String>) -> StandardResponse<T> {
    Err(FailureResponse::BadRequest(msg.into()))
}

pub fn conflict<T>(msg: impl Into<String>) -> StandardResponse<T> {
    Err(FailureResponse::Conflict(msg.into()))
}

pub fn success<T: Serialize>(body: T) -> StandardResponse<Json<T>> {
    Ok(Json(body))
}

pub type StandardResponse<T = Json<serde_json::Value>> =
    Result<T, FailureResponse>;

#[derive(Debug)]
pub enum FailureResponse {
    BadRequest(String),
    NotFound(String),
    /// The request is well formed, but the current state of the tournament
    /// does not allow it (e.g. the next match has already started).
    Conflict(String),
    ServerError(()),
}

impl FailureResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            FailureResponse::BadRequest(_) => StatusCode::BAD_REQUEST,
            FailureResponse::NotFound(_) => StatusCode::NOT_FOUND,
            FailureResponse::Conflict(_) => StatusCode::CONFLICT,
            FailureResponse::ServerError(()) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for FailureResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureResponse::BadRequest(msg)
            | FailureResponse::NotFound(msg)
            | FailureResponse::Conflict(msg) => f.write_str(msg),
            FailureResponse::ServerError(()) => {
                f.write_str("サーバーエラーが発生しました")
            }
        }
    }
}

impl std::error::Error for FailureResponse {}

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<diesel::result::Error> for FailureResponse {
    fn from(e: diesel::result::Error) -> Self {
        tracing::error!("database error: {e}");
        FailureResponse::ServerError(())
    }
}

impl From<diesel::r2d2::PoolError> for FailureResponse {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        tracing::error!("failed to obtain a connection: {e}");
        FailureResponse::ServerError(())
    }
}

impl From<JsonRejection> for FailureResponse {
    fn from(e: JsonRejection) -> Self {
        FailureResponse::BadRequest(e.body_text())
    }
}

/// Stored score documents are written by us, so a decoding failure means the
/// row is corrupt rather than that the client sent something wrong.
impl From<serde_json::Error> for FailureResponse {
    fn from(e: serde_json::Error) -> Self {
        tracing::error!("malformed score document: {e}");
        FailureResponse::ServerError(())
    }
}
