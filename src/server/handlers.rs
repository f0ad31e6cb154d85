//! HTTP handlers

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::AppState;
use crate::recognition::{RecognitionError, RecognitionResult};

/// Multipart field carrying the audio clip
pub const UPLOAD_FIELD: &str = "file";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET / and GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /recognize
///
/// Accepts a multipart upload with the clip in the `file` field. A clip
/// that matches nothing still answers 200 with the `error` field set; only
/// a failed engine run is an HTTP error.
pub async fn recognize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RecognitionResult>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(ApiError::from_multipart)? {
        if field.name() == Some(UPLOAD_FIELD) {
            let filename = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(ApiError::from_multipart)?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or_else(|| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("missing multipart field `{UPLOAD_FIELD}`"),
        )
    })?;

    tracing::info!(filename = ?filename, size = bytes.len(), "Recognition request");
    let result = state
        .service
        .recognize_upload(&bytes, filename.as_deref())
        .await?;
    Ok(Json(result))
}

/// Error response: `{"error": "..."}` with a matching status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn from_multipart(e: MultipartError) -> Self {
        Self::new(e.status(), e.body_text())
    }
}

impl From<RecognitionError> for ApiError {
    fn from(e: RecognitionError) -> Self {
        let status = match &e {
            RecognitionError::EmptyUpload => StatusCode::BAD_REQUEST,
            RecognitionError::EngineUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RecognitionError::EngineTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            RecognitionError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        };
        if e.is_engine_failure() {
            tracing::error!(%status, "Recognition failed: {}", e);
        } else {
            tracing::warn!(%status, "Recognition failed: {}", e);
        }
        Self::new(status, e.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
