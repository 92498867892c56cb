use serde::{Deserialize, Serialize};
use tower_api_client::{Error as ApiError, StatusCode};

/// Error body the backend returns when a new trip point's time range collides
/// with an existing one on the same day.
pub const OVERLAP_SENTINEL: &str = "new trip point overlaps with an existing trip point";

#[derive(Debug)]
pub enum TravelerApiError {
    Api(StatusCode, ErrorDetail),
    Internal(ApiError),
}

impl TravelerApiError {
    /// True when the server rejected a trip-point create because it overlaps
    /// an existing entry on the same day.
    pub fn is_overlap_conflict(&self) -> bool {
        matches!(self, TravelerApiError::Api(_, detail) if detail.message == OVERLAP_SENTINEL)
    }
}

impl From<ApiError> for TravelerApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                // The backend usually wraps errors in `{"error": {...}}`, but
                // some endpoints return a bare string body (the overlap
                // sentinel among them).
                let parsed = serde_json::from_str::<ErrorResponse>(&detail)
                    .map(|response| response.error)
                    .or_else(|_| serde_json::from_str::<String>(&detail).map(ErrorDetail::from))
                    .unwrap_or_else(|_| ErrorDetail::from(detail));
                TravelerApiError::Api(status, parsed)
            }
            e => TravelerApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for TravelerApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelerApiError::Internal(e) => write!(f, "Internal error: {}", e),
            TravelerApiError::Api(status, detail) => match &detail.code {
                Some(code) => write!(f, "({}) {}: {}", status, code, detail.message),
                None => write!(f, "({}) {}", status, detail.message),
            },
        }
    }
}

impl std::error::Error for TravelerApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

impl From<String> for ErrorDetail {
    fn from(message: String) -> Self {
        Self {
            code: None,
            message,
        }
    }
}
