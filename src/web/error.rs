use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::SortParseError;
use crate::navigation::{DirectionParseError, WindowParseError};

/// Message shown when a game id has no odds records
pub const NO_GAME_DATA: &str = "No game data available.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WindowParseError> for AppError {
    fn from(e: WindowParseError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<SortParseError> for AppError {
    fn from(e: SortParseError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<DirectionParseError> for AppError {
    fn from(e: DirectionParseError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(e) => {
                error!("Request failed: {:#}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = AppError::NotFound(NO_GAME_DATA.to_string());
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "No game data available.");

        let bad: AppError = "Someday".parse::<crate::navigation::Tab>().unwrap_err().into();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let internal: AppError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(internal.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
