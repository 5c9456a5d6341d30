//! Central error type for the gateway
//!
//! Every user-visible failure maps to one variant; the HTTP layer
//! renders them all as `{"error": "..."}` with the matching status.
//! Durable-store failures collapse into `Internal` after their
//! transaction has rolled back, and only the log keeps the cause.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("price must be between 0.01 and 0.99")]
    InvalidPrice,

    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    #[error("invalid outcome")]
    InvalidOutcome,

    #[error("invalid side")]
    InvalidSide,

    #[error("market not found")]
    MarketNotFound,

    #[error("order not found")]
    OrderNotFound,

    #[error("market is not active")]
    MarketNotActive,

    #[error("order cannot be cancelled")]
    NotCancellable,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("order does not belong to user")]
    Forbidden,

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPrice
            | ApiError::InvalidQuantity
            | ApiError::InvalidOutcome
            | ApiError::InvalidSide
            | ApiError::MarketNotActive
            | ApiError::NotCancellable
            | ApiError::InsufficientBalance
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MarketNotFound | ApiError::OrderNotFound => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref cause) = self {
            tracing::error!(error = ?cause, "internal error");
        }

        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidPrice.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidQuantity.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidOutcome.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidSide.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MarketNotActive.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotCancellable.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InsufficientBalance.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MarketNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::OrderNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Unauthenticated("missing wallet address".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "internal server error");
    }
}
