//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use promo_quote_core::pricing::{QuoteError, SelectionError};
use promo_quote_core::quote::QuoteRequestError;
use promo_quote_core::types::PriceParseError;
use serde::Serialize;
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog price could not be parsed.
    #[error("Invalid catalog price: {0}")]
    InvalidPrice(#[from] PriceParseError),

    /// Method or zone selection is not legal for the category.
    #[error("{0}")]
    Selection(#[from] SelectionError),

    /// Quote request failed validation.
    #[error("{0}")]
    QuoteRequest(#[from] QuoteRequestError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::Selection(err) => Self::Selection(err),
            err @ (QuoteError::PriceOutOfRange(_) | QuoteError::QuantityOutOfRange(_)) => {
                Self::BadRequest(err.to_string())
            }
            // Inputs were in range, so the catalog's own figures overflowed.
            err @ QuoteError::Overflow(_) => Self::Internal(err.to_string()),
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPrice(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Selection(_) | Self::QuoteRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        // Don't expose internal error details to clients
        let error = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (self.status(), Json(ErrorBody { error })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use promo_quote_core::PrintingMethodId;
    use promo_quote_core::pricing::QuoteOverflowError;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");

        let err = AppError::Selection(SelectionError::ZoneNotAllowed {
            category: "mugs".to_string(),
            zone: "espalda".to_string(),
        });
        assert_eq!(err.to_string(), "zone espalda is not allowed for category mugs");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::InvalidPrice(PriceParseError::Empty)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Selection(SelectionError::MethodNotActive {
                category: "t_shirts".to_string(),
                method: PrintingMethodId::Embroidery,
            })),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::QuoteRequest(QuoteRequestError::ZonesMismatch)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_quote_error_mapping() {
        let err = AppError::from(QuoteError::PriceOutOfRange(Decimal::from(-20)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(QuoteError::QuantityOutOfRange(4_000_000_000));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(QuoteError::Selection(SelectionError::NoActiveMethod {
            category: "mugs".to_string(),
        }));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = AppError::from(QuoteError::Overflow(QuoteOverflowError));
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
