// Catalog Error - the three outcomes a query can fail with
//
// Every query classifies its failure as one of:
// - NotFound: no matching cat
// - UnprocessableEntity: the cat exists but its birth date is missing
// - Internal: anything else (detail is logged, never returned to a caller)

/// Generic message returned for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No cat matched the request
    #[error("{0}")]
    NotFound(String),

    /// A cat matched but required secondary data is missing
    #[error("{0}")]
    UnprocessableEntity(String),

    /// Unclassified failure
    #[error("internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn not_found(message: impl Into<String>) -> Self {
        CatalogError::NotFound(message.into())
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        CatalogError::UnprocessableEntity(message.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        CatalogError::Internal(detail.into())
    }

    /// HTTP status code for this error kind
    pub fn http_status(&self) -> u16 {
        match self {
            CatalogError::NotFound(_) => 404,
            CatalogError::UnprocessableEntity(_) => 422,
            CatalogError::Internal(_) => 500,
        }
    }

    /// Message safe to show to a caller
    ///
    /// Internal details stay in the logs.
    pub fn public_message(&self) -> &str {
        match self {
            CatalogError::NotFound(message) | CatalogError::UnprocessableEntity(message) => message,
            CatalogError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

// ============================================================================
// HTTP TRANSLATION
// ============================================================================

#[cfg(feature = "server")]
mod http {
    use super::CatalogError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Json, Response};
    use serde::Serialize;

    /// Error body: `{"detail": "..."}`
    #[derive(Debug, Serialize)]
    pub struct ErrorBody<'a> {
        pub detail: &'a str,
    }

    impl IntoResponse for CatalogError {
        fn into_response(self) -> Response {
            match &self {
                CatalogError::Internal(detail) => {
                    tracing::error!(detail = %detail, "internal error while handling request");
                }
                other => {
                    tracing::debug!(status = other.http_status(), message = %other, "request rejected");
                }
            }

            let status = StatusCode::from_u16(self.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            (status, Json(ErrorBody { detail: self.public_message() })).into_response()
        }
    }
}

#[cfg(feature = "server")]
pub use http::ErrorBody;

// ============================================================================
// TESTS
// ============================================================================
