//! Mapping from failure kinds to HTTP responses.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{dto::ErrorResponse, repository::RepositoryError, validation::ValidationError};

pub const NOT_FOUND_MESSAGE: &str = "Note not found";
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";
pub const BODY_UNREADABLE_MESSAGE: &str = "Failed to read request body";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Note not found")]
    NotFound,

    /// The request body could not be buffered, e.g. it exceeds the body limit.
    #[error("{0}")]
    Body(#[from] BytesRejection),

    /// `context` is the stable label returned in the `error` field.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl ApiError {
    /// Builds a mapper for `map_err` that tags a storage failure with `context`.
    pub fn storage(context: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| Self::Storage { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Body(rejection) => rejection.status(),
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Validation(e) => ErrorResponse {
                error: e.to_string(),
                message: None,
            },
            Self::NotFound => ErrorResponse {
                error: NOT_FOUND_MESSAGE.to_string(),
                message: None,
            },
            Self::Body(rejection) => {
                let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    BODY_TOO_LARGE_MESSAGE
                } else {
                    BODY_UNREADABLE_MESSAGE
                };
                ErrorResponse {
                    error: error.to_string(),
                    message: Some(rejection.body_text()),
                }
            }
            Self::Storage { context, source } => {
                tracing::error!("{}: {}", context, source);
                ErrorResponse {
                    error: context.to_string(),
                    message: Some(source.to_string()),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
