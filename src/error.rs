//! Error taxonomy for the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::envelope::Envelope;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Product not found")]
    NotFound,

    /// Storage failure. The message keeps the driver text.
    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn query(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| ApiError::Query { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Query { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Query { context, source } = &self {
            error!(error = %source, context, "query failed");
        }
        let status = self.status();
        (status, Json(Envelope::<()>::failure(self.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
