//! Error responses.
//!
//! # Responsibilities
//! - Map dispatch failures to HTTP status codes
//! - Render JSON error bodies
//!
//! # Design Decisions
//! - No match is a 404, never an error log
//! - A route that resolves without its declared integer parameter is a 500.
//!   The polls table always binds them; this guards custom tables.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure while dispatching a request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no route matches {path}")]
    NotFound {
        path: String,
        /// Patterns tried, when debug 404 bodies are enabled.
        tried: Option<Vec<String>>,
    },

    /// Only reachable with a custom table whose pattern lacks the
    /// parameter its view expects.
    #[error("route {view_name} resolved without integer parameter {param:?}")]
    MissingParam {
        view_name: String,
        param: &'static str,
    },
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tried: Option<&'a [String]>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MissingParam { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::NotFound { path, tried } => ErrorBody {
                error: "not found",
                path: Some(path.as_str()),
                tried: tried.as_deref(),
            },
            AppError::MissingParam { .. } => ErrorBody {
                error: "internal server error",
                path: None,
                tried: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
