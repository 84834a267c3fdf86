//! Client-facing failure taxonomy.
//!
//! Every failure reaching the browser is one of these variants with a fixed
//! body. The underlying cause is logged where the variant is built and never
//! sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt::Display;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "Not Found";
pub const UNAVAILABLE_MESSAGE: &str = "Backend service unavailable";
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    NotFound,
    Unavailable,
    Internal,
}

impl AppError {
    /// The backend could not be reached or did not answer in time.
    pub fn unavailable(err: impl Display) -> Self {
        error!("Backend request failed: {err}");
        Self::Unavailable
    }

    /// Anything else that went wrong while handling the request.
    pub fn internal(err: impl Display) -> Self {
        error!("Internal error: {err}");
        Self::Internal
    }

    /// Classify a `reqwest` failure: requests that could not even be built
    /// are our fault, everything else is the backend being unreachable.
    pub fn from_upstream(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            Self::internal(err)
        } else {
            Self::unavailable(err)
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::Unavailable => UNAVAILABLE_MESSAGE,
            Self::Internal => INTERNAL_MESSAGE,
        }
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        Self::internal(format!("template rendering failed: {err:#}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}
