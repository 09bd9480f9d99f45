//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,
  #[error(transparent)]
  Core(rolo_core::Error),
}

impl From<rolo_core::Error> for Error {
  fn from(e: rolo_core::Error) -> Self {
    match e {
      rolo_core::Error::ContactNotFound(_) => Error::NotFound,
      other => Error::Core(other),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      Error::Core(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
    }
  }
}
