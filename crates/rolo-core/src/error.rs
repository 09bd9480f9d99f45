//! Error types for `rolo-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("username already taken: {0}")]
  UsernameTaken(String),

  #[error("contact not found: {0}")]
  ContactNotFound(i64),

  #[error("password hashing failed: {0}")]
  PasswordHash(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E: StoreError>(e: E) -> Self { Self::Store(Box::new(e)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure raised by a storage backend.
///
/// Backends report uniqueness violations on `user.username` through
/// [`StoreError::is_duplicate_username`] so the services can tell a taken
/// username apart from an I/O failure without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_duplicate_username(&self) -> bool;
}
