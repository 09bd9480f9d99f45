//! Error type for `rolo-store-sqlite`.

use rolo_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The `user.username` UNIQUE constraint rejected an insert.
  #[error("username already taken: {0}")]
  DuplicateUsername(String),
}

impl StoreError for Error {
  fn is_duplicate_username(&self) -> bool {
    matches!(self, Self::DuplicateUsername(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
