//! Runtime configuration: built-in defaults, an optional TOML file, then
//! `ROLO_*` environment variables.

use std::path::{Path, PathBuf};

use axum_extra::extract::cookie::Key;
use rand_core::{OsRng, RngCore as _};
use serde::Deserialize;
use thiserror::Error;

/// Minimum decoded length of `session_secret`; the cookie key needs 64 bytes.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum SecretError {
  #[error("session_secret is not valid hex: {0}")]
  Hex(#[from] hex::FromHexError),

  #[error("session_secret must decode to at least {MIN_SECRET_LEN} bytes, got {0}")]
  TooShort(usize),
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  /// SQLite database file; created on first start. A leading `~/` is
  /// expanded by the binary.
  pub store_path:     PathBuf,
  /// Hex-encoded key for the session cookies. When absent a random key is
  /// generated at startup and sessions do not survive a restart.
  pub session_secret: Option<String>,
}

impl ServerConfig {
  /// Layer defaults, the TOML file at `path` (if it exists), and `ROLO_*`
  /// environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5000_i64)?
      .set_default("store_path", "rolo.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROLO"))
      .build()?
      .try_deserialize()
  }

  /// The cookie key derived from `session_secret`, if one is configured.
  pub fn session_key(&self) -> Result<Option<Key>, SecretError> {
    let Some(secret) = &self.session_secret else {
      return Ok(None);
    };
    let bytes = hex::decode(secret.trim())?;
    if bytes.len() < MIN_SECRET_LEN {
      return Err(SecretError::TooShort(bytes.len()));
    }
    Ok(Some(Key::from(&bytes)))
  }
}

/// A fresh random secret suitable for `session_secret`.
pub fn generate_secret() -> String {
  let mut bytes = [0u8; MIN_SECRET_LEN];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}
