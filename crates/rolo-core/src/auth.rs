//! Registration, credential verification, and session state transitions.

use std::sync::Arc;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{
  Error, Result, StoreError, session::Session, store::CredentialStore,
  user::User,
};

/// Hash `password` into an argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Verify `password` against a stored PHC string.
///
/// An unparseable hash verifies as `false`. The comparison itself is
/// argon2's constant-time check.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(password_hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

pub struct AuthService<S> {
  store: Arc<S>,
}

impl<S: CredentialStore> AuthService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Create a new account.
  ///
  /// Returns [`Error::UsernameTaken`] when `username` already exists, whether
  /// caught by the lookup or by the store's uniqueness constraint.
  pub async fn register(&self, username: &str, password: &str) -> Result<User> {
    if self.find(username).await?.is_some() {
      return Err(Error::UsernameTaken(username.to_owned()));
    }

    let password_hash = hash_password(password)?;
    let user = self
      .store
      .insert_user(username.to_owned(), password_hash)
      .await
      .map_err(|e| {
        if e.is_duplicate_username() {
          Error::UsernameTaken(username.to_owned())
        } else {
          Error::store(e)
        }
      })?;

    tracing::info!(username = %user.username, id = user.id, "registered user");
    Ok(user)
  }

  /// `true` iff `username` exists and `password` matches its stored hash.
  /// The two failure cases are deliberately indistinguishable to callers.
  pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
    let ok = self
      .find(username)
      .await?
      .is_some_and(|user| verify_password(password, &user.password_hash));
    if !ok {
      tracing::debug!(%username, "authentication failed");
    }
    Ok(ok)
  }

  /// Mark `username` as the authenticated caller, replacing any previous one.
  pub fn login(&self, session: &mut Session, username: &str) {
    session.username = Some(username.to_owned());
    tracing::info!(%username, "logged in");
  }

  /// Clear the authenticated caller. A no-op for anonymous sessions.
  pub fn logout(&self, session: &mut Session) {
    if let Some(username) = session.username.take() {
      tracing::info!(%username, "logged out");
    }
  }

  pub fn is_authenticated(&self, session: &Session) -> bool {
    session.username.is_some()
  }

  async fn find(&self, username: &str) -> Result<Option<User>> {
    self.store.find_user(username).await.map_err(Error::store)
  }
}
