//! User — a registered account.

use serde::Serialize;

/// A registered account. Created by registration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
  pub id:            i64,
  pub username:      String,
  /// argon2 PHC string, e.g. `$argon2id$v=19$…`. Never serialised.
  #[serde(skip)]
  pub password_hash: String,
}
