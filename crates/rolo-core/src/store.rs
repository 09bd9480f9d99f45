//! The `CredentialStore` and `ContactStore` traits.
//!
//! The traits are implemented by storage backends (e.g. `rolo-store-sqlite`
//! and [`crate::memory::MemoryStore`]). The services depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  StoreError,
  contact::{Contact, NewContact},
  user::User,
};

// ─── Credentials ─────────────────────────────────────────────────────────────

/// Persistence for registered users.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CredentialStore: Send + Sync {
  type Error: StoreError;

  /// Case-sensitive exact lookup. Returns `None` if no such user exists.
  fn find_user<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Persist a new user and return it with its assigned id.
  ///
  /// Fails with an error whose [`StoreError::is_duplicate_username`] is true
  /// when `username` is already taken.
  fn insert_user(
    &self,
    username: String,
    password_hash: String,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;
}

// ─── Contacts ────────────────────────────────────────────────────────────────

/// Persistence for the shared contact table.
pub trait ContactStore: Send + Sync {
  type Error: StoreError;

  /// All contacts in insertion (id) order.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Contacts whose name, phone, or email contains `term`, ignoring ASCII
  /// case, in id order. An empty `term` returns every contact.
  fn search_contacts<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;

  /// Persist a new contact and return it with its assigned id.
  fn insert_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Overwrite all three fields of contact `id`. Returns `None` if not found.
  fn update_contact(
    &self,
    id: i64,
    input: NewContact,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Remove contact `id`. Returns `false` if it did not exist.
  fn delete_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
