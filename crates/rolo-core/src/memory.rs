//! In-memory [`CredentialStore`] and [`ContactStore`] — useful for testing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::{
  StoreError,
  contact::{Contact, NewContact},
  store::{ContactStore, CredentialStore},
  user::User,
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("username already taken: {0}")]
  DuplicateUsername(String),
}

impl StoreError for MemoryError {
  fn is_duplicate_username(&self) -> bool {
    matches!(self, Self::DuplicateUsername(_))
  }
}

#[derive(Debug, Default)]
struct Tables {
  users:           Vec<User>,
  contacts:        Vec<Contact>,
  next_user_id:    i64,
  next_contact_id: i64,
}

/// A store held entirely in process memory.
///
/// Cloning is cheap — clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn tables(&self) -> MutexGuard<'_, Tables> {
    self.tables.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl CredentialStore for MemoryStore {
  type Error = MemoryError;

  async fn find_user(&self, username: &str) -> Result<Option<User>, MemoryError> {
    Ok(self.tables().users.iter().find(|u| u.username == username).cloned())
  }

  async fn insert_user(
    &self,
    username: String,
    password_hash: String,
  ) -> Result<User, MemoryError> {
    let mut t = self.tables();
    if t.users.iter().any(|u| u.username == username) {
      return Err(MemoryError::DuplicateUsername(username));
    }
    t.next_user_id += 1;
    let user = User { id: t.next_user_id, username, password_hash };
    t.users.push(user.clone());
    Ok(user)
  }
}

impl ContactStore for MemoryStore {
  type Error = MemoryError;

  async fn list_contacts(&self) -> Result<Vec<Contact>, MemoryError> {
    Ok(self.tables().contacts.clone())
  }

  async fn get_contact(&self, id: i64) -> Result<Option<Contact>, MemoryError> {
    Ok(self.tables().contacts.iter().find(|c| c.id == id).cloned())
  }

  async fn search_contacts(&self, term: &str) -> Result<Vec<Contact>, MemoryError> {
    Ok(
      self
        .tables()
        .contacts
        .iter()
        .filter(|c| c.matches(term))
        .cloned()
        .collect(),
    )
  }

  async fn insert_contact(&self, input: NewContact) -> Result<Contact, MemoryError> {
    let mut t = self.tables();
    t.next_contact_id += 1;
    let contact = input.into_contact(t.next_contact_id);
    t.contacts.push(contact.clone());
    Ok(contact)
  }

  async fn update_contact(
    &self,
    id: i64,
    input: NewContact,
  ) -> Result<Option<Contact>, MemoryError> {
    let mut t = self.tables();
    Ok(t.contacts.iter_mut().find(|c| c.id == id).map(|c| {
      *c = input.into_contact(id);
      c.clone()
    }))
  }

  async fn delete_contact(&self, id: i64) -> Result<bool, MemoryError> {
    let mut t = self.tables();
    let before = t.contacts.len();
    t.contacts.retain(|c| c.id != id);
    Ok(t.contacts.len() != before)
  }
}
