//! Contact CRUD orchestration.
//!
//! A thin layer over [`ContactStore`] that turns absence into
//! [`Error::ContactNotFound`]. Nothing is validated here: empty names, phones,
//! and emails are stored as given.

use std::sync::Arc;

use crate::{
  Error, Result,
  contact::{Contact, NewContact},
  store::ContactStore,
};

pub struct ContactService<S> {
  store: Arc<S>,
}

impl<S: ContactStore> ContactService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn list(&self) -> Result<Vec<Contact>> {
    self.store.list_contacts().await.map_err(Error::store)
  }

  /// Contacts matching `term`; `None` or an empty term lists everything.
  pub async fn search(&self, term: Option<&str>) -> Result<Vec<Contact>> {
    match term.filter(|t| !t.is_empty()) {
      Some(term) => self.store.search_contacts(term).await.map_err(Error::store),
      None => self.list().await,
    }
  }

  pub async fn get(&self, id: i64) -> Result<Contact> {
    self
      .store
      .get_contact(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ContactNotFound(id))
  }

  pub async fn create(&self, input: NewContact) -> Result<Contact> {
    let contact = self.store.insert_contact(input).await.map_err(Error::store)?;
    tracing::debug!(id = contact.id, "created contact");
    Ok(contact)
  }

  /// Overwrite all three fields; the id is preserved.
  pub async fn update(&self, id: i64, input: NewContact) -> Result<Contact> {
    self
      .store
      .update_contact(id, input)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ContactNotFound(id))
  }

  pub async fn delete(&self, id: i64) -> Result<()> {
    if self.store.delete_contact(id).await.map_err(Error::store)? {
      tracing::debug!(id, "deleted contact");
      Ok(())
    } else {
      Err(Error::ContactNotFound(id))
    }
  }
}
