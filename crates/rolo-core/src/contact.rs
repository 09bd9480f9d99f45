//! Contact records.

use serde::{Deserialize, Serialize};

/// A stored contact. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
  pub id:    i64,
  pub name:  String,
  pub phone: String,
  pub email: String,
}

impl Contact {
  /// Case-insensitive substring match against any of the three fields.
  ///
  /// Folding is ASCII-only, matching SQLite's `LIKE`. An empty term matches
  /// every contact.
  pub fn matches(&self, term: &str) -> bool {
    let term = term.to_ascii_lowercase();
    [&self.name, &self.phone, &self.email]
      .into_iter()
      .any(|field| field.to_ascii_lowercase().contains(&term))
  }
}

/// The editable fields of a contact; input to create and update.
///
/// No field is validated. Empty strings are stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewContact {
  pub name:  String,
  pub phone: String,
  pub email: String,
}

impl NewContact {
  pub fn new(
    name: impl Into<String>,
    phone: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self { name: name.into(), phone: phone.into(), email: email.into() }
  }

  pub fn into_contact(self, id: i64) -> Contact {
    Contact { id, name: self.name, phone: self.phone, email: self.email }
  }
}
