//! [`SqliteStore`] — the SQLite implementation of [`CredentialStore`] and
//! [`ContactStore`].

use std::path::Path;

use rolo_core::{
  contact::{Contact, NewContact},
  store::{ContactStore, CredentialStore},
  user::User,
};
use rusqlite::{ErrorCode, OptionalExtension as _};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolo store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

const CONTACT_COLUMNS: &str = "id, name, phone, email";

fn contact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
  Ok(Contact {
    id:    row.get(0)?,
    name:  row.get::<_, Option<String>>(1)?.unwrap_or_default(),
    phone: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
    email: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
  })
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:            row.get(0)?,
    username:      row.get(1)?,
    password_hash: row.get(2)?,
  })
}

/// Build a `LIKE` pattern that matches `term` literally anywhere in a column.
/// Pairs with `ESCAPE '\'` in the query.
fn like_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for ch in term.chars() {
    if matches!(ch, '\\' | '%' | '_') {
      pattern.push('\\');
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
  )
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for SqliteStore {
  type Error = Error;

  async fn find_user(&self, username: &str) -> Result<Option<User>> {
    let username = username.to_owned();

    let user = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, username, password_hash FROM user WHERE username = ?1",
              rusqlite::params![username],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(user)
  }

  async fn insert_user(&self, username: String, password_hash: String) -> Result<User> {
    let (name, hash) = (username.clone(), password_hash.clone());

    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        match conn.execute(
          "INSERT INTO user (username, password_hash) VALUES (?1, ?2)",
          rusqlite::params![name, hash],
        ) {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          Err(e) if is_unique_violation(&e) => Ok(None),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match id {
      Some(id) => Ok(User { id, username, password_hash }),
      None => Err(Error::DuplicateUsername(username)),
    }
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let contacts = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contact ORDER BY id"))?;
        let rows = stmt
          .query_map([], contact_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(contacts)
  }

  async fn get_contact(&self, id: i64) -> Result<Option<Contact>> {
    let contact = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contact WHERE id = ?1"),
              rusqlite::params![id],
              contact_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(contact)
  }

  async fn search_contacts(&self, term: &str) -> Result<Vec<Contact>> {
    // `LIKE '%%'` would still skip rows whose columns are all NULL.
    if term.is_empty() {
      return self.list_contacts().await;
    }

    let pattern = like_pattern(term);

    let contacts = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          r"SELECT {CONTACT_COLUMNS} FROM contact
            WHERE name  LIKE ?1 ESCAPE '\'
               OR phone LIKE ?1 ESCAPE '\'
               OR email LIKE ?1 ESCAPE '\'
            ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![pattern], contact_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(contacts)
  }

  async fn insert_contact(&self, input: NewContact) -> Result<Contact> {
    let NewContact { name, phone, email } = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contact (name, phone, email) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, phone, email],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(input.into_contact(id))
  }

  async fn update_contact(&self, id: i64, input: NewContact) -> Result<Option<Contact>> {
    let NewContact { name, phone, email } = input.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contact SET name = ?1, phone = ?2, email = ?3 WHERE id = ?4",
          rusqlite::params![name, phone, email, id],
        )?)
      })
      .await?;

    Ok((changed > 0).then(|| input.into_contact(id)))
  }

  async fn delete_contact(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM contact WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(changed > 0)
  }
}
