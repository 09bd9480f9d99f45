//! Contact listing and CRUD. Every route here sits behind [`Authenticated`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Optional `?search=` |
//! | `GET`  | `/add` | Form |
//! | `POST` | `/add` | Redirects to `/` |
//! | `GET`  | `/edit/{id}` | Pre-filled form; 404 if not found |
//! | `POST` | `/edit/{id}` | Redirects to `/`; 404 if not found |
//! | `GET`  | `/delete/{id}` | Redirects to `/`; 404 if not found |

use axum::{
  Form,
  extract::{Path, Query, State},
  response::{Redirect, Response},
};
use rolo_core::contact::NewContact;
use serde::Deserialize;

use crate::{AppState, Store, auth::Authenticated, error::Error, handlers::render, views};

/// Ids that are not positive integers can never match a row.
fn parse_id(raw: &str) -> Result<i64, Error> {
  raw.parse::<i64>().ok().filter(|id| *id > 0).ok_or(Error::NotFound)
}

#[derive(Debug, Deserialize)]
pub struct IndexParams {
  pub search: Option<String>,
}

/// `GET /[?search=<term>]`
pub async fn index<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(session): Authenticated,
  Query(params): Query<IndexParams>,
) -> Result<Response, Error> {
  let search = params.search.as_deref();
  let contacts = state.contacts.search(search).await?;
  let username = session.username.clone().unwrap_or_default();
  Ok(render(session, |flashes| views::index(&username, &contacts, search, flashes)))
}

/// `GET /add`
pub async fn add_form(Authenticated(session): Authenticated) -> Response {
  render(session, views::add_contact)
}

/// `POST /add`
pub async fn add_submit<S: Store>(
  State(state): State<AppState<S>>,
  _: Authenticated,
  Form(input): Form<NewContact>,
) -> Result<Redirect, Error> {
  let contact = state.contacts.create(input).await?;
  tracing::info!(id = contact.id, "added contact");
  Ok(Redirect::to("/"))
}

/// `GET /edit/{id}`
pub async fn edit_form<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(session): Authenticated,
  Path(id): Path<String>,
) -> Result<Response, Error> {
  let contact = state.contacts.get(parse_id(&id)?).await?;
  Ok(render(session, |flashes| views::edit_contact(&contact, flashes)))
}

/// `POST /edit/{id}`
pub async fn edit_submit<S: Store>(
  State(state): State<AppState<S>>,
  _: Authenticated,
  Path(id): Path<String>,
  Form(input): Form<NewContact>,
) -> Result<Redirect, Error> {
  let contact = state.contacts.update(parse_id(&id)?, input).await?;
  tracing::info!(id = contact.id, "updated contact");
  Ok(Redirect::to("/"))
}

/// `GET /delete/{id}`
pub async fn delete<S: Store>(
  State(state): State<AppState<S>>,
  _: Authenticated,
  Path(id): Path<String>,
) -> Result<Redirect, Error> {
  let id = parse_id(&id)?;
  state.contacts.delete(id).await?;
  tracing::info!(id, "deleted contact");
  Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_positive_integers_are_ids() {
    assert_eq!(parse_id("12").unwrap(), 12);
    assert!(matches!(parse_id("0"), Err(Error::NotFound)));
    assert!(matches!(parse_id("-3"), Err(Error::NotFound)));
    assert!(matches!(parse_id("abc"), Err(Error::NotFound)));
  }
}
