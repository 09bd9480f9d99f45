//! Cookie-backed session extractor and the login gate.
//!
//! The session lives in two private (encrypted and authenticated) cookies:
//! one carrying the username, one carrying pending flash messages as a JSON
//! array. [`WebSession`] decodes them into a [`Session`] for the handler and
//! writes any changes back when returned as part of the response.

use std::{
  convert::Infallible,
  ops::{Deref, DerefMut},
};

use axum::{
  extract::FromRequestParts,
  http::request::Parts,
  response::{IntoResponseParts, Redirect, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use rolo_core::Session;

use crate::{AppState, Store};

pub const SESSION_COOKIE: &str = "rolo_session";
pub const FLASH_COOKIE: &str = "rolo_flash";

/// The per-request session, bound to the cookie jar it was read from.
pub struct WebSession {
  jar:     PrivateCookieJar,
  session: Session,
}

impl WebSession {
  pub fn from_jar(jar: PrivateCookieJar) -> Self {
    let username = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned());
    let flashes = jar
      .get(FLASH_COOKIE)
      .and_then(|c| serde_json::from_str(c.value()).ok())
      .unwrap_or_default();
    Self { jar, session: Session::new(username, flashes) }
  }

  /// Fold the session state back into cookies. Only cookies whose value
  /// changed during the request are emitted.
  pub fn into_jar(self) -> PrivateCookieJar {
    let Self { mut jar, session } = self;

    let stored_user = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned());
    if stored_user != session.username {
      jar = match session.username {
        Some(username) => jar.add(build_cookie(SESSION_COOKIE, username)),
        None => jar.remove(clear_cookie(SESSION_COOKIE)),
      };
    }

    let stored_flashes = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned());
    let flashes = (!session.flashes.is_empty())
      .then(|| serde_json::to_string(&session.flashes).unwrap_or_else(|_| "[]".into()));
    if stored_flashes != flashes {
      jar = match flashes {
        Some(value) => jar.add(build_cookie(FLASH_COOKIE, value)),
        None => jar.remove(clear_cookie(FLASH_COOKIE)),
      };
    }

    jar
  }
}

impl Deref for WebSession {
  type Target = Session;

  fn deref(&self) -> &Session { &self.session }
}

impl DerefMut for WebSession {
  fn deref_mut(&mut self) -> &mut Session { &mut self.session }
}

impl IntoResponseParts for WebSession {
  type Error = Infallible;

  fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
    self.into_jar().into_response_parts(res)
  }
}

impl<S: Store> FromRequestParts<AppState<S>> for WebSession {
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
    Ok(Self::from_jar(jar))
  }
}

// Session-only cookies: no Max-Age, so the browser drops them on exit.
fn build_cookie(name: &'static str, value: String) -> Cookie<'static> {
  Cookie::build(Cookie::new(name, value))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .build()
}

fn clear_cookie(name: &'static str) -> Cookie<'static> {
  Cookie::build(Cookie::new(name, "")).path("/").build()
}

// ─── Login gate ──────────────────────────────────────────────────────────────

/// Present in the handler means the caller is logged in. Anonymous requests
/// are redirected to `/login` before the handler (or any body extractor)
/// runs.
pub struct Authenticated(pub WebSession);

impl<S: Store> FromRequestParts<AppState<S>> for Authenticated {
  type Rejection = Redirect;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let session = match WebSession::from_request_parts(parts, state).await {
      Ok(session) => session,
      Err(never) => match never {},
    };
    if state.auth.is_authenticated(&session) {
      Ok(Authenticated(session))
    } else {
      Err(Redirect::to("/login"))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn jar(key: &Key) -> PrivateCookieJar { PrivateCookieJar::new(key.clone()) }

  #[test]
  fn fresh_jar_yields_anonymous_session() {
    let s = WebSession::from_jar(jar(&Key::generate()));
    assert!(s.username.is_none());
    assert!(s.flashes.is_empty());
  }

  #[test]
  fn session_state_round_trips_through_the_jar() {
    let key = Key::generate();
    let mut s = WebSession::from_jar(jar(&key));
    s.username = Some("alice".into());
    s.flash("hello");

    let s = WebSession::from_jar(s.into_jar());
    assert_eq!(s.username.as_deref(), Some("alice"));
    assert_eq!(s.flashes, vec!["hello"]);
  }

  #[test]
  fn unchanged_session_emits_no_cookies() {
    let s = WebSession::from_jar(jar(&Key::generate()));
    let jar = s.into_jar();
    assert!(jar.get(SESSION_COOKIE).is_none());
    assert!(jar.get(FLASH_COOKIE).is_none());
  }
}
