//! Registration, login, and logout.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/login` | Form |
//! | `POST` | `/login` | Redirects to `/` or re-renders with a flash |
//! | `GET`  | `/register` | Form |
//! | `POST` | `/register` | Redirects to `/login` or re-renders with a flash |
//! | `GET`  | `/logout` | Always redirects to `/login` |

use axum::{
  Form,
  extract::State,
  response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{AppState, Store, auth::WebSession, error::Error, handlers::render, views};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const USERNAME_TAKEN: &str = "Username already exists";
pub const REGISTERED: &str = "Registration successful! Please log in.";

#[derive(Debug, Deserialize)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// `GET /login`
pub async fn login_form(session: WebSession) -> Response {
  render(session, views::login)
}

/// `POST /login`
pub async fn login_submit<S: Store>(
  State(state): State<AppState<S>>,
  mut session: WebSession,
  Form(form): Form<Credentials>,
) -> Result<Response, Error> {
  if state.auth.authenticate(&form.username, &form.password).await? {
    state.auth.login(&mut session, &form.username);
    return Ok((session, Redirect::to("/")).into_response());
  }

  session.flash(INVALID_CREDENTIALS);
  Ok(render(session, views::login))
}

/// `GET /register`
pub async fn register_form(session: WebSession) -> Response {
  render(session, views::register)
}

/// `POST /register`
pub async fn register_submit<S: Store>(
  State(state): State<AppState<S>>,
  mut session: WebSession,
  Form(form): Form<Credentials>,
) -> Result<Response, Error> {
  match state.auth.register(&form.username, &form.password).await {
    Ok(_) => {
      session.flash(REGISTERED);
      Ok((session, Redirect::to("/login")).into_response())
    }
    Err(rolo_core::Error::UsernameTaken(_)) => {
      session.flash(USERNAME_TAKEN);
      Ok(render(session, views::register))
    }
    Err(e) => Err(e.into()),
  }
}

/// `GET /logout`
pub async fn logout<S: Store>(
  State(state): State<AppState<S>>,
  mut session: WebSession,
) -> Response {
  state.auth.logout(&mut session);
  (session, Redirect::to("/login")).into_response()
}
