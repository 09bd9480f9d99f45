pub mod account;
pub mod contacts;

use axum::response::{Html, IntoResponse, Response};

use crate::auth::WebSession;

/// Render a page with the session's pending flashes, which are consumed.
pub(super) fn render(
  mut session: WebSession,
  view: impl FnOnce(&[String]) -> String,
) -> Response {
  let flashes = session.take_flashes();
  let html = view(&flashes);
  (session, Html(html)).into_response()
}
