//! Per-request session context.
//!
//! A [`Session`] is built from the incoming request, mutated by the handler,
//! and written back into the response. Nothing about it outlives the request
//! except what the transport (a cookie) carries.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
  /// The authenticated caller, if any. At most one per session.
  pub username: Option<String>,
  /// One-time notices to show on the next rendered page.
  pub flashes:  Vec<String>,
}

impl Session {
  pub fn new(username: Option<String>, flashes: Vec<String>) -> Self {
    Self { username, flashes }
  }

  /// Queue a notice for the next rendered page.
  pub fn flash(&mut self, message: impl Into<String>) {
    self.flashes.push(message.into());
  }

  /// Drain the pending notices; each is displayed once.
  pub fn take_flashes(&mut self) -> Vec<String> { std::mem::take(&mut self.flashes) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flashes_are_taken_once() {
    let mut s = Session::default();
    s.flash("one");
    s.flash("two");
    assert_eq!(s.take_flashes(), vec!["one", "two"]);
    assert!(s.take_flashes().is_empty());
  }
}
