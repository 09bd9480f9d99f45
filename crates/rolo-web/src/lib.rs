//! HTTP front end for the Rolo contact book.
//!
//! Exposes an axum [`Router`] serving server-rendered HTML, backed by any
//! store implementing both [`CredentialStore`] and [`ContactStore`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod views;

pub use config::ServerConfig;
pub use error::Error;

use std::sync::Arc;

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use rolo_core::{
  AuthService, ContactService,
  store::{ContactStore, CredentialStore},
};
use tower_http::trace::TraceLayer;

use handlers::{account, contacts};

// ─── Application state ────────────────────────────────────────────────────────

/// A backend usable by the web layer.
pub trait Store: CredentialStore + ContactStore + Clone + 'static {}

impl<T> Store for T where T: CredentialStore + ContactStore + Clone + 'static {}

/// Shared state threaded through all axum handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState<S> {
  pub auth:     Arc<AuthService<S>>,
  pub contacts: Arc<ContactService<S>>,
  /// Encrypts and authenticates the session cookies.
  pub key:      Key,
}

impl<S: Store> AppState<S> {
  pub fn new(store: Arc<S>, key: Key) -> Self {
    Self {
      auth:     Arc::new(AuthService::new(store.clone())),
      contacts: Arc::new(ContactService::new(store)),
      key,
    }
  }
}

impl<S> FromRef<AppState<S>> for Key {
  fn from_ref(state: &AppState<S>) -> Self { state.key.clone() }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the contact book.
pub fn router<S: Store>(state: AppState<S>) -> Router {
  Router::new()
    .route("/",            get(contacts::index::<S>))
    .route("/login",       get(account::login_form).post(account::login_submit::<S>))
    .route("/register",    get(account::register_form).post(account::register_submit::<S>))
    .route("/logout",      get(account::logout::<S>))
    .route("/add",         get(contacts::add_form).post(contacts::add_submit::<S>))
    .route("/edit/{id}",   get(contacts::edit_form::<S>).post(contacts::edit_submit::<S>))
    .route("/delete/{id}", get(contacts::delete::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use rolo_core::contact::NewContact;
  use rolo_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  /// Drives the router like a browser: remembers cookies between requests.
  struct Client {
    app:     Router,
    store:   Arc<SqliteStore>,
    cookies: HashMap<String, String>,
  }

  impl Client {
    async fn new() -> Self {
      let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
      let app   = router(AppState::new(store.clone(), Key::generate()));
      Self { app, store, cookies: HashMap::new() }
    }

    async fn send(&mut self, method: &str, uri: &str, form: Option<&str>) -> Response {
      let mut builder = Request::builder().method(method).uri(uri);
      if !self.cookies.is_empty() {
        let header_val = self
          .cookies
          .iter()
          .map(|(k, v)| format!("{k}={v}"))
          .collect::<Vec<_>>()
          .join("; ");
        builder = builder.header(header::COOKIE, header_val);
      }
      if form.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
      }
      let req  = builder.body(Body::from(form.unwrap_or_default().to_string())).unwrap();
      let resp = self.app.clone().oneshot(req).await.unwrap();

      for set in resp.headers().get_all(header::SET_COOKIE) {
        let pair = set.to_str().unwrap().split(';').next().unwrap();
        let (name, value) = pair.split_once('=').unwrap();
        if value.is_empty() {
          self.cookies.remove(name);
        } else {
          self.cookies.insert(name.to_string(), value.to_string());
        }
      }
      resp
    }

    async fn get(&mut self, uri: &str) -> Response { self.send("GET", uri, None).await }

    async fn post(&mut self, uri: &str, form: &str) -> Response {
      self.send("POST", uri, Some(form)).await
    }

    async fn register_and_login(&mut self, username: &str, password: &str) {
      let form = format!("username={username}&password={password}");
      let resp = self.post("/register", &form).await;
      assert_redirect(&resp, "/login");
      let resp = self.post("/login", &form).await;
      assert_redirect(&resp, "/");
    }
  }

  fn assert_redirect(resp: &Response, to: &str) {
    assert!(resp.status().is_redirection(), "status {}", resp.status());
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, to);
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  async fn contact_count(store: &SqliteStore) -> usize {
    store.list_contacts().await.unwrap().len()
  }

  // ── Gating ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn anonymous_requests_are_redirected_without_side_effects() {
    let mut client = Client::new().await;
    let seeded = client
      .store
      .insert_contact(NewContact::new("Bob", "555-1234", "bob@x.com"))
      .await
      .unwrap();
    let edit   = format!("/edit/{}", seeded.id);
    let delete = format!("/delete/{}", seeded.id);

    assert_redirect(&client.get("/").await, "/login");
    assert_redirect(&client.get("/?search=bob").await, "/login");
    assert_redirect(&client.get("/add").await, "/login");
    assert_redirect(&client.post("/add", "name=Eve&phone=1&email=e").await, "/login");
    assert_redirect(&client.get(&edit).await, "/login");
    assert_redirect(&client.post(&edit, "name=Eve&phone=1&email=e").await, "/login");
    assert_redirect(&client.get(&delete).await, "/login");
    assert_redirect(&client.get("/delete/999").await, "/login");

    let all = client.store.list_contacts().await.unwrap();
    assert_eq!(all, vec![seeded]);
  }

  #[tokio::test]
  async fn forged_session_cookie_is_ignored() {
    let mut client = Client::new().await;
    client.cookies.insert("rolo_session".into(), "alice".into());
    assert_redirect(&client.get("/").await, "/login");
  }

  #[tokio::test]
  async fn login_and_register_pages_are_public() {
    let mut client = Client::new().await;
    assert_eq!(client.get("/login").await.status(), StatusCode::OK);
    assert_eq!(client.get("/register").await.status(), StatusCode::OK);
  }

  // ── Accounts ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn registration_flash_is_shown_once_on_login_page() {
    let mut client = Client::new().await;
    let resp = client.post("/register", "username=alice&password=secret1").await;
    assert_redirect(&resp, "/login");

    let page = body_text(client.get("/login").await).await;
    assert!(page.contains("Registration successful! Please log in."), "{page}");

    let page = body_text(client.get("/login").await).await;
    assert!(!page.contains("Registration successful"), "{page}");
  }

  #[tokio::test]
  async fn duplicate_registration_rerenders_with_message() {
    let mut client = Client::new().await;
    client.post("/register", "username=alice&password=secret1").await;

    let resp = client.post("/register", "username=alice&password=other").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Username already exists"));

    // Still exactly one alice, with the first password.
    let user = client.store.find_user("alice").await.unwrap().unwrap();
    assert_eq!(user.id, 1);
    let resp = client.post("/login", "username=alice&password=other").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = client.post("/login", "username=alice&password=secret1").await;
    assert_redirect(&resp, "/");
  }

  #[tokio::test]
  async fn bad_credentials_get_one_generic_message() {
    let mut client = Client::new().await;
    client.post("/register", "username=alice&password=secret1").await;
    client.get("/login").await; // consume the registration flash

    for form in ["username=alice&password=wrong", "username=nobody&password=secret1"] {
      let resp = client.post("/login", form).await;
      assert_eq!(resp.status(), StatusCode::OK);
      assert!(!resp.headers().get_all(header::SET_COOKIE).iter().any(|v| {
        v.to_str().unwrap().starts_with("rolo_session=")
      }));
      let page = body_text(resp).await;
      assert!(page.contains("Invalid username or password"), "{page}");
    }
    assert_redirect(&client.get("/").await, "/login");
  }

  #[tokio::test]
  async fn logout_ends_the_session_and_is_idempotent() {
    let mut client = Client::new().await;
    client.register_and_login("alice", "secret1").await;
    assert_eq!(client.get("/").await.status(), StatusCode::OK);

    assert_redirect(&client.get("/logout").await, "/login");
    assert_redirect(&client.get("/").await, "/login");
    assert_redirect(&client.get("/logout").await, "/login");
  }

  // ── Contacts ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn contact_lifecycle_scenario() {
    let mut client = Client::new().await;
    client.register_and_login("alice", "secret1").await;

    let resp = client.post("/add", "name=Bob&phone=555-1234&email=bob%40x.com").await;
    assert_redirect(&resp, "/");
    let bob = client.store.list_contacts().await.unwrap().remove(0);
    assert_eq!(bob.email, "bob@x.com");

    let page = body_text(client.get("/?search=bob").await).await;
    assert!(page.contains("555-1234"), "{page}");
    assert!(page.contains(&format!("/edit/{}", bob.id)));

    let edit = format!("/edit/{}", bob.id);
    let page = body_text(client.get(&edit).await).await;
    assert!(page.contains("value=\"Bob\""), "{page}");

    let resp = client.post(&edit, "name=Bobby&phone=555-1234&email=bob%40x.com").await;
    assert_redirect(&resp, "/");
    let page = body_text(client.get("/?search=bob").await).await;
    assert!(page.contains("Bobby"), "{page}");
    let page = body_text(client.get("/?search=BOBBY").await).await;
    assert!(page.contains("Bobby"), "{page}");

    let delete = format!("/delete/{}", bob.id);
    assert_redirect(&client.get(&delete).await, "/");
    let page = body_text(client.get("/?search=bob").await).await;
    assert!(page.contains("No contacts found."), "{page}");
    assert_eq!(client.get(&delete).await.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn empty_search_lists_everything() {
    let mut client = Client::new().await;
    client.register_and_login("alice", "secret1").await;
    client.post("/add", "name=Bob&phone=1&email=b").await;
    client.post("/add", "name=Ann&phone=2&email=a").await;

    for uri in ["/", "/?search="] {
      let page = body_text(client.get(uri).await).await;
      assert!(page.contains("Bob") && page.contains("Ann"), "{page}");
    }
    let page = body_text(client.get("/?search=ann").await).await;
    assert!(page.contains("Ann") && !page.contains("Bob"), "{page}");
  }

  #[tokio::test]
  async fn empty_fields_are_accepted() {
    let mut client = Client::new().await;
    client.register_and_login("alice", "secret1").await;

    let resp = client.post("/add", "name=&phone=&email=").await;
    assert_redirect(&resp, "/");
    assert_eq!(contact_count(&client.store).await, 1);
  }

  #[tokio::test]
  async fn unknown_ids_are_not_found() {
    let mut client = Client::new().await;
    client.register_and_login("alice", "secret1").await;

    assert_eq!(client.get("/edit/42").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
      client.post("/edit/42", "name=a&phone=b&email=c").await.status(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(client.get("/delete/42").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(client.get("/edit/abc").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(contact_count(&client.store).await, 0);
  }

  #[tokio::test]
  async fn rendered_contacts_are_escaped() {
    let mut client = Client::new().await;
    client.register_and_login("alice", "secret1").await;
    client.post("/add", "name=%3Cscript%3Ex%3C%2Fscript%3E&phone=&email=").await;

    let page = body_text(client.get("/").await).await;
    assert!(page.contains("&lt;script&gt;x&lt;/script&gt;"), "{page}");
    assert!(!page.contains("<script>"), "{page}");
  }
}
