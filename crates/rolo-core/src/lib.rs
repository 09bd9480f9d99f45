//! Core types, storage traits, and services for the Rolo contact book.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement the traits in [`store`]; the web layer drives
//! the services in [`auth`] and [`contacts`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod auth;
pub mod contact;
pub mod contacts;
pub mod error;
pub mod memory;
pub mod session;
pub mod store;
pub mod user;

pub use auth::AuthService;
pub use contacts::ContactService;
pub use error::{Error, Result, StoreError};
pub use memory::MemoryStore;
pub use session::Session;
