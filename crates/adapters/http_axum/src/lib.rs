//! # todo-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **REST-ish JSON API** for todos (`/todo`, `/todo/{id}`)
//! - Cap every request body at [`MAX_BODY_BYTES`](router::MAX_BODY_BYTES)
//!   before any handler runs
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `todo-app` (for the port trait and service) and `todo-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
