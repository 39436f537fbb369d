//! # todo-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the driven/outbound port [`TodoStore`](ports::TodoStore) that every
//!   storage engine implements
//! - Define the driving/inbound use-case struct
//!   [`TodoService`](services::todo_service::TodoService)
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `todo-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
