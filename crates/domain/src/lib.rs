//! # todo-domain
//!
//! Pure domain model for the todo service.
//!
//! ## Responsibilities
//! - Foundational types: the storage-assigned [`TodoId`](id::TodoId) and the
//!   error conventions shared by every layer
//! - Define **Todos** (the persisted item), **new todos** (create input) and
//!   **patches** (partial updates where an absent field means "keep")
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod todo;
