//! Outbound ports.
//!
//! The service layer talks to persistence only through [`TodoStore`]; storage
//! adapters implement it and the binary picks one at startup.

pub mod todo_store;

pub use todo_store::TodoStore;
