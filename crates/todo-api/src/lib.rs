//! HTTP service for the todo resource.
//!
//! Four operations (list, create, update, delete) over `/todos`, each
//! scoped to the identity resolved from the request context. The store
//! is behind [`store::TodoStore`]; production uses DynamoDB, tests use
//! the in-memory implementation.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod store;
