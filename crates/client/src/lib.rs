//! Client-side view of the todo resource.
//!
//! [`TodoListView`] keeps an in-memory mirror of the caller's todos
//! and reconciles it from server responses: the server is always
//! authoritative for the persisted shape. Transport is behind the
//! [`TodoApi`] trait so the view can be driven over any HTTP client,
//! or a fake in tests.

pub mod api;
pub mod view;

pub use api::{ClientError, TodoApi};
pub use view::{Mount, TodoListView};
