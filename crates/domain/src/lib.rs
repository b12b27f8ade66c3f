//! Domain model for the todo service.
//!
//! Entities, identifiers and request schemas only; no I/O. The store
//! and HTTP layers live in `todo-api`.

pub mod ids;
pub mod requests;
pub mod todo;

pub use ids::{TodoId, UserId};
pub use requests::{CreateTodoRequest, DeleteTodoRequest, UpdateTodoRequest};
pub use todo::{validate_title, DomainError, Todo, TodoPatch, MAX_TITLE_LEN};
