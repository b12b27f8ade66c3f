//! Store abstraction for todo rows.
//!
//! Every operation is keyed by the owner, so cross-user access fails
//! structurally instead of by fetch-then-check.

use async_trait::async_trait;
use thiserror::Error;
use todo_domain::{Todo, TodoId, TodoPatch, UserId};

mod dynamo;
mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matches the `(id, owner)` pair.
    #[error("todo not found")]
    NotFound,

    #[error("store error: {0}")]
    Internal(String),
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos owned by `owner`, store-native order.
    async fn list(&self, owner: &UserId) -> Result<Vec<Todo>, StoreError>;

    /// Insert one row. The owner is taken from the todo itself.
    async fn put(&self, todo: &Todo) -> Result<(), StoreError>;

    /// Overwrite the patched fields of the row matching `(id, owner)`
    /// and return the row as persisted.
    async fn update(
        &self,
        owner: &UserId,
        id: &TodoId,
        patch: TodoPatch,
    ) -> Result<Todo, StoreError>;

    /// Remove the row matching `(id, owner)`.
    async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), StoreError>;
}
