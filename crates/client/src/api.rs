use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use todo_domain::{CreateTodoRequest, DeleteTodoRequest, Todo, UpdateTodoRequest};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The session is absent or expired; the caller should redirect
    /// to the login surface.
    #[error("unauthorized")]
    Unauthorized,

    #[error("api error: {0}")]
    Api(String),
}

/// The four calls of the todo resource, matching the server contract.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;
    async fn create(&self, req: CreateTodoRequest) -> Result<Todo, ClientError>;
    async fn update(&self, req: UpdateTodoRequest) -> Result<Todo, ClientError>;
    async fn delete(&self, req: DeleteTodoRequest) -> Result<(), ClientError>;
}

#[async_trait]
impl<T: TodoApi + ?Sized> TodoApi for Arc<T> {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        (**self).list().await
    }

    async fn create(&self, req: CreateTodoRequest) -> Result<Todo, ClientError> {
        (**self).create(req).await
    }

    async fn update(&self, req: UpdateTodoRequest) -> Result<Todo, ClientError> {
        (**self).update(req).await
    }

    async fn delete(&self, req: DeleteTodoRequest) -> Result<(), ClientError> {
        (**self).delete(req).await
    }
}
