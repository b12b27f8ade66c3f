use todo_domain::{CreateTodoRequest, DeleteTodoRequest, Todo, TodoId, UpdateTodoRequest};

use crate::api::{ClientError, TodoApi};

/// Outcome of mounting the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    /// No session; the caller should redirect to the login surface.
    SignedOut,
    /// Authenticated and loaded.
    Ready,
}

/// Ordered mirror of the caller's todos, as of the last successful
/// fetch. Mutations go through the server first; local state changes
/// only on success, so a failed call leaves the mirror untouched.
pub struct TodoListView<A: TodoApi> {
    api: A,
    todos: Vec<Todo>,
}

impl<A: TodoApi> TodoListView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Initial load. An unauthenticated session is not an error here;
    /// it signals the redirect.
    pub async fn mount(&mut self) -> Result<Mount, ClientError> {
        match self.refresh().await {
            Ok(()) => Ok(Mount::Ready),
            Err(ClientError::Unauthorized) => Ok(Mount::SignedOut),
            Err(e) => Err(e),
        }
    }

    /// Replace the mirror with a fresh List.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.todos = self.api.list().await?;
        Ok(())
    }

    /// Create on the server, then append the returned todo.
    pub async fn add(&mut self, title: &str) -> Result<Todo, ClientError> {
        let todo = self
            .api
            .create(CreateTodoRequest {
                title: title.to_string(),
            })
            .await?;
        self.todos.push(todo.clone());
        Ok(todo)
    }

    /// Flip `completed`, sending the full desired post-update shape.
    /// Unknown ids are a no-op, matching a stale row that was removed
    /// under us.
    pub async fn toggle(&mut self, id: &TodoId) -> Result<(), ClientError> {
        let Some(current) = self.todos.iter().find(|t| &t.id == id) else {
            return Ok(());
        };
        let req = UpdateTodoRequest {
            id: current.id.clone(),
            title: Some(current.title.clone()),
            completed: Some(!current.completed),
        };
        let updated = self.api.update(req).await?;
        self.replace(updated);
        Ok(())
    }

    /// Change the title, sending the full desired post-update shape.
    pub async fn rename(&mut self, id: &TodoId, new_title: &str) -> Result<(), ClientError> {
        let Some(current) = self.todos.iter().find(|t| &t.id == id) else {
            return Ok(());
        };
        let req = UpdateTodoRequest {
            id: current.id.clone(),
            title: Some(new_title.to_string()),
            completed: Some(current.completed),
        };
        let updated = self.api.update(req).await?;
        self.replace(updated);
        Ok(())
    }

    /// Delete on the server; the local entry goes only after the
    /// acknowledgment.
    pub async fn remove(&mut self, id: &TodoId) -> Result<(), ClientError> {
        self.api
            .delete(DeleteTodoRequest { id: id.clone() })
            .await?;
        self.todos.retain(|t| &t.id != id);
        Ok(())
    }

    fn replace(&mut self, updated: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
        }
    }
}
