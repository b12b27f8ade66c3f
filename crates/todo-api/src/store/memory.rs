use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use todo_domain::{Todo, TodoId, TodoPatch, UserId};

use super::{StoreError, TodoStore};

/// In-memory store for tests and local development. Rows are keyed
/// `(owner, id)`; ULID ids keep each owner's rows in creation order.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<(UserId, TodoId), Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row in the store, all owners. Test observability only.
    pub fn snapshot(&self) -> Vec<Todo> {
        self.rows.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self, owner: &UserId) -> Result<Vec<Todo>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|((row_owner, _), _)| row_owner == owner)
            .map(|(_, todo)| todo.clone())
            .collect())
    }

    async fn put(&self, todo: &Todo) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.insert((todo.owner_id.clone(), todo.id.clone()), todo.clone());
        Ok(())
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &TodoId,
        patch: TodoPatch,
    ) -> Result<Todo, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let todo = rows
            .get_mut(&(owner.clone(), id.clone()))
            .ok_or(StoreError::NotFound)?;
        todo.apply(&patch);
        Ok(todo.clone())
    }

    async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.remove(&(owner.clone(), id.clone()))
            .ok_or(StoreError::NotFound)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_is_scoped_to_the_owner() {
        let store = MemoryStore::new();
        store
            .put(&Todo::new("a", UserId::from("alice")))
            .await
            .unwrap();
        store
            .put(&Todo::new("b", UserId::from("bob")))
            .await
            .unwrap();

        let todos = store.list(&UserId::from("alice")).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "a");
    }

    #[tokio::test]
    async fn update_with_foreign_owner_is_not_found() {
        let store = MemoryStore::new();
        let todo = Todo::new("a", UserId::from("alice"));
        store.put(&todo).await.unwrap();

        let err = store
            .update(
                &UserId::from("bob"),
                &todo.id,
                TodoPatch {
                    title: None,
                    completed: Some(true),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        // The victim's row is untouched.
        let alice = store.list(&UserId::from("alice")).await.unwrap();
        assert!(!alice[0].completed);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let store = MemoryStore::new();
        let first = Todo::new("a", UserId::from("alice"));
        let second = Todo::new("b", UserId::from("alice"));
        store.put(&first).await.unwrap();
        store.put(&second).await.unwrap();

        store
            .delete(&UserId::from("alice"), &first.id)
            .await
            .unwrap();

        let todos = store.list(&UserId::from("alice")).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, second.id);

        let err = store
            .delete(&UserId::from("alice"), &first.id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
