use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{TodoId, UserId};

/// Upper bound on title length, counted in characters.
pub const MAX_TITLE_LEN: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("title must be at most {} characters", MAX_TITLE_LEN)]
    TitleTooLong,
}

/// A single todo row. Every todo has exactly one owner and is visible
/// and mutable only through requests authenticated as that owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// New todo owned by `owner_id`, not completed, with a fresh id
    /// and both timestamps set to now.
    pub fn new(title: impl Into<String>, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: TodoId::new(),
            title: title.into(),
            completed: false,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite exactly the fields the patch supplies and refresh
    /// `updated_at`. Omitted fields retain their prior values.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update for a todo: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::TitleTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_starts_uncompleted_with_matching_timestamps() {
        let todo = Todo::new("buy milk", UserId::from("user-a"));
        assert_eq!(todo.title, "buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.owner_id, UserId::from("user-a"));
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn apply_overwrites_only_supplied_fields() {
        let mut todo = Todo::new("buy milk", UserId::from("user-a"));

        todo.apply(&TodoPatch {
            title: None,
            completed: Some(true),
        });
        assert_eq!(todo.title, "buy milk");
        assert!(todo.completed);

        todo.apply(&TodoPatch {
            title: Some("buy oat milk".to_string()),
            completed: None,
        });
        assert_eq!(todo.title, "buy oat milk");
        assert!(todo.completed);
    }

    #[test]
    fn apply_refreshes_updated_at_but_not_created_at() {
        let mut todo = Todo::new("task", UserId::from("user-a"));
        let created = todo.created_at;
        todo.apply(&TodoPatch::default());
        assert_eq!(todo.created_at, created);
        assert!(todo.updated_at >= created);
    }

    #[test]
    fn validate_title_rejects_empty_and_whitespace() {
        assert_eq!(validate_title(""), Err(DomainError::EmptyTitle));
        assert_eq!(validate_title("   "), Err(DomainError::EmptyTitle));
        assert_eq!(validate_title("ok"), Ok(()));
    }

    #[test]
    fn validate_title_bounds_length_in_chars() {
        let max = "あ".repeat(MAX_TITLE_LEN);
        assert_eq!(validate_title(&max), Ok(()));
        let over = "あ".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(validate_title(&over), Err(DomainError::TitleTooLong));
    }

    #[test]
    fn todo_serializes_camel_case() {
        let todo = Todo::new("buy milk", UserId::from("A"));
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["title"], "buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["ownerId"], "A");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("owner_id").is_none());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn any_patch() -> impl Strategy<Value = TodoPatch> {
            (
                proptest::option::of(".{0,64}"),
                proptest::option::of(any::<bool>()),
            )
                .prop_map(|(title, completed)| TodoPatch { title, completed })
        }

        proptest! {
            #[test]
            fn unpatched_fields_always_survive(
                initial_title in ".{1,64}",
                initial_completed in any::<bool>(),
                patch in any_patch(),
            ) {
                let mut todo = Todo::new(initial_title.clone(), UserId::from("user-a"));
                todo.completed = initial_completed;
                let before = todo.clone();

                todo.apply(&patch);

                let expected_title = patch.title.clone().unwrap_or(initial_title);
                let expected_completed = patch.completed.unwrap_or(initial_completed);
                prop_assert_eq!(&todo.title, &expected_title);
                prop_assert_eq!(todo.completed, expected_completed);
                prop_assert_eq!(&todo.id, &before.id);
                prop_assert_eq!(&todo.owner_id, &before.owner_id);
                prop_assert_eq!(todo.created_at, before.created_at);
            }
        }
    }
}
