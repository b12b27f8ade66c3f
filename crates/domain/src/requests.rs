//! Request bodies, one explicit schema per operation.

use serde::{Deserialize, Serialize};

use crate::ids::TodoId;
use crate::todo::TodoPatch;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    pub id: TodoId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn patch(&self) -> TodoPatch {
        TodoPatch {
            title: self.title.clone(),
            completed: self.completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTodoRequest {
    pub id: TodoId,
}
