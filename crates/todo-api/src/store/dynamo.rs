use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use todo_domain::{Todo, TodoId, TodoPatch, UserId};

use super::{StoreError, TodoStore};

/// Single-table DynamoDB store. Rows are keyed
/// `PK = USER#{owner}` / `SK = TODO#{id}`, so the owner predicate is
/// part of the key on every operation.
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub async fn new(table_name: &str) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);
        Self::with_client(client, table_name)
    }

    pub fn with_client(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    fn pk(owner: &UserId) -> String {
        format!("USER#{owner}")
    }

    fn sk(id: &TodoId) -> String {
        format!("TODO#{id}")
    }
}

#[async_trait]
impl TodoStore for DynamoStore {
    async fn list(&self, owner: &UserId) -> Result<Vec<Todo>, StoreError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
            .expression_attribute_values(":pk", AttributeValue::S(Self::pk(owner)))
            .expression_attribute_values(":sk_prefix", AttributeValue::S("TODO#".to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        let todos = result.items().iter().filter_map(item_to_todo).collect();

        Ok(todos)
    }

    async fn put(&self, todo: &Todo) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S(Self::pk(&todo.owner_id)))
            .item("SK", AttributeValue::S(Self::sk(&todo.id)))
            .item("id", AttributeValue::S(todo.id.to_string()))
            .item("title", AttributeValue::S(todo.title.clone()))
            .item("completed", AttributeValue::Bool(todo.completed))
            .item("owner_id", AttributeValue::S(todo.owner_id.to_string()))
            .item("created_at", AttributeValue::S(todo.created_at.to_rfc3339()))
            .item("updated_at", AttributeValue::S(todo.updated_at.to_rfc3339()))
            .send()
            .await
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &TodoId,
        patch: TodoPatch,
    ) -> Result<Todo, StoreError> {
        let now = Utc::now().to_rfc3339();

        let mut update_parts = vec!["updated_at = :updated_at"];
        let mut builder = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(Self::pk(owner)))
            .key("SK", AttributeValue::S(Self::sk(id)))
            // Zero-row matches must fail, not upsert a new row.
            .condition_expression("attribute_exists(PK)")
            .expression_attribute_values(":updated_at", AttributeValue::S(now))
            .return_values(ReturnValue::AllNew);

        if let Some(title) = &patch.title {
            update_parts.push("title = :title");
            builder = builder.expression_attribute_values(":title", AttributeValue::S(title.clone()));
        }

        if let Some(completed) = patch.completed {
            update_parts.push("completed = :completed");
            builder =
                builder.expression_attribute_values(":completed", AttributeValue::Bool(completed));
        }

        let expression = format!("SET {}", update_parts.join(", "));
        builder = builder.update_expression(expression);

        let result = builder.send().await.map_err(|e| {
            let service_err = e.into_service_error();
            if service_err.is_conditional_check_failed_exception() {
                StoreError::NotFound
            } else {
                StoreError::Internal(service_err.to_string())
            }
        })?;

        let item = result.attributes().ok_or(StoreError::NotFound)?;
        item_to_todo(item).ok_or_else(|| {
            StoreError::Internal("failed to parse updated item".to_string())
        })
    }

    async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(Self::pk(owner)))
            .key("SK", AttributeValue::S(Self::sk(id)))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_conditional_check_failed_exception() {
                    StoreError::NotFound
                } else {
                    StoreError::Internal(service_err.to_string())
                }
            })?;

        Ok(())
    }
}

fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Option<Todo> {
    let parse_ts = |name: &str| -> Option<DateTime<Utc>> {
        let raw = item.get(name)?.as_s().ok()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    };

    Some(Todo {
        id: TodoId::from(item.get("id")?.as_s().ok()?.as_str()),
        title: item.get("title")?.as_s().ok()?.clone(),
        completed: *item.get("completed")?.as_bool().ok()?,
        owner_id: UserId::from(item.get("owner_id")?.as_s().ok()?.as_str()),
        created_at: parse_ts("created_at")?,
        updated_at: parse_ts("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_for(todo: &Todo) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("id".to_string(), AttributeValue::S(todo.id.to_string())),
            ("title".to_string(), AttributeValue::S(todo.title.clone())),
            (
                "completed".to_string(),
                AttributeValue::Bool(todo.completed),
            ),
            (
                "owner_id".to_string(),
                AttributeValue::S(todo.owner_id.to_string()),
            ),
            (
                "created_at".to_string(),
                AttributeValue::S(todo.created_at.to_rfc3339()),
            ),
            (
                "updated_at".to_string(),
                AttributeValue::S(todo.updated_at.to_rfc3339()),
            ),
        ])
    }

    #[test]
    fn item_round_trips_to_todo() {
        let todo = Todo::new("buy milk", UserId::from("user-a"));
        let parsed = item_to_todo(&item_for(&todo)).unwrap();
        assert_eq!(parsed.id, todo.id);
        assert_eq!(parsed.title, todo.title);
        assert_eq!(parsed.owner_id, todo.owner_id);
        assert!(!parsed.completed);
    }

    #[test]
    fn item_with_missing_attribute_is_skipped() {
        let todo = Todo::new("buy milk", UserId::from("user-a"));
        let mut item = item_for(&todo);
        item.remove("title");
        assert!(item_to_todo(&item).is_none());
    }

    #[test]
    fn item_with_bad_timestamp_is_skipped() {
        let todo = Todo::new("buy milk", UserId::from("user-a"));
        let mut item = item_for(&todo);
        item.insert(
            "created_at".to_string(),
            AttributeValue::S("yesterday".to_string()),
        );
        assert!(item_to_todo(&item).is_none());
    }

    #[test]
    fn keys_embed_the_owner() {
        assert_eq!(DynamoStore::pk(&UserId::from("A")), "USER#A");
        assert_eq!(DynamoStore::sk(&TodoId::from("1")), "TODO#1");
    }
}
