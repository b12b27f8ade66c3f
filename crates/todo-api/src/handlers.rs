use lambda_http::{Body, Request, Response};
use todo_domain::{
    validate_title, CreateTodoRequest, DeleteTodoRequest, Todo, UpdateTodoRequest, UserId,
};

use crate::error::ApiError;
use crate::store::TodoStore;

fn json_response(status: u16, body: &impl serde::Serialize) -> Result<Response<Body>, ApiError> {
    let json = serde_json::to_string(body).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(json))
        .unwrap())
}

fn body_string(req: &Request) -> Result<String, ApiError> {
    match req.body() {
        Body::Text(s) => Ok(s.clone()),
        Body::Binary(b) => String::from_utf8(b.to_vec())
            .map_err(|_| ApiError::BadRequest("Invalid UTF-8".to_string())),
        Body::Empty => Err(ApiError::BadRequest("Empty body".to_string())),
    }
}

pub async fn list_todos(
    store: &dyn TodoStore,
    owner: &UserId,
) -> Result<Response<Body>, ApiError> {
    let todos = store.list(owner).await?;
    json_response(200, &todos)
}

pub async fn create_todo(
    req: Request,
    store: &dyn TodoStore,
    owner: &UserId,
) -> Result<Response<Body>, ApiError> {
    let input: CreateTodoRequest = serde_json::from_str(&body_string(&req)?)?;
    validate_title(&input.title)?;

    let todo = Todo::new(input.title, owner.clone());
    store.put(&todo).await?;

    json_response(201, &todo)
}

pub async fn update_todo(
    req: Request,
    store: &dyn TodoStore,
    owner: &UserId,
) -> Result<Response<Body>, ApiError> {
    let input: UpdateTodoRequest = serde_json::from_str(&body_string(&req)?)?;

    let patch = input.patch();
    if patch.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one of 'title' or 'completed' is required".to_string(),
        ));
    }
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }

    let todo = store.update(owner, &input.id, patch).await?;

    json_response(200, &todo)
}

pub async fn delete_todo(
    req: Request,
    store: &dyn TodoStore,
    owner: &UserId,
) -> Result<Response<Body>, ApiError> {
    let input: DeleteTodoRequest = serde_json::from_str(&body_string(&req)?)?;

    store.delete(owner, &input.id).await?;

    json_response(200, &serde_json::json!({ "message": "Todo deleted" }))
}
