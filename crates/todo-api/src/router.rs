use lambda_http::{Body, Request, Response};

use crate::auth::resolve_identity;
use crate::error::ApiError;
use crate::handlers;
use crate::store::TodoStore;

pub async fn route(
    req: Request,
    store: &dyn TodoStore,
) -> Result<Response<Body>, lambda_http::Error> {
    let path = req.uri().path().to_string();
    let method = req.method().as_str().to_string();

    tracing::info!(path = %path, method = %method, "Incoming request");

    let result = match route_inner(req, store, &path, &method).await {
        Ok(mut resp) => {
            add_cors_headers(&mut resp);
            resp
        }
        Err(e) => {
            tracing::error!(error = %e, "Request failed");
            let mut resp = e.into_response();
            add_cors_headers(&mut resp);
            resp
        }
    };

    Ok(result)
}

async fn route_inner(
    req: Request,
    store: &dyn TodoStore,
    path: &str,
    method: &str,
) -> Result<Response<Body>, ApiError> {
    if method == "OPTIONS" {
        return Ok(Response::builder().status(204).body(Body::Empty).unwrap());
    }

    // Every operation requires an authenticated caller; the resolved
    // identity is threaded into the handlers explicitly.
    let owner = resolve_identity(&req)?;

    if path != "/todos" {
        return Err(ApiError::NotFound);
    }

    match method {
        "GET" => handlers::list_todos(store, &owner).await,
        "POST" => handlers::create_todo(req, store, &owner).await,
        "PUT" => handlers::update_todo(req, store, &owner).await,
        "DELETE" => handlers::delete_todo(req, store, &owner).await,
        _ => Err(ApiError::NotFound),
    }
}

fn add_cors_headers(resp: &mut Response<Body>) {
    let headers = resp.headers_mut();
    headers.insert("Access-Control-Allow-Origin", "*".parse().unwrap());
    headers.insert(
        "Access-Control-Allow-Methods",
        "GET,POST,PUT,DELETE,OPTIONS".parse().unwrap(),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        "Content-Type,Authorization".parse().unwrap(),
    );
}
