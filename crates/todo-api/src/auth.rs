//! Session resolution.
//!
//! Credential issuance is external; by the time a request reaches this
//! service the JWT authorizer has already validated the token and put
//! its claims in the request context. A request is authenticated iff a
//! `sub` claim is present.

use lambda_http::{Request, RequestExt};
use todo_domain::UserId;

use crate::error::ApiError;

pub fn resolve_identity(req: &Request) -> Result<UserId, ApiError> {
    let context = req.request_context_ref();

    // HTTP API v2 with JWT authorizer puts claims in the request context
    if let Some(lambda_http::request::RequestContext::ApiGatewayV2(ctx)) = context {
        if let Some(authorizer) = &ctx.authorizer {
            if let Some(jwt) = &authorizer.jwt {
                return jwt
                    .claims
                    .get("sub")
                    .map(|sub| UserId::from_string(sub.clone()))
                    .ok_or_else(|| ApiError::Unauthorized("Missing sub claim".to_string()));
            }
        }
    }

    Err(ApiError::Unauthorized(
        "Invalid authorization context".to_string(),
    ))
}
