//! Middleware that resolves the authenticated user for a request.
//!
//! Session verification happens upstream; this server trusts the
//! `x-user-id` header as the opaque authenticated-user id it supplies.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::server::types::ApiErrorType;

/// The id of the user making a request, resolved from `x-user-id`.
#[derive(Debug, Clone, Copy)]
pub struct RequestUser(pub i64);

/// Rejects requests without a usable `x-user-id` header; otherwise stores
/// the resolved [`RequestUser`] in the request extensions.
pub async fn resolve_user(mut req: Request, next: Next) -> Response {
    let user_id = req
        .headers()
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok());

    match user_id {
        Some(id) => {
            req.extensions_mut().insert(RequestUser(id));
            next.run(req).await
        }
        None => {
            warn!("Rejected request without a valid x-user-id header");
            ApiErrorType::from((
                StatusCode::UNAUTHORIZED,
                "Missing or invalid x-user-id header",
                None,
            ))
            .into_response()
        }
    }
}
