//! Hello route handlers.

use axum::{
    extract::{Request, State},
    Json,
};

use crate::describe::{BodyError, InboundRequest, RequestDescription};
use crate::http::server::AppState;

/// `GET {prefix}/hello`: describe the request, body untouched.
pub async fn hello_get(State(state): State<AppState>, request: Request) -> Json<RequestDescription> {
    let inbound = InboundRequest::from_http(request, &state.fallback_host);

    tracing::debug!(method = %inbound.method, path = %inbound.path, "Describing request");

    Json(state.describer.describe_get(inbound))
}

/// `POST {prefix}/hello`: describe the request including its body.
pub async fn hello_post(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<RequestDescription>, BodyError> {
    let inbound = InboundRequest::from_http(request, &state.fallback_host);

    tracing::debug!(method = %inbound.method, path = %inbound.path, "Describing request with body");

    let description = state.describer.describe_post(inbound).await?;
    Ok(Json(description))
}
