use super::service::service;
use super::types::request;
use crate::types::Context;
use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;

pub async fn handler(State(ctx): State<Arc<Context>>, body: Bytes) -> impl IntoResponse {
    let body = match Json::<Value>::from_bytes(body.as_ref()) {
        Ok(Json(raw)) => request::Body::from(raw),
        Err(err) => {
            tracing::debug!("Inbound body is not JSON, relaying null: {}", err);
            request::Body::default()
        }
    };

    service(ctx, request::Payload { body }).await
}
