use super::types::{request, response};
use crate::{modules::referral::service as portal, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    portal::send_referral(ctx, &payload.body.payload)
        .await
        .map(|_| response::Success::Relayed)
        .map_err(response::Error::RelayFailure)
}
