use crate::types::Context;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub enum Error {
    RequestNotSent,
    FailedToReadResponse,
    FailedToDecodeResponse,
}

/// Posts `payload` as JSON to the portal's referral endpoint.
///
/// The upstream status code is logged but never checked: any response whose
/// body is valid JSON counts as delivered.
pub async fn send_referral(ctx: Arc<Context>, payload: &Value) -> Result<Value, Error> {
    let url = ctx.portal.referral_endpoint();

    let res = ctx
        .portal
        .http_client
        .post(&url)
        .json(payload)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to send referral to {}: {}", url, err);
            Error::RequestNotSent
        })?;

    let status = res.status();
    if !status.is_success() {
        tracing::warn!("Portal answered referral with status {}", status);
    }

    let data = res.text().await.map_err(|err| {
        tracing::error!("Failed to read portal referral response: {}", err);
        Error::FailedToReadResponse
    })?;

    tracing::trace!("Response received from portal: {}", data);

    serde_json::de::from_str::<Value>(&data).map_err(|err| {
        tracing::error!("Failed to decode portal referral response: {}", err);
        Error::FailedToDecodeResponse
    })
}
