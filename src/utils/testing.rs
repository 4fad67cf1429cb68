//! Helpers shared by the route tests: a context builder and a fake portal
//! that records every request it receives.

use crate::types::{Config, Context, ToContext};
use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use bytes::Bytes;
use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

struct FakePortalState {
    status: StatusCode,
    body: &'static str,
    delay: Option<Duration>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct FakePortal {
    pub url: String,
    state: Arc<FakePortalState>,
}

async fn record(
    State(state): State<Arc<FakePortalState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    state.requests.lock().await.push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from),
        body,
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    (state.status, state.body)
}

impl FakePortal {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        Self::spawn(status, body, None).await
    }

    pub async fn start_slow(delay: Duration) -> Self {
        Self::spawn(StatusCode::OK, r#"{"ok":true}"#, Some(delay)).await
    }

    async fn spawn(status: StatusCode, body: &'static str, delay: Option<Duration>) -> Self {
        let state = Arc::new(FakePortalState {
            status,
            body,
            delay,
            requests: Mutex::new(vec![]),
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let router = Router::new().fallback(record).with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { url, state }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }
}

/// Url of a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}", addr)
}

pub fn context_for(portal_url: &str) -> Arc<Context> {
    context_with(&[("PORTAL_URL", portal_url)])
}

pub fn context_with(vars: &[(&str, &str)]) -> Arc<Context> {
    let config = Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .unwrap();

    Arc::new(config.to_context().unwrap())
}
