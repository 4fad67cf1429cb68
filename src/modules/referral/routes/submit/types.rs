pub mod request {
    use serde_json::Value;

    /// Only `payload` is read; every other member is ignored.
    #[derive(Default)]
    pub struct Body {
        pub payload: Value,
    }

    impl From<Value> for Body {
        fn from(mut raw: Value) -> Self {
            Self {
                payload: raw.get_mut("payload").map(Value::take).unwrap_or_default(),
            }
        }
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::referral::service;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Relayed,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Relayed => {
                    (StatusCode::OK, Json(json!({ "message": "Success" }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        RelayFailure(service::Error),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RelayFailure(err) => {
                    tracing::debug!("Referral relay failed: {:?}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "message": "Internal server error" })),
                    )
                        .into_response()
                }
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
