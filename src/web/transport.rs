use gloo_net::http::{Request, Response};
use serde_json::Value;

use crate::api::Transport;
use crate::error::ApiError;

/// `fetch`-backed transport. Error statuses still carry a JSON envelope, so
/// the body is decoded whatever the status.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    response
        .json::<Value>()
        .await
        .map_err(|e| ApiError::Decode(format!("HTTP {status}: {e}")))
}

impl Transport for FetchTransport {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        let response = Request::post(url)
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }
}
