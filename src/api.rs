//! JSON client for the backend routes the pages talk to.
//!
//! Every response carries a `success` flag and, on failure, an optional
//! `message`. `Transport` is the seam: the browser build plugs in a `fetch`
//! based implementation, tests plug in a recording fake.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::{AppConfig, Endpoints};
use crate::dashboard::DashboardData;
use crate::error::ApiError;
use crate::games::{Difficulty, GameResult, SubmitRequest};
use crate::reader::{AnnotationResult, ReaderSettings, Simplified};

/// Raw JSON request execution.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError>;
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, ApiError>;
}

/// Split a response on its `success` flag and decode the payload.
pub fn decode_envelope<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let success = value
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !success {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(ApiError::Rejected(message));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(serde::Deserialize)]
struct QuestionsPayload {
    questions: Vec<Value>,
}

#[derive(serde::Deserialize)]
struct AnnotatePayload {
    annotations: AnnotationResult,
}

#[derive(serde::Deserialize)]
struct Ack {}

pub struct Api<T> {
    transport: T,
    base: String,
    endpoints: Endpoints,
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T, config: &AppConfig) -> Self {
        Self {
            transport,
            base: config.api_base.trim_end_matches('/').to_string(),
            endpoints: config.endpoints.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let url = self.url(path);
        log::debug!("POST {url}");
        let response = self.transport.post_json(&url, &body).await?;
        decode_envelope(response)
    }

    pub async fn dashboard_data(&self) -> Result<DashboardData, ApiError> {
        let url = self.url(&self.endpoints.dashboard_data);
        log::debug!("GET {url}");
        let response = self.transport.get_json(&url).await?;
        decode_envelope(response)
    }

    /// Server-generated sound-match questions, left undecoded so the caller can
    /// interpret them for the game being started.
    pub async fn phonics_questions(&self, difficulty: Difficulty, count: u32) -> Result<Vec<Value>, ApiError> {
        let body = json!({ "difficulty": difficulty, "count": count });
        let payload: QuestionsPayload = self.post(&self.endpoints.phonics_questions, &body).await?;
        Ok(payload.questions)
    }

    pub async fn submit_game(&self, request: &SubmitRequest<'_>) -> Result<GameResult, ApiError> {
        self.post(&self.endpoints.submit_game, request).await
    }

    pub async fn simplify(&self, text: &str) -> Result<Simplified, ApiError> {
        self.post(&self.endpoints.simplify, &json!({ "text": text })).await
    }

    pub async fn annotate(&self, text: &str) -> Result<AnnotationResult, ApiError> {
        let payload: AnnotatePayload = self.post(&self.endpoints.annotate, &json!({ "text": text })).await?;
        Ok(payload.annotations)
    }

    pub async fn update_settings(&self, settings: &ReaderSettings) -> Result<(), ApiError> {
        let _: Ack = self.post(&self.endpoints.update_settings, settings).await?;
        Ok(())
    }
}
