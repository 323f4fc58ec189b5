//! Error types shared by the page controllers, the API client and the cache worker.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of a backend call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("could not encode request: {0}")]
    Encode(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    /// The server answered with `success: false`.
    #[error("request rejected by server: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
}

impl ApiError {
    /// Text shown to the user: the server's own message when it sent one,
    /// the fixed fallback for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected(Some(message)) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Failures while binding a page controller to its DOM.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("no global `window`")]
    NoWindow,

    #[error("no `document` on window")]
    NoDocument,

    #[error("missing element #{0}")]
    MissingElement(String),

    #[error("element #{0} has an unexpected type")]
    WrongElementType(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        UiError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<UiError> for JsValue {
    fn from(err: UiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// A game id that does not name any declared game.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown game id `{0}`")]
pub struct UnknownGame(pub String);

/// Failures of the offline cache worker.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CacheError {
    #[error("cache storage error: {0}")]
    Storage(String),

    #[error("network error: {0}")]
    Network(String),
}

impl From<CacheError> for JsValue {
    fn from(err: CacheError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
