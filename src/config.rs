//! Runtime configuration.
//!
//! Defaults mirror the backend routes and asset list the pages ship with. A page
//! may override any subset by calling `configure(json)` before starting its
//! controller; missing keys keep their defaults.

use std::cell::RefCell;

use serde::Deserialize;

use crate::error::ConfigError;

pub const CACHE_NAME: &str = "cogno-solution-v1.0.0";

pub const CACHED_ASSETS: &[&str] = &[
    "/",
    "/static/css/style.css",
    "/static/js/app.js",
    "/static/images/cogno-logo.png",
    "https://cdn.jsdelivr.net/npm/bootstrap@5.1.3/dist/css/bootstrap.min.css",
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css",
];

/// Backend routes, relative to `AppConfig::api_base`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Endpoints {
    pub dashboard_data: String,
    pub phonics_questions: String,
    pub submit_game: String,
    pub simplify: String,
    pub annotate: String,
    pub update_settings: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            dashboard_data: "/dashboard/data".into(),
            phonics_questions: "/dyslexia/games/phonics".into(),
            submit_game: "/dyslexia/games/submit".into(),
            simplify: "/reader/simplify".into(),
            annotate: "/reader/annotate".into(),
            update_settings: "/auth/update-settings".into(),
        }
    }
}

/// Utterance parameters for read-aloud. The slower default rate suits readers
/// with dyslexia.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 0.8,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix prepended to every endpoint; empty means same origin.
    pub api_base: String,
    pub endpoints: Endpoints,
    pub phonics_question_count: u32,
    pub toast_duration_ms: u32,
    pub speech: SpeechConfig,
    pub cache_name: String,
    pub cached_assets: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            endpoints: Endpoints::default(),
            phonics_question_count: 5,
            toast_duration_ms: 3_000,
            speech: SpeechConfig::default(),
            cache_name: CACHE_NAME.into(),
            cached_assets: CACHED_ASSETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

thread_local! {
    static ACTIVE: RefCell<AppConfig> = RefCell::new(AppConfig::default());
}

/// Snapshot of the configuration controllers are built with.
pub fn current() -> AppConfig {
    ACTIVE.with(|cfg| cfg.borrow().clone())
}

pub fn install(config: AppConfig) {
    log::debug!("installing configuration: {config:?}");
    ACTIVE.with(|cfg| cfg.replace(config));
}
