// In-memory stand-ins for the browser: a recording transport, views that log
// what the controllers ask of them, a scripted speech engine and a cache.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use cogno_web::api::{Api, Transport};
use cogno_web::config::AppConfig;
use cogno_web::dashboard::chart::{BarChart, LineChart};
use cogno_web::dashboard::{DashboardView, StatCards};
use cogno_web::error::{ApiError, CacheError};
use cogno_web::games::GameView;
use cogno_web::markup::Node;
use cogno_web::notify::{Notifier, Toast, ToastKind};
use cogno_web::offline::CacheBackend;
use cogno_web::reader::ruler::{Rect, RulerPlacement};
use cogno_web::reader::speech::{SpeechEngine, SpeechEvent, SpeechListener, Utterance};
use cogno_web::reader::{ReaderView, TextStyle};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

/// Answers requests from a queue; an empty queue is a network failure.
#[derive(Default)]
pub struct FakeTransport {
    pub requests: RefCell<Vec<Recorded>>,
    responses: RefCell<VecDeque<Result<Value, ApiError>>>,
}

impl FakeTransport {
    pub fn respond(self, response: Value) -> Self {
        self.responses.borrow_mut().push_back(Ok(response));
        self
    }

    pub fn fail(self, err: ApiError) -> Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<Recorded> {
        self.requests.borrow().last().cloned()
    }

    fn next(&self) -> Result<Value, ApiError> {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".into())))
    }
}

impl Transport for FakeTransport {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        self.requests.borrow_mut().push(Recorded {
            method: "GET",
            url: url.to_string(),
            body: None,
        });
        self.next()
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        self.requests.borrow_mut().push(Recorded {
            method: "POST",
            url: url.to_string(),
            body: Some(body.clone()),
        });
        self.next()
    }
}

pub fn api(transport: FakeTransport) -> Api<FakeTransport> {
    Api::new(transport, &AppConfig::default())
}

#[derive(Default)]
pub struct Toasts(pub RefCell<Vec<Toast>>);

impl Toasts {
    pub fn push(&self, toast: Toast) {
        self.0.borrow_mut().push(toast);
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().iter().map(|t| t.message.clone()).collect()
    }

    pub fn count(&self, kind: ToastKind) -> usize {
        self.0.borrow().iter().filter(|t| t.kind == kind).count()
    }

    pub fn last(&self) -> Option<Toast> {
        self.0.borrow().last().cloned()
    }
}

// --- games -------------------------------------------------------------------

#[derive(Default)]
pub struct FakeGameView {
    pub toasts: Toasts,
    pub modal_open: Cell<bool>,
    pub title: RefCell<String>,
    pub score: RefCell<String>,
    pub content: RefCell<Option<Node>>,
    pub submit_visible: Cell<bool>,
    pub text_inputs: RefCell<Vec<String>>,
    pub checked_radios: RefCell<Vec<String>>,
}

impl Notifier for FakeGameView {
    fn notify(&self, toast: Toast) {
        self.toasts.push(toast);
    }
}

impl GameView for FakeGameView {
    fn show_modal(&self) {
        self.modal_open.set(true);
    }

    fn hide_modal(&self) {
        self.modal_open.set(false);
    }

    fn set_title(&self, title: &str) {
        self.title.replace(title.to_string());
    }

    fn set_score_text(&self, text: &str) {
        self.score.replace(text.to_string());
    }

    fn set_content(&self, content: &Node) {
        self.content.replace(Some(content.clone()));
    }

    fn set_submit_visible(&self, visible: bool) {
        self.submit_visible.set(visible);
    }

    fn text_input_values(&self) -> Vec<String> {
        self.text_inputs.borrow().clone()
    }

    fn checked_radio_values(&self) -> Vec<String> {
        self.checked_radios.borrow().clone()
    }
}

// --- reader ------------------------------------------------------------------

#[derive(Default)]
pub struct FakeReaderView {
    pub toasts: Toasts,
    pub input: RefCell<String>,
    pub original: RefCell<String>,
    pub simplified: RefCell<String>,
    pub styles: RefCell<Vec<TextStyle>>,
    pub labels: RefCell<(String, String)>,
    pub panel_toggles: Cell<u32>,
    pub ruler_visible: Cell<bool>,
    pub region: Cell<Rect>,
    pub ruler_at: Cell<Option<RulerPlacement>>,
    pub loading_log: RefCell<Vec<bool>>,
    pub annotations: RefCell<Option<Node>>,
    pub reading_controls: RefCell<Vec<bool>>,
}

impl FakeReaderView {
    pub fn with_input(text: &str) -> Self {
        let view = Self::default();
        view.input.replace(text.to_string());
        view
    }

    pub fn is_loading(&self) -> bool {
        self.loading_log.borrow().last().copied().unwrap_or(false)
    }
}

impl Notifier for FakeReaderView {
    fn notify(&self, toast: Toast) {
        self.toasts.push(toast);
    }
}

impl ReaderView for FakeReaderView {
    fn input_text(&self) -> String {
        self.input.borrow().clone()
    }

    fn original_text(&self) -> String {
        self.original.borrow().clone()
    }

    fn simplified_text(&self) -> String {
        self.simplified.borrow().clone()
    }

    fn show_texts(&self, original: &str, simplified: &str) {
        self.original.replace(original.to_string());
        self.simplified.replace(simplified.to_string());
    }

    fn apply_text_style(&self, style: &TextStyle) {
        self.styles.borrow_mut().push(style.clone());
    }

    fn set_setting_labels(&self, font_size: &str, line_spacing: &str) {
        self.labels
            .replace((font_size.to_string(), line_spacing.to_string()));
    }

    fn toggle_settings_panel(&self) {
        self.panel_toggles.set(self.panel_toggles.get() + 1);
    }

    fn set_ruler_visible(&self, visible: bool) {
        self.ruler_visible.set(visible);
    }

    fn text_region(&self) -> Rect {
        self.region.get()
    }

    fn place_ruler(&self, placement: RulerPlacement) {
        self.ruler_at.set(Some(placement));
    }

    fn set_loading(&self, loading: bool) {
        self.loading_log.borrow_mut().push(loading);
    }

    fn show_annotations(&self, content: &Node) {
        self.annotations.replace(Some(content.clone()));
    }

    fn set_reading_controls(&self, reading: bool) {
        self.reading_controls.borrow_mut().push(reading);
    }
}

/// Holds on to every listener so tests can play the engine's events.
#[derive(Default)]
pub struct FakeSpeech {
    pub spoken: RefCell<Vec<Utterance>>,
    pub cancels: Cell<u32>,
    listeners: RefCell<Vec<SpeechListener>>,
}

impl FakeSpeech {
    /// Deliver `event` from the most recent utterance.
    pub fn emit(&self, event: SpeechEvent) {
        if let Some(listener) = self.listeners.borrow().last() {
            listener(event);
        }
    }

    /// Deliver `event` from the utterance queued `index`-th.
    pub fn emit_from(&self, index: usize, event: SpeechEvent) {
        if let Some(listener) = self.listeners.borrow().get(index) {
            listener(event);
        }
    }
}

impl SpeechEngine for FakeSpeech {
    fn speak(&self, utterance: Utterance, listener: SpeechListener) {
        self.spoken.borrow_mut().push(utterance);
        self.listeners.borrow_mut().push(listener);
    }

    fn cancel(&self) {
        self.cancels.set(self.cancels.get() + 1);
    }
}

// --- dashboard ---------------------------------------------------------------

#[derive(Default)]
pub struct FakeDashboardView {
    pub stats: RefCell<Option<StatCards>>,
    pub progress: RefCell<Option<LineChart>>,
    pub scores: RefCell<Option<BarChart>>,
    pub recommendations: RefCell<Option<Node>>,
    pub activity: RefCell<Option<Node>>,
}

impl FakeDashboardView {
    pub fn rendered_anything(&self) -> bool {
        self.stats.borrow().is_some()
            || self.progress.borrow().is_some()
            || self.scores.borrow().is_some()
            || self.recommendations.borrow().is_some()
            || self.activity.borrow().is_some()
    }
}

impl DashboardView for FakeDashboardView {
    fn show_statistics(&self, cards: &StatCards) {
        self.stats.replace(Some(cards.clone()));
    }

    fn draw_reading_progress(&self, chart: &LineChart) {
        self.progress.replace(Some(chart.clone()));
    }

    fn draw_game_scores(&self, chart: &BarChart) {
        self.scores.replace(Some(chart.clone()));
    }

    fn show_recommendations(&self, content: &Node) {
        self.recommendations.replace(Some(content.clone()));
    }

    fn show_recent_activity(&self, content: &Node) {
        self.activity.replace(Some(content.clone()));
    }
}

// --- offline cache -----------------------------------------------------------

/// Cache keyed by URL; the network serves `network` and fails for anything else.
#[derive(Default)]
pub struct FakeCache {
    pub stored: RefCell<HashMap<String, String>>,
    pub network: HashMap<String, String>,
    pub fetches: RefCell<Vec<String>>,
    pub broken_lookup: bool,
}

impl CacheBackend for FakeCache {
    type Request = String;
    type Response = String;

    async fn add_all(&self, _cache_name: &str, assets: &[String]) -> Result<(), CacheError> {
        let mut fetched = Vec::with_capacity(assets.len());
        for url in assets {
            let body = self.fetch(url).await?;
            fetched.push((url.clone(), body));
        }
        self.stored.borrow_mut().extend(fetched);
        Ok(())
    }

    async fn lookup(&self, request: &String) -> Result<Option<String>, CacheError> {
        if self.broken_lookup {
            return Err(CacheError::Storage("quota".into()));
        }
        Ok(self.stored.borrow().get(request).cloned())
    }

    async fn fetch(&self, request: &String) -> Result<String, CacheError> {
        self.fetches.borrow_mut().push(request.clone());
        self.network
            .get(request)
            .cloned()
            .ok_or_else(|| CacheError::Network(format!("404 {request}")))
    }
}
