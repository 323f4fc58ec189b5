use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::annotations::{AnnotationResult, render_annotations};
use super::ruler::{Rect, RulerPlacement, place_ruler};
use super::settings::{ContrastMode, FontFamily, ReaderSettings, TextStyle};
use super::speech::{ReadingState, SpeechEngine, SpeechEvent, Utterance};
use crate::api::{Api, Transport};
use crate::config::SpeechConfig;
use crate::markup::Node;
use crate::notify::{Notifier, Toast};

/// DOM surface of the reader page.
pub trait ReaderView: Notifier {
    fn input_text(&self) -> String;
    fn original_text(&self) -> String;
    fn simplified_text(&self) -> String;
    fn show_texts(&self, original: &str, simplified: &str);
    /// Apply `style` to every text-content element on the page.
    fn apply_text_style(&self, style: &TextStyle);
    fn set_setting_labels(&self, font_size: &str, line_spacing: &str);
    fn toggle_settings_panel(&self);
    fn set_ruler_visible(&self, visible: bool);
    fn text_region(&self) -> Rect;
    fn place_ruler(&self, placement: RulerPlacement);
    fn set_loading(&self, loading: bool);
    fn show_annotations(&self, content: &Node);
    /// `true` shows the stop button in place of read-aloud.
    fn set_reading_controls(&self, reading: bool);
}

// Clears the loading indicator however the request ends.
struct Loading<'a, V: ReaderView>(&'a V);

impl<'a, V: ReaderView> Loading<'a, V> {
    fn show(view: &'a V) -> Self {
        view.set_loading(true);
        Self(view)
    }
}

impl<V: ReaderView> Drop for Loading<'_, V> {
    fn drop(&mut self) {
        self.0.set_loading(false);
    }
}

pub struct ReaderController<T, V, S> {
    api: Api<T>,
    view: V,
    speech: S,
    speech_config: SpeechConfig,
    settings: RefCell<ReaderSettings>,
    ruler_enabled: Cell<bool>,
    reading: Cell<ReadingState>,
    utterance_queued: Cell<bool>,
    annotations: RefCell<Option<AnnotationResult>>,
}

impl<T: Transport, V: ReaderView, S: SpeechEngine> ReaderController<T, V, S> {
    /// Build the controller and push `settings` to the page.
    pub fn new(api: Api<T>, view: V, speech: S, speech_config: SpeechConfig, settings: ReaderSettings) -> Self {
        let reader = Self {
            api,
            view,
            speech,
            speech_config,
            settings: RefCell::new(settings),
            ruler_enabled: Cell::new(false),
            reading: Cell::new(ReadingState::Idle),
            utterance_queued: Cell::new(false),
            annotations: RefCell::new(None),
        };
        reader.load_user_settings();
        reader
    }

    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    pub fn settings(&self) -> ReaderSettings {
        self.settings.borrow().clone()
    }

    pub fn reading_state(&self) -> ReadingState {
        self.reading.get()
    }

    pub fn annotations(&self) -> Option<AnnotationResult> {
        self.annotations.borrow().clone()
    }

    /// Show the current settings in the panel and on the text.
    pub fn load_user_settings(&self) {
        self.refresh_labels();
        self.apply_text_styles();
    }

    pub fn toggle_settings(&self) {
        self.view.toggle_settings_panel();
    }

    fn update_settings(&self, change: impl FnOnce(&mut ReaderSettings)) {
        change(&mut self.settings.borrow_mut());
        self.refresh_labels();
        self.apply_text_styles();
    }

    fn refresh_labels(&self) {
        let settings = self.settings.borrow();
        self.view
            .set_setting_labels(&settings.font_size_label(), &settings.line_spacing_label());
    }

    pub fn apply_text_styles(&self) {
        let style = self.settings.borrow().text_style();
        self.view.apply_text_style(&style);
    }

    pub fn adjust_font_size(&self, delta: i32) {
        self.update_settings(|s| s.adjust_font_size(delta));
    }

    pub fn adjust_line_spacing(&self, delta: f64) {
        self.update_settings(|s| s.adjust_line_spacing(delta));
    }

    pub fn update_contrast_mode(&self, value: &str) {
        self.update_settings(|s| s.set_contrast_mode(ContrastMode::from_value(value)));
    }

    pub fn update_font_family(&self, value: &str) {
        self.update_settings(|s| s.set_font_family(FontFamily::from(value.to_string())));
    }

    pub fn toggle_reading_ruler(&self, enabled: bool) {
        self.ruler_enabled.set(enabled);
        self.view.set_ruler_visible(enabled);
    }

    /// Pointer-move handler; runs on every move, so it only touches the DOM
    /// when the ruler is on.
    pub fn update_reading_ruler(&self, x: f64, y: f64) {
        if !self.ruler_enabled.get() {
            return;
        }
        if let Some(placement) = place_ruler(self.view.text_region(), x, y) {
            self.view.place_ruler(placement);
        }
    }

    pub async fn save_user_settings(&self) {
        let settings = self.settings();
        match self.api.update_settings(&settings).await {
            Ok(()) => self.view.notify(Toast::success("Settings saved successfully!")),
            Err(err) => {
                log::warn!("saving settings failed: {err}");
                self.view
                    .notify(Toast::error(err.user_message("Error saving settings")));
            }
        }
    }

    fn required_input(&self) -> Option<String> {
        let text = self.view.input_text().trim().to_string();
        if text.is_empty() {
            self.view.notify(Toast::warning("Please enter some text first"));
            None
        } else {
            Some(text)
        }
    }

    pub async fn simplify_text(&self) {
        let Some(text) = self.required_input() else {
            return;
        };
        let _loading = Loading::show(&self.view);
        match self.api.simplify(&text).await {
            Ok(result) => {
                self.view.show_texts(&result.original, &result.simplified);
                self.apply_text_styles();
                self.view.notify(Toast::success("Text simplified successfully!"));
            }
            Err(err) => {
                log::warn!("simplify failed: {err}");
                self.view
                    .notify(Toast::error(err.user_message("Error simplifying text")));
            }
        }
    }

    pub async fn annotate_text(&self) {
        let Some(text) = self.required_input() else {
            return;
        };
        let _loading = Loading::show(&self.view);
        match self.api.annotate(&text).await {
            Ok(result) => {
                self.view.show_annotations(&render_annotations(&result));
                self.annotations.replace(Some(result));
            }
            Err(err) => {
                log::warn!("annotate failed: {err}");
                self.view
                    .notify(Toast::error(err.user_message("Error annotating text")));
            }
        }
    }

    /// Text read aloud: the simplified version first, then the original, then
    /// whatever is in the input box.
    fn speakable_text(&self) -> Option<String> {
        [
            self.view.simplified_text(),
            self.view.original_text(),
            self.view.input_text(),
        ]
        .into_iter()
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
    }

    /// Start reading, or stop if already reading.
    pub fn read_aloud(self: &Rc<Self>)
    where
        T: 'static,
        V: 'static,
        S: 'static,
    {
        if self.reading.get() == ReadingState::Reading {
            self.stop_reading();
            return;
        }
        let Some(text) = self.speakable_text() else {
            self.view.notify(Toast::warning("No text to read"));
            return;
        };

        let weak = Rc::downgrade(self);
        self.utterance_queued.set(true);
        self.speech.speak(
            Utterance::new(text, &self.speech_config),
            Box::new(move |event| {
                if let Some(reader) = weak.upgrade() {
                    reader.on_speech_event(event);
                }
            }),
        );
    }

    pub fn on_speech_event(&self, event: SpeechEvent) {
        match event {
            SpeechEvent::Started => {
                self.reading.set(ReadingState::Reading);
                self.view.set_reading_controls(true);
            }
            SpeechEvent::Ended => self.stop_reading(),
            SpeechEvent::Failed => {
                self.stop_reading();
                self.view.notify(Toast::error("Error with text-to-speech"));
            }
        }
    }

    /// Cancel speech if any was queued and return to idle. Safe to call when
    /// already idle.
    pub fn stop_reading(&self) {
        if self.utterance_queued.replace(false) {
            self.speech.cancel();
        }
        self.reading.set(ReadingState::Idle);
        self.view.set_reading_controls(false);
    }
}
