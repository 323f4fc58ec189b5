use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent,
    SpeechSynthesis, SpeechSynthesisErrorCode, SpeechSynthesisErrorEvent, SpeechSynthesisUtterance,
};

use super::{FetchTransport, document, element_by_id, listen, replace_content, set_hidden, show_toast, style_of};
use crate::api::Api;
use crate::config;
use crate::error::UiError;
use crate::markup::Node;
use crate::notify::{Notifier, Toast};
use crate::reader::ruler::{Rect, RulerPlacement};
use crate::reader::settings::{FONT_SIZE_STEP, LINE_SPACING_STEP};
use crate::reader::speech::{Finished, LiveUtterances, SpeechEngine, SpeechEvent, SpeechListener, Utterance};
use crate::reader::{ReaderController, ReaderSettings, ReaderView, TextStyle};

pub struct DomReaderView {
    settings_panel: Element,
    font_size_value: Element,
    line_spacing_value: Element,
    text_input: HtmlTextAreaElement,
    original_text: Element,
    simplified_text: Element,
    annotations_panel: Element,
    annotations_content: Element,
    loading: Element,
    ruler: HtmlElement,
    read_aloud_button: Element,
    stop_button: Element,
    toast_ms: u32,
}

impl DomReaderView {
    fn bind(toast_ms: u32) -> Result<Self, UiError> {
        let doc = document()?;
        Ok(Self {
            settings_panel: element_by_id(&doc, "settingsPanel")?,
            font_size_value: element_by_id(&doc, "fontSizeValue")?,
            line_spacing_value: element_by_id(&doc, "lineSpacingValue")?,
            text_input: element_by_id(&doc, "textInput")?,
            original_text: element_by_id(&doc, "originalText")?,
            simplified_text: element_by_id(&doc, "simplifiedText")?,
            annotations_panel: element_by_id(&doc, "annotationsPanel")?,
            annotations_content: element_by_id(&doc, "annotationsContent")?,
            loading: element_by_id(&doc, "loadingIndicator")?,
            ruler: element_by_id(&doc, "readingRulerOverlay")?,
            read_aloud_button: element_by_id(&doc, "readAloudBtn")?,
            stop_button: element_by_id(&doc, "stopBtn")?,
            toast_ms,
        })
    }
}

fn text_of(element: &Element) -> String {
    element.text_content().unwrap_or_default()
}

impl Notifier for DomReaderView {
    fn notify(&self, toast: Toast) {
        show_toast(&toast, self.toast_ms);
    }
}

impl ReaderView for DomReaderView {
    fn input_text(&self) -> String {
        self.text_input.value()
    }

    fn original_text(&self) -> String {
        text_of(&self.original_text)
    }

    fn simplified_text(&self) -> String {
        text_of(&self.simplified_text)
    }

    fn show_texts(&self, original: &str, simplified: &str) {
        self.original_text.set_text_content(Some(original));
        self.simplified_text.set_text_content(Some(simplified));
    }

    fn apply_text_style(&self, style: &TextStyle) {
        let Ok(doc) = document() else {
            return;
        };
        let Ok(nodes) = doc.query_selector_all(".text-content") else {
            return;
        };
        for element in (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
        {
            if let Some(css) = style_of(&element) {
                let _ = css.set_property("font-size", &style.font_size);
                let _ = css.set_property("line-height", &style.line_height);
                if style.font_family.is_empty() {
                    let _ = css.remove_property("font-family");
                } else {
                    let _ = css.set_property("font-family", &style.font_family);
                }
            }
            let classes = element.class_list();
            for class in &style.remove_classes {
                let _ = classes.remove_1(class);
            }
            for class in &style.add_classes {
                let _ = classes.add_1(class);
            }
        }
    }

    fn set_setting_labels(&self, font_size: &str, line_spacing: &str) {
        self.font_size_value.set_text_content(Some(font_size));
        self.line_spacing_value.set_text_content(Some(line_spacing));
    }

    fn toggle_settings_panel(&self) {
        let _ = self.settings_panel.class_list().toggle("hidden");
    }

    fn set_ruler_visible(&self, visible: bool) {
        set_hidden(&self.ruler, !visible);
    }

    fn text_region(&self) -> Rect {
        let rect = self.original_text.get_bounding_client_rect();
        Rect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }

    fn place_ruler(&self, placement: RulerPlacement) {
        let style = self.ruler.style();
        let _ = style.set_property("top", &format!("{}px", placement.top));
        let _ = style.set_property("left", &format!("{}px", placement.left));
        let _ = style.set_property("width", &format!("{}px", placement.width));
    }

    fn set_loading(&self, loading: bool) {
        set_hidden(&self.loading, !loading);
    }

    fn show_annotations(&self, content: &Node) {
        match replace_content(&self.annotations_content, content) {
            Ok(()) => set_hidden(&self.annotations_panel, false),
            Err(err) => log::error!("rendering annotations failed: {err}"),
        }
    }

    fn set_reading_controls(&self, reading: bool) {
        set_hidden(&self.read_aloud_button, reading);
        set_hidden(&self.stop_button, !reading);
    }
}

type UtteranceCallbacks = [Closure<dyn FnMut(Event)>; 3];

/// Web Speech API engine. Every queued utterance keeps its callbacks until
/// it ends, so a cancelled or superseded one can still report back.
pub struct BrowserSpeech {
    synth: SpeechSynthesis,
    live: LiveUtterances<(SpeechSynthesisUtterance, UtteranceCallbacks)>,
}

impl BrowserSpeech {
    fn new() -> Result<Self, UiError> {
        Ok(Self {
            synth: super::window()?.speech_synthesis()?,
            live: LiveUtterances::default(),
        })
    }
}

fn callback(
    listener: &Rc<SpeechListener>,
    map: fn(&Event) -> SpeechEvent,
    finished: Option<Finished>,
) -> Closure<dyn FnMut(Event)> {
    let listener = listener.clone();
    Closure::wrap(Box::new(move |event: Event| {
        (listener.as_ref())(map(&event));
        if let Some(finished) = &finished {
            finished.mark();
        }
    }) as Box<dyn FnMut(Event)>)
}

// `cancel()` reports the interrupted utterance as an error; that is a normal stop.
fn error_event(event: &Event) -> SpeechEvent {
    match event.dyn_ref::<SpeechSynthesisErrorEvent>().map(|e| e.error()) {
        Some(SpeechSynthesisErrorCode::Interrupted | SpeechSynthesisErrorCode::Canceled) => SpeechEvent::Ended,
        _ => SpeechEvent::Failed,
    }
}

impl SpeechEngine for BrowserSpeech {
    fn speak(&self, utterance: Utterance, listener: SpeechListener) {
        let spoken = match SpeechSynthesisUtterance::new_with_text(&utterance.text) {
            Ok(spoken) => spoken,
            Err(err) => {
                log::error!("could not create utterance: {err:?}");
                listener(SpeechEvent::Failed);
                return;
            }
        };
        spoken.set_rate(utterance.rate);
        spoken.set_pitch(utterance.pitch);
        spoken.set_volume(utterance.volume);

        let listener = Rc::new(listener);
        let finished = Finished::default();
        let callbacks = [
            callback(&listener, |_| SpeechEvent::Started, None),
            callback(&listener, |_| SpeechEvent::Ended, Some(finished.clone())),
            callback(&listener, error_event, Some(finished.clone())),
        ];
        spoken.set_onstart(Some(callbacks[0].as_ref().unchecked_ref()));
        spoken.set_onend(Some(callbacks[1].as_ref().unchecked_ref()));
        spoken.set_onerror(Some(callbacks[2].as_ref().unchecked_ref()));

        self.synth.speak(&spoken);
        self.live.keep(finished, (spoken, callbacks));
    }

    fn cancel(&self) {
        self.synth.cancel();
    }
}

type PageController = ReaderController<FetchTransport, DomReaderView, BrowserSpeech>;

/// Handle to the reader page, returned to JavaScript by `start_reader`.
#[wasm_bindgen]
pub struct ReaderPage {
    controller: Rc<PageController>,
}

#[wasm_bindgen]
impl ReaderPage {
    pub fn read_aloud(&self) {
        self.controller.read_aloud();
    }

    pub fn stop_reading(&self) {
        self.controller.stop_reading();
    }

    /// Current settings as the JSON object the backend stores.
    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.controller.settings()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Initial settings come from the `data-reader-settings` attribute of
/// `#settingsPanel` when the page embeds the user's saved values.
fn initial_settings(panel: &Element) -> ReaderSettings {
    let Some(raw) = panel.get_attribute("data-reader-settings") else {
        return ReaderSettings::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        log::warn!("ignoring invalid saved reader settings: {err}");
        ReaderSettings::default()
    })
}

#[wasm_bindgen]
pub fn start_reader() -> Result<ReaderPage, JsValue> {
    let cfg = config::current();
    let view = DomReaderView::bind(cfg.toast_duration_ms)?;
    let settings = initial_settings(&view.settings_panel);
    let controller = Rc::new(ReaderController::new(
        Api::new(FetchTransport, &cfg),
        view,
        BrowserSpeech::new()?,
        cfg.speech,
        settings,
    ));
    bind_events(&controller)?;
    log::info!("reader page ready");
    Ok(ReaderPage { controller })
}

fn on_click(id: &str, controller: &Rc<PageController>, action: fn(&Rc<PageController>)) -> Result<(), UiError> {
    let doc = document()?;
    let target: Element = element_by_id(&doc, id)?;
    let c = controller.clone();
    listen(&target, "click", move |_| action(&c))
}

fn bind_events(controller: &Rc<PageController>) -> Result<(), UiError> {
    let doc = document()?;

    on_click("settingsBtn", controller, |c| c.toggle_settings())?;
    on_click("fontSizeUp", controller, |c| c.adjust_font_size(FONT_SIZE_STEP))?;
    on_click("fontSizeDown", controller, |c| c.adjust_font_size(-FONT_SIZE_STEP))?;
    on_click("lineSpacingUp", controller, |c| c.adjust_line_spacing(LINE_SPACING_STEP))?;
    on_click("lineSpacingDown", controller, |c| c.adjust_line_spacing(-LINE_SPACING_STEP))?;
    on_click("readAloudBtn", controller, |c| c.read_aloud())?;
    on_click("stopBtn", controller, |c| c.stop_reading())?;
    on_click("saveSettings", controller, |c| {
        let c = c.clone();
        spawn_local(async move { c.save_user_settings().await });
    })?;
    on_click("simplifyBtn", controller, |c| {
        let c = c.clone();
        spawn_local(async move { c.simplify_text().await });
    })?;
    on_click("annotateBtn", controller, |c| {
        let c = c.clone();
        spawn_local(async move { c.annotate_text().await });
    })?;

    let contrast: HtmlSelectElement = element_by_id(&doc, "contrastMode")?;
    let c = controller.clone();
    let select = contrast.clone();
    listen(&contrast, "change", move |_| c.update_contrast_mode(&select.value()))?;

    let font: HtmlSelectElement = element_by_id(&doc, "fontFamily")?;
    let c = controller.clone();
    let select = font.clone();
    listen(&font, "change", move |_| c.update_font_family(&select.value()))?;

    let ruler_toggle: HtmlInputElement = element_by_id(&doc, "readingRuler")?;
    let c = controller.clone();
    let toggle = ruler_toggle.clone();
    listen(&ruler_toggle, "change", move |_| c.toggle_reading_ruler(toggle.checked()))?;

    let c = controller.clone();
    listen(&doc, "mousemove", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            c.update_reading_ruler(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        }
    })?;
    Ok(())
}
