use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement};

use super::{FetchTransport, document, element_by_id, listen, replace_content, set_hidden, show_toast};
use crate::api::Api;
use crate::config;
use crate::error::UiError;
use crate::games::render::PLAY_AGAIN_ACTION;
use crate::games::{Difficulty, GameSessionController, GameView};
use crate::markup::Node;
use crate::notify::{Notifier, Toast};

pub struct DomGameView {
    modal: HtmlElement,
    title: Element,
    content: Element,
    score: Element,
    submit: Element,
    toast_ms: u32,
}

impl DomGameView {
    fn bind(toast_ms: u32) -> Result<Self, UiError> {
        let doc = document()?;
        Ok(Self {
            modal: element_by_id(&doc, "gameModal")?,
            title: element_by_id(&doc, "gameTitle")?,
            content: element_by_id(&doc, "gameContent")?,
            score: element_by_id(&doc, "gameScore")?,
            submit: element_by_id(&doc, "submitGame")?,
            toast_ms,
        })
    }

    fn input_values(&self, selector: &str) -> Vec<String> {
        let Ok(nodes) = self.content.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .collect()
    }
}

impl Notifier for DomGameView {
    fn notify(&self, toast: Toast) {
        show_toast(&toast, self.toast_ms);
    }
}

impl GameView for DomGameView {
    fn show_modal(&self) {
        set_hidden(&self.modal, false);
        let _ = self.modal.style().set_property("display", "block");
    }

    fn hide_modal(&self) {
        set_hidden(&self.modal, true);
        let _ = self.modal.style().set_property("display", "none");
    }

    fn set_title(&self, title: &str) {
        self.title.set_text_content(Some(title));
    }

    fn set_score_text(&self, text: &str) {
        self.score.set_text_content(Some(text));
    }

    fn set_content(&self, content: &Node) {
        if let Err(err) = replace_content(&self.content, content) {
            log::error!("rendering game content failed: {err}");
        }
    }

    fn set_submit_visible(&self, visible: bool) {
        set_hidden(&self.submit, !visible);
    }

    fn text_input_values(&self) -> Vec<String> {
        self.input_values("input[type=\"text\"]")
    }

    fn checked_radio_values(&self) -> Vec<String> {
        self.input_values("input[type=\"radio\"]:checked")
    }
}

type PageController = GameSessionController<FetchTransport, DomGameView>;

/// Handle to the games page, returned to JavaScript by `start_games`.
#[wasm_bindgen]
pub struct GamesPage {
    controller: Rc<PageController>,
}

#[wasm_bindgen]
impl GamesPage {
    /// Start `game_id`; an unknown difficulty falls back to easy.
    pub fn start_game(&self, game_id: String, difficulty: Option<String>) {
        let difficulty = Difficulty::parse_or_default(difficulty.as_deref());
        let controller = self.controller.clone();
        spawn_local(async move {
            controller.start(&game_id, difficulty).await;
        });
    }

    pub fn submit(&self) {
        let controller = self.controller.clone();
        spawn_local(async move {
            controller.submit().await;
        });
    }

    pub fn close(&self) {
        self.controller.close();
    }
}

#[wasm_bindgen]
pub fn start_games() -> Result<GamesPage, JsValue> {
    let cfg = config::current();
    let view = DomGameView::bind(cfg.toast_duration_ms)?;
    let controller = Rc::new(GameSessionController::new(
        Api::new(FetchTransport, &cfg),
        view,
        cfg.phonics_question_count,
    ));
    bind_events(&controller)?;
    log::info!("games page ready");
    Ok(GamesPage { controller })
}

/// A click on the modal backdrop itself, not on the dialog inside it.
fn is_backdrop_click(event: &Event, modal: &Element) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|t| t == *modal)
}

fn bind_events(controller: &Rc<PageController>) -> Result<(), UiError> {
    let doc = document()?;

    let close_button: Element = element_by_id(&doc, "closeGameModal")?;
    let c = controller.clone();
    listen(&close_button, "click", move |_| c.close())?;

    let c = controller.clone();
    listen(&controller.view().submit, "click", move |_| {
        let c = c.clone();
        spawn_local(async move { c.submit().await });
    })?;

    let c = controller.clone();
    let modal = controller.view().modal.clone();
    listen(&controller.view().modal, "click", move |event| {
        if is_backdrop_click(&event, &modal) {
            c.close();
        }
    })?;

    let play_again = format!("[data-action=\"{PLAY_AGAIN_ACTION}\"]");
    listen(&controller.view().content, "click", move |event| {
        let hit = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|t| t.closest(&play_again).ok().flatten());
        if hit.is_some() {
            if let Ok(location) = super::window().map(|w| w.location()) {
                let _ = location.reload();
            }
        }
    })?;

    let launchers = doc.query_selector_all("[data-game-id]")?;
    for i in 0..launchers.length() {
        let Some(launcher) = launchers.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let c = controller.clone();
        let target = launcher.clone();
        listen(&launcher, "click", move |_| {
            let Some(game_id) = target.get_attribute("data-game-id") else {
                return;
            };
            let difficulty = Difficulty::parse_or_default(target.get_attribute("data-difficulty").as_deref());
            let c = c.clone();
            spawn_local(async move { c.start(&game_id, difficulty).await });
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn only_backdrop_clicks_close_the_modal() {
        let doc = document().expect("document available");
        let modal: HtmlElement = doc.create_element("div").expect("modal").dyn_into().expect("html element");
        let dialog: HtmlElement = doc.create_element("div").expect("dialog").dyn_into().expect("html element");
        modal.append_child(&dialog).expect("nest dialog");

        let closes = Rc::new(Cell::new(0));
        let seen = closes.clone();
        let backdrop: Element = modal.clone().into();
        listen(&modal, "click", move |event| {
            if is_backdrop_click(&event, &backdrop) {
                seen.set(seen.get() + 1);
            }
        })
        .expect("listen");

        dialog.click();
        assert_eq!(closes.get(), 0);
        modal.click();
        assert_eq!(closes.get(), 1);
    }
}
