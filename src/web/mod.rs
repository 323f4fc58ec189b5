//! Browser bindings: DOM views, `fetch` transport, toasts and the page entry
//! points exported to JavaScript.

mod dashboard;
mod games;
mod reader;
mod transport;
mod worker;

pub use dashboard::start_dashboard;
pub use games::{GamesPage, start_games};
pub use reader::{ReaderPage, start_reader};
pub use transport::FetchTransport;
pub use worker::start_service_worker;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::UiError;
use crate::markup::{self, Node};
use crate::notify::Toast;

pub(crate) fn window() -> Result<Window, UiError> {
    web_sys::window().ok_or(UiError::NoWindow)
}

pub(crate) fn document() -> Result<Document, UiError> {
    window()?.document().ok_or(UiError::NoDocument)
}

/// Look up `#id` as `T`; binding fails if the page lacks it.
pub(crate) fn element_by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T, UiError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| UiError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| UiError::WrongElementType(id.to_string()))
}

/// Build real DOM nodes for a markup tree.
pub(crate) fn mount(doc: &Document, node: &Node) -> Result<web_sys::Node, UiError> {
    match node {
        Node::Text(text) => Ok(doc.create_text_node(text).into()),
        Node::Element(element) => {
            let dom = doc.create_element(element.tag)?;
            for (name, value) in &element.attrs {
                dom.set_attribute(name, value)?;
            }
            for child in &element.children {
                dom.append_child(&mount(doc, child)?)?;
            }
            Ok(dom.into())
        }
    }
}

/// Swap the children of `target` for `content`.
pub(crate) fn replace_content(target: &Element, content: &Node) -> Result<(), UiError> {
    let doc = document()?;
    let fresh = mount(&doc, content)?;
    target.set_text_content(None);
    target.append_child(&fresh)?;
    Ok(())
}

/// Attach `handler` for the lifetime of the page.
pub(crate) fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), UiError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub(crate) fn set_hidden(element: &Element, hidden: bool) {
    let classes = element.class_list();
    let result = if hidden {
        classes.add_1("hidden")
    } else {
        classes.remove_1("hidden")
    };
    if let Err(err) = result {
        log::warn!("toggling hidden failed: {err:?}");
    }
}

/// Show a toast in the top-right corner and remove it after `duration_ms`.
pub(crate) fn show_toast(toast: &Toast, duration_ms: u32) {
    if let Err(err) = try_show_toast(toast, duration_ms) {
        log::warn!("could not show toast `{}`: {err}", toast.message);
    }
}

fn try_show_toast(toast: &Toast, duration_ms: u32) -> Result<(), UiError> {
    let doc = document()?;
    let body = doc.body().ok_or(UiError::NoDocument)?;
    let content: Node = markup::el("div")
        .class(&toast.class_name())
        .text(toast.message.as_str())
        .into();
    let node = mount(&doc, &content)?;
    body.append_child(&node)?;
    Timeout::new(duration_ms, move || {
        if let Some(el) = node.dyn_ref::<Element>() {
            el.remove();
        }
    })
    .forget();
    Ok(())
}

pub(crate) fn style_of(element: &Element) -> Option<web_sys::CssStyleDeclaration> {
    element.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

/// Replace the active configuration from JSON. Call before any `start_*`.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = crate::config::AppConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    crate::config::install(config);
    Ok(())
}
