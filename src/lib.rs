//! Cogno browser crate.
//!
//! Page controllers for the dyslexia support app: the progress dashboard, the
//! phonics mini-games, the accessible text reader and the offline cache worker.
//! Controllers are platform-neutral and talk to the page through small view
//! traits; the `web` module (wasm32 only) binds them to the DOM and exports one
//! `start_*` entry point per page.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod games;
pub mod markup;
pub mod notify;
pub mod offline;
pub mod reader;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second module instance (e.g. in tests) finds the logger already set.
    let _ = console_log::init_with_level(log::Level::Info);
}
