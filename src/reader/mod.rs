//! Accessible text reader: display settings, reading ruler, AI-assisted
//! simplify/annotate and read-aloud.

mod annotations;
mod controller;
pub mod ruler;
pub mod settings;
pub mod speech;

pub use annotations::{AnnotationResult, WordAnnotation, render_annotations};
pub use controller::{ReaderController, ReaderView};
pub use settings::{ContrastMode, FontFamily, ReaderSettings, TextStyle};

use serde::Deserialize;

/// Result of the simplify route.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Simplified {
    pub original: String,
    pub simplified: String,
}
