use std::collections::BTreeMap;

use serde::Deserialize;

use crate::markup::{Node, el};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WordAnnotation {
    pub syllables: u32,
    pub difficulty: String,
}

/// Backend analysis of a passage. Words are kept sorted so the panel renders
/// the same way for the same input.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnnotationResult {
    pub word_count: u32,
    pub reading_level: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, WordAnnotation>,
}

pub fn render_annotations(result: &AnnotationResult) -> Node {
    let summary = el("div").class("grid md:grid-cols-2 gap-4 mb-4").child(
        el("div")
            .child(el("strong").text("Word Count:"))
            .text(format!(" {}", result.word_count))
            .child(el("br"))
            .child(el("strong").text("Reading Level:"))
            .text(format!(" {}", result.reading_level)),
    );

    let mut root = el("div").child(summary);
    if !result.annotations.is_empty() {
        root = root
            .child(el("h4").class("font-semibold mb-2").text("Difficult Words:"))
            .child(el("div").class("grid md:grid-cols-2 gap-2").children(result.annotations.iter().map(
                |(word, info)| {
                    el("div")
                        .class("bg-white p-2 rounded border")
                        .child(el("strong").text(word.as_str()))
                        .child(el("br"))
                        .child(el("small").text(format!(
                            "Syllables: {} | Difficulty: {}",
                            info.syllables, info.difficulty
                        )))
                },
            )));
    }
    root.into()
}
