//! Question and result views for the game modal.
//!
//! Every answer control is named `question_<index>` so answers can be read back
//! positionally.

use super::{GameResult, Question, RhymeTime, SYLLABLE_CHOICES, SoundMatch, SyllableCount, WordBuilder};
use crate::markup::{Element, Node, el};

/// `data-action` value of the button that restarts the page.
pub const PLAY_AGAIN_ACTION: &str = "play-again";

pub fn control_name(index: usize) -> String {
    format!("question_{index}")
}

pub fn render_questions(questions: &[Question]) -> Node {
    el("div")
        .class("space-y-6")
        .children(questions.iter().enumerate().map(|(i, q)| render_question(i, q)))
        .into()
}

pub fn render_question(index: usize, question: &Question) -> Element {
    match question {
        Question::SoundMatch(q) => sound_match(index, q),
        Question::SyllableCount(q) => syllable_count(index, q),
        Question::WordBuilder(q) => word_builder(index, q),
        Question::RhymeTime(q) => rhyme_time(index, q),
    }
}

fn block() -> Element {
    el("div").class("bg-gray-50 p-4 rounded-lg")
}

fn heading(index: usize, lead: &str, subject: Option<&str>) -> Element {
    let h = el("h4")
        .class("text-lg font-semibold mb-3")
        .text(format!("{}. {lead}", index + 1));
    match subject {
        Some(s) => h.text(" ").child(el("strong").text(format!("\"{s}\""))),
        None => h,
    }
}

fn radio(index: usize, value: impl ToString, label_class: &str, caption: Element) -> Element {
    el("label")
        .class(label_class)
        .child(
            el("input")
                .attr("type", "radio")
                .attr("name", control_name(index))
                .attr("value", value.to_string())
                .class("mr-3"),
        )
        .child(caption)
}

fn sound_match(index: usize, q: &SoundMatch) -> Element {
    block()
        .child(heading(index, "Listen to the word:", Some(q.prompt.as_str())))
        .child(el("p").class("mb-3 text-gray-600").text("Which shows the correct sounds?"))
        .child(el("div").class("space-y-2").children(q.options.iter().enumerate().map(|(i, option)| {
            radio(
                index,
                i,
                "flex items-center p-2 bg-white rounded border hover:bg-blue-50 cursor-pointer",
                el("span").class("text-lg font-mono").text(option.as_str()),
            )
        })))
}

fn syllable_count(index: usize, q: &SyllableCount) -> Element {
    block()
        .child(heading(index, "How many syllables in:", Some(q.word.as_str())))
        .child(el("div").class("flex space-x-4").children(SYLLABLE_CHOICES.map(|n| {
            radio(
                index,
                n,
                "flex items-center p-3 bg-white rounded border hover:bg-blue-50 cursor-pointer",
                el("span").class("text-lg font-bold").text(n.to_string()),
            )
        })))
}

fn word_builder(index: usize, q: &WordBuilder) -> Element {
    block()
        .child(heading(index, "Build a word from these sounds:", None))
        .child(el("div").class("flex flex-wrap gap-2 mb-4").children(q.sounds.iter().map(|sound| {
            el("span")
                .class("bg-blue-100 text-blue-800 px-3 py-1 rounded-full font-mono text-lg")
                .text(sound.as_str())
        })))
        .child(
            el("input")
                .attr("type", "text")
                .attr("name", control_name(index))
                .attr("placeholder", "Type the word here...")
                .attr("autocomplete", "off")
                .class("w-full p-3 border rounded-lg text-lg"),
        )
}

fn rhyme_time(index: usize, q: &RhymeTime) -> Element {
    block()
        .child(heading(index, "Which word rhymes with:", Some(q.word.as_str())))
        .child(el("div").class("grid grid-cols-3 gap-3").children(q.options.iter().enumerate().map(|(i, option)| {
            radio(
                index,
                i,
                "flex items-center justify-center p-3 bg-white rounded border hover:bg-blue-50 cursor-pointer",
                el("span").class("text-lg").text(option.as_str()),
            )
        })))
}

pub fn result_emoji(percentage: i64) -> &'static str {
    match percentage {
        p if p >= 80 => "🎉",
        p if p >= 60 => "👍",
        _ => "💪",
    }
}

pub fn render_results(result: &GameResult, max_score: u32) -> Node {
    let percentage = result.percentage.round() as i64;
    el("div")
        .class("text-center py-8")
        .child(el("div").class("text-6xl mb-4").text(result_emoji(percentage)))
        .child(el("h3").class("text-2xl font-bold mb-4").text("Game Complete!"))
        .child(
            el("div")
                .class("text-xl mb-4")
                .text("Score: ")
                .child(el("span").class("font-bold text-dyslexia-blue").text(result.score.to_string()))
                .text(format!(" / {max_score}")),
        )
        .child(
            el("div")
                .class("text-lg mb-4")
                .text("Accuracy: ")
                .child(el("span").class("font-bold").text(format!("{percentage}%"))),
        )
        .child(el("p").class("text-gray-600 mb-6").text(result.feedback.as_str()))
        .child(
            el("button")
                .attr("type", "button")
                .attr("data-action", PLAY_AGAIN_ACTION)
                .class("bg-dyslexia-blue text-white px-6 py-3 rounded-lg text-lg hover:bg-blue-600")
                .text("Play Again"),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{GameKind, word_builder_questions};
    use serde_json::{Map, json};

    fn inputs<'a>(node: &'a Node, kind: &str) -> Vec<&'a Element> {
        node.find_all(&|e| e.tag == "input" && e.get_attr("type") == Some(kind))
    }

    #[test]
    fn sound_match_radios_carry_option_indices() {
        let questions = GameKind::SoundMatch
            .decode_questions(vec![
                json!({"word": "ship", "options": ["a", "b", "c", "d"]}),
                json!({"word": "frog", "options": ["a", "b", "c", "d"]}),
            ])
            .unwrap();
        let node = render_questions(&questions);
        let radios = inputs(&node, "radio");
        assert_eq!(radios.len(), 8);
        assert_eq!(radios[5].get_attr("name"), Some("question_1"));
        assert_eq!(radios[5].get_attr("value"), Some("1"));
        assert!(node.text_content().contains("1. Listen to the word: \"ship\""));
    }

    #[test]
    fn syllable_radios_carry_counts() {
        let q = Question::SyllableCount(SyllableCount { word: "butterfly".into(), extra: Map::new() });
        let node: Node = render_question(0, &q).into();
        let values: Vec<_> = inputs(&node, "radio").iter().filter_map(|e| e.get_attr("value")).collect();
        assert_eq!(values, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn word_builder_renders_one_text_input_per_question() {
        let node = render_questions(&word_builder_questions());
        let text_inputs = inputs(&node, "text");
        assert_eq!(text_inputs.len(), 5);
        assert_eq!(text_inputs[4].get_attr("name"), Some("question_4"));
        assert!(node.text_content().contains("Build a word from these sounds:"));
    }

    #[test]
    fn rhyme_time_uses_grid_of_options() {
        let q = Question::RhymeTime(RhymeTime {
            word: "cat".into(),
            options: vec!["hat".into(), "dog".into(), "sun".into()],
            extra: Map::new(),
        });
        let node: Node = render_question(2, &q).into();
        assert_eq!(inputs(&node, "radio").len(), 3);
        assert!(node.to_html().contains("grid grid-cols-3 gap-3"));
        assert!(node.text_content().starts_with("3. Which word rhymes with:"));
    }

    #[test]
    fn server_text_is_not_markup() {
        let q = Question::SyllableCount(SyllableCount { word: "<b>bold</b>".into(), extra: Map::new() });
        let html = Node::from(render_question(0, &q)).to_html();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn emoji_thresholds() {
        assert_eq!(result_emoji(100), "🎉");
        assert_eq!(result_emoji(80), "🎉");
        assert_eq!(result_emoji(79), "👍");
        assert_eq!(result_emoji(60), "👍");
        assert_eq!(result_emoji(59), "💪");
    }

    #[test]
    fn results_view_rounds_percentage() {
        let result = GameResult { score: 2, max_score: Some(3), percentage: 66.67, feedback: "Keep going".into() };
        let node = render_results(&result, 3);
        let text = node.text_content();
        assert!(text.contains("Score: 2 / 3"));
        assert!(text.contains("Accuracy: 67%"));
        assert!(text.contains("👍"));
        assert_eq!(node.find_all(&|e| e.get_attr("data-action") == Some(PLAY_AGAIN_ACTION)).len(), 1);
    }
}
