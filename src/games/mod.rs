//! Phonics mini-games: catalog, questions, answers and the session controller.

mod controller;
pub mod render;

pub use controller::{GameSessionController, GameView, collect_answers};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::UnknownGame;

/// Every mini-game the games page knows how to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKind {
    SoundMatch,
    SyllableCount,
    WordBuilder,
    RhymeTime,
}

/// Where the questions for a game come from.
pub enum QuestionSource {
    /// Generated by the backend phonics route.
    Server,
    /// Built into the client.
    Fixed(fn() -> Vec<Question>),
    /// Renderable, but nothing produces questions for it yet. Starting one
    /// shows a "coming soon" toast instead of staying silent.
    Unavailable,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::SoundMatch,
        GameKind::SyllableCount,
        GameKind::WordBuilder,
        GameKind::RhymeTime,
    ];

    pub fn id(self) -> &'static str {
        match self {
            GameKind::SoundMatch => "sound-match",
            GameKind::SyllableCount => "syllable-count",
            GameKind::WordBuilder => "word-builder",
            GameKind::RhymeTime => "rhyme-time",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GameKind::SoundMatch => "Sound Match",
            GameKind::SyllableCount => "Syllable Counter",
            GameKind::WordBuilder => "Word Builder",
            GameKind::RhymeTime => "Rhyme Time",
        }
    }

    pub fn max_score(self) -> u32 {
        match self {
            GameKind::WordBuilder => 150,
            GameKind::SoundMatch | GameKind::SyllableCount | GameKind::RhymeTime => 100,
        }
    }

    /// Tag the submit route scores by.
    pub fn wire_type(self) -> &'static str {
        match self {
            GameKind::SoundMatch => "phonics",
            GameKind::SyllableCount | GameKind::WordBuilder | GameKind::RhymeTime => "word-building",
        }
    }

    /// Word builder is typed; the others are multiple choice.
    pub fn uses_text_answers(self) -> bool {
        matches!(self, GameKind::WordBuilder)
    }

    pub fn question_source(self) -> QuestionSource {
        match self {
            GameKind::SoundMatch => QuestionSource::Server,
            GameKind::WordBuilder => QuestionSource::Fixed(word_builder_questions),
            GameKind::SyllableCount | GameKind::RhymeTime => QuestionSource::Unavailable,
        }
    }

    /// Interpret raw question objects as this game's variant.
    pub fn decode_questions(self, raw: Vec<Value>) -> Result<Vec<Question>, serde_json::Error> {
        raw.into_iter()
            .map(|value| -> Result<Question, serde_json::Error> {
                Ok(match self {
                    GameKind::SoundMatch => Question::SoundMatch(serde_json::from_value(value)?),
                    GameKind::SyllableCount => Question::SyllableCount(serde_json::from_value(value)?),
                    GameKind::WordBuilder => Question::WordBuilder(serde_json::from_value(value)?),
                    GameKind::RhymeTime => Question::RhymeTime(serde_json::from_value(value)?),
                })
            })
            .collect()
    }
}

impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| UnknownGame(s.to_string()))
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lenient parse for values coming from page markup; unknown levels fall
    /// back to easy.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("medium") => Difficulty::Medium,
            Some("hard") => Difficulty::Hard,
            Some("easy") | Some("") | None => Difficulty::Easy,
            Some(other) => {
                log::warn!("unknown difficulty `{other}`, using easy");
                Difficulty::Easy
            }
        }
    }
}

// Question variants. Unknown fields (answer keys the server needs for
// scoring, e.g. `correct_index`) are kept in `extra` and echoed back on submit.

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundMatch {
    #[serde(rename = "word", alias = "sound", alias = "prompt")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyllableCount {
    pub word: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordBuilder {
    pub sounds: Vec<String>,
    #[serde(rename = "correct")]
    pub correct_word: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RhymeTime {
    pub word: String,
    pub options: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Question {
    SoundMatch(SoundMatch),
    SyllableCount(SyllableCount),
    WordBuilder(WordBuilder),
    RhymeTime(RhymeTime),
}

/// Answers to the syllable game are the count itself.
pub const SYLLABLE_CHOICES: std::ops::RangeInclusive<i64> = 1..=4;

pub fn word_builder_questions() -> Vec<Question> {
    const SET: [(&[&str], &str); 5] = [
        (&["c", "a", "t"], "cat"),
        (&["d", "o", "g"], "dog"),
        (&["f", "i", "sh"], "fish"),
        (&["b", "i", "r", "d"], "bird"),
        (&["tr", "ee"], "tree"),
    ];
    SET.iter()
        .map(|(sounds, word)| {
            Question::WordBuilder(WordBuilder {
                sounds: sounds.iter().map(|s| s.to_string()).collect(),
                correct_word: word.to_string(),
                extra: Map::new(),
            })
        })
        .collect()
}

/// One collected answer, aligned by position with its question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Choice(i64),
    Text(String),
}

/// The in-progress attempt at one game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub kind: GameKind,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
    pub max_score: u32,
}

impl GameSession {
    pub fn new(kind: GameKind, difficulty: Difficulty, questions: Vec<Question>) -> Self {
        Self {
            kind,
            difficulty,
            questions,
            max_score: kind.max_score(),
        }
    }
}

#[derive(Serialize)]
pub struct SubmitRequest<'a> {
    pub answers: &'a [Answer],
    pub game_type: &'static str,
    pub difficulty: Difficulty,
    pub questions: &'a [Question],
}

impl<'a> SubmitRequest<'a> {
    pub fn new(session: &'a GameSession, answers: &'a [Answer]) -> Self {
        Self {
            answers,
            game_type: session.kind.wire_type(),
            difficulty: session.difficulty,
            questions: &session.questions,
        }
    }
}

// The scoring route has shipped under two field spellings.
#[derive(Deserialize)]
struct GameResultWire {
    #[serde(default)]
    score: f64,
    max_score: Option<u32>,
    total: Option<u32>,
    percentage: Option<f64>,
    accuracy: Option<f64>,
    feedback: Option<String>,
    message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "GameResultWire")]
pub struct GameResult {
    pub score: i64,
    pub max_score: Option<u32>,
    pub percentage: f64,
    pub feedback: String,
}

impl From<GameResultWire> for GameResult {
    fn from(wire: GameResultWire) -> Self {
        Self {
            score: wire.score.round() as i64,
            max_score: wire.max_score.or(wire.total),
            percentage: wire.percentage.or(wire.accuracy).unwrap_or(0.0),
            feedback: wire.feedback.or(wire.message).unwrap_or_default(),
        }
    }
}
