//! Text-to-speech seam.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::SpeechConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadingState {
    #[default]
    Idle,
    Reading,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, config: &SpeechConfig) -> Self {
        Self {
            text: text.into(),
            rate: config.rate,
            pitch: config.pitch,
            volume: config.volume,
        }
    }
}

/// Lifecycle notifications of one utterance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    Ended,
    Failed,
}

pub type SpeechListener = Box<dyn Fn(SpeechEvent)>;

pub trait SpeechEngine {
    /// Queue `utterance`; `listener` receives its lifecycle events.
    fn speak(&self, utterance: Utterance, listener: SpeechListener);
    fn cancel(&self);
}

/// Set once an utterance has reported its end or failure.
#[derive(Clone, Debug, Default)]
pub struct Finished(Rc<Cell<bool>>);

impl Finished {
    pub fn mark(&self) {
        self.0.set(true);
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}

/// Platform handles of queued utterances. Each entry lives until its own
/// utterance finishes; finished entries are released on the next `keep`,
/// never from inside the finishing callback.
pub struct LiveUtterances<T> {
    entries: RefCell<Vec<(Finished, T)>>,
}

impl<T> Default for LiveUtterances<T> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<T> LiveUtterances<T> {
    pub fn keep(&self, finished: Finished, handles: T) {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|(done, _)| !done.is_set());
        entries.push((finished, handles));
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
