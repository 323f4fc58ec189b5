use std::cell::RefCell;

use super::render::{render_questions, render_results};
use super::{Answer, Difficulty, GameKind, GameResult, GameSession, QuestionSource, SubmitRequest};
use crate::api::{Api, Transport};
use crate::error::ApiError;
use crate::markup::Node;
use crate::notify::{Notifier, Toast};

/// DOM surface of the game modal.
pub trait GameView: Notifier {
    fn show_modal(&self);
    fn hide_modal(&self);
    fn set_title(&self, title: &str);
    fn set_score_text(&self, text: &str);
    fn set_content(&self, content: &Node);
    fn set_submit_visible(&self, visible: bool);
    /// Values of every text input in the modal body, in document order.
    fn text_input_values(&self) -> Vec<String>;
    /// Values of every checked radio button in the modal body, in document order.
    fn checked_radio_values(&self) -> Vec<String>;
}

/// Read the answers currently entered in `view` for a game of `kind`.
///
/// An unanswered question simply yields no entry, so a short result means the
/// attempt is incomplete.
pub fn collect_answers<V: GameView + ?Sized>(kind: GameKind, view: &V) -> Vec<Answer> {
    if kind.uses_text_answers() {
        view.text_input_values()
            .iter()
            .map(|v| Answer::Text(v.trim().to_lowercase()))
            .collect()
    } else {
        view.checked_radio_values()
            .iter()
            .filter_map(|v| v.trim().parse::<i64>().ok())
            .map(Answer::Choice)
            .collect()
    }
}

pub struct GameSessionController<T, V> {
    api: Api<T>,
    view: V,
    question_count: u32,
    session: RefCell<Option<GameSession>>,
}

impl<T: Transport, V: GameView> GameSessionController<T, V> {
    pub fn new(api: Api<T>, view: V, question_count: u32) -> Self {
        Self {
            api,
            view,
            question_count,
            session: RefCell::new(None),
        }
    }

    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn session(&self) -> Option<GameSession> {
        self.session.borrow().clone()
    }

    /// Start `game_id` at `difficulty`, replacing any open session once the
    /// questions are in hand.
    pub async fn start(&self, game_id: &str, difficulty: Difficulty) {
        let kind = match game_id.parse::<GameKind>() {
            Ok(kind) => kind,
            Err(err) => {
                log::warn!("{err}");
                self.view.notify(Toast::error("Unknown game"));
                return;
            }
        };
        log::info!("starting {kind} ({difficulty:?})");

        let questions = match kind.question_source() {
            QuestionSource::Server => {
                let loaded = self
                    .api
                    .phonics_questions(difficulty, self.question_count)
                    .await
                    .and_then(|raw| {
                        kind.decode_questions(raw)
                            .map_err(|e| ApiError::Decode(e.to_string()))
                    });
                match loaded {
                    Ok(questions) => questions,
                    Err(err) => {
                        log::warn!("could not start {kind}: {err}");
                        self.view.notify(Toast::error(err.user_message("Error starting game")));
                        return;
                    }
                }
            }
            QuestionSource::Fixed(build) => build(),
            QuestionSource::Unavailable => {
                self.view
                    .notify(Toast::info(format!("{} is coming soon", kind.title())));
                return;
            }
        };

        let session = GameSession::new(kind, difficulty, questions);
        self.render(&session);
        self.session.replace(Some(session));
        self.view.show_modal();
    }

    pub fn render(&self, session: &GameSession) {
        self.view.set_title(session.kind.title());
        self.view
            .set_score_text(&format!("Score: 0 / {}", session.max_score));
        self.view.set_content(&render_questions(&session.questions));
        self.view.set_submit_visible(true);
    }

    pub fn collect_answers(&self) -> Vec<Answer> {
        match self.session.borrow().as_ref() {
            Some(session) => collect_answers(session.kind, &self.view),
            None => Vec::new(),
        }
    }

    /// Submit the current answers for scoring. Incomplete attempts never reach
    /// the network.
    pub async fn submit(&self) {
        let Some(session) = self.session() else {
            return;
        };
        let answers = collect_answers(session.kind, &self.view);
        if answers.len() != session.questions.len() {
            self.view.notify(Toast::warning("Please answer all questions"));
            return;
        }

        let request = SubmitRequest::new(&session, &answers);
        match self.api.submit_game(&request).await {
            Ok(result) => self.show_results(&session, &result),
            Err(err) => {
                log::warn!("submitting {} failed: {err}", session.kind);
                self.view
                    .notify(Toast::error(err.user_message("Error submitting answers")));
            }
        }
    }

    fn show_results(&self, session: &GameSession, result: &GameResult) {
        let max = result.max_score.unwrap_or(session.max_score);
        self.view.set_content(&render_results(result, max));
        self.view.set_submit_visible(false);
        self.view
            .set_score_text(&format!("Final Score: {} / {max}", result.score));
    }

    /// Hide the modal and drop the session.
    pub fn close(&self) {
        self.view.hide_modal();
        if let Some(session) = self.session.take() {
            log::debug!("closed {}", session.kind);
        }
    }
}
