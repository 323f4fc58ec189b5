// Native tests for the game session flow, driven through fake view/transport.

mod support;

use futures::executor::block_on;
use serde_json::json;

use cogno_web::error::ApiError;
use cogno_web::games::{Difficulty, GameSessionController};
use cogno_web::markup::Node;
use cogno_web::notify::ToastKind;
use support::{FakeGameView, FakeTransport, api};

fn phonics_questions() -> serde_json::Value {
    let questions: Vec<_> = ["bat", "cup", "fin", "hop", "sun"]
        .iter()
        .enumerate()
        .map(|(i, word)| json!({"word": word, "options": ["a", "b", "c"], "correct_index": i % 3}))
        .collect();
    json!({"success": true, "questions": questions})
}

fn controller(transport: FakeTransport) -> GameSessionController<FakeTransport, FakeGameView> {
    GameSessionController::new(api(transport), FakeGameView::default(), 5)
}

fn question_blocks(content: &Node) -> usize {
    match content {
        Node::Element(root) => root.children.len(),
        Node::Text(_) => 0,
    }
}

#[test]
fn sound_match_requests_server_questions() {
    let games = controller(FakeTransport::default().respond(phonics_questions()));
    block_on(games.start("sound-match", Difficulty::Easy));

    let request = games.api().transport().last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "/dyslexia/games/phonics");
    assert_eq!(request.body, Some(json!({"difficulty": "easy", "count": 5})));

    let view = games.view();
    assert!(view.modal_open.get());
    assert!(view.submit_visible.get());
    assert_eq!(*view.title.borrow(), "Sound Match");
    assert_eq!(*view.score.borrow(), "Score: 0 / 100");
    assert_eq!(question_blocks(view.content.borrow().as_ref().unwrap()), 5);
}

#[test]
fn submitting_posts_every_answer_and_the_questions() {
    let transport = FakeTransport::default()
        .respond(phonics_questions())
        .respond(json!({"success": true, "score": 80, "total": 100, "accuracy": 80.0, "message": "Nice!"}));
    let games = controller(transport);
    block_on(games.start("sound-match", Difficulty::Easy));

    games
        .view()
        .checked_radios
        .replace(vec!["0".into(), "1".into(), "2".into(), "0".into(), "1".into()]);
    block_on(games.submit());

    let request = games.api().transport().last_request().unwrap();
    assert_eq!(request.url, "/dyslexia/games/submit");
    let body = request.body.unwrap();
    assert_eq!(body["answers"], json!([0, 1, 2, 0, 1]));
    assert_eq!(body["game_type"], "phonics");
    assert_eq!(body["difficulty"], "easy");
    assert_eq!(body["questions"].as_array().unwrap().len(), 5);
    assert_eq!(body["questions"][1]["correct_index"], 1);

    let view = games.view();
    assert!(!view.submit_visible.get());
    assert_eq!(*view.score.borrow(), "Final Score: 80 / 100");
    let results = view.content.borrow().as_ref().unwrap().text_content();
    assert!(results.contains("🎉"));
    assert!(results.contains("Nice!"));
}

#[test]
fn word_builder_uses_fixed_questions_without_network() {
    let games = controller(FakeTransport::default());
    block_on(games.start("word-builder", Difficulty::Hard));
    let first = games.session().unwrap();
    games.close();
    block_on(games.start("word-builder", Difficulty::Easy));
    let second = games.session().unwrap();

    assert_eq!(games.api().transport().request_count(), 0);
    assert_eq!(first.questions.len(), 5);
    assert_eq!(first.questions, second.questions);
    assert_eq!(*games.view().score.borrow(), "Score: 0 / 150");
}

#[test]
fn word_builder_answers_are_trimmed_and_lowercased() {
    let games = controller(FakeTransport::default().respond(json!({"success": true, "score": 150})));
    block_on(games.start("word-builder", Difficulty::Easy));
    games
        .view()
        .text_inputs
        .replace(vec![" Cat ".into(), "DOG".into(), "fish".into(), "Bird".into(), "tree  ".into()]);

    let answers = games.collect_answers();
    assert_eq!(answers.len(), 5);
    block_on(games.submit());

    let body = games.api().transport().last_request().unwrap().body.unwrap();
    assert_eq!(body["answers"], json!(["cat", "dog", "fish", "bird", "tree"]));
    assert_eq!(body["game_type"], "word-building");
}

#[test]
fn incomplete_answers_never_reach_the_server() {
    let games = controller(FakeTransport::default().respond(phonics_questions()));
    block_on(games.start("sound-match", Difficulty::Medium));
    games
        .view()
        .checked_radios
        .replace(vec!["0".into(), "1".into(), "x".into()]);
    block_on(games.submit());

    assert_eq!(games.api().transport().request_count(), 1);
    let toast = games.view().toasts.last().unwrap();
    assert_eq!(toast.kind, ToastKind::Warning);
    assert_eq!(toast.message, "Please answer all questions");
    assert!(games.view().submit_visible.get());
}

#[test]
fn server_rejection_shows_its_message() {
    let games = controller(
        FakeTransport::default().respond(json!({"success": false, "message": "Please log in"})),
    );
    block_on(games.start("sound-match", Difficulty::Easy));

    assert!(!games.view().modal_open.get());
    assert!(games.session().is_none());
    assert_eq!(games.view().toasts.messages(), ["Please log in"]);
}

#[test]
fn network_failure_shows_fixed_message() {
    let games = controller(FakeTransport::default().fail(ApiError::Network("offline".into())));
    block_on(games.start("sound-match", Difficulty::Easy));
    assert_eq!(games.view().toasts.messages(), ["Error starting game"]);

    block_on(games.start("word-builder", Difficulty::Easy));
    games.view().text_inputs.replace(vec!["a".into(); 5]);
    block_on(games.submit());
    assert_eq!(games.view().toasts.last().unwrap().message, "Error submitting answers");
}

#[test]
fn unwired_and_unknown_games_do_not_open() {
    let games = controller(FakeTransport::default());
    block_on(games.start("rhyme-time", Difficulty::Easy));
    block_on(games.start("memory-match", Difficulty::Easy));

    assert!(!games.view().modal_open.get());
    assert_eq!(games.api().transport().request_count(), 0);
    assert_eq!(
        games.view().toasts.messages(),
        ["Rhyme Time is coming soon", "Unknown game"]
    );
    assert_eq!(games.view().toasts.count(ToastKind::Error), 1);
}

#[test]
fn close_discards_the_session() {
    let games = controller(FakeTransport::default());
    block_on(games.start("word-builder", Difficulty::Easy));
    assert!(games.session().is_some());

    games.close();
    assert!(games.session().is_none());
    assert!(!games.view().modal_open.get());

    block_on(games.submit());
    assert_eq!(games.api().transport().request_count(), 0);
}
