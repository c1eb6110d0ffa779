use std::sync::Arc;

use quiz_core::model::Country;
use services::{CountryApiError, CountrySource, QuizConfig, TickOutcome};

use super::test_harness::{sample_countries, setup_view_harness, setup_view_harness_with_source};
use crate::vm::QuizIntent;

struct FailingCountrySource;

#[async_trait::async_trait]
impl CountrySource for FailingCountrySource {
    async fn fetch_all(&self) -> Result<Vec<Country>, CountryApiError> {
        Err(CountryApiError::HttpStatus(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_starts_in_loading() {
    let mut harness = setup_view_harness(sample_countries(15), QuizConfig::default());
    harness.rebuild();

    let html = harness.render();
    assert!(
        html.contains("Loading countries"),
        "missing loading state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_a_question() {
    let mut harness = setup_view_harness(sample_countries(15), QuizConfig::default());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("0/10 Points"), "missing score badge in {html}");
    assert!(
        html.contains("Which country does this flag belong to?"),
        "missing prompt in {html}"
    );
    assert_eq!(
        html.matches("quiz-option__label").count(),
        4,
        "expected 4 options in {html}"
    );
    assert!(
        html.contains("quiz-marker--filled"),
        "missing progress marker in {html}"
    );
    assert!(html.contains("quiz-flag"), "missing flag image in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn correct_answer_scores_and_decorates() {
    let mut harness = setup_view_harness(sample_countries(15), QuizConfig::default());
    harness.rebuild();
    harness.settle().await;

    let vm = harness.handles.vm();
    let answer = {
        let guard = vm.read();
        guard.as_ref().unwrap().correct_answer().unwrap()
    };

    harness.handles.dispatch().call(QuizIntent::Select(answer));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("1/10 Points"), "score did not move in {html}");
    assert!(
        html.contains("quiz-option--correct"),
        "missing correct decoration in {html}"
    );
    assert!(
        html.contains("quiz-option__marker"),
        "missing reveal marker in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_answer_marks_the_selection() {
    let mut harness = setup_view_harness(sample_countries(15), QuizConfig::default());
    harness.rebuild();
    harness.settle().await;

    let vm = harness.handles.vm();
    let wrong = {
        let guard = vm.read();
        let vm_ref = guard.as_ref().unwrap();
        let answer = vm_ref.correct_answer().unwrap();
        vm_ref
            .options()
            .into_iter()
            .map(|option| option.label)
            .find(|label| *label != answer)
            .unwrap()
    };

    harness.handles.dispatch().call(QuizIntent::Select(wrong));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("0/10 Points"), "score moved in {html}");
    assert!(
        html.contains("quiz-option--wrong"),
        "missing wrong decoration in {html}"
    );
    assert!(
        html.contains("quiz-option--correct"),
        "correct answer not highlighted in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn completed_quiz_renders_results_and_play_again_resets() {
    let mut harness = setup_view_harness(sample_countries(15), QuizConfig::default());
    harness.rebuild();
    harness.settle().await;

    let mut vm = harness.handles.vm();
    let quiz_loop = harness.quiz_loop.clone();
    {
        let mut guard = vm.write();
        let vm_ref = guard.as_mut().unwrap();
        while !vm_ref.is_complete() {
            let answer = vm_ref.correct_answer().unwrap();
            assert!(vm_ref.select(&answer));
            vm_ref.advance(&quiz_loop).unwrap();
        }
    }
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Congrats! You completed the quiz."),
        "missing results panel in {html}"
    );
    assert!(
        html.contains("You answered 10/10 correctly."),
        "missing results score in {html}"
    );
    assert!(html.contains("Play Again"), "missing play again in {html}");

    harness.handles.dispatch().call(QuizIntent::PlayAgain);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("0/10 Points"), "score not reset in {html}");
    assert!(
        !html.contains("Congrats"),
        "results still showing in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn thin_country_list_shows_retry() {
    let mut harness = setup_view_harness(sample_countries(4), QuizConfig::default());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("too short"),
        "missing error message in {html}"
    );
    assert!(html.contains("Retry"), "missing retry button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failing_source_shows_retry() {
    let mut harness =
        setup_view_harness_with_source(Arc::new(FailingCountrySource), QuizConfig::default());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("load countries"),
        "missing api error message in {html}"
    );
    assert!(html.contains("Retry"), "missing retry button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn timed_quiz_shows_the_countdown() {
    let mut harness = setup_view_harness(sample_countries(15), QuizConfig::timed());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("quiz-countdown"),
        "missing countdown in {html}"
    );
    assert!(html.contains("3s"), "countdown not at 3 in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn countdown_timeout_reveals_without_a_selection() {
    let mut harness = setup_view_harness(sample_countries(15), QuizConfig::timed());
    harness.rebuild();
    harness.settle().await;

    let mut vm = harness.handles.vm();
    {
        let mut guard = vm.write();
        let vm_ref = guard.as_mut().unwrap();
        assert_eq!(vm_ref.tick(), TickOutcome::Counting(2));
        assert_eq!(vm_ref.tick(), TickOutcome::Counting(1));
        assert_eq!(vm_ref.tick(), TickOutcome::TimedOut);
    }
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("0/10 Points"), "score moved in {html}");
    assert!(
        html.contains("quiz-option--correct"),
        "correct answer not highlighted in {html}"
    );
    assert!(
        !html.contains("quiz-option--wrong"),
        "unexpected selection decoration in {html}"
    );
}
