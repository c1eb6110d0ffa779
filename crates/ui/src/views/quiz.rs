use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;

use services::{QuizLoopService, TickOutcome, QUESTIONS_PER_QUIZ};

use crate::context::AppContext;
use crate::views::{view_state_from_resource, ViewError, ViewState};
use crate::vm::{start_quiz, OptionDecoration, OptionVm, QuizIntent, QuizOutcome, QuizVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

fn cancel_task(mut slot: Signal<Option<Task>>) {
    if let Some(task) = slot.write().take() {
        task.cancel();
    }
}

/// Hold the reveal on screen, then advance the session.
///
/// Cancels any countdown first so a question transition can never leave a
/// stale timer running. If the next question is timed, its countdown starts
/// once the advance lands.
fn schedule_reveal(
    mut vm: Signal<Option<QuizVm>>,
    quiz_loop: Arc<QuizLoopService>,
    countdown_task: Signal<Option<Task>>,
    mut reveal_task: Signal<Option<Task>>,
) {
    cancel_task(countdown_task);
    cancel_task(reveal_task);

    let reveal_secs = quiz_loop.config().reveal_secs;
    let task = spawn(async move {
        tokio::time::sleep(Duration::from_secs(reveal_secs)).await;
        let outcome = vm.write().as_mut().and_then(|vm| vm.advance(&quiz_loop));
        reveal_task.set(None);
        if outcome == Some(QuizOutcome::Continue) && quiz_loop.config().timed {
            schedule_countdown(vm, Arc::clone(&quiz_loop), countdown_task, reveal_task);
        }
    });
    reveal_task.set(Some(task));
}

/// Tick the countdown once per second until it is paused or runs out.
///
/// A timeout hands over to [`schedule_reveal`], which is the same path a
/// manual answer takes.
fn schedule_countdown(
    mut vm: Signal<Option<QuizVm>>,
    quiz_loop: Arc<QuizLoopService>,
    mut countdown_task: Signal<Option<Task>>,
    reveal_task: Signal<Option<Task>>,
) {
    cancel_task(countdown_task);

    let task = spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let outcome = vm.write().as_mut().map(QuizVm::tick);
            match outcome {
                Some(TickOutcome::Counting(_)) => {}
                Some(TickOutcome::TimedOut) => {
                    countdown_task.set(None);
                    schedule_reveal(vm, Arc::clone(&quiz_loop), countdown_task, reveal_task);
                    break;
                }
                Some(TickOutcome::Idle) | None => {
                    countdown_task.set(None);
                    break;
                }
            }
        }
    });
    countdown_task.set(Some(task));
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let vm = use_signal(|| None::<QuizVm>);
    let countdown_task = use_signal(|| None::<Task>);
    let reveal_task = use_signal(|| None::<Task>);

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let mut vm = vm;

        async move {
            // A restart replaces the session; stale timers must not outlive it.
            cancel_task(countdown_task);
            cancel_task(reveal_task);

            let started = start_quiz(&quiz_loop).await?;
            let timed = started.config().timed;
            vm.set(Some(started));
            if timed {
                schedule_countdown(vm, quiz_loop, countdown_task, reveal_task);
            }
            Ok::<_, ViewError>(())
        }
    });

    let dispatch = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let quiz_loop = quiz_loop.clone();
            let mut vm = vm;

            match intent {
                QuizIntent::Select(option) => {
                    let accepted = vm.write().as_mut().is_some_and(|vm| vm.select(&option));
                    // Clicks during the reveal bounce off the session; only an
                    // accepted answer schedules the advance.
                    if accepted {
                        schedule_reveal(vm, quiz_loop, countdown_task, reveal_task);
                    }
                }
                QuizIntent::PlayAgain => {
                    cancel_task(countdown_task);
                    cancel_task(reveal_task);
                    let timed = {
                        let mut guard = vm.write();
                        match guard.as_mut() {
                            Some(vm) => {
                                vm.play_again(&quiz_loop);
                                vm.config().timed
                            }
                            None => false,
                        }
                    };
                    if timed {
                        schedule_countdown(vm, quiz_loop, countdown_task, reveal_task);
                    }
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let state = view_state_from_resource(&resource);

    let vm_guard = vm.read();
    let (score, total) = vm_guard
        .as_ref()
        .map_or((0, QUESTIONS_PER_QUIZ), |vm| (vm.score(), vm.total_questions()));
    let completed = vm_guard.as_ref().is_some_and(QuizVm::is_complete);
    let markers = vm_guard.as_ref().map(QuizVm::markers).unwrap_or_default();
    let options = vm_guard.as_ref().map(QuizVm::options).unwrap_or_default();
    let flag_url = vm_guard.as_ref().and_then(QuizVm::flag_url);
    let show_countdown = vm_guard.as_ref().is_some_and(QuizVm::show_countdown);
    let remaining_secs = vm_guard.as_ref().map_or(0, QuizVm::remaining_secs);
    drop(vm_guard);

    rsx! {
        div { class: "page quiz-page",
            header { class: "quiz-header",
                h1 { class: "quiz-title", "Country Quiz" }
                ScoreBadge { score, total }
            }
            div { class: "quiz-card",
                match state {
                    ViewState::Idle => rsx! {
                        p { class: "quiz-status", "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { class: "quiz-status", "Loading countries..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "quiz-status quiz-status--error", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            id: "quiz-retry",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    },
                    ViewState::Ready(()) => rsx! {
                        if completed {
                            div { class: "quiz-results",
                                h2 { class: "quiz-results__title", "Congrats! You completed the quiz." }
                                p { class: "quiz-results__score", "You answered {score}/{total} correctly." }
                                button {
                                    class: "btn quiz-play-again",
                                    id: "quiz-play-again",
                                    r#type: "button",
                                    onclick: move |_| dispatch.call(QuizIntent::PlayAgain),
                                    "Play Again"
                                }
                            }
                        } else {
                            div { class: "quiz-progress",
                                for marker in markers {
                                    ProgressMarker {
                                        key: "{marker.number}",
                                        number: marker.number,
                                        filled: marker.filled,
                                    }
                                }
                            }
                            div { class: "quiz-question",
                                h2 { class: "quiz-prompt", "Which country does this flag belong to?" }
                                if let Some(flag_url) = flag_url {
                                    img { class: "quiz-flag", src: "{flag_url}", alt: "Country flag" }
                                }
                                if show_countdown {
                                    p { class: "quiz-countdown", id: "quiz-countdown", "{remaining_secs}s" }
                                }
                            }
                            div { class: "quiz-options",
                                for option in options {
                                    OptionButton {
                                        key: "{option.label}",
                                        option,
                                        on_intent: dispatch,
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn ScoreBadge(score: u32, total: usize) -> Element {
    rsx! {
        div { class: "quiz-score",
            span { class: "quiz-score__trophy", "🏆" }
            span { class: "quiz-score__text", "{score}/{total} Points" }
        }
    }
}

#[component]
fn ProgressMarker(number: usize, filled: bool) -> Element {
    let class = if filled {
        "quiz-marker quiz-marker--filled"
    } else {
        "quiz-marker"
    };
    rsx! {
        div { class: "{class}",
            span { "{number}" }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let mut class = String::from("quiz-option");
    match option.decoration {
        OptionDecoration::Correct => class.push_str(" quiz-option--correct"),
        OptionDecoration::WrongSelection => class.push_str(" quiz-option--wrong"),
        OptionDecoration::Plain => {}
    }
    if option.selected {
        class.push_str(" quiz-option--selected");
    }
    let marker = match option.decoration {
        OptionDecoration::Correct => Some("✓"),
        OptionDecoration::WrongSelection => Some("✗"),
        OptionDecoration::Plain => None,
    };
    let label = option.label.clone();
    let disabled = option.disabled;

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            disabled: disabled,
            onclick: move |_| {
                if !disabled {
                    on_intent.call(QuizIntent::Select(label.clone()));
                }
            },
            span { class: "quiz-option__label", "{option.label}" }
            if let Some(marker) = marker {
                span { class: "quiz-option__marker", "{marker}" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
