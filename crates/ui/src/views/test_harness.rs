use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::Country;
use quiz_core::time::fixed_clock;
use services::{CountrySource, FixedCountrySource, QuizConfig, QuizLoopService};

use super::quiz::QuizTestHandles;
use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz_loop: Arc<QuizLoopService>,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive a few rounds so resource completion and signal writes both land.
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_countries(count: usize) -> Vec<Country> {
    (0..count)
        .map(|i| {
            Country::new(
                format!("Country {i}"),
                &format!("https://flagcdn.com/c{i}.svg"),
            )
            .expect("test country is valid")
        })
        .collect()
}

pub fn setup_view_harness(countries: Vec<Country>, config: QuizConfig) -> ViewHarness {
    setup_view_harness_with_source(Arc::new(FixedCountrySource::new(countries)), config)
}

pub fn setup_view_harness_with_source(
    source: Arc<dyn CountrySource + Send + Sync>,
    config: QuizConfig,
) -> ViewHarness {
    let quiz_loop = Arc::new(QuizLoopService::new(fixed_clock(), source).with_config(config));
    let handles = QuizTestHandles::default();

    let app = Arc::new(TestApp {
        quiz_loop: Arc::clone(&quiz_loop),
    });

    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        quiz_loop,
        handles,
    }
}
