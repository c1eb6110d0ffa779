use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::Clock;
use services::{QuizConfig, QuizLoopService, RestCountriesClient};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidEndpoint { raw: String },
    InvalidSeconds { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidEndpoint { raw } => write!(f, "invalid --endpoint value: {raw}"),
            ArgsError::InvalidSeconds { flag, raw } => {
                write!(f, "invalid {flag} value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

struct Args {
    endpoint: String,
    quiz_config: QuizConfig,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--endpoint <url>] [--timed] [--countdown-secs <n>] [--reveal-secs <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --endpoint {}", services::countries::REST_COUNTRIES_ENDPOINT);
    eprintln!("  untimed questions, 3s countdown when timed, 2s reveal");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COUNTRY_QUIZ_ENDPOINT, COUNTRY_QUIZ_TIMED");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut endpoint = std::env::var("COUNTRY_QUIZ_ENDPOINT")
            .unwrap_or_else(|_| services::countries::REST_COUNTRIES_ENDPOINT.to_string());
        let mut quiz_config = QuizConfig::default();
        quiz_config.timed = std::env::var("COUNTRY_QUIZ_TIMED")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--endpoint" => {
                    let value = require_value(args, "--endpoint")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidEndpoint { raw: value });
                    }
                    endpoint = value;
                }
                "--timed" => {
                    quiz_config.timed = true;
                }
                "--countdown-secs" => {
                    let value = require_value(args, "--countdown-secs")?;
                    quiz_config.countdown_secs =
                        value.parse().map_err(|_| ArgsError::InvalidSeconds {
                            flag: "--countdown-secs",
                            raw: value.clone(),
                        })?;
                }
                "--reveal-secs" => {
                    let value = require_value(args, "--reveal-secs")?;
                    quiz_config.reveal_secs =
                        value.parse().map_err(|_| ArgsError::InvalidSeconds {
                            flag: "--reveal-secs",
                            raw: value.clone(),
                        })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            endpoint,
            quiz_config,
        })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    log::info!(
        "starting country quiz (endpoint={}, timed={})",
        parsed.endpoint,
        parsed.quiz_config.timed
    );

    let client = RestCountriesClient::new().with_endpoint(parsed.endpoint);
    let quiz_loop = Arc::new(
        QuizLoopService::new(Clock::default_clock(), Arc::new(client))
            .with_config(parsed.quiz_config),
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Country Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
