use dioxus::prelude::*;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use webook::{NoticeQueue, Repo};

use crate::components::{Head, Splash, Toasts};
use crate::state::AppState;
use crate::views::{Login, Signup};

mod components;
mod state;
mod views;

/// The Route enum is used to define the structure of internal routes in our app. All route enums need to derive
/// the [`Routable`] trait, which provides the necessary methods for the router to work.
///
/// The paths match the webook frontend: a successful signup sends the user to `/users/login`.
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[redirect("/", || Route::Signup {})]
    #[route("/users/signup")]
    Signup {},
    #[route("/users/login")]
    Login {},
}

fn main() {
    dotenv::dotenv().ok();
    let _log_guard = init_logging();

    dioxus::launch(App);
}

/// Logs to stderr and to a daily file under the repo's `logs` directory.
fn init_logging() -> WorkerGuard {
    let file = tracing_appender::rolling::daily(Repo::default_logs_dir(), "webook-gui.log");
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    guard
}

#[component]
fn App() -> Element {
    let mut app_state = use_signal(|| None::<Result<(), String>>);
    let mut notices = use_context_provider(|| Signal::new(NoticeQueue::default()));

    use_future(move || async move {
        match AppState::load().await {
            Ok(state) => {
                notices.set(NoticeQueue::with_capacity(state.config().notice_capacity));
                provide_context(state);
                app_state.set(Some(Ok(())));
            }
            Err(err) => {
                tracing::error!("failed to load app state: {err:#}");
                app_state.set(Some(Err(err.to_string())));
            }
        }
    });

    match app_state() {
        None => rsx! {
            Head {}
            Splash {}
        },
        Some(Err(err)) => rsx! {
            Head {}
            div { class: "page",
                div { class: "alert alert-error",
                    div { class: "alert-title", "Failed to start" }
                    div { "{err}" }
                }
            }
        },
        Some(Ok(())) => rsx! {
            Head {}
            Router::<Route> {}
            Toasts {}
        },
    }
}
