use std::time::Duration;

use dioxus::prelude::*;
use n0_future::time::Instant;
use webook::{Notice, NoticeLevel, NoticeQueue};

/// How often [`Toasts`] checks for expired notices.
const SWEEP_INTERVAL: Duration = Duration::from_millis(200);

fn class_for(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "toast toast-info",
        NoticeLevel::Success => "toast toast-success",
        NoticeLevel::Warning => "toast toast-warning",
        NoticeLevel::Error => "toast toast-error",
    }
}

/// Queues notices that disappear again after `ttl`.
///
/// Expiry is driven by [`Toasts`], so the caller's scope may go away right
/// after this returns (for example when the form navigates to login).
pub fn show_notices(mut queue: Signal<NoticeQueue>, notices: Vec<Notice>, ttl: Duration) {
    let now = Instant::now();
    let mut pending = queue.write();
    for notice in notices {
        pending.push_expiring(notice, ttl, now);
    }
}

/// Stack of queued notices in the corner of the window. Rendering never
/// blocks the form: notices come and go while it stays interactive.
#[component]
pub fn Toasts() -> Element {
    let mut queue = use_context::<Signal<NoticeQueue>>();

    use_future(move || async move {
        loop {
            n0_future::time::sleep(SWEEP_INTERVAL).await;
            let now = Instant::now();
            let due = queue.peek().next_expiry().is_some_and(|at| at <= now);
            if due {
                queue.write().expire(now);
            }
        }
    });

    let items: Vec<(u64, &'static str, String)> = queue
        .read()
        .iter()
        .map(|item| (item.id, class_for(item.notice.level), item.notice.text.clone()))
        .collect();

    rsx! {
        div { class: "toasts", role: "status",
            for (id, class, text) in items {
                div { key: "{id}", class: "{class}",
                    span { class: "toast-text", "{text}" }
                    button {
                        class: "toast-close",
                        r#type: "button",
                        onclick: move |_| {
                            queue.write().dismiss(id);
                        },
                        "×"
                    }
                }
            }
        }
    }
}
