//! Gateway log viewer with auto-follow.
//!
//! Renders the polled log lines in order and scrolls to the newest line
//! whenever the list changes.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::LogLine;

/// Request animation frame helper for smooth scrolling
fn request_animation_frame(f: impl FnOnce() + 'static) {
    let closure = Closure::once(f);
    let scheduled = gloo_utils::window().request_animation_frame(closure.as_ref().unchecked_ref());
    if let Err(e) = scheduled {
        log::warn!("requestAnimationFrame failed: {:?}", e);
        return;
    }
    closure.forget();
}

#[component]
pub fn LogViewer(logs: Memo<Vec<LogLine>>) -> impl IntoView {
    let logs_container = create_node_ref::<leptos::html::Div>();

    // Follow the newest line. Idempotent; safe to run redundantly.
    create_effect(move |_| {
        logs.with(|_| ());
        if let Some(container) = logs_container.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="panel logs-panel">
            <h2 class="panel-title">"🖥️ System Logs"</h2>
            <div class="logs-content" node_ref=logs_container>
                <For
                    each=move || logs.get().into_iter().enumerate()
                    key=|(i, line)| (*i, line.clone())
                    children=move |(_, line)| {
                        view! { <div class="log-entry">{line}</div> }
                    }
                />
            </div>
        </div>
    }
}
