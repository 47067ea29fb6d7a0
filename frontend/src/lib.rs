//! DFS Console - Frontend Rust/Leptos Application
//!
//! A WebAssembly operator console for a distributed file-storage cluster.
//! It polls the gateway for nodes, files and log lines, reads single files
//! on demand and submits writes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (last sync)                                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Console                                                     │
//! │  ├── ServerStatus        ├── LogViewer                       │
//! │  └── FilePanel           └── FileDetail                      │
//! └─────────────────────────────────────────────────────────────┘
//!
//!   SyncLoop ──poll──▶ ViewState ──memos──▶ panels
//!   FilePanel ──write──▶ gateway ──ok──▶ SyncLoop::trigger_immediate_refresh
//! ```
//!
//! # Modules
//!
//! - [`config`] - Defaults and `<meta>` overrides
//! - [`types`] - Cluster records, API envelopes, errors
//! - [`state`] - View snapshot and its ordering rules
//! - [`sync`] - Periodic refresh loop
//! - [`scheduler`] - Task spawning and timers behind the loop
//! - [`components`] - UI components
//! - [`services`] - Gateway client and operator alerts

use std::rc::Rc;

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod state;
pub mod sync;
pub mod scheduler;
pub mod components;
pub mod services;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Cluster
    FileName, LogLine, ReadSource, SelectedFileDetail, ServerRecord,
    // API
    FilesResponse, LogsResponse, StatusResponse, WriteRequest,
    // Errors
    AppError, AppResult,
};

// State
pub use state::{
    CycleStamp, FieldOutcome, PollReport, PollResults, SelectionTicket, SyncMark, ViewSnapshot,
    ViewState,
};

// Sync
pub use sync::{PollHandle, SyncLoop};
pub use scheduler::{BrowserScheduler, Scheduler, TimerGuard};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 DFS Console - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(ConsoleConfig::from_document());

    view! {
        <Title text="Distributed File Storage"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=Console/>
                </Routes>
            </main>
        </Router>
    }
}

/// Wires the sync loop, the view state and the panels together.
#[component]
fn Console() -> impl IntoView {
    let config = use_context::<ConsoleConfig>().unwrap_or_default();
    let api = Rc::new(HttpClusterApi::new(&config));
    let view_state = ViewState::new();

    let sync = SyncLoop::new(Rc::clone(&api), view_state);
    let handle = sync.start(config.poll_interval_ms);
    on_cleanup(move || handle.stop());

    // Accepted writes and the refresh button both nudge the loop.
    let refresh: Rc<dyn Fn()> = Rc::new(move || sync.trigger_immediate_refresh());

    let console = FileConsole::new(
        api,
        view_state,
        Rc::new(BrowserNotifier),
        Rc::clone(&refresh),
    );

    view! {
        <Header last_sync=view_state.last_sync()/>

        <div class="container">
            <div class="grid-status">
                <ServerStatus servers=view_state.servers()/>
                <LogViewer logs=view_state.logs()/>
            </div>

            <div class="grid-files">
                <FilePanel console=console on_refresh=refresh/>
                <FileDetail selected=view_state.selected()/>
            </div>
        </div>
    }
}
