use leptos::*;

use crate::SyncMark;

#[component]
pub fn Header(last_sync: RwSignal<Option<SyncMark>>) -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <h1 class="logo">"☁️ Distributed File Storage"</h1>
                <p class="subtitle">
                    "Quorum Consistency • Primary-Based Replication • Client Caching"
                </p>
            </div>
            <div class="header-right">
                <span class="sync-status" class:synced=move || last_sync.with(Option::is_some)>
                    {move || match last_sync.get() {
                        Some(mark) => format!("Last sync {} (cycle {})", mark.at, mark.stamp),
                        None => "Waiting for first sync...".to_string(),
                    }}
                </span>
            </div>
        </header>
    }
}
