//! Node status cards.
//!
//! Every listed node is shown as online: inclusion in the gateway's list is
//! the only liveness signal the console has.

use leptos::*;

use crate::ServerRecord;

#[component]
pub fn ServerStatus(servers: Memo<Vec<ServerRecord>>) -> impl IntoView {
    view! {
        <div class="panel status-panel">
            <h2 class="panel-title">"📡 System Status"</h2>
            <div class="server-grid">
                <For
                    each=move || servers.get()
                    key=|server| server.name.clone()
                    children=move |server: ServerRecord| {
                        view! {
                            <div class="server-card">
                                <div class="server-icon">"🗄️"</div>
                                <h3 class="server-name">{server.name.clone()}</h3>
                                <p class="server-endpoint">{server.endpoint()}</p>
                                <div class="server-badge">"Online"</div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
