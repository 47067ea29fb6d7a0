//! Detail pane for the selected file.

use leptos::*;

use crate::SelectedFileDetail;

#[component]
pub fn FileDetail(selected: Memo<Option<SelectedFileDetail>>) -> impl IntoView {
    view! {
        <div class="panel detail-panel">
            <h2 class="panel-title">"File Content"</h2>
            {move || match selected.get() {
                Some(detail) => view! {
                    <div class="detail-body">
                        <div class="detail-header">
                            <div class="detail-name">{detail.filename.clone()}</div>
                            <div class=format!("detail-source {}", detail.source.css_class())>
                                "Source: " {detail.source.to_string()}
                            </div>
                        </div>
                        <pre class="detail-content">{detail.content.clone()}</pre>
                    </div>
                }
                .into_view(),
                None => view! {
                    <div class="detail-empty">"Select a file to view content"</div>
                }
                .into_view(),
            }}
        </div>
    }
}
