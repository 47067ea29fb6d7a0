//! File list, point reads and the write (upload) workflow.
//!
//! [`FileConsole`] holds the logic; [`FilePanel`] renders it. The upload
//! draft lives here and nowhere else, so polling can never overwrite what
//! the operator is typing.

use std::rc::Rc;

use leptos::*;

use crate::{AppError, ClusterApi, FileName, HttpClusterApi, Notifier, ViewState};

/// Shown in place of the file list when the gateway reports no files.
pub const NO_FILES_PLACEHOLDER: &str = "No files found.";

/// Filename and content typed by the operator, not yet submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadDraft {
    pub filename: String,
    pub content: String,
}

impl UploadDraft {
    /// Both fields non-empty. Name legality is left to the gateway.
    pub fn is_complete(&self) -> bool {
        !self.filename.is_empty() && !self.content.is_empty()
    }
}

/// Result of [`FileConsole::submit_upload`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Gateway accepted the write; draft closed, refresh requested.
    Accepted,
    /// Gateway refused the write; draft kept for correction.
    Rejected(AppError),
    /// Filename or content empty; nothing sent.
    Incomplete,
    /// No draft open.
    NotUploading,
    /// A previous submit is still waiting for the gateway.
    InFlight,
}

/// File console state and actions.
pub struct FileConsole<A> {
    api: Rc<A>,
    view: ViewState,
    notifier: Rc<dyn Notifier>,
    on_written: Rc<dyn Fn()>,
    draft: RwSignal<Option<UploadDraft>>,
    submitting: RwSignal<bool>,
}

impl<A> Clone for FileConsole<A> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            view: self.view,
            notifier: Rc::clone(&self.notifier),
            on_written: Rc::clone(&self.on_written),
            draft: self.draft,
            submitting: self.submitting,
        }
    }
}

impl<A: ClusterApi + 'static> FileConsole<A> {
    /// `on_written` runs once after every accepted write.
    pub fn new(
        api: Rc<A>,
        view: ViewState,
        notifier: Rc<dyn Notifier>,
        on_written: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            api,
            view,
            notifier,
            on_written,
            draft: create_rw_signal(None),
            submitting: create_rw_signal(false),
        }
    }

    pub fn files(&self) -> Memo<Vec<FileName>> {
        self.view.files()
    }

    /// Read `name` and show it in the detail pane.
    ///
    /// On failure the operator is alerted and the current selection stays.
    pub async fn select_file(&self, name: FileName) -> bool {
        let ticket = self.view.next_selection_ticket();
        match self.api.read_file(&name).await {
            Ok(detail) => self.view.apply_selection(ticket, detail),
            Err(err) => {
                self.notifier.alert(&format!("Failed to read file: {}", err));
                false
            }
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.draft.with(Option::is_some)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Current draft, without subscribing.
    pub fn draft(&self) -> Option<UploadDraft> {
        self.draft.get_untracked()
    }

    pub fn draft_filename(&self) -> String {
        self.draft
            .with(|d| d.as_ref().map(|d| d.filename.clone()).unwrap_or_default())
    }

    pub fn draft_content(&self) -> String {
        self.draft
            .with(|d| d.as_ref().map(|d| d.content.clone()).unwrap_or_default())
    }

    /// Open an empty draft. An already open draft is kept as is.
    pub fn begin_upload(&self) {
        self.draft.update(|d| {
            if d.is_none() {
                *d = Some(UploadDraft::default());
            }
        });
    }

    /// Discard the draft unconditionally.
    pub fn cancel_upload(&self) {
        self.draft.set(None);
    }

    pub fn toggle_upload(&self) {
        if self.draft.with_untracked(Option::is_some) {
            self.cancel_upload();
        } else {
            self.begin_upload();
        }
    }

    pub fn set_draft_filename(&self, filename: String) {
        self.draft.update(|d| {
            if let Some(d) = d {
                d.filename = filename;
            }
        });
    }

    pub fn set_draft_content(&self, content: String) {
        self.draft.update(|d| {
            if let Some(d) = d {
                d.content = content;
            }
        });
    }

    /// Send the draft to the gateway.
    ///
    /// Acceptance only means the gateway took the write under its own
    /// consistency policy; the refresh that follows may or may not show it.
    pub async fn submit_upload(&self) -> SubmitOutcome {
        let Some(draft) = self.draft.get_untracked() else {
            return SubmitOutcome::NotUploading;
        };
        if !draft.is_complete() {
            return SubmitOutcome::Incomplete;
        }
        if self.submitting.get_untracked() {
            return SubmitOutcome::InFlight;
        }

        self.submitting.set(true);
        let result = self.api.write_file(&draft.filename, &draft.content).await;
        self.submitting.set(false);

        match result {
            Ok(()) => {
                log::info!("write of {} accepted", draft.filename);
                self.draft.set(None);
                (self.on_written)();
                SubmitOutcome::Accepted
            }
            Err(err) => {
                self.notifier.alert(&format!("Write failed: {}", err));
                SubmitOutcome::Rejected(err)
            }
        }
    }
}

/// The console as wired in the browser.
pub type HttpFileConsole = FileConsole<HttpClusterApi>;

/// File list with upload form.
#[component]
pub fn FilePanel(
    console: HttpFileConsole,
    /// Manual refresh (runs one poll cycle)
    on_refresh: Rc<dyn Fn()>,
) -> impl IntoView {
    let files = console.files();

    let toggle = {
        let console = console.clone();
        move |_: ev::MouseEvent| console.toggle_upload()
    };

    let on_filename = {
        let console = console.clone();
        move |ev: web_sys::Event| console.set_draft_filename(event_target_value(&ev))
    };

    let on_content = {
        let console = console.clone();
        move |ev: web_sys::Event| console.set_draft_content(event_target_value(&ev))
    };

    let on_submit = {
        let console = console.clone();
        move |_: ev::MouseEvent| {
            let console = console.clone();
            spawn_local(async move {
                let outcome = console.submit_upload().await;
                log::debug!("submit outcome: {:?}", outcome);
            });
        }
    };

    let upload_label = {
        let console = console.clone();
        move || if console.is_uploading() { "Cancel" } else { "Upload" }
    };

    let uploading = {
        let console = console.clone();
        move || console.is_uploading()
    };

    let filename_value = {
        let console = console.clone();
        move || console.draft_filename()
    };

    let content_value = {
        let console = console.clone();
        move || console.draft_content()
    };

    let submit_disabled = {
        let console = console.clone();
        move || console.is_submitting()
    };

    let row_console = console.clone();

    view! {
        <div class="panel file-panel">
            <div class="panel-header">
                <h2 class="panel-title">"📄 Files"</h2>
                <div class="panel-actions">
                    <button class="btn btn-secondary" title="Refresh" on:click=move |_| on_refresh()>
                        "⟳"
                    </button>
                    <button class="btn btn-primary" on:click=toggle>
                        {upload_label}
                    </button>
                </div>
            </div>

            <Show when=uploading fallback=|| view! { }>
                <div class="upload-form">
                    <input
                        placeholder="Filename (e.g. file1.txt)"
                        prop:value=filename_value.clone()
                        on:input=on_filename.clone()
                    />
                    <textarea
                        placeholder="Content..."
                        prop:value=content_value.clone()
                        on:input=on_content.clone()
                    ></textarea>
                    <button
                        class="btn btn-primary btn-block"
                        on:click=on_submit.clone()
                        disabled=submit_disabled.clone()
                    >
                        "Submit Write (Quorum)"
                    </button>
                </div>
            </Show>

            <div class="file-list">
                <Show
                    when=move || !files.with(Vec::is_empty)
                    fallback=|| view! { <p class="file-list-empty">{NO_FILES_PLACEHOLDER}</p> }
                >
                    <For
                        each=move || files.get()
                        key=|name| name.clone()
                        children={
                            let console = row_console.clone();
                            move |name: FileName| {
                                let console = console.clone();
                                let label = name.clone();
                                let on_select = move |_: ev::MouseEvent| {
                                    let console = console.clone();
                                    let name = name.clone();
                                    spawn_local(async move {
                                        console.select_file(name).await;
                                    });
                                };
                                view! {
                                    <div class="file-row" on:click=on_select>
                                        <span class="file-icon">"📄"</span>
                                        <span>{label}</span>
                                    </div>
                                }
                            }
                        }
                    />
                </Show>
            </div>
        </div>
    }
}
