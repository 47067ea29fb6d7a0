//! The console's single view snapshot and its update rules.
//!
//! [`ViewSnapshot`] is plain data. [`ViewState`] wraps it in a reactive
//! signal and owns the ordering bookkeeping:
//!
//! - every poll cycle carries a [`CycleStamp`]; a field accepts a value only
//!   from a cycle newer than the one it was last written from, so a slow
//!   cycle that lands after a faster, later one is discarded;
//! - a failed fetch leaves its field untouched;
//! - point reads carry a [`SelectionTicket`]; the most recently issued
//!   selection that lands wins.

use leptos::*;

use crate::{AppError, AppResult, FileName, LogLine, SelectedFileDetail, ServerRecord};

/// Monotonic sequence number of a poll cycle. Starts at 1.
pub type CycleStamp = u64;

/// Monotonic sequence number of a selection request. Starts at 1.
pub type SelectionTicket = u64;

/// Everything the console renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub servers: Vec<ServerRecord>,
    pub files: Vec<FileName>,
    pub logs: Vec<LogLine>,
    pub selected: Option<SelectedFileDetail>,
}

/// Raw outcome of one poll cycle's three fetches.
#[derive(Clone, Debug)]
pub struct PollResults {
    pub stamp: CycleStamp,
    pub servers: AppResult<Vec<ServerRecord>>,
    pub files: AppResult<Vec<FileName>>,
    pub logs: AppResult<Vec<LogLine>>,
}

impl PollResults {
    /// Fetches that failed in this cycle, labelled by endpoint.
    pub fn failures(&self) -> Vec<(&'static str, &AppError)> {
        let mut failures = Vec::new();
        if let Err(e) = &self.servers {
            failures.push(("status", e));
        }
        if let Err(e) = &self.files {
            failures.push(("files", e));
        }
        if let Err(e) = &self.logs {
            failures.push(("logs", e));
        }
        failures
    }
}

/// What happened to one field when a cycle was merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldOutcome {
    Applied,
    Failed,
    /// A newer cycle already wrote this field.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollReport {
    pub stamp: CycleStamp,
    pub servers: FieldOutcome,
    pub files: FieldOutcome,
    pub logs: FieldOutcome,
}

impl PollReport {
    fn outcomes(&self) -> [FieldOutcome; 3] {
        [self.servers, self.files, self.logs]
    }

    pub fn any_applied(&self) -> bool {
        self.outcomes().contains(&FieldOutcome::Applied)
    }

    pub fn any_stale(&self) -> bool {
        self.outcomes().contains(&FieldOutcome::Stale)
    }
}

/// Stamp of the cycle each field was last written from (0 = never).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldStamps {
    pub servers: CycleStamp,
    pub files: CycleStamp,
    pub logs: CycleStamp,
}

/// Merge a cycle into `snapshot`. `selected` is never touched.
pub fn merge_poll(
    snapshot: &mut ViewSnapshot,
    stamps: &mut FieldStamps,
    results: PollResults,
) -> PollReport {
    let stamp = results.stamp;
    PollReport {
        stamp,
        servers: merge_field(&mut snapshot.servers, &mut stamps.servers, stamp, results.servers),
        files: merge_field(&mut snapshot.files, &mut stamps.files, stamp, results.files),
        logs: merge_field(&mut snapshot.logs, &mut stamps.logs, stamp, results.logs),
    }
}

fn merge_field<T>(
    slot: &mut T,
    slot_stamp: &mut CycleStamp,
    stamp: CycleStamp,
    result: AppResult<T>,
) -> FieldOutcome {
    match result {
        Err(_) => FieldOutcome::Failed,
        Ok(_) if stamp <= *slot_stamp => FieldOutcome::Stale,
        Ok(value) => {
            *slot = value;
            *slot_stamp = stamp;
            FieldOutcome::Applied
        }
    }
}

/// Marker of the most recent cycle that changed the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncMark {
    pub stamp: CycleStamp,
    /// Local wall-clock time, `HH:MM:SS`.
    pub at: String,
}

#[derive(Clone, Copy, Debug, Default)]
struct SelectionCounters {
    issued: SelectionTicket,
    applied: SelectionTicket,
}

/// Reactive store holding the [`ViewSnapshot`].
///
/// Written only by the sync loop ([`ViewState::apply_poll`]) and the file
/// console (selection). Readers subscribe to per-field memos, so a cycle
/// that changes only `files` does not re-render the log viewer.
#[derive(Clone, Copy)]
pub struct ViewState {
    snapshot: RwSignal<ViewSnapshot>,
    stamps: StoredValue<FieldStamps>,
    selection: StoredValue<SelectionCounters>,
    last_sync: RwSignal<Option<SyncMark>>,
    servers: Memo<Vec<ServerRecord>>,
    files: Memo<Vec<FileName>>,
    logs: Memo<Vec<LogLine>>,
    selected: Memo<Option<SelectedFileDetail>>,
}

impl ViewState {
    /// Create an empty store in the current reactive owner.
    pub fn new() -> Self {
        let snapshot = create_rw_signal(ViewSnapshot::default());
        Self {
            snapshot,
            stamps: store_value(FieldStamps::default()),
            selection: store_value(SelectionCounters::default()),
            last_sync: create_rw_signal(None),
            servers: create_memo(move |_| snapshot.with(|s| s.servers.clone())),
            files: create_memo(move |_| snapshot.with(|s| s.files.clone())),
            logs: create_memo(move |_| snapshot.with(|s| s.logs.clone())),
            selected: create_memo(move |_| snapshot.with(|s| s.selected.clone())),
        }
    }

    pub fn servers(&self) -> Memo<Vec<ServerRecord>> {
        self.servers
    }

    pub fn files(&self) -> Memo<Vec<FileName>> {
        self.files
    }

    pub fn logs(&self) -> Memo<Vec<LogLine>> {
        self.logs
    }

    pub fn selected(&self) -> Memo<Option<SelectedFileDetail>> {
        self.selected
    }

    pub fn last_sync(&self) -> RwSignal<Option<SyncMark>> {
        self.last_sync
    }

    /// Current snapshot, without subscribing.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshot.get_untracked()
    }

    /// Merge one poll cycle. Subscribers are notified only if a field
    /// actually changed hands.
    pub fn apply_poll(&self, results: PollResults) -> PollReport {
        let mut next = self.snapshot.get_untracked();
        let mut stamps = self.stamps.get_value();
        let report = merge_poll(&mut next, &mut stamps, results);

        if report.any_applied() {
            self.stamps.set_value(stamps);
            self.snapshot.set(next);
            self.last_sync.set(Some(SyncMark {
                stamp: report.stamp,
                at: chrono::Local::now().format("%H:%M:%S").to_string(),
            }));
        }
        report
    }

    /// Reserve a ticket for a point read that is about to start.
    pub fn next_selection_ticket(&self) -> SelectionTicket {
        self.selection.update_value(|s| s.issued += 1);
        self.selection.with_value(|s| s.issued)
    }

    /// Apply a point read's result unless a later selection already landed.
    pub fn apply_selection(&self, ticket: SelectionTicket, detail: SelectedFileDetail) -> bool {
        if ticket <= self.selection.with_value(|s| s.applied) {
            log::debug!("dropping stale read of {} (ticket {})", detail.filename, ticket);
            return false;
        }
        self.selection.update_value(|s| s.applied = ticket);
        self.snapshot.update(|s| s.selected = Some(detail));
        true
    }

    /// Replace the selection outright. `None` clears the detail pane.
    ///
    /// Supersedes any point read still in flight.
    pub fn set_selected(&self, detail: Option<SelectedFileDetail>) {
        let ticket = self.next_selection_ticket();
        self.selection.update_value(|s| s.applied = ticket);
        self.snapshot.update(|s| s.selected = detail);
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
