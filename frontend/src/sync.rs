//! Periodic refresh of the view state.
//!
//! A [`SyncLoop`] runs *refresh cycles*: three independent reads (status,
//! files, logs) merged into [`ViewState`] in one update. [`SyncLoop::start`]
//! runs one cycle immediately and then one per interval until the returned
//! [`PollHandle`] is stopped or dropped.
//!
//! Cycles are never awaited by the timer, so a slow gateway can leave
//! several in flight at once. Each cycle is stamped when it starts and the
//! view state rejects results older than what it already shows.

use std::cell::Cell;
use std::rc::Rc;

use futures::FutureExt;

use crate::{
    BrowserScheduler, ClusterApi, CycleStamp, PollReport, PollResults, Scheduler, TimerGuard,
    ViewState,
};

struct SyncInner<A> {
    api: Rc<A>,
    view: ViewState,
    scheduler: Rc<dyn Scheduler>,
    last_stamp: Cell<CycleStamp>,
    stopped: Rc<Cell<bool>>,
}

/// Owner of the refresh cycle. Cheap to clone; clones share state.
pub struct SyncLoop<A> {
    inner: Rc<SyncInner<A>>,
}

impl<A> Clone for SyncLoop<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: ClusterApi + 'static> SyncLoop<A> {
    /// Loop driven by the browser's event loop and timers.
    pub fn new(api: Rc<A>, view: ViewState) -> Self {
        Self::with_scheduler(api, view, Rc::new(BrowserScheduler))
    }

    pub fn with_scheduler(api: Rc<A>, view: ViewState, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            inner: Rc::new(SyncInner {
                api,
                view,
                scheduler,
                last_stamp: Cell::new(0),
                stopped: Rc::new(Cell::new(false)),
            }),
        }
    }

    /// Number of cycles started so far (also the latest stamp issued).
    pub fn cycles_started(&self) -> CycleStamp {
        self.inner.last_stamp.get()
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.get()
    }

    /// Run one refresh cycle and merge it into the view state.
    ///
    /// Returns `None` when the loop was stopped before the results landed;
    /// such results are dropped.
    pub async fn run_cycle(&self) -> Option<PollReport> {
        if self.is_stopped() {
            return None;
        }

        let stamp = self.inner.last_stamp.get() + 1;
        self.inner.last_stamp.set(stamp);

        let api = &self.inner.api;
        let (servers, files, logs) =
            futures::join!(api.fetch_status(), api.fetch_files(), api.fetch_logs());

        if self.is_stopped() {
            log::debug!("sync loop stopped, dropping results of cycle {}", stamp);
            return None;
        }

        let results = PollResults {
            stamp,
            servers,
            files,
            logs,
        };
        for (endpoint, err) in results.failures() {
            log::warn!("poll cycle {}: {} fetch failed: {}", stamp, endpoint, err);
        }

        let report = self.inner.view.apply_poll(results);
        if report.any_stale() {
            log::debug!("poll cycle {} superseded: {:?}", stamp, report);
        }
        Some(report)
    }

    /// Run one cycle now, outside the timer cadence.
    ///
    /// The timer's phase is unaffected.
    pub fn trigger_immediate_refresh(&self) {
        let this = self.clone();
        self.inner.scheduler.spawn(
            async move {
                this.run_cycle().await;
            }
            .boxed_local(),
        );
    }

    /// Refresh immediately, then every `interval_ms`.
    pub fn start(&self, interval_ms: u32) -> PollHandle {
        self.inner.stopped.set(false);
        log::info!("sync loop started ({} ms interval)", interval_ms);

        self.trigger_immediate_refresh();
        let this = self.clone();
        let timer = self
            .inner
            .scheduler
            .every(interval_ms, Box::new(move || this.trigger_immediate_refresh()));

        PollHandle {
            timer: Some(timer),
            stopped: Rc::clone(&self.inner.stopped),
        }
    }
}

/// Cancellation handle for a started [`SyncLoop`].
///
/// Stopping (or dropping) cancels the timer and makes cycles still in
/// flight discard their results.
pub struct PollHandle {
    timer: Option<TimerGuard>,
    stopped: Rc<Cell<bool>>,
}

impl PollHandle {
    pub fn stop(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            drop(timer);
            self.stopped.set(true);
            log::info!("sync loop stopped");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
