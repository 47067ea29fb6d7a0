//! Test doubles shared by the console's unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::{
    AppError, AppResult, ClusterApi, FileName, LogLine, Notifier, ReadSource, Scheduler,
    SelectedFileDetail, ServerRecord, TimerGuard,
};

/// Run `f` inside a fresh reactive runtime.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let out = f();
    runtime.dispose();
    out
}

pub fn node(name: &str) -> ServerRecord {
    ServerRecord {
        name: name.to_string(),
        host: "10.0.0.1".to_string(),
        port: 9000,
    }
}

pub fn detail(filename: &str, content: &str) -> SelectedFileDetail {
    SelectedFileDetail {
        filename: filename.to_string(),
        content: content.to_string(),
        source: ReadSource(ReadSource::CACHE_HIT.to_string()),
    }
}

/// A scripted reply: either ready now or released later by the test.
pub enum Reply<T> {
    Ready(AppResult<T>),
    Gated(oneshot::Receiver<AppResult<T>>),
}

impl<T> Reply<T> {
    /// A reply plus the sender that releases it.
    pub fn gated() -> (Self, oneshot::Sender<AppResult<T>>) {
        let (tx, rx) = oneshot::channel();
        (Reply::Gated(rx), tx)
    }

    async fn resolve(self) -> AppResult<T> {
        match self {
            Reply::Ready(result) => result,
            Reply::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(AppError::Network("reply dropped".into()))),
        }
    }
}

struct Script<T> {
    replies: RefCell<VecDeque<Reply<T>>>,
    fallback: RefCell<Option<AppResult<T>>>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            replies: RefCell::new(VecDeque::new()),
            fallback: RefCell::new(None),
        }
    }

    fn next(&self) -> Reply<T> {
        if let Some(reply) = self.replies.borrow_mut().pop_front() {
            return reply;
        }
        let fallback = self
            .fallback
            .borrow()
            .clone()
            .unwrap_or_else(|| Err(AppError::Network("no scripted reply".into())));
        Reply::Ready(fallback)
    }
}

/// In-memory [`ClusterApi`] whose replies are queued per endpoint.
///
/// When a queue is empty the endpoint answers with its fallback
/// (set with the `always_*` methods) or a network error.
pub struct ScriptedApi {
    status: Script<Vec<ServerRecord>>,
    files: Script<Vec<FileName>>,
    logs: Script<Vec<LogLine>>,
    reads: Script<SelectedFileDetail>,
    writes: Script<()>,
    pub status_calls: Cell<usize>,
    pub read_calls: RefCell<Vec<String>>,
    pub write_calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            status: Script::new(),
            files: Script::new(),
            logs: Script::new(),
            reads: Script::new(),
            writes: Script::new(),
            status_calls: Cell::new(0),
            read_calls: RefCell::new(Vec::new()),
            write_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn push_status(&self, reply: Reply<Vec<ServerRecord>>) {
        self.status.replies.borrow_mut().push_back(reply);
    }

    pub fn push_files(&self, reply: Reply<Vec<FileName>>) {
        self.files.replies.borrow_mut().push_back(reply);
    }

    pub fn push_logs(&self, reply: Reply<Vec<LogLine>>) {
        self.logs.replies.borrow_mut().push_back(reply);
    }

    pub fn push_read(&self, reply: Reply<SelectedFileDetail>) {
        self.reads.replies.borrow_mut().push_back(reply);
    }

    pub fn push_write(&self, reply: Reply<()>) {
        self.writes.replies.borrow_mut().push_back(reply);
    }

    /// Answer every poll with the same three payloads.
    pub fn always_poll(&self, servers: Vec<ServerRecord>, files: Vec<FileName>, logs: Vec<LogLine>) {
        *self.status.fallback.borrow_mut() = Some(Ok(servers));
        *self.files.fallback.borrow_mut() = Some(Ok(files));
        *self.logs.fallback.borrow_mut() = Some(Ok(logs));
    }
}

impl ClusterApi for ScriptedApi {
    async fn fetch_status(&self) -> AppResult<Vec<ServerRecord>> {
        self.status_calls.set(self.status_calls.get() + 1);
        self.status.next().resolve().await
    }

    async fn fetch_files(&self) -> AppResult<Vec<FileName>> {
        self.files.next().resolve().await
    }

    async fn fetch_logs(&self) -> AppResult<Vec<LogLine>> {
        self.logs.next().resolve().await
    }

    async fn read_file(&self, filename: &str) -> AppResult<SelectedFileDetail> {
        self.read_calls.borrow_mut().push(filename.to_string());
        self.reads.next().resolve().await
    }

    async fn write_file(&self, filename: &str, content: &str) -> AppResult<()> {
        self.write_calls
            .borrow_mut()
            .push((filename.to_string(), content.to_string()));
        self.writes.next().resolve().await
    }
}

/// [`Notifier`] that records every alert.
#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

type TickSlot = Rc<RefCell<Option<Box<dyn Fn()>>>>;

/// [`Scheduler`] driven by the test: spawned tasks run on a [`LocalPool`]
/// and the periodic timer fires only when [`ManualScheduler::fire`] is called.
pub struct ManualScheduler {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    tick: TickSlot,
    interval_ms: Cell<Option<u32>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Rc::new(Self {
            pool: RefCell::new(pool),
            spawner,
            tick: Rc::new(RefCell::new(None)),
            interval_ms: Cell::new(None),
        })
    }

    /// Poll every spawned task until none can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Fire the timer once. Returns false when no timer is armed.
    pub fn fire(&self) -> bool {
        match self.tick.borrow().as_ref() {
            Some(tick) => {
                tick();
                true
            }
            None => false,
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.tick.borrow().is_some()
    }

    /// Interval requested by the last `every` call.
    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms.get()
    }
}

struct TickGuard(TickSlot);

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.0.borrow_mut().take();
    }
}

impl Scheduler for ManualScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).expect("local pool is alive");
    }

    fn every(&self, interval_ms: u32, tick: Box<dyn Fn()>) -> TimerGuard {
        self.interval_ms.set(Some(interval_ms));
        *self.tick.borrow_mut() = Some(tick);
        Box::new(TickGuard(Rc::clone(&self.tick)))
    }
}
