//! Task spawning and periodic timers for the sync loop.
//!
//! The browser implementation uses `wasm-bindgen-futures` and
//! `gloo-timers`; tests substitute a manually driven one.

use std::any::Any;

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Interval;

/// Keeps a periodic timer alive. Dropping it cancels the timer.
pub type TimerGuard = Box<dyn Any>;

pub trait Scheduler {
    /// Run `task` on the current thread without blocking the caller.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Call `tick` every `interval_ms` until the guard is dropped.
    fn every(&self, interval_ms: u32, tick: Box<dyn Fn()>) -> TimerGuard;
}

/// [`Scheduler`] on the browser event loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn every(&self, interval_ms: u32, tick: Box<dyn Fn()>) -> TimerGuard {
        Box::new(Interval::new(interval_ms, move || tick()))
    }
}
