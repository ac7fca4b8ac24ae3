//! Fixed-period tick driver.
//!
//! One tokio task owns the interval timer and calls the registered callback. The
//! lifecycle state lives in an atomic shared with that task; a gate mutex is held for
//! the whole callback so that `stop()` can wait out a tick already in flight.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::error::SchedulerError;

/// Returned by the tick callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    /// Keep ticking.
    Continue,
    /// Stop the scheduler permanently after this tick.
    Halt,
}

/// Lifecycle phase of a [`TickScheduler`].
///
/// `Idle -> Running <-> Paused`, any phase `-> Stopped`. `Stopped` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SchedulerPhase {
    Idle = 0,
    Running = 1,
    Paused = 2,
    Stopped = 3,
}

impl SchedulerPhase {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => SchedulerPhase::Idle,
            1 => SchedulerPhase::Running,
            2 => SchedulerPhase::Paused,
            _ => SchedulerPhase::Stopped,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerPhase::Idle => "idle",
            SchedulerPhase::Running => "running",
            SchedulerPhase::Paused => "paused",
            SchedulerPhase::Stopped => "stopped",
        }
    }
}

type TickCallback = Box<dyn Fn() -> TickFlow + Send + Sync>;

thread_local! {
    /// Address of the `Shared` whose callback is running on this thread, or 0.
    static IN_TICK: Cell<usize> = const { Cell::new(0) };
}

struct InTickGuard {
    prev: usize,
}

impl InTickGuard {
    fn enter(shared: &Shared) -> Self {
        let prev = IN_TICK.with(|c| c.replace(shared as *const Shared as usize));
        Self { prev }
    }
}

impl Drop for InTickGuard {
    fn drop(&mut self) {
        IN_TICK.with(|c| c.set(self.prev));
    }
}

struct Shared {
    interval: Duration,
    phase: AtomicU8,
    /// Held while the callback runs.
    gate: Mutex<()>,
    wake: Notify,
    ticks: AtomicU64,
    callback: TickCallback,
}

impl Shared {
    fn phase(&self) -> SchedulerPhase {
        SchedulerPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    fn transition(&self, from: SchedulerPhase, to: SchedulerPhase) -> bool {
        self.phase
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn in_tick(&self) -> bool {
        IN_TICK.with(|c| c.get() == self as *const Shared as usize)
    }

    fn stop(&self) -> bool {
        let prev = SchedulerPhase::from_u8(
            self.phase
                .swap(SchedulerPhase::Stopped as u8, Ordering::AcqRel),
        );
        if prev == SchedulerPhase::Stopped {
            return false;
        }
        self.wake.notify_one();

        // Wait for a callback that passed its phase check before the swap. A callback
        // stopping its own scheduler is that callback; it must not wait for itself.
        if !self.in_tick() {
            drop(self.gate.lock().unwrap_or_else(PoisonError::into_inner));
        }
        debug!(from = prev.as_str(), "tick scheduler stopped");
        true
    }

    /// Run one tick if still running. Returns false once the loop should exit.
    fn fire(&self) -> bool {
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        match self.phase() {
            SchedulerPhase::Running => {}
            SchedulerPhase::Stopped => return false,
            _ => return true,
        }

        let flow = {
            let _in_tick = InTickGuard::enter(self);
            (self.callback)()
        };
        let n = self.ticks.fetch_add(1, Ordering::AcqRel) + 1;
        trace!(tick = n, "tick delivered");

        if flow == TickFlow::Halt {
            self.phase
                .store(SchedulerPhase::Stopped as u8, Ordering::Release);
            debug!(tick = n, "tick callback halted the scheduler");
            return false;
        }
        self.phase() != SchedulerPhase::Stopped
    }
}

async fn run(shared: Arc<Shared>) {
    let period = shared.interval;
    let mut ticker = time::interval_at(Instant::now() + period, period);
    // A callback that overruns a period swallows the missed ticks instead of
    // triggering a burst.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        match shared.phase() {
            SchedulerPhase::Stopped => break,
            SchedulerPhase::Running => {
                tokio::select! {
                    _ = ticker.tick() => {
                        if !shared.fire() {
                            break;
                        }
                    }
                    _ = shared.wake.notified() => {}
                }
            }
            SchedulerPhase::Idle | SchedulerPhase::Paused => {
                shared.wake.notified().await;
                if shared.phase() == SchedulerPhase::Running {
                    // Phase continuity is not kept across a pause.
                    ticker.reset();
                }
            }
        }
    }
    trace!("tick task exited");
}

enum Driver {
    Owned(Runtime),
    Borrowed(Handle),
}

impl Driver {
    fn handle(&self) -> &Handle {
        match self {
            Driver::Owned(rt) => rt.handle(),
            Driver::Borrowed(handle) => handle,
        }
    }
}

/// Drives a single callback at a fixed period.
///
/// Lifecycle calls are idempotent: redundant calls are no-ops and never fail.
/// Once stopped, a scheduler never ticks again; build a new one for a new session.
pub struct TickScheduler {
    shared: Arc<Shared>,
    driver: Option<Driver>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("interval", &self.shared.interval)
            .field("phase", &self.phase())
            .field("ticks", &self.ticks())
            .finish()
    }
}

impl TickScheduler {
    /// Create a scheduler with its own single-worker tokio runtime.
    pub fn new<F>(interval: Duration, callback: F) -> Result<Self, SchedulerError>
    where
        F: Fn() -> TickFlow + Send + Sync + 'static,
    {
        Self::check_interval(interval)?;
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("snake-tick")
            .enable_time()
            .build()
            .map_err(SchedulerError::Runtime)?;
        Ok(Self::with_driver(Driver::Owned(rt), interval, Box::new(callback)))
    }

    /// Create a scheduler that spawns its timer task on an existing runtime.
    pub fn on_handle<F>(
        handle: Handle,
        interval: Duration,
        callback: F,
    ) -> Result<Self, SchedulerError>
    where
        F: Fn() -> TickFlow + Send + Sync + 'static,
    {
        Self::check_interval(interval)?;
        Ok(Self::with_driver(
            Driver::Borrowed(handle),
            interval,
            Box::new(callback),
        ))
    }

    fn check_interval(interval: Duration) -> Result<(), SchedulerError> {
        if interval.is_zero() {
            return Err(SchedulerError::ZeroInterval);
        }
        Ok(())
    }

    fn with_driver(driver: Driver, interval: Duration, callback: TickCallback) -> Self {
        Self {
            shared: Arc::new(Shared {
                interval,
                phase: AtomicU8::new(SchedulerPhase::Idle as u8),
                gate: Mutex::new(()),
                wake: Notify::new(),
                ticks: AtomicU64::new(0),
                callback,
            }),
            driver: Some(driver),
            task: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.shared.phase()
    }

    /// Number of callbacks delivered so far.
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::Acquire)
    }

    /// Lifecycle controls usable from anywhere, including inside the callback.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Begin ticking. No-op if already started; rejected after `stop()`.
    pub fn start(&self) -> bool {
        if !self
            .shared
            .transition(SchedulerPhase::Idle, SchedulerPhase::Running)
        {
            match self.phase() {
                SchedulerPhase::Stopped => warn!("start() after stop() ignored"),
                phase => debug!(phase = phase.as_str(), "start() ignored"),
            }
            return false;
        }

        let Some(driver) = self.driver.as_ref() else {
            return false;
        };
        let join = driver.handle().spawn(run(Arc::clone(&self.shared)));
        *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(join);
        debug!(interval_ms = self.shared.interval.as_millis() as u64, "tick scheduler started");
        true
    }

    pub fn pause(&self) -> bool {
        self.handle().pause()
    }

    pub fn resume(&self) -> bool {
        self.handle().resume()
    }

    /// Stop permanently.
    ///
    /// When called outside the callback, no callback is running once this returns and
    /// none will start afterwards.
    pub fn stop(&self) -> bool {
        let stopped = self.shared.stop();
        if let Some(join) = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            join.abort();
        }
        stopped
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
        if let Some(Driver::Owned(rt)) = self.driver.take() {
            // Dropping a runtime blocks; this keeps drop legal inside async contexts.
            rt.shutdown_background();
        }
    }
}

/// Cloneable lifecycle controls for a [`TickScheduler`].
///
/// Cannot start a scheduler; only the owner can.
#[derive(Clone)]
pub struct SchedulerHandle {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("phase", &self.phase())
            .finish()
    }
}

impl SchedulerHandle {
    pub fn phase(&self) -> SchedulerPhase {
        self.shared.phase()
    }

    /// Suspend ticking. Only a running scheduler pauses.
    pub fn pause(&self) -> bool {
        if !self
            .shared
            .transition(SchedulerPhase::Running, SchedulerPhase::Paused)
        {
            debug!(phase = self.phase().as_str(), "pause() ignored");
            return false;
        }
        self.shared.wake.notify_one();
        debug!("tick scheduler paused");
        true
    }

    /// Continue ticking. Only a paused scheduler resumes.
    pub fn resume(&self) -> bool {
        if !self
            .shared
            .transition(SchedulerPhase::Paused, SchedulerPhase::Running)
        {
            debug!(phase = self.phase().as_str(), "resume() ignored");
            return false;
        }
        self.shared.wake.notify_one();
        debug!("tick scheduler resumed");
        true
    }

    /// See [`TickScheduler::stop`].
    pub fn stop(&self) -> bool {
        self.shared.stop()
    }
}
