//! Periodic tick sources that drive the countdown.
//!
//! A tick source only produces `Tick` messages; the engine consumes them on
//! the service loop so every tick body runs to completion before the next.
//! Arming and disarming are idempotent.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error};

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One tick from an armed source.
///
/// The generation identifies which arming produced it, so ticks queued
/// before a disarm can be told apart from ticks of a later arming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// An armable, disarmable periodic tick driver.
pub trait TickSource: Send {
    /// Starts producing ticks. No-op if already armed.
    fn arm(&mut self);

    /// Stops producing ticks. No-op if already disarmed.
    fn disarm(&mut self);

    /// Returns true while ticks are being produced.
    fn is_armed(&self) -> bool;

    /// Returns true if `tick` belongs to the current arming.
    fn accepts(&self, tick: Tick) -> bool;
}

// ============================================================================
// IntervalTicker
// ============================================================================

/// Tick source backed by a spawned `tokio::time::interval` task.
#[derive(Debug)]
pub struct IntervalTicker {
    tx: mpsc::UnboundedSender<Tick>,
    period: Duration,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    /// Creates a disarmed ticker with the default one-second period.
    pub fn new(tx: mpsc::UnboundedSender<Tick>) -> Self {
        Self::with_period(tx, TICK_PERIOD)
    }

    /// Creates a disarmed ticker with a custom period.
    pub fn with_period(tx: mpsc::UnboundedSender<Tick>, period: Duration) -> Self {
        Self {
            tx,
            period,
            generation: 0,
            task: None,
        }
    }

    /// Returns the tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns the generation of the current (or last) arming.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl TickSource for IntervalTicker {
    fn arm(&mut self) {
        if self.is_armed() {
            return;
        }

        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("Cannot arm tick source outside a tokio runtime: {}", e);
                return;
            }
        };

        self.generation += 1;
        let tick = Tick {
            generation: self.generation,
        };
        let tx = self.tx.clone();
        let period = self.period;

        self.task = Some(runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.send(tick).is_err() {
                    break;
                }
            }
        }));
        debug!(generation = self.generation, "tick source armed");
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(generation = self.generation, "tick source disarmed");
        }
    }

    fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn accepts(&self, tick: Tick) -> bool {
        self.task.is_some() && tick.generation == self.generation
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.disarm();
    }
}

// ============================================================================
// ManualTickSource
// ============================================================================

/// Tick source that never fires on its own.
///
/// Clones share their counters, so a test can keep one clone while the
/// engine owns the other and drives ticks by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualTickSource {
    armed: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
    arm_count: Arc<AtomicUsize>,
    disarm_count: Arc<AtomicUsize>,
}

impl ManualTickSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of disarmed-to-armed transitions.
    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.arm_count.load(Ordering::SeqCst)
    }

    /// Number of armed-to-disarmed transitions.
    #[must_use]
    pub fn disarm_count(&self) -> usize {
        self.disarm_count.load(Ordering::SeqCst)
    }

    /// Returns a tick of the current arming.
    #[must_use]
    pub fn current_tick(&self) -> Tick {
        Tick {
            generation: self.generation.load(Ordering::SeqCst),
        }
    }
}

impl TickSource for ManualTickSource {
    fn arm(&mut self) {
        if !self.armed.swap(true, Ordering::SeqCst) {
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.arm_count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn disarm(&mut self) {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.disarm_count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    fn accepts(&self, tick: Tick) -> bool {
        self.is_armed() && tick.generation == self.generation.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Tests
// ============================================================================
