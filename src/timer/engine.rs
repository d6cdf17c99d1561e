//! Timer engine for the Study Timer.
//!
//! This module drives the `TimerStore` in real time:
//! - Imperative control surface (start/pause/reset/change mode/update settings)
//! - Arming and disarming the single tick source
//! - Countdown completion: alert, mode cycling, completion event
//! - Acknowledging a completion to continue with the next phase

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::store::TimerStore;
use super::tick::{Tick, TickSource};
use crate::sound::AlertPlayer;
use crate::types::{SettingsUpdate, TimerMode, TimerSettings, TimerState, TimerStatus};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Status moved from one value to another
    StatusChanged {
        from: TimerStatus,
        to: TimerStatus,
    },
    /// A different mode is now loaded
    ModeChanged {
        mode: TimerMode,
    },
    /// Settings were merged (values already clamped)
    SettingsUpdated {
        settings: TimerSettings,
    },
    /// One second elapsed
    Tick {
        remaining_seconds: u32,
    },
    /// A phase finished; waits for `acknowledge_completion`
    Completed {
        /// Mode that just finished
        finished: TimerMode,
        /// Mode loaded for the next phase
        next: TimerMode,
        /// Round count after the cycling rule ran
        current_round: u32,
    },
    /// The completion alert could not be played
    AlertFailed {
        reason: String,
    },
}

// ============================================================================
// CompletionPolicy
// ============================================================================

/// What acknowledging a completed phase does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Start the next phase immediately
    #[default]
    AutoContinue,
    /// Load the next phase and wait in `Idle`
    ReturnToIdle,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Drives the timer store with a tick source and plays the completion alert.
///
/// Every operation is synchronous. Illegal transitions (starting a running
/// timer, pausing an idle one) are ignored.
pub struct TimerEngine {
    store: TimerStore,
    ticker: Box<dyn TickSource>,
    alert: Arc<dyn AlertPlayer>,
    policy: CompletionPolicy,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates an idle engine in focus mode.
    pub fn new(
        settings: TimerSettings,
        ticker: Box<dyn TickSource>,
        alert: Arc<dyn AlertPlayer>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            store: TimerStore::new(settings),
            ticker,
            alert,
            policy: CompletionPolicy::default(),
            event_tx,
        }
    }

    /// Sets the completion policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Returns the current timer state.
    pub fn state(&self) -> &TimerState {
        self.store.state()
    }

    /// Returns the current mode.
    pub fn mode(&self) -> TimerMode {
        self.state().mode
    }

    /// Returns the current status.
    pub fn status(&self) -> TimerStatus {
        self.state().status
    }

    /// Returns the current round within the cycle.
    pub fn current_round(&self) -> u32 {
        self.state().current_round
    }

    /// Returns the clamped settings.
    pub fn settings(&self) -> &TimerSettings {
        &self.state().settings
    }

    /// Returns the completion policy.
    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    /// Returns the remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        self.state().formatted_remaining()
    }

    /// Returns true while the tick source is armed.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Starts or resumes the countdown.
    ///
    /// Ignored while running. A completed phase is continued as if it had
    /// been acknowledged with `AutoContinue`.
    pub fn start(&mut self) {
        match self.status() {
            TimerStatus::Running => debug!("start ignored: timer already running"),
            TimerStatus::Completed => self.continue_next_phase(),
            TimerStatus::Idle | TimerStatus::Paused => {
                self.transition(TimerStatus::Running);
                self.ticker.arm();
            }
        }
    }

    /// Pauses a running countdown. Ignored otherwise.
    pub fn pause(&mut self) {
        if self.status() != TimerStatus::Running {
            debug!(status = %self.status(), "pause ignored: timer not running");
            return;
        }
        self.transition(TimerStatus::Paused);
        self.ticker.disarm();
    }

    /// Stops ticking and reloads the current mode's full duration.
    pub fn reset(&mut self) {
        self.ticker.disarm();
        let previous = self.status();
        self.store.reset_for_current_mode();
        self.emit_status_change(previous, TimerStatus::Idle);
    }

    /// Switches mode. A running countdown is paused before the switch and
    /// the new mode starts `Idle` with its full duration.
    pub fn change_mode(&mut self, mode: TimerMode) {
        let was = self.status();
        self.ticker.disarm();
        let before_idle = self.store.set_mode(mode);

        if was == TimerStatus::Running {
            self.emit_status_change(TimerStatus::Running, TimerStatus::Paused);
        }
        self.emit_status_change(before_idle, TimerStatus::Idle);
        self.emit(TimerEvent::ModeChanged { mode });
    }

    /// Merges a settings update. Ticking is unaffected.
    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        self.store.update_settings(update);
        self.emit(TimerEvent::SettingsUpdated {
            settings: *self.settings(),
        });
    }

    /// Resolves a completed phase according to the completion policy.
    /// Ignored unless `Completed`.
    pub fn acknowledge_completion(&mut self) {
        if self.status() != TimerStatus::Completed {
            debug!(status = %self.status(), "acknowledge ignored: nothing completed");
            return;
        }

        match self.policy {
            CompletionPolicy::AutoContinue => self.continue_next_phase(),
            CompletionPolicy::ReturnToIdle => {
                self.store.reset_for_current_mode();
                self.emit_status_change(TimerStatus::Completed, TimerStatus::Idle);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Ticking
    // ------------------------------------------------------------------------

    /// Handles a tick from the tick source, dropping ticks of an old arming.
    pub fn handle_tick(&mut self, tick: Tick) {
        if !self.ticker.accepts(tick) {
            debug!(generation = tick.generation, "stale tick dropped");
            return;
        }
        self.on_tick();
    }

    /// Advances the countdown by one second. Ignored unless running.
    pub fn on_tick(&mut self) {
        if self.status() != TimerStatus::Running {
            return;
        }

        let remaining = self.state().remaining_seconds;
        self.store.decrement_remaining();
        self.emit(TimerEvent::Tick {
            remaining_seconds: self.state().remaining_seconds,
        });

        if remaining <= 1 {
            self.handle_timer_complete();
        }
    }

    /// Finishes the current phase: alert, cycle to the next mode, notify.
    fn handle_timer_complete(&mut self) {
        self.ticker.disarm();
        self.play_alert();

        let finished = self.mode();
        self.store.advance_after_completion();
        let next = self.mode();
        let current_round = self.current_round();

        info!(
            finished = finished.as_str(),
            next = next.as_str(),
            current_round,
            "phase completed"
        );

        self.emit_status_change(TimerStatus::Running, TimerStatus::Completed);
        self.emit(TimerEvent::ModeChanged { mode: next });
        self.emit(TimerEvent::Completed {
            finished,
            next,
            current_round,
        });
    }

    fn play_alert(&self) {
        if let Err(e) = self.alert.play_alert() {
            warn!("Failed to play completion alert: {}", e);
            self.emit(TimerEvent::AlertFailed {
                reason: e.to_string(),
            });
        }
    }

    /// Loads the next phase's full duration and runs it.
    fn continue_next_phase(&mut self) {
        self.store.reset_for_current_mode();
        self.store.set_status(TimerStatus::Running);
        self.ticker.arm();
        self.emit_status_change(TimerStatus::Completed, TimerStatus::Running);
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn transition(&mut self, to: TimerStatus) {
        let from = self.store.set_status(to);
        self.emit_status_change(from, to);
    }

    fn emit_status_change(&self, from: TimerStatus, to: TimerStatus) {
        if from != to {
            self.emit(TimerEvent::StatusChanged { from, to });
        }
    }

    /// Sends an event. Nobody listening is not an error.
    fn emit(&self, event: TimerEvent) {
        let _ = self.event_tx.send(event);
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", self.state())
            .field("policy", &self.policy)
            .field("ticking", &self.is_ticking())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
