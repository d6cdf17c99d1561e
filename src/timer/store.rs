//! Authoritative timer state and its transition rules.
//!
//! The store is purely synchronous and knows nothing about real time.
//! `TimerEngine` decides when each operation runs.

use tracing::debug;

use crate::types::{SettingsUpdate, TimerMode, TimerSettings, TimerState, TimerStatus};

/// Owns the single `TimerState` and funnels every mutation through its operations.
#[derive(Debug, Clone, Default)]
pub struct TimerStore {
    state: TimerState,
}

impl TimerStore {
    /// Creates a store in `Idle` focus mode with the full focus duration loaded.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            state: TimerState::new(settings),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Merges a partial settings update, clamping each field.
    ///
    /// The remaining time is only recomputed while `Idle`; a running or
    /// paused countdown keeps its value.
    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        self.state.settings.apply(update);

        let rounds = self.state.settings.rounds_per_cycle;
        if self.state.current_round > rounds {
            debug!(
                current_round = self.state.current_round,
                rounds, "round count above new cycle length, clamped"
            );
            self.state.current_round = rounds;
        }

        if self.state.status == TimerStatus::Idle {
            self.state.remaining_seconds = self.state.mode_duration_seconds();
        }
    }

    /// Switches to `mode` and loads its duration, leaving the store `Idle`.
    ///
    /// A running countdown is forced to `Paused` before the mode changes.
    /// Returns the status the store held right before it became `Idle`.
    pub fn set_mode(&mut self, mode: TimerMode) -> TimerStatus {
        if self.state.status == TimerStatus::Running {
            self.state.status = TimerStatus::Paused;
        }
        let previous = self.state.status;

        self.state.mode = mode;
        self.state.status = TimerStatus::Idle;
        self.state.remaining_seconds = self.state.mode_duration_seconds();
        previous
    }

    /// Sets the status directly. Returns the previous status.
    pub fn set_status(&mut self, status: TimerStatus) -> TimerStatus {
        std::mem::replace(&mut self.state.status, status)
    }

    /// Returns to `Idle` with the current mode's full duration. The round count is kept.
    pub fn reset_for_current_mode(&mut self) {
        self.state.status = TimerStatus::Idle;
        self.state.remaining_seconds = self.state.mode_duration_seconds();
    }

    /// Takes one second off the countdown, never going below zero.
    ///
    /// Returns false without touching anything unless `Running`.
    pub fn decrement_remaining(&mut self) -> bool {
        if self.state.status != TimerStatus::Running {
            return false;
        }
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        true
    }

    /// Moves to the next phase of the cycle and marks the store `Completed`.
    ///
    /// A finished focus session leads to a long break when the current round
    /// closes the cycle, otherwise to a short break. The round is credited
    /// only when a short break finishes; a long break starts a new cycle.
    pub fn advance_after_completion(&mut self) {
        let state = &mut self.state;
        let rounds = state.settings.rounds_per_cycle;

        match state.mode {
            TimerMode::Focus => {
                state.mode = if state.current_round % rounds == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                };
            }
            TimerMode::ShortBreak => {
                state.mode = TimerMode::Focus;
                // Only reachable past the cycle end when the user picked the
                // short break by hand on the last round.
                state.current_round = (state.current_round + 1).min(rounds);
            }
            TimerMode::LongBreak => {
                state.mode = TimerMode::Focus;
                state.current_round = 1;
            }
        }

        state.status = TimerStatus::Completed;
    }
}

// ============================================================================
// Tests
// ============================================================================
