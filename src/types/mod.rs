//! Core data types for the Study Timer.
//!
//! This module defines the data structures used for:
//! - Timer settings with range clamping
//! - Timer mode and status enums
//! - The single timer state snapshot observed by presentation layers

use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Setting bounds
// ============================================================================

/// Lower bound for every duration setting, in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Upper bound for the focus and long break durations, in minutes.
pub const MAX_MINUTES: u32 = 60;
/// Upper bound for the short break duration, in minutes.
pub const MAX_SHORT_BREAK_MINUTES: u32 = 30;
/// Lower bound for rounds per cycle.
pub const MIN_ROUNDS: u32 = 1;
/// Upper bound for rounds per cycle.
pub const MAX_ROUNDS: u32 = 10;

// ============================================================================
// TimerMode
// ============================================================================

/// Which phase of the study cycle the countdown belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// A focused study session
    Focus,
    /// A short break after a focus session
    ShortBreak,
    /// A long break closing a cycle
    LongBreak,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Focus => "focus",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        }
    }

    /// Returns the user-facing label of the mode.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Focus => "集中",
            TimerMode::ShortBreak => "短い休憩",
            TimerMode::LongBreak => "長い休憩",
        }
    }

    /// Returns the configured duration of this mode in minutes.
    pub fn duration_minutes(&self, settings: &TimerSettings) -> u32 {
        match self {
            TimerMode::Focus => settings.focus_minutes,
            TimerMode::ShortBreak => settings.short_break_minutes,
            TimerMode::LongBreak => settings.long_break_minutes,
        }
    }

    /// Returns the configured duration of this mode in seconds.
    pub fn duration_seconds(&self, settings: &TimerSettings) -> u32 {
        self.duration_minutes(settings) * 60
    }

    /// Message shown when a phase of this mode has just finished.
    pub fn completion_message(&self) -> &'static str {
        match self {
            TimerMode::Focus => "集中セッションが完了しました！休憩しましょう。",
            TimerMode::ShortBreak | TimerMode::LongBreak => {
                "休憩時間が終わりました！集中を再開しますか？"
            }
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Focus
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Whether the countdown is ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Not started; remaining time follows the settings
    Idle,
    /// Counting down
    Running,
    /// Countdown suspended mid-phase
    Paused,
    /// A phase just finished and waits for acknowledgement
    Completed,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
        }
    }

    /// Returns the user-facing label of the status.
    pub fn label(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "待機中",
            TimerStatus::Running => "実行中",
            TimerStatus::Paused => "一時停止中",
            TimerStatus::Completed => "完了",
        }
    }
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

/// Durations and cycle length of the study timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Focus duration in minutes (1-60)
    pub focus_minutes: u32,
    /// Short break duration in minutes (1-30)
    pub short_break_minutes: u32,
    /// Long break duration in minutes (1-60)
    pub long_break_minutes: u32,
    /// Focus sessions before a long break (1-10)
    pub rounds_per_cycle: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            rounds_per_cycle: 4,
        }
    }
}

impl TimerSettings {
    /// Returns a copy with every field clamped into its valid range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            focus_minutes: clamp_field(
                "focus_minutes",
                self.focus_minutes,
                MIN_MINUTES,
                MAX_MINUTES,
            ),
            short_break_minutes: clamp_field(
                "short_break_minutes",
                self.short_break_minutes,
                MIN_MINUTES,
                MAX_SHORT_BREAK_MINUTES,
            ),
            long_break_minutes: clamp_field(
                "long_break_minutes",
                self.long_break_minutes,
                MIN_MINUTES,
                MAX_MINUTES,
            ),
            rounds_per_cycle: clamp_field(
                "rounds_per_cycle",
                self.rounds_per_cycle,
                MIN_ROUNDS,
                MAX_ROUNDS,
            ),
        }
    }

    /// Merges a partial update into these settings, clamping each field.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(v) = update.focus_minutes {
            self.focus_minutes = v;
        }
        if let Some(v) = update.short_break_minutes {
            self.short_break_minutes = v;
        }
        if let Some(v) = update.long_break_minutes {
            self.long_break_minutes = v;
        }
        if let Some(v) = update.rounds_per_cycle {
            self.rounds_per_cycle = v;
        }
        *self = self.clamped();
    }
}

fn clamp_field(name: &str, value: u32, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        debug!(field = name, value, clamped, "setting out of range, clamped");
    }
    clamped
}

// ============================================================================
// SettingsUpdate
// ============================================================================

/// A partial settings change. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_break_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_break_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds_per_cycle: Option<u32>,
}

impl SettingsUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the focus duration.
    pub fn with_focus_minutes(mut self, minutes: u32) -> Self {
        self.focus_minutes = Some(minutes);
        self
    }

    /// Sets the short break duration.
    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_minutes = Some(minutes);
        self
    }

    /// Sets the long break duration.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = Some(minutes);
        self
    }

    /// Sets the number of rounds per cycle.
    pub fn with_rounds_per_cycle(mut self, rounds: u32) -> Self {
        self.rounds_per_cycle = Some(rounds);
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.focus_minutes.is_none()
            && self.short_break_minutes.is_none()
            && self.long_break_minutes.is_none()
            && self.rounds_per_cycle.is_none()
    }
}

impl From<TimerSettings> for SettingsUpdate {
    fn from(settings: TimerSettings) -> Self {
        Self {
            focus_minutes: Some(settings.focus_minutes),
            short_break_minutes: Some(settings.short_break_minutes),
            long_break_minutes: Some(settings.long_break_minutes),
            rounds_per_cycle: Some(settings.rounds_per_cycle),
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The single process-wide timer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Durations and cycle length
    pub settings: TimerSettings,
    /// Current phase
    pub mode: TimerMode,
    /// Whether the countdown is ticking
    pub status: TimerStatus,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Focus sessions credited in the current cycle (1-based)
    pub current_round: u32,
}

impl TimerState {
    /// Creates an idle state in focus mode with the full focus duration loaded.
    pub fn new(settings: TimerSettings) -> Self {
        let settings = settings.clamped();
        Self {
            remaining_seconds: TimerMode::Focus.duration_seconds(&settings),
            settings,
            mode: TimerMode::Focus,
            status: TimerStatus::Idle,
            current_round: 1,
        }
    }

    /// Returns the configured duration of the current mode in seconds.
    pub fn mode_duration_seconds(&self) -> u32 {
        self.mode.duration_seconds(&self.settings)
    }

    /// Returns the remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        format_time(self.remaining_seconds)
    }

    /// Returns true if the countdown is ticking.
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // TimerMode Tests
    // ------------------------------------------------------------------------

    mod timer_mode_tests {
        use super::*;

        #[test]
        fn test_default_is_focus() {
            assert_eq!(TimerMode::default(), TimerMode::Focus);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(TimerMode::Focus.as_str(), "focus");
            assert_eq!(TimerMode::ShortBreak.as_str(), "short_break");
            assert_eq!(TimerMode::LongBreak.as_str(), "long_break");
        }

        #[test]
        fn test_duration_follows_settings() {
            let settings = TimerSettings {
                focus_minutes: 30,
                short_break_minutes: 7,
                long_break_minutes: 20,
                rounds_per_cycle: 3,
            };
            assert_eq!(TimerMode::Focus.duration_seconds(&settings), 1800);
            assert_eq!(TimerMode::ShortBreak.duration_seconds(&settings), 420);
            assert_eq!(TimerMode::LongBreak.duration_seconds(&settings), 1200);
        }

        #[test]
        fn test_completion_message_differs_for_breaks() {
            assert_ne!(
                TimerMode::Focus.completion_message(),
                TimerMode::ShortBreak.completion_message()
            );
            assert_eq!(
                TimerMode::ShortBreak.completion_message(),
                TimerMode::LongBreak.completion_message()
            );
        }

        #[test]
        fn test_serialize_deserialize() {
            let json = serde_json::to_string(&TimerMode::ShortBreak).unwrap();
            assert_eq!(json, "\"short_break\"");

            let mode: TimerMode = serde_json::from_str("\"long_break\"").unwrap();
            assert_eq!(mode, TimerMode::LongBreak);
        }
    }

    // ------------------------------------------------------------------------
    // TimerStatus Tests
    // ------------------------------------------------------------------------

    mod timer_status_tests {
        use super::*;

        #[test]
        fn test_default_is_idle() {
            assert_eq!(TimerStatus::default(), TimerStatus::Idle);
        }

        #[test]
        fn test_display_matches_as_str() {
            for status in [
                TimerStatus::Idle,
                TimerStatus::Running,
                TimerStatus::Paused,
                TimerStatus::Completed,
            ] {
                assert_eq!(status.to_string(), status.as_str());
            }
        }
    }

    // ------------------------------------------------------------------------
    // TimerSettings Tests
    // ------------------------------------------------------------------------

    mod timer_settings_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let settings = TimerSettings::default();
            assert_eq!(settings.focus_minutes, 25);
            assert_eq!(settings.short_break_minutes, 5);
            assert_eq!(settings.long_break_minutes, 15);
            assert_eq!(settings.rounds_per_cycle, 4);
        }

        #[test]
        fn test_clamped_lower_bounds() {
            let settings = TimerSettings {
                focus_minutes: 0,
                short_break_minutes: 0,
                long_break_minutes: 0,
                rounds_per_cycle: 0,
            }
            .clamped();
            assert_eq!(settings.focus_minutes, 1);
            assert_eq!(settings.short_break_minutes, 1);
            assert_eq!(settings.long_break_minutes, 1);
            assert_eq!(settings.rounds_per_cycle, 1);
        }

        #[test]
        fn test_clamped_upper_bounds() {
            let settings = TimerSettings {
                focus_minutes: 90,
                short_break_minutes: 45,
                long_break_minutes: 61,
                rounds_per_cycle: 11,
            }
            .clamped();
            assert_eq!(settings.focus_minutes, 60);
            assert_eq!(settings.short_break_minutes, 30);
            assert_eq!(settings.long_break_minutes, 60);
            assert_eq!(settings.rounds_per_cycle, 10);
        }

        #[test]
        fn test_apply_merges_only_present_fields() {
            let mut settings = TimerSettings::default();
            settings.apply(&SettingsUpdate::new().with_short_break_minutes(10));

            assert_eq!(settings.focus_minutes, 25);
            assert_eq!(settings.short_break_minutes, 10);
            assert_eq!(settings.long_break_minutes, 15);
            assert_eq!(settings.rounds_per_cycle, 4);
        }

        #[test]
        fn test_apply_clamps_each_field_independently() {
            let mut settings = TimerSettings::default();
            settings.apply(
                &SettingsUpdate::new()
                    .with_focus_minutes(100)
                    .with_short_break_minutes(3)
                    .with_rounds_per_cycle(0),
            );

            assert_eq!(settings.focus_minutes, 60);
            assert_eq!(settings.short_break_minutes, 3);
            assert_eq!(settings.rounds_per_cycle, 1);
        }

        #[test]
        fn test_update_from_settings_sets_all_fields() {
            let update = SettingsUpdate::from(TimerSettings::default());
            assert!(!update.is_empty());
            assert_eq!(update.rounds_per_cycle, Some(4));
            assert!(SettingsUpdate::new().is_empty());
        }

        #[test]
        fn test_update_deserializes_partial_json() {
            let update: SettingsUpdate = serde_json::from_str(r#"{"focus_minutes":40}"#).unwrap();
            assert_eq!(update, SettingsUpdate::new().with_focus_minutes(40));
        }
    }

    // ------------------------------------------------------------------------
    // TimerState Tests
    // ------------------------------------------------------------------------

    mod timer_state_tests {
        use super::*;

        #[test]
        fn test_new_state() {
            let state = TimerState::default();
            assert_eq!(state.mode, TimerMode::Focus);
            assert_eq!(state.status, TimerStatus::Idle);
            assert_eq!(state.remaining_seconds, 25 * 60);
            assert_eq!(state.current_round, 1);
            assert!(!state.is_running());
        }

        #[test]
        fn test_new_state_clamps_settings() {
            let state = TimerState::new(TimerSettings {
                focus_minutes: 0,
                ..TimerSettings::default()
            });
            assert_eq!(state.settings.focus_minutes, 1);
            assert_eq!(state.remaining_seconds, 60);
        }

        #[test]
        fn test_formatted_remaining() {
            let mut state = TimerState::default();
            assert_eq!(state.formatted_remaining(), "25:00");

            state.remaining_seconds = 65;
            assert_eq!(state.formatted_remaining(), "01:05");
        }

        #[test]
        fn test_format_time_bounds() {
            assert_eq!(format_time(0), "00:00");
            assert_eq!(format_time(9), "00:09");
            assert_eq!(format_time(3600), "60:00");
        }

        #[test]
        fn test_state_serializes_to_json() {
            let json = serde_json::to_value(TimerState::default()).unwrap();
            assert_eq!(json["mode"], "focus");
            assert_eq!(json["status"], "idle");
            assert_eq!(json["remaining_seconds"], 1500);
            assert_eq!(json["current_round"], 1);
            assert_eq!(json["settings"]["rounds_per_cycle"], 4);
        }
    }
}
