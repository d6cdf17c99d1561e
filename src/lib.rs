//! Study Timer Library
//!
//! This library provides a Pomodoro-style study timer. It includes:
//! - Timer store with the focus / short break / long break cycling rules
//! - Timer engine driven by an armable one-second tick source
//! - A single-threaded service loop with a cloneable control handle
//! - Completion alert playback
//! - CLI parsing and a line-based console front end

pub mod cli;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{SettingsUpdate, TimerMode, TimerSettings, TimerState, TimerStatus};

pub use timer::{
    CompletionPolicy, ServiceOptions, TimerCommand, TimerEngine, TimerError, TimerEvent,
    TimerHandle, TimerService, TimerStore,
};

pub use sound::{
    try_create_player, AlertPlayer, MockAlertPlayer, RodioAlertPlayer, SilentAlertPlayer,
    SoundError, SoundSource,
};
