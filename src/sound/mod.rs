//! Completion alert for the Study Timer.
//!
//! The timer engine only needs one capability from this module: play an
//! alert and return immediately. Playback is best-effort; a failure never
//! reaches the timer state machine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   AlertPlayer    │ ← what the engine sees
//! └────────┬─────────┘
//!          │ play request
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ alert-audio      │────▶│ sound file       │
//! │ thread (rodio)   │     ├──────────────────┤
//! │                  │────▶│ built-in tone    │
//! └──────────────────┘     └──────────────────┘
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub use error::SoundError;
pub use player::{try_create_player, RodioAlertPlayer};
pub use source::{discover_system_sounds, find_system_sound, get_default_sound, SoundSource};

/// Plays the completion alert.
pub trait AlertPlayer: Send + Sync {
    /// Starts the alert without waiting for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started.
    fn play_alert(&self) -> Result<(), SoundError>;
}

/// Alert player that does nothing. Used when sound is off or unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAlertPlayer;

impl AlertPlayer for SilentAlertPlayer {
    fn play_alert(&self) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Mock alert player for testing.
#[derive(Debug, Default)]
pub struct MockAlertPlayer {
    play_count: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockAlertPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `play_alert` calls fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of `play_alert` calls, failed ones included.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_count.load(Ordering::SeqCst)
    }
}

impl AlertPlayer for MockAlertPlayer {
    fn play_alert(&self) -> Result<(), SoundError> {
        self.play_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        Ok(())
    }
}
