//! Alert playback using rodio.
//!
//! The rodio output stream cannot leave the thread that opened it, so it
//! lives on a dedicated audio thread. `RodioAlertPlayer` only sends play
//! requests to that thread and never waits for playback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;
use super::{AlertPlayer, SilentAlertPlayer};

const TONE_FREQUENCY_HZ: f32 = 880.0;
const TONE_DURATION: Duration = Duration::from_millis(400);
const TONE_VOLUME: f32 = 0.25;

/// Alert player backed by a rodio output stream on its own thread.
#[derive(Debug)]
pub struct RodioAlertPlayer {
    requests: Sender<SoundSource>,
    source: SoundSource,
}

impl RodioAlertPlayer {
    /// Opens the default output device and starts the audio thread.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no output device can be
    /// opened, or `SoundError::StreamError` if the thread cannot start.
    pub fn new(source: SoundSource) -> Result<Self, SoundError> {
        let (requests, request_rx) = crossbeam_channel::unbounded();
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);

        thread::Builder::new()
            .name("alert-audio".to_string())
            .spawn(move || audio_thread(request_rx, ready_tx))
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        ready_rx
            .recv()
            .map_err(|_| SoundError::DeviceNotAvailable("audio thread exited".to_string()))??;

        debug!(sound = %source.name(), "Audio output stream initialized");
        Ok(Self { requests, source })
    }

    /// Returns the sound played on each alert.
    pub fn source(&self) -> &SoundSource {
        &self.source
    }
}

impl AlertPlayer for RodioAlertPlayer {
    fn play_alert(&self) -> Result<(), SoundError> {
        self.requests
            .send(self.source.clone())
            .map_err(|_| SoundError::PlaybackError("audio thread has stopped".to_string()))
    }
}

/// Owns the output stream and plays requests until every sender is gone.
fn audio_thread(requests: Receiver<SoundSource>, ready: Sender<Result<(), SoundError>>) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            let _ = ready.send(Err(SoundError::DeviceNotAvailable(e.to_string())));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    for source in requests.iter() {
        if let Err(e) = play_source(&handle, &source) {
            warn!("Failed to play alert '{}': {}", source.name(), e);
        }
    }
    debug!("Audio thread finished");
}

fn play_source(handle: &OutputStreamHandle, source: &SoundSource) -> Result<(), SoundError> {
    let Some(path) = source.path() else {
        return play_tone(handle);
    };

    match play_file(handle, path) {
        Err(e) if e.should_fallback_to_tone() => {
            warn!("{}, falling back to built-in tone", e);
            play_tone(handle)
        }
        other => other,
    }
}

fn play_file(handle: &OutputStreamHandle, path: &Path) -> Result<(), SoundError> {
    let file = File::open(path)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    let decoder =
        Decoder::new(BufReader::new(file)).map_err(|e| SoundError::DecodeError(e.to_string()))?;

    let sink = Sink::try_new(handle).map_err(|e| SoundError::StreamError(e.to_string()))?;
    sink.append(decoder);
    sink.detach();
    Ok(())
}

fn play_tone(handle: &OutputStreamHandle) -> Result<(), SoundError> {
    let tone = SineWave::new(TONE_FREQUENCY_HZ)
        .take_duration(TONE_DURATION)
        .amplify(TONE_VOLUME);

    let sink = Sink::try_new(handle).map_err(|e| SoundError::StreamError(e.to_string()))?;
    sink.append(tone);
    sink.detach();
    Ok(())
}

/// Creates the alert player for the app.
///
/// Falls back to a silent player when sound is disabled or no audio device
/// is available, so the timer always has an alert collaborator.
#[must_use]
pub fn try_create_player(source: Option<SoundSource>, disabled: bool) -> Arc<dyn AlertPlayer> {
    if disabled {
        debug!("Sound disabled, using silent alert player");
        return Arc::new(SilentAlertPlayer);
    }

    let source = source.unwrap_or_else(super::get_default_sound);
    match RodioAlertPlayer::new(source) {
        Ok(player) => Arc::new(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            Arc::new(SilentAlertPlayer)
        }
    }
}
