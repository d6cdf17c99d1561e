//! Alert sound error types.
//!
//! None of these errors stop the timer; the engine logs them and moves on.

use thiserror::Error;

/// Errors that can occur while playing the completion alert.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// No audio output device could be opened.
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// The configured sound file does not exist.
    #[error("サウンドファイルが見つかりません: {0}")]
    FileNotFound(String),

    /// The sound file could not be decoded.
    #[error("サウンドファイルのデコードに失敗しました: {0}")]
    DecodeError(String),

    /// The output stream or sink could not be created.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),

    /// Playback could not be started.
    #[error("アラート再生エラー: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if playback should fall back to the built-in tone.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }
}
