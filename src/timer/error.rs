//! Timer service error types.

use thiserror::Error;

/// Errors surfaced by `TimerHandle`.
///
/// Bad settings and illegal transitions are not errors: settings are
/// clamped and illegal commands are ignored by the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The service loop has exited and no longer accepts commands.
    #[error("タイマーサービスは停止しています")]
    ServiceStopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(TimerError::ServiceStopped.to_string().contains("停止"));
    }
}
