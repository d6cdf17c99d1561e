//! Interactive console front end.
//!
//! Reads one command per line and forwards it to the timer service. Events
//! from the engine are printed by a separate renderer task. No timing logic
//! lives here.

use std::str::FromStr;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use super::display::Display;
use crate::timer::{TimerCommand, TimerError, TimerEvent, TimerHandle};
use crate::types::{SettingsUpdate, TimerMode};

// ============================================================================
// ConsoleCommand
// ============================================================================

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Forward to the timer service
    Timer(TimerCommand),
    /// Print the current state
    Status,
    /// Print the current state as JSON
    Json,
    /// Print the command list
    Help,
    /// Leave the console
    Quit,
}

/// Errors from parsing a console line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("不明なコマンドです: {0}（help で一覧を表示）")]
    Unknown(String),

    #[error("引数が不足しています: {0}")]
    MissingArgument(&'static str),

    #[error("不明なモードです: {0}（focus / short / long）")]
    UnknownMode(String),

    #[error("不明な設定項目です: {0}（focus / short / long / rounds）")]
    UnknownSetting(String),

    #[error("数値を指定してください: {0}")]
    InvalidNumber(String),
}

impl FromStr for ConsoleCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_lowercase();

        let parsed = match command.as_str() {
            "start" | "resume" => Self::Timer(TimerCommand::Start),
            "pause" => Self::Timer(TimerCommand::Pause),
            "reset" => Self::Timer(TimerCommand::Reset),
            "ok" | "continue" => Self::Timer(TimerCommand::AcknowledgeCompletion),
            "mode" => {
                let mode = words.next().ok_or(CommandParseError::MissingArgument("mode"))?;
                Self::Timer(TimerCommand::ChangeMode(parse_mode(mode)?))
            }
            "set" => {
                let field = words.next().ok_or(CommandParseError::MissingArgument("設定項目"))?;
                let value = words.next().ok_or(CommandParseError::MissingArgument("値"))?;
                Self::Timer(TimerCommand::UpdateSettings(parse_setting(field, value)?))
            }
            "status" => Self::Status,
            "json" => Self::Json,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(CommandParseError::Unknown(line.trim().to_string())),
        };
        Ok(parsed)
    }
}

fn parse_mode(value: &str) -> Result<TimerMode, CommandParseError> {
    match value.to_lowercase().as_str() {
        "focus" | "f" => Ok(TimerMode::Focus),
        "short" | "short_break" | "s" => Ok(TimerMode::ShortBreak),
        "long" | "long_break" | "l" => Ok(TimerMode::LongBreak),
        _ => Err(CommandParseError::UnknownMode(value.to_string())),
    }
}

fn parse_setting(field: &str, value: &str) -> Result<SettingsUpdate, CommandParseError> {
    let number: u32 = value
        .parse()
        .map_err(|_| CommandParseError::InvalidNumber(value.to_string()))?;

    let update = SettingsUpdate::new();
    match field.to_lowercase().as_str() {
        "focus" => Ok(update.with_focus_minutes(number)),
        "short" | "short_break" => Ok(update.with_short_break_minutes(number)),
        "long" | "long_break" => Ok(update.with_long_break_minutes(number)),
        "rounds" => Ok(update.with_rounds_per_cycle(number)),
        _ => Err(CommandParseError::UnknownSetting(field.to_string())),
    }
}

// ============================================================================
// Console loops
// ============================================================================

/// Reads commands from `input` until `quit` or end of input, then shuts the
/// service down.
///
/// # Errors
///
/// Returns `TimerError::ServiceStopped` if the service exits first.
pub async fn run_console<R>(handle: TimerHandle, input: R) -> Result<(), TimerError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                debug!("stdin closed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Timer(command)) => handle.send(command)?,
            Ok(ConsoleCommand::Status) => Display::show_status(&handle.snapshot().await?),
            Ok(ConsoleCommand::Json) => Display::show_json(&handle.snapshot().await?),
            Ok(ConsoleCommand::Help) => Display::show_help(),
            Ok(ConsoleCommand::Quit) => break,
            Err(e) => Display::show_error(&e.to_string()),
        }
    }

    // The service may already be gone; nothing left to stop then.
    let _ = handle.shutdown();
    Ok(())
}

/// Prints engine events until the engine is dropped.
pub async fn render_events(mut events: mpsc::UnboundedReceiver<TimerEvent>) {
    while let Some(event) = events.recv().await {
        Display::show_event(&event);
    }
}

// ============================================================================
// Tests
// ============================================================================
