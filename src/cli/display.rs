//! Display utilities for the Study Timer console.
//!
//! This module provides formatted output for:
//! - Status display
//! - Engine events (mode and status changes, completion prompt)
//! - Help and error messages

use crate::timer::TimerEvent;
use crate::types::{TimerSettings, TimerState, TimerStatus};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for console output.
pub struct Display;

impl Display {
    /// Shows the banner and initial state.
    pub fn show_welcome(state: &TimerState) {
        println!("学習タイマー");
        println!("─────────────────────────────");
        Self::show_status(state);
        println!("help でコマンド一覧を表示します");
    }

    /// Shows the current timer state.
    pub fn show_status(state: &TimerState) {
        for line in Self::status_lines(state) {
            println!("{}", line);
        }
    }

    /// Shows the current timer state as JSON.
    pub fn show_json(state: &TimerState) {
        match serde_json::to_string_pretty(state) {
            Ok(json) => println!("{}", json),
            Err(e) => Self::show_error(&e.to_string()),
        }
    }

    /// Shows an engine event, if it has a user-facing line.
    pub fn show_event(event: &TimerEvent) {
        if let Some(line) = Self::event_line(event) {
            println!("{}", line);
        }
    }

    /// Shows the console command list.
    pub fn show_help() {
        println!("コマンド:");
        println!("  start / resume        タイマーを開始・再開");
        println!("  pause                 一時停止");
        println!("  reset                 現在のモードを最初からやり直す");
        println!("  mode <focus|short|long>  モードを切り替える");
        println!("  set <focus|short|long|rounds> <n>  設定を変更する");
        println!("  ok / continue         完了を確認して次へ進む");
        println!("  status / json         現在の状態を表示");
        println!("  quit                  終了");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Formats the status block.
    pub fn status_lines(state: &TimerState) -> Vec<String> {
        vec![
            format!("モード: {}", state.mode.label()),
            format!("状態: {}", state.status.label()),
            format!("残り時間: {}", state.formatted_remaining()),
            format!(
                "ラウンド: {}/{}",
                state.current_round, state.settings.rounds_per_cycle
            ),
        ]
    }

    /// Formats an event. Ticks are not printed.
    pub fn event_line(event: &TimerEvent) -> Option<String> {
        match event {
            TimerEvent::StatusChanged { to, .. } => match to {
                TimerStatus::Running => Some("> タイマーを開始しました".to_string()),
                TimerStatus::Paused => Some("|| タイマーを一時停止しました".to_string()),
                TimerStatus::Idle => Some("[] タイマーを待機状態にしました".to_string()),
                // The completion prompt is printed from the Completed event.
                TimerStatus::Completed => None,
            },
            TimerEvent::ModeChanged { mode } => Some(format!("モード: {}", mode.label())),
            TimerEvent::SettingsUpdated { settings } => Some(Self::settings_line(settings)),
            TimerEvent::Completed {
                finished,
                next,
                current_round,
            } => Some(format!(
                "* {}\n  次: {}（ラウンド {}）。ok で続行します",
                finished.completion_message(),
                next.label(),
                current_round
            )),
            TimerEvent::AlertFailed { reason } => {
                Some(format!("  (アラート音を再生できません: {})", reason))
            }
            TimerEvent::Tick { .. } => None,
        }
    }

    fn settings_line(settings: &TimerSettings) -> String {
        format!(
            "設定: 集中 {}分 / 短い休憩 {}分 / 長い休憩 {}分 / {}ラウンド",
            settings.focus_minutes,
            settings.short_break_minutes,
            settings.long_break_minutes,
            settings.rounds_per_cycle
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
