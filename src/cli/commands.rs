//! Command-line definitions for the Study Timer.
//!
//! Uses clap derive macro for argument parsing. The arguments only seed the
//! in-memory settings for this session; nothing is persisted.

use clap::{Args, Parser, Subcommand};
use tokio::time::Duration;

use crate::sound::SoundSource;
use crate::timer::{CompletionPolicy, ServiceOptions};
use crate::types::TimerSettings;

// ============================================================================
// CLI Structure
// ============================================================================

/// Study Timer - focus and break cycles in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "study-timer",
    version,
    about = "集中と休憩を繰り返す学習タイマー",
    long_about = "ポモドーロ方式の学習タイマー。\n\
                  起動後は標準入力からコマンド（start / pause / reset / mode / set / ok / status）で操作します。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub timer: TimerArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Timer Arguments
// ============================================================================

/// Startup settings for the timer session
#[derive(Args, Debug, Clone)]
pub struct TimerArgs {
    /// Focus duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub focus: u32,

    /// Short break duration in minutes (1-30)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=30)
    )]
    pub short_break: u32,

    /// Long break duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "15",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub long_break: u32,

    /// Focus sessions before a long break (1-10)
    #[arg(
        short,
        long,
        default_value = "4",
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    pub rounds: u32,

    /// Disable the completion alert sound
    #[arg(long)]
    pub no_sound: bool,

    /// Alert sound: a system sound name or a path to an audio file
    #[arg(long, value_name = "NAME|PATH", conflicts_with = "no_sound")]
    pub sound: Option<String>,

    /// Wait in idle after acknowledging a completed phase instead of starting it
    #[arg(long)]
    pub idle_after_completion: bool,

    /// Tick period in milliseconds (for demos)
    #[arg(
        long,
        hide = true,
        default_value = "1000",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,
}

impl Default for TimerArgs {
    fn default() -> Self {
        let settings = TimerSettings::default();
        Self {
            focus: settings.focus_minutes,
            short_break: settings.short_break_minutes,
            long_break: settings.long_break_minutes,
            rounds: settings.rounds_per_cycle,
            no_sound: false,
            sound: None,
            idle_after_completion: false,
            tick_ms: 1000,
        }
    }
}

impl TimerArgs {
    /// Returns the initial timer settings.
    pub fn settings(&self) -> TimerSettings {
        TimerSettings {
            focus_minutes: self.focus,
            short_break_minutes: self.short_break,
            long_break_minutes: self.long_break,
            rounds_per_cycle: self.rounds,
        }
    }

    /// Returns the service options.
    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            tick_period: Duration::from_millis(self.tick_ms),
            completion_policy: if self.idle_after_completion {
                CompletionPolicy::ReturnToIdle
            } else {
                CompletionPolicy::AutoContinue
            },
        }
    }

    /// Returns the requested alert sound, if any.
    pub fn sound_source(&self) -> Option<SoundSource> {
        self.sound.as_deref().map(SoundSource::resolve)
    }
}

// ============================================================================
// Tests
// ============================================================================
