//! CLI module for the Study Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Startup arguments using clap derive
//! - `console`: Line-based interactive front end
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod console;
pub mod display;

pub use commands::{Cli, Commands, TimerArgs};
pub use console::{render_events, run_console, CommandParseError, ConsoleCommand};
pub use display::Display;
