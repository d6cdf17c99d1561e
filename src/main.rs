//! Study Timer CLI - focus and break cycles in the terminal
//!
//! The timer alternates between:
//! - 25 minutes of focus
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 focus rounds

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use study_timer::cli::{render_events, run_console, Cli, Commands, Display, TimerArgs};
use study_timer::sound::try_create_player;
use study_timer::timer::TimerService;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => run_timer(&cli.timer).await,
    }
}

/// Runs an interactive timer session on stdin/stdout.
async fn run_timer(args: &TimerArgs) -> Result<()> {
    let alert = try_create_player(args.sound_source(), args.no_sound);
    let (service, handle, events) =
        TimerService::new(args.settings(), alert, args.service_options());

    Display::show_welcome(&handle.state());

    let renderer = tokio::spawn(render_events(events));
    let input = BufReader::new(tokio::io::stdin());
    let (_, console) = tokio::join!(service.run(), run_console(handle, input));

    // The engine is dropped with the service, which closes the event stream.
    renderer.await.context("イベント表示タスクが異常終了しました")?;
    console?;
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["study-timer"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.timer.focus, 25);
    }

    #[test]
    fn test_cli_parse_completions() {
        let cli = Cli::parse_from(["study-timer", "completions", "zsh"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::parse_from(["study-timer", "--focus", "30", "--no-sound"]);
        assert_eq!(cli.timer.focus, 30);
        assert!(cli.timer.no_sound);
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["study-timer", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
