//! Tomato - a Pomodoro timer for the terminal
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of small break
//! - 15 minutes of long break after 4 tomatoes

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use tomato::cli::{run, sound_source, Cli, Commands, Display, Settings};
use tomato::sound;

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
///
/// Logs go to stderr so they never mix with the timer frame on stdout.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
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
        }
        Some(Commands::Config) => {
            let settings = Settings::load(&cli)?;
            Display::show_config(&settings.path, &settings.config);
        }
        None if cli.audio_check => {
            let settings = Settings::load(&cli)?;
            let source = sound_source(&settings.config);
            println!("Playing {}...", source.name());
            sound::audio_check(source).context("Audio check failed")?;
        }
        None => {
            let settings = Settings::load(&cli)?;
            let reason = run(settings).await?;
            tracing::debug!("Exited with {:?}", reason);
            println!();
        }
    }

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
        let cli = Cli::parse_from(["tomato"]);
        assert!(cli.command.is_none());
        assert!(!cli.audio_check);
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["tomato", "--verbose", "config"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Config)));
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
