//! # Vitalog CLI
//!
//! Command-line interface for the Vitalog health tracker API.
//!
//! ## Usage
//!
//! ```bash
//! vitalog serve     # Start the API server (runs migrations and the admin seed)
//! vitalog migrate   # Run database migrations
//! vitalog seed      # Create the administrator account if missing
//! vitalog validate  # Check environment configuration
//! vitalog --help    # Show help
//! ```

mod commands;
mod config;
mod server;

use clap::{CommandFactory as _, Parser};
use error::Result;

use crate::{
    commands::{Commands, completions::completions, migrate::migrate, seed::seed, validate::validate},
    config::DatabaseConfig,
};

/// Vitalog - personal health tracking API
#[derive(Parser, Debug)]
#[command(name = "vitalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info", global = true)]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "VITALOG_LOG_FORMAT", default_value = "pretty", global = true)]
    log_format: String,

    /// Also write logs to this file
    #[arg(long, env = "VITALOG_LOG_FILE", global = true)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        return completions(args.shell, &mut Cli::command());
    }

    let _log_guard = logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    logging::info!(target: "app", command = ?cli.command, "Vitalog CLI starting...");

    match cli.command {
        Commands::Serve(args) => server::serve(&DatabaseConfig::from_env()?, &args).await?,
        Commands::Migrate(args) => migrate(&DatabaseConfig::from_env()?, args).await?,
        Commands::Seed => seed(&DatabaseConfig::from_env()?).await?,
        Commands::Validate => validate()?,
        Commands::Completions(_) => {},
    }

    logging::info!(target: "app", "Vitalog CLI completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["vitalog", "serve", "--host", "127.0.0.1", "--port", "8080"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.port, 8080);
            },
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_seed_and_validate() {
        assert!(matches!(
            Cli::parse_from(["vitalog", "seed"]).command,
            Commands::Seed
        ));
        assert!(matches!(
            Cli::parse_from(["vitalog", "validate"]).command,
            Commands::Validate
        ));
    }

    #[test]
    fn test_migrate_flags() {
        match Cli::parse_from(["vitalog", "migrate", "--rollback"]).command {
            Commands::Migrate(args) => {
                assert!(args.rollback);
                assert!(!args.dry_run);
            },
            _ => panic!("Expected Migrate command"),
        }

        assert!(Cli::try_parse_from(["vitalog", "migrate", "--rollback", "--dry-run"]).is_err());
    }

    #[test]
    fn test_global_log_flags_after_subcommand() {
        let cli = Cli::parse_from(["vitalog", "validate", "--log-format", "json"]);
        assert_eq!(cli.log_format, "json");
    }

    #[test]
    fn test_cli_command_factory() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "vitalog");
        cmd.debug_assert();
    }
}
