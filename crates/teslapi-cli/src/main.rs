//! teslapi - Command-line tool for the vehicle owner REST API

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use teslapi_client::{ClientConfig, TeslaClient};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{ArgOverrides, Config};
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "teslapi")]
#[command(author, version, about = "Vehicle owner API CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Portal URL
    #[arg(short, long, env = "TESLAPI_SERVER")]
    server: Option<String>,

    /// Streaming base URL
    #[arg(long, env = "TESLAPI_STREAMING")]
    streaming: Option<String>,

    /// Access token
    #[arg(short, long, env = "TESLAPI_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Vehicle id (defaults to the first vehicle on the account)
    #[arg(long, env = "TESLAPI_VEHICLE")]
    vehicle: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "TESLAPI_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Diagnostic detail
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Verbose logging (same as --log-level return)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange account credentials for an access token
    Login {
        /// Account e-mail
        #[arg(long, env = "TESLAPI_EMAIL")]
        email: String,

        /// Account password
        #[arg(long, env = "TESLAPI_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Exchange a refresh token for a new access token
    Refresh {
        /// Refresh token
        refresh_token: String,
    },

    /// Revoke an access token (defaults to --token)
    Revoke {
        token: Option<String>,
    },

    /// List vehicles on the account
    Vehicles,

    /// Show vehicle details with decoded VIN and paint
    Info,

    /// Read vehicle state
    State {
        /// charge_state, climate_state, drive_state, gui_settings,
        /// vehicle_state, vehicle_config, data, mobile or chargers
        #[arg(default_value = "data")]
        kind: String,
    },

    /// Wake the vehicle
    Wake,

    /// List remote commands
    Commands {
        /// Only commands whose name contains this text
        filter: Option<String>,
    },

    /// Run a remote command
    Command {
        /// Command name (see `teslapi commands`)
        name: String,

        /// Positional arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Stream live telemetry
    Stream {
        /// Account e-mail
        #[arg(long, env = "TESLAPI_EMAIL")]
        email: String,

        /// Columns to request
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
}

/// Diagnostic levels, least to most detailed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Always,
    Error,
    Call,
    Return,
    Body,
    Request,
    Response,
    All,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            Self::Always => "error",
            Self::Error => "warn",
            Self::Call => "info",
            Self::Return => "debug",
            Self::Body | Self::Request | Self::Response | Self::All => "trace",
        }
    }
}

/// Filter for the client crates; `RUST_LOG` wins when set
fn log_filter(level: Option<LogLevel>, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = level.unwrap_or(if verbose { LogLevel::Return } else { LogLevel::Always });
    let directive = level.directive();
    EnvFilter::new(format!(
        "warn,teslapi={d},teslapi_client={d},teslapi_core={d}",
        d = directive
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(log_filter(cli.log_level, cli.verbose))
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(ArgOverrides {
        server: cli.server.as_deref(),
        streaming: cli.streaming.as_deref(),
        token: cli.token.as_deref(),
        vehicle: cli.vehicle.as_deref(),
        output: cli.output.map(|o| o.as_str()),
        no_color: cli.no_color,
    });

    let format = OutputFormat::from_name(&merged.output);
    let ctx = OutputContext::new(format.unwrap_or_default(), merged.no_color, cli.quiet);
    if format.is_none() {
        ctx.warn(&format!("Unknown output format '{}', using table", merged.output));
    }

    let vehicle = merged.vehicle.as_deref();

    match &cli.command {
        Commands::Login { email, password } => {
            let client = create_client(&merged.server, merged.streaming.as_deref(), None)?;
            commands::login(&client, email, password, &ctx).await?;
        }

        Commands::Refresh { refresh_token } => {
            let client = create_client(&merged.server, merged.streaming.as_deref(), None)?;
            commands::refresh(&client, refresh_token, &ctx).await?;
        }

        Commands::Revoke { token } => {
            let token = token
                .as_deref()
                .or(merged.token.as_deref())
                .context("No token to revoke (pass one or set --token)")?;
            let client = create_client(&merged.server, merged.streaming.as_deref(), None)?;
            commands::revoke(&client, token, &ctx).await?;
        }

        Commands::Vehicles => {
            let client = authed_client(&merged)?;
            commands::vehicles(&client, &ctx).await?;
        }

        Commands::Info => {
            let client = authed_client(&merged)?;
            commands::info(&client, vehicle, &ctx).await?;
        }

        Commands::State { kind } => {
            let client = authed_client(&merged)?;
            commands::state(&client, vehicle, kind, &ctx).await?;
        }

        Commands::Wake => {
            let client = authed_client(&merged)?;
            commands::wake(&client, vehicle, &ctx).await?;
        }

        Commands::Commands { filter } => {
            commands::catalogue(filter.as_deref(), &ctx)?;
        }

        Commands::Command { name, args } => {
            let client = authed_client(&merged)?;
            commands::command(&client, vehicle, name, args, &ctx).await?;
        }

        Commands::Stream { email, columns } => {
            let client = authed_client(&merged)?;
            commands::stream(&client, vehicle, email, columns, &ctx).await?;
        }
    }

    Ok(())
}

/// Create a client for the given portal; identity comes from the environment
fn create_client(
    server: &str,
    streaming: Option<&str>,
    token: Option<&str>,
) -> Result<TeslaClient> {
    let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
    config.portal_url = server.to_string();
    if let Some(streaming) = streaming {
        config.streaming_url = streaming.to_string();
    }

    let client = TeslaClient::new(config).context("Failed to create client")?;
    Ok(match token {
        Some(token) => client.with_token(token),
        None => client,
    })
}

fn authed_client(merged: &config::MergedConfig) -> Result<TeslaClient> {
    let token = merged
        .token
        .as_deref()
        .context("No access token (set --token, TESLAPI_TOKEN or `token` in the config file)")?;
    create_client(&merged.server, merged.streaming.as_deref(), Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_directives() {
        assert_eq!(LogLevel::Always.directive(), "error");
        assert_eq!(LogLevel::Error.directive(), "warn");
        assert_eq!(LogLevel::Call.directive(), "info");
        assert_eq!(LogLevel::Return.directive(), "debug");
        assert_eq!(LogLevel::Body.directive(), "trace");
        assert_eq!(LogLevel::All.directive(), "trace");
    }

    #[test]
    fn test_cli_parses_command_args() {
        let cli = Cli::try_parse_from([
            "teslapi",
            "--token",
            "abc",
            "command",
            "set_temps",
            "21",
            "-1.5",
        ])
        .unwrap();
        assert_eq!(cli.token.as_deref(), Some("abc"));
        match cli.command {
            Commands::Command { name, args } => {
                assert_eq!(name, "set_temps");
                assert_eq!(args, vec!["21", "-1.5"]);
            }
            _ => panic!("expected command"),
        }
    }

    #[test]
    fn test_cli_stream_columns() {
        let cli = Cli::try_parse_from([
            "teslapi",
            "stream",
            "--email",
            "a@b.c",
            "--columns",
            "speed,soc",
        ])
        .unwrap();
        match cli.command {
            Commands::Stream { columns, .. } => assert_eq!(columns, vec!["speed", "soc"]),
            _ => panic!("expected stream"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
