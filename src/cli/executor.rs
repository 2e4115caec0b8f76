//! Command executor for dispatching CLI commands

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Execute a CLI command with the given settings
///
/// A plain `serve` (or no subcommand) returns immediately; `main` starts
/// the server once this succeeds and [`Cli::starts_server`] is true.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Serve { host, port, .. }) => {
            warn_privileged_port(host.as_deref(), port.unwrap_or(settings.server.port));
            ServeCommandHandler::new(settings)
                .execute(cli.is_dry_run())
                .await
        }
        None => Ok(()),
    }
}

fn warn_privileged_port(host: Option<&str>, port: u16) {
    if port < 1024 && host == Some("0.0.0.0") {
        eprintln!(
            "Warning: Binding to 0.0.0.0 on port {} typically requires root privileges",
            port
        );
    }
}
