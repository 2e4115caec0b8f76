use clap::Parser;

use userbase_rs::cli::{self, Cli};
use userbase_rs::config::Environment;
use userbase_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    cli::execute_command(&cli, settings.clone()).await?;

    if cli.starts_server() {
        let environment = cli.env.map(Environment::from).unwrap_or_else(Environment::from_env);
        Server::new(settings, environment).run().await?;
    }

    Ok(())
}
