use anyhow::Result;
use clap::Parser;

use tripflow::{auth, cli::Cli, settings::Settings, App};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::new()?;
    settings
        .validate()
        .map_err(|message| anyhow::anyhow!(message))?;

    let token = auth::authenticate(&settings)?;

    // Logging is initialized in App::run() with buffer support
    App::new(token, settings, cli.deep_link()).run().await?;

    Ok(())
}
