use anyhow::Context;
use clap::Parser;
use rate_synthesizer::cli::{Cli, CliHandler};
use rate_synthesizer::{initialize_logging, CompetitorRoster, SynthesizerConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = SynthesizerConfig::from_env()
        .context("Failed to load configuration")?;
    cli.apply_overrides(&mut config)
        .context("Invalid command line override")?;

    initialize_logging(&config.logging)?;
    info!("Loaded configuration: {:?}", config);

    let roster = if config.roster.path.exists() {
        CompetitorRoster::load_from_file(&config.roster.path)
            .await
            .with_context(|| format!("Failed to load roster {:?}", config.roster.path))?
    } else {
        warn!(
            "Roster {:?} not found, only fallback competitors available",
            config.roster.path
        );
        CompetitorRoster::new()
    };

    let handler = CliHandler::new(config, roster, cli.format);
    let output = handler.handle_command(cli.command)?;
    print!("{output}");

    Ok(())
}
