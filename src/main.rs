use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use appmeta::cli::{commands, Cli, Commands};
use appmeta::Resolver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let settings = commands::load_settings(&cli)?;
    let resolver = Resolver::new(settings)?;

    match &cli.command {
        Commands::Resolve { id } => commands::resolve(&resolver, id).await?,
        Commands::PlayStore { id } => commands::play_store(&resolver, id).await?,
        Commands::AppStore { id } => commands::app_store(&resolver, id).await?,
    }

    Ok(())
}
