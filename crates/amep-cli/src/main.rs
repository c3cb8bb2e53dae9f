mod cli;
mod commands;
mod output;

use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("amep error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = amep_config::AmepConfig::load_with_dotenv()?;
    tracing::debug!(
        configured = config.api.is_configured(),
        "configuration loaded"
    );

    let flags = cli.global_flags();
    match &cli.command {
        cli::Commands::Auth { action } => commands::auth::handle(action, &flags, &config).await,
        cli::Commands::Interventions { action } => {
            commands::interventions::handle(action, &flags, &config).await
        }
        cli::Commands::Grading { action } => {
            commands::grading::handle(action, &flags, &config).await
        }
        cli::Commands::Analytics(args) => {
            commands::analytics::handle(args, &flags, &config).await
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("AMEP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
