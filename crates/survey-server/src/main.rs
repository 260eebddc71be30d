use clap::Parser;
use survey_config::SurveyConfig;

mod cli;
mod commands;
mod error;
mod query;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("survey error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => SurveyConfig::load_from_file(path)?,
        None => SurveyConfig::load_with_dotenv()?,
    };

    match &cli.command {
        cli::Commands::Serve(args) => commands::serve(args, config).await,
        cli::Commands::Seed => commands::seed(&config).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SURVEY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
