//! Subcommand handlers.

use anyhow::Context;
use survey_ai::NarrativeComparator;
use survey_config::SurveyConfig;
use survey_db::service::SurveyService;

use crate::cli::ServeArgs;
use crate::routes::create_router;
use crate::state::AppState;

async fn open_store(config: &SurveyConfig) -> anyhow::Result<SurveyService> {
    SurveyService::new_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))
}

pub async fn serve(args: &ServeArgs, mut config: SurveyConfig) -> anyhow::Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let service = open_store(&config).await?;
    let comparator = NarrativeComparator::from_config(&config.gemini)
        .context("failed to initialize the generative model client")?;
    let app = create_router(AppState::shared(service, comparator));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, database = %config.database.path, "survey API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

pub async fn seed(config: &SurveyConfig) -> anyhow::Result<()> {
    let service = open_store(config).await?;
    let today = chrono::Local::now().date_naive();
    let base_date = today
        .checked_sub_days(chrono::Days::new(180))
        .unwrap_or(today);

    let summary = service.seed_sample_data(base_date).await?;
    println!(
        "Seeded {} organizations, {} clauses, {} questions, {} responses",
        summary.organizations, summary.clauses, summary.questions, summary.responses
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
