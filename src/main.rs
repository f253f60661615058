use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use protocol_analysis::application::ports::{AccessTokenVerifier, TaskRepository};
use protocol_analysis::application::services::{LifecycleSimulator, TaskService};
use protocol_analysis::domain::AuthenticatedUser;
use protocol_analysis::infrastructure::auth::StaticTokenVerifier;
use protocol_analysis::infrastructure::observability::{TracingConfig, init_tracing};
use protocol_analysis::infrastructure::persistence::InMemoryTaskRepository;
use protocol_analysis::infrastructure::reporting::RandomReportGenerator;
use protocol_analysis::infrastructure::storage::StagingStoreFactory;
use protocol_analysis::presentation::{ApiLimits, AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    let mut tracing_config =
        TracingConfig::new(environment.as_str(), settings.logging.enable_json);
    tracing_config.filter = format!("{},tower_http=debug", settings.logging.level);
    init_tracing(&tracing_config, settings.server.port)?;

    let repository: Arc<dyn TaskRepository> =
        Arc::new(InMemoryTaskRepository::new(settings.tasks.capacity));
    let report_generator = Arc::new(RandomReportGenerator::new(
        settings.lifecycle.failure_rate,
    ));
    let staging_store = StagingStoreFactory::create(&settings.workspace)
        .context("Failed to prepare workspace for staged uploads")?;

    let simulator = LifecycleSimulator::new(Arc::clone(&repository), report_generator);
    let task_service = Arc::new(TaskService::new(
        Arc::clone(&repository),
        staging_store,
        simulator.clone(),
        settings.tasks.max_page_size,
    ));

    let verifier = StaticTokenVerifier::new(settings.auth.tokens.iter().map(|entry| {
        (
            entry.token.clone(),
            AuthenticatedUser {
                user_id: entry.user_id.clone(),
                username: entry.username.clone(),
            },
        )
    }));
    if verifier.is_empty() {
        tracing::warn!("No access tokens configured; every /api request will be rejected");
    }
    let token_verifier: Arc<dyn AccessTokenVerifier> = Arc::new(verifier);

    let state = AppState {
        task_service,
        token_verifier,
        limits: ApiLimits {
            default_page_size: settings.tasks.default_page_size,
            max_upload_bytes: settings.uploads.max_upload_bytes(),
        },
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    simulator.cancel_all().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
