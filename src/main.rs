use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use job_tracker::{build_router, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "job_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config);
    let app = build_router(state, &config)?;

    tracing::info!(data_file = %config.data_file.display(), "Using data file");
    if let Some(static_dir) = &config.static_dir {
        tracing::info!(static_dir = %static_dir.display(), "Serving static UI");
    }

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Backend server listening on http://localhost:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
