//! Process entrypoint: resolve settings, then serve the application.

use std::sync::Arc;
use tokio::net::TcpListener;
use web_template::config::{resolve, ProcessEnv, Settings};
use web_template::{app_router, logging, ApiVersion, AppError, AppState, SqlDatabase};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = tracing::subscriber::with_default(logging::bootstrap(), resolve)?;

    println!("[AP Configuration]:");
    println!("{}", serde_json::to_string_pretty(&settings)?);

    logging::init(settings.server.log_level);
    web_template::fault::install_panic_hook();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(settings.effective_workers())
        .enable_all()
        .build()?;
    runtime.block_on(serve(settings))?;
    Ok(())
}

async fn serve(settings: Settings) -> Result<(), AppError> {
    let version = ApiVersion::resolve(&settings, &ProcessEnv);
    let db = SqlDatabase::connect(&settings.database)?;
    let addr = settings.bind_address();
    tracing::info!("[Startup] ENV={} VERSION={}", settings.app_env, version);

    let state = AppState::new(settings, Arc::new(db), version);
    let app = app_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("[Shutdown] Bye.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for shutdown signal: {}", e);
    }
}
