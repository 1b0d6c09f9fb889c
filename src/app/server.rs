use crate::adapters::http::{build_router, AppState};
use crate::adapters::storage::open_store;
use crate::adapters::view::HtmlRenderer;
use crate::config::AppConfig;
use crate::domain::ports::{ConfigProvider, RecordStore};
use crate::domain::services::ListingService;
use crate::utils::error::Result;
use crate::utils::validation::validate_socket_addr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub fn build_state(store: Arc<dyn RecordStore>, site_title: &str) -> AppState {
    AppState::new(
        ListingService::new(store),
        Arc::new(HtmlRenderer::new(site_title)),
    )
}

/// Serves until SIGINT or SIGTERM.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let addr = validate_socket_addr("server.bind", config.bind_addr())?;
    let store = open_store(config.database_url())?;
    let app = build_router(build_state(store, &config.server.site_title));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "annuaire listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        if let (Ok(mut sigterm), Ok(mut sigint)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            tokio::select! {
                _ = sigterm.recv() => {}
                _ = sigint.recv() => {}
            }
            tracing::info!("shutdown signal received");
            return;
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
    }
    tracing::info!("shutdown signal received");
}
