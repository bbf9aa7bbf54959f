use crate::adapters::http::{build_router, HttpOptions};
use crate::core::container::AppContainer;
use crate::domain::ports::ServerSettings;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct ApiServer<S: ServerSettings> {
    settings: S,
}

impl<S: ServerSettings> ApiServer<S> {
    pub fn new(settings: S) -> Self {
        Self { settings }
    }

    pub async fn run(self) -> Result<()> {
        tracing::info!("Starting velocity-zones API server...");

        let container = AppContainer::from_settings(&self.settings).await?;
        let router = build_router(
            Arc::new(container),
            &HttpOptions::from_settings(&self.settings),
        )?;

        let address = self.settings.bind_address();
        let listener = TcpListener::bind(address).await?;
        tracing::info!("🚀 Server running at http://{}", listener.local_addr()?);
        tracing::info!("🌍 Environment: {:?}", self.settings.environment());

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("👋 Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
