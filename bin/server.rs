// Cat Catalog - Web Server
// Serves the catalog queries over HTTP

use anyhow::{Context, Result};
use cat_catalog::config::{has_flag, USAGE};
use cat_catalog::{init_tracing, router, AppState, InMemoryCatalog, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        print!("{}", USAGE);
        return Ok(());
    }

    init_tracing();

    let config = ServerConfig::from_env(&args)?;

    // Load catalog (dataset file or built-in cats)
    let catalog = InMemoryCatalog::load(config.data_file.as_deref())?;
    tracing::info!(
        cats = catalog.count(),
        birth_dates = catalog.birth_dates().len(),
        source = %config
            .data_file
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        "catalog loaded"
    );

    let app = router(AppState::new(catalog));

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!(version = cat_catalog::VERSION, "server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
