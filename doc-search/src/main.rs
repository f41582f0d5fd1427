use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};

use doc_search::logging::init_tracing;
use doc_search::{router, AppError, Dependencies, Settings};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();

    let settings = Settings::from_env()?;
    init_tracing(settings.log_format);

    let dependencies = Dependencies::new(&settings).await.inspect_err(|e| {
        error!(error = %e, "Failed to initialize dependencies");
    })?;
    let app = router(dependencies.state);

    let listener = TcpListener::bind(settings.bind_addr()).await?;
    info!(addr = %settings.bind_addr(), "doc-search listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("doc-search stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
