use uc_server::{RouterConfig, build_router, build_verifier, logger};

use uc_auth::{Authenticator, BearerAuthenticator};

use std::error::Error;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional (development)
    let _ = dotenvy::dotenv();

    let config = uc_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting uc-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let setup = build_verifier(&config.auth).await?;
    let authenticator: Arc<dyn Authenticator> =
        Arc::new(BearerAuthenticator::new(setup.verifier));

    let app = build_router(RouterConfig::from_config(&config, authenticator));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    // Actual address matters when port is 0 / auto-assigned
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => {
                    error!("Failed to listen for SIGINT: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    if let Some(task) = setup.refresh_task {
        task.abort();
    }
    info!("Graceful shutdown complete");

    Ok(())
}
