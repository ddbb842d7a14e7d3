//! HTTP surface: naming endpoints and the sign-in flow.

pub mod auth_handlers;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;

pub use errors::AppError;
pub use router::create_router;
pub use state::{build_app_state, AppState};

use crate::config::Config;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Serves the router on an already-bound listener.
pub async fn run(listener: TcpListener, app_state: AppState) -> anyhow::Result<()> {
    let app = create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Binds `0.0.0.0:<port>` from the configuration and serves until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    run(listener, build_app_state(&config)).await
}
