//! Liveness HTTP server.

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::liveness;

/// The liveness router: a single unauthenticated `GET /`.
pub fn router() -> Router {
    Router::new().route("/", get(liveness::liveness))
}

/// Serve the liveness endpoint until `shutdown` resolves.
#[instrument(skip(shutdown))]
pub async fn start_server<F>(addr: SocketAddr, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind liveness endpoint on {addr}"))?;
    info!("Liveness endpoint listening on {}", addr);
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Liveness endpoint stopped");
    Ok(())
}
