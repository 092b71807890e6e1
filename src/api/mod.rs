//! REST transport.
//!
//! Exposes the five memory operations under `/api/memory`. Every response body
//! is `{"message": "..."}` and the status code reflects the outcome.

mod handlers;
mod routes;

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::error::Result;

pub use handlers::{HealthResponse, MessageResponse, StoreRequest};
pub use routes::create_router;

/// Bind the API listener.
///
/// Kept separate from [`serve`] so a bind failure surfaces before any
/// transport starts.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);
    Ok(listener)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, dispatcher: Dispatcher, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(dispatcher);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
