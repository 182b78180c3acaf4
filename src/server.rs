//! Single-route HTTP surface: `GET /` returns the freshly composed page.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::api::ReportEngine;
use crate::error::ReportResult;

/// Builds the router. Unknown paths get axum's 404, other methods on `/` a 405.
pub fn router(engine: ReportEngine) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(Arc::new(engine))
}

async fn index(State(engine): State<Arc<ReportEngine>>) -> Response {
    let started = Instant::now();
    // Chart rendering is CPU-bound and fully synchronous.
    let rendered = tokio::task::spawn_blocking(move || engine.render_page()).await;

    match rendered {
        Ok(Ok(page)) => {
            info!(
                bytes = page.len(),
                elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                "served report page"
            );
            Html(page).into_response()
        }
        Ok(Err(err)) => {
            error!(error = %err, render_error = err.is_render_error(), "failed to render report page");
            internal_error()
        }
        Err(err) => {
            error!(error = %err, "report rendering task aborted");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(addr: SocketAddr, engine: ReportEngine) -> ReportResult<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_with_shutdown(listener, engine, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    engine: ReportEngine,
    shutdown: F,
) -> ReportResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!(
        addr = %local_addr,
        rows = engine.dataset().row_count(),
        charts = engine.chart_renderer().specs().len(),
        "report server listening"
    );

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("report server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c; shutting down");
    }
}
