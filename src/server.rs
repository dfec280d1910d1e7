// ABOUTME: HTTP server assembly: merges domain routers, applies CORS and tracing, runs the serve loop
// ABOUTME: Shuts down gracefully on Ctrl+C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::middleware::{setup_cors, RequestSpan};
use crate::resources::ServerResources;
use crate::routes::{ChatRoutes, HealthRoutes, MealRoutes};

/// Build the application router with every route and middleware layer
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(ChatRoutes::routes(Arc::clone(&resources)))
        .merge(MealRoutes::routes(resources))
        .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
        .layer(cors)
}

/// Bind a TCP listener on `host:port`
///
/// `host` may be a hostname (`localhost`), an IPv4 literal or an IPv6 literal
/// (`::`); names are resolved and the first address that binds is used.
///
/// # Errors
///
/// Returns an error if the host cannot be resolved or the port cannot be bound.
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))
}

/// Bind `host:port` and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while
/// running.
pub async fn run(resources: Arc<ServerResources>, host: &str, port: u16) -> Result<()> {
    let listener = bind_listener(host, port).await?;
    let addr: SocketAddr = listener
        .local_addr()
        .context("Failed to read bound address")?;

    info!("HTTP server listening on http://{addr}");
    info!("   Health:        GET  http://{addr}/health");
    info!("   Chat:          POST http://{addr}/api/chat");
    info!("   Meal analysis: POST http://{addr}/api/analyze-meal");
    info!("   Meal finalise: POST http://{addr}/api/meal-finalize");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
