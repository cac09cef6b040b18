//! ServerBuilder for assembling the back-office HTTP server

use crate::core::resource::{Editable, Queryable};
use crate::server::routes::{ResourceState, resource_routes};
use anyhow::Result;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder collecting resource route sets into one application router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .register::<Country>(ResourceState::new(stores.countries()))
///     .register::<City>(ResourceState::new(stores.cities()))
///     .build();
/// ```
pub struct ServerBuilder {
    routers: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            routers: Vec::new(),
        }
    }

    /// Register the CRUD routes for one resource
    pub fn register<T>(mut self, state: ResourceState<T>) -> Self
    where
        T: Editable + Queryable,
    {
        self.routers.push(resource_routes(state));
        self
    }

    /// Add routes that do not fit the CRUD pattern
    pub fn with_routes(mut self, routes: Router) -> Self {
        self.routers.push(routes);
        self
    }

    /// Build the final router with health checks, request tracing and CORS
    pub fn build(self) -> Router {
        let mut app = Router::new()
            .route("/health", get(health))
            .route("/healthz", get(health));

        for router in self.routers {
            app = app.merge(router);
        }

        app.layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Serve the application with graceful shutdown
///
/// Binds to the provided address and handles SIGTERM and Ctrl+C.
pub async fn serve(app: Router, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
