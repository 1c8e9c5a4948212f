//! Newsdesk API Gateway
//!
//! The main entry point for all external API requests.
//! Handles:
//! - Publication pipeline (submission -> linked artifacts -> rewrite queue)
//! - Request routing and rate limiting
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;
mod pipeline;

use axum::{
    routing::{get, patch, post},
    Router,
};
use newsdesk_common::{
    config::AppConfig,
    db::DbPool,
    metrics,
    queue::{Queue, QueueConfig},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn, Level};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub queue: Option<Arc<Queue>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .json()
        .init();

    info!("Starting Newsdesk API Gateway v{}", newsdesk_common::VERSION);

    // Load configuration
    let config = AppConfig::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        e
    })?;

    let config = Arc::new(config);

    // Initialize metrics
    metrics::register_metrics();

    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()?;
        info!("Prometheus exporter listening on {}", metrics_addr);
    }

    // Initialize database connection
    info!("Connecting to database...");
    let db = DbPool::new(&config.database).await?;

    // Initialize the rewrite queue
    let queue = match config.queue.rewrite_queue_url.clone() {
        Some(url) => {
            let queue = Queue::new(QueueConfig {
                url,
                dlq_url: config.queue.dlq_url.clone(),
                visibility_timeout: config.queue.visibility_timeout_secs as i32,
                wait_time_seconds: config.queue.poll_timeout_secs as i32,
                max_messages: config.queue.batch_size as i32,
            })
            .await?;
            Some(Arc::new(queue))
        }
        None => {
            warn!("No rewrite queue configured; articles will not reach the AI worker");
            None
        }
    };

    // Create app state
    let state = AppState {
        config: config.clone(),
        db,
        queue,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // API routes
    let api_routes = Router::new()
        // Health endpoints (no auth)
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Newspaper article endpoints
        .route("/articles/newspaper", post(handlers::articles::create_article))
        .route("/articles/newspaper", get(handlers::articles::list_articles))
        .route("/articles/newspaper/{id}", get(handlers::articles::get_article))
        .route("/articles/newspaper/{id}", patch(handlers::articles::patch_article));

    // Compose the app
    let mut app = Router::new()
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id);

    // Rate limiting
    if let Some(limiter) = middleware::rate_limit::create_rate_limiter(&state.config.rate_limit) {
        let limit = state.config.rate_limit.requests_per_second;
        app = app.layer(axum::middleware::from_fn(
            move |request: axum::extract::Request, next: axum::middleware::Next| {
                let limiter = limiter.clone();
                async move {
                    middleware::rate_limit::rate_limit_middleware(request, next, limiter, limit)
                        .await
                }
            },
        ));
    }

    app.with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
