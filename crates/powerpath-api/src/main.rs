//! Powerpath API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use powerpath_api::error::AppError;
use powerpath_api::routes;
use powerpath_api::state::AppState;
use powerpath_assist::http::{HttpCollaborator, HttpCollaboratorConfig};
use powerpath_core::clock::SystemClock;
use powerpath_core::collaborator::Collaborator;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Powerpath API server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
    let typing_delay_ms: u64 = std::env::var("TYPING_DELAY_MS")
        .unwrap_or_else(|_| "250".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("TYPING_DELAY_MS must be a valid u64: {e}")))?;

    // Compile and validate the built-in guide.
    let graph = Arc::new(powerpath_content::builtin_guide()?);

    // Assisted sessions are enabled only when an API key is configured.
    let collaborator: Option<Arc<dyn Collaborator>> = match std::env::var("ASSIST_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => {
            let mut config = HttpCollaboratorConfig::new(
                api_key,
                std::env::var("ASSIST_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            );
            if let Ok(base_url) = std::env::var("ASSIST_BASE_URL") {
                config.base_url = base_url;
            }
            let client = HttpCollaborator::new(config)
                .map_err(|e| AppError::Config(e.to_string()))?;
            Some(Arc::new(client))
        }
        _ => {
            tracing::info!("ASSIST_API_KEY not set; assisted sessions are disabled");
            None
        }
    };

    // Build application state.
    let app_state = AppState::new(
        graph,
        Arc::new(SystemClock),
        collaborator,
        Duration::from_millis(typing_delay_ms),
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/sessions", routes::session::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
