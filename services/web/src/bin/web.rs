//! services/web/src/bin/web.rs

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_lib::{
    adapters::ChatCompletionAdapter,
    config::Config,
    error::ApiError,
    web::{build_router, state::AppState},
};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Completion Adapter ---
    let http_client = reqwest::Client::builder().build()?;
    let completion = Arc::new(ChatCompletionAdapter::new(
        http_client,
        config.completion_endpoint.clone(),
        config.completion_model.clone(),
    ));
    info!(
        endpoint = %config.completion_endpoint,
        model = %config.completion_model,
        "Completion adapter ready"
    );

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), completion));

    // --- 4. Create the Web Router ---
    let mut app = build_router(app_state);
    if let Some(origin) = &config.cors_origin {
        let origin = origin.parse::<HeaderValue>().map_err(|e| {
            ApiError::Internal(format!("Invalid CORS origin '{}': {}", origin, e))
        })?;
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]);
        app = app.layer(cors);
        info!("CORS enabled for the configured origin");
    }

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
