use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use binjip_map::BoundaryDataset;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use binjip_api::config::ApiConfig;
use binjip_api::router::create_router;
use binjip_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "binjip_api=info,binjip_map=info,binjip_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    let settings = match config.map_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load map settings: {}", e);
            tracing::error!(
                "Remediation:\n\
                1. Check that BINJIP_CONFIG points to a readable TOML file\n\
                2. Verify initial_zoom is between 0 and 19 and fallback_center is [lat, lon]"
            );
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        max_upload_mb = config.max_upload_mb,
        boundary_url = %settings.boundary_url,
        vworld_overlay = settings.tile_api_key.is_some(),
        "Starting Binjip API server"
    );

    let state = match BoundaryDataset::from_settings(&settings).await {
        Ok(boundary) => {
            tracing::info!(features = boundary.feature_count(), "District boundaries loaded");
            AppState::loaded(boundary, settings, config.max_upload_bytes())
        }
        Err(e) => {
            tracing::error!("Failed to load district boundaries: {}", e);
            tracing::error!(
                "Remediation:\n\
                1. Check network access to BINJIP_BOUNDARY_URL\n\
                2. Or download the GeoJSON and set BINJIP_BOUNDARY_PATH\n\
                3. Restart the server; the dashboard reports this error until then"
            );
            AppState::failed(e.to_string(), settings, config.max_upload_bytes())
        }
    };

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid BINJIP_CORS_ORIGIN: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(Arc::new(state)).layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
