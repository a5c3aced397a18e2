use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use workshopdesk::config::AppConfig;
use workshopdesk::handlers;
use workshopdesk::services::workshop::http::HttpWorkshopApi;
use workshopdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let api = HttpWorkshopApi::new(
        config.workshop_api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    tracing::info!("using workshop backend at {}", config.workshop_api_url);

    let state = Arc::new(AppState {
        config: config.clone(),
        api: Box::new(api),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/appointments",
            get(handlers::appointments::list_appointments),
        )
        .route(
            "/api/appointments/stats",
            get(handlers::appointments::appointment_stats),
        )
        .route(
            "/api/appointments/services",
            get(handlers::appointments::list_service_records),
        )
        .route(
            "/api/appointments/:id",
            get(handlers::appointments::get_appointment),
        )
        .route(
            "/api/appointments/:id/approve",
            post(handlers::appointments::approve_appointment),
        )
        .route(
            "/api/appointments/:id/reject",
            post(handlers::appointments::reject_appointment),
        )
        .route(
            "/api/appointments/:id/complete",
            post(handlers::appointments::complete_appointment),
        )
        .route(
            "/api/projects/:id",
            delete(handlers::appointments::delete_project),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
