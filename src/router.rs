use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/appointments",
            get(handlers::appointments::list_appointments)
                .post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/recent",
            get(handlers::appointments::recent_appointments),
        )
        .route(
            "/api/appointments/:id",
            put(handlers::appointments::update_appointment)
                .delete(handlers::appointments::delete_appointment),
        )
        .route(
            "/api/carwashes",
            get(handlers::carwashes::list_carwashes).post(handlers::carwashes::create_carwash),
        )
        .route(
            "/api/carwashes/:id",
            put(handlers::carwashes::update_carwash).delete(handlers::carwashes::delete_carwash),
        )
        .route(
            "/api/washbays",
            get(handlers::washbays::list_washbays).post(handlers::washbays::create_washbay),
        )
        .route(
            "/api/washbays/available",
            get(handlers::washbays::available_washbays),
        )
        .route(
            "/api/washbays/:id",
            put(handlers::washbays::update_washbay).delete(handlers::washbays::delete_washbay),
        )
        .route("/api/load-dashboard", get(handlers::load::load_dashboard))
        .route("/api/dashboard/stats", get(handlers::dashboard::stats))
        .route("/api/dashboard/charts", get(handlers::dashboard::charts))
        .route("/api/search", get(handlers::search::search))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(e) => {
            tracing::warn!(origin, error = %e, "invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}
