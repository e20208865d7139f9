pub mod handlers;

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/", get(handlers::health))
        .route("/api/scores", post(handlers::save_score))
        .route("/api/leaderboard", get(handlers::leaderboard))
        .route("/api/stats", get(handlers::stats))
        .route("/api/session/start", post(handlers::start_session))
        .route("/api/session/{session_id}", put(handlers::update_session))
        .route("/api/achievements/unlock", post(handlers::unlock_achievement))
        .route(
            "/api/achievements/{player_name}",
            get(handlers::player_achievements),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Pin the configured frontend origin when one is set, otherwise stay
/// permissive. A malformed origin falls back to permissive rather than
/// refusing to boot.
pub fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    match allowed_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(e) => {
                tracing::warn!(
                    origin = origin,
                    error = %e,
                    "Invalid CORS_ALLOWED_ORIGIN, allowing any origin"
                );
                CorsLayer::permissive()
            }
        },
        None => CorsLayer::permissive(),
    }
}
