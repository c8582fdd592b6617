pub mod articles;
pub mod cms;
pub mod day_trips;

use axum::Router;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let spa = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api/day-trips", day_trips::router())
        .nest("/api/articles", articles::router())
        .merge(cms::router())
        .fallback_service(spa)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
