use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    error::AppError,
    models::article::{Article, ArticleMeta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/:slug", get(show))
}

async fn list(State(state): State<AppState>) -> Json<Vec<ArticleMeta>> {
    Json(state.content.list())
}

async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Article>, AppError> {
    state.content.get(&slug).map(Json).ok_or(AppError::NotFound)
}
