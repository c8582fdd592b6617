use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::{
    daytrips::DayTripFilter,
    error::AppError,
    models::day_trip::{Base, BaseDayTrips, DayTrip, DayTripSummary},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/grouped", get(grouped))
        .route("/bases", get(bases))
        .route("/slug/:slug", get(by_slug))
        .route("/:id", get(by_id))
}

async fn list(
    State(state): State<AppState>,
    Query(filter): Query<DayTripFilter>,
) -> Result<Json<Vec<DayTripSummary>>, AppError> {
    let trips = state.day_trips.list_day_trips(&filter.normalized()).await?;
    Ok(Json(trips))
}

async fn grouped(State(state): State<AppState>) -> Result<Json<Vec<BaseDayTrips>>, AppError> {
    Ok(Json(state.day_trips.list_grouped_by_base().await?))
}

async fn bases(State(state): State<AppState>) -> Result<Json<Vec<Base>>, AppError> {
    Ok(Json(state.day_trips.list_bases().await?))
}

async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DayTrip>, AppError> {
    Ok(Json(state.day_trips.get_day_trip(&id).await?))
}

async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DayTrip>, AppError> {
    Ok(Json(state.day_trips.get_day_trip_by_slug(&slug).await?))
}
