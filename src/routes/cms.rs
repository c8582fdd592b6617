use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/createDoc", post(create_doc))
}

/// Forwards the body to the CMS untouched. Every failure becomes a 500
/// carrying the raw message.
async fn create_doc(State(state): State<AppState>, Json(document): Json<Value>) -> Response {
    match state.cms.create(document).await {
        Ok(created) => (StatusCode::OK, Json(created)).into_response(),
        Err(err) => {
            error!("cms create failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
