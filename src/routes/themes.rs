/**
 * Theme Routes
 * Read-only access to the seeded theme catalog.
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::routes::engine_error;
use crate::store::SiteStore;

/// GET /api/themes - the full catalog, in seed order
pub async fn list_themes(State(store): State<Arc<SiteStore>>) -> impl IntoResponse {
    Json(store.catalog().themes().to_vec())
}

/// GET /api/themes/{id}
pub async fn get_theme(
    State(store): State<Arc<SiteStore>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match store.catalog().get(&id) {
        Ok(theme) => (StatusCode::OK, Json(theme.clone())).into_response(),
        Err(err) => engine_error(err).into_response(),
    }
}
