/**
 * Assistant Routes
 * Heuristic theme suggestion and copy generation consumed by the editor UI.
 */
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::assistant::{generate_copy, suggest_theme};
use crate::engine::theme::Theme;
use crate::store::SiteStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestThemeRequest {
    #[serde(default)]
    pub perfume_type: String,
    #[serde(default)]
    pub mood: String,
}

/// Score 0 means no keyword matched and the theme was picked at random.
#[derive(Debug, Serialize)]
pub struct SuggestThemeResponse {
    pub theme: Theme,
    pub score: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCopyRequest {
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub perfume_type: String,
    #[serde(default)]
    pub mood: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCopyResponse {
    pub tagline: String,
    pub about_text: String,
}

/// POST /api/ai/suggest-theme
pub async fn suggest_theme_handler(
    State(store): State<Arc<SiteStore>>,
    Json(payload): Json<SuggestThemeRequest>,
) -> impl IntoResponse {
    let (theme, score) = suggest_theme(store.catalog(), &payload.perfume_type, &payload.mood);
    Json(SuggestThemeResponse {
        theme: theme.clone(),
        score,
    })
}

/// POST /api/ai/generate-copy
pub async fn generate_copy_handler(
    Json(payload): Json<GenerateCopyRequest>,
) -> impl IntoResponse {
    let (tagline, about_text) =
        generate_copy(&payload.brand_name, &payload.perfume_type, &payload.mood);
    Json(GenerateCopyResponse {
        tagline,
        about_text,
    })
}
