/**
 * Page Routes
 * CRUD + duplicate endpoints for landing pages. Handlers stay thin; the
 * store keeps the persisted record and the generated artifact in sync.
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::engine::page::{NewPageRequest, Page, UpdatePageRequest};
use crate::routes::engine_error;
use crate::store::SiteStore;

/// Success envelope for mutating page operations.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub success: bool,
    pub page: Page,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /api/pages
pub async fn list_pages(State(store): State<Arc<SiteStore>>) -> impl IntoResponse {
    match store.list_pages().await {
        Ok(pages) => (StatusCode::OK, Json(pages)).into_response(),
        Err(err) => engine_error(err).into_response(),
    }
}

/// GET /api/pages/{id}
pub async fn get_page(
    State(store): State<Arc<SiteStore>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match store.get_page(&id).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => engine_error(err).into_response(),
    }
}

/// POST /api/pages
pub async fn create_page(
    State(store): State<Arc<SiteStore>>,
    Json(payload): Json<NewPageRequest>,
) -> impl IntoResponse {
    match store.create_page(payload).await {
        Ok(page) => (
            StatusCode::OK,
            Json(PageResponse {
                success: true,
                page,
            }),
        )
            .into_response(),
        Err(err) => engine_error(err).into_response(),
    }
}

/// PUT /api/pages/{id}
pub async fn update_page(
    State(store): State<Arc<SiteStore>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePageRequest>,
) -> impl IntoResponse {
    match store.update_page(&id, payload).await {
        Ok(page) => (
            StatusCode::OK,
            Json(PageResponse {
                success: true,
                page,
            }),
        )
            .into_response(),
        Err(err) => engine_error(err).into_response(),
    }
}

/// POST /api/pages/{id}/duplicate
pub async fn duplicate_page(
    State(store): State<Arc<SiteStore>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match store.duplicate_page(&id).await {
        Ok(page) => (
            StatusCode::OK,
            Json(PageResponse {
                success: true,
                page,
            }),
        )
            .into_response(),
        Err(err) => engine_error(err).into_response(),
    }
}

/// DELETE /api/pages/{id}
pub async fn delete_page(
    State(store): State<Arc<SiteStore>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match store.delete_page(&id).await {
        Ok(()) => (StatusCode::OK, Json(DeleteResponse { success: true })).into_response(),
        Err(err) => engine_error(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::theme::ThemeCatalog;
    use crate::store::StoreConfig;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{get, post};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn pages_router() -> Router {
        let data_dir = std::env::temp_dir().join(format!("scentpage-pages-{}", Uuid::new_v4()));
        let store = Arc::new(SiteStore::new(
            StoreConfig { data_dir },
            ThemeCatalog::builtin(),
        ));
        Router::new()
            .route("/api/pages", get(list_pages).post(create_page))
            .route(
                "/api/pages/{id}",
                get(get_page).put(update_page).delete(delete_page),
            )
            .route("/api/pages/{id}/duplicate", post(duplicate_page))
            .with_state(store)
    }

    async fn request(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_create_then_get_page() {
        let app = pages_router();
        let (status, body) = request(
            &app,
            "POST",
            "/api/pages",
            Some(json!({ "brandName": "Noor", "themeId": "modern-luxury" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["page"]["themeName"], "Modern Luxury");
        assert_eq!(body["page"]["sections"].as_array().unwrap().len(), 6);

        let id = body["page"]["id"].as_str().unwrap();
        let (status, fetched) = request(&app, "GET", &format!("/api/pages/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["brandName"], "Noor");
    }

    #[tokio::test]
    async fn test_create_without_brand_returns_bad_request() {
        let app = pages_router();
        let (status, body) = request(
            &app,
            "POST",
            "/api/pages",
            Some(json!({ "themeId": "modern-luxury" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Brand name and theme are required");
    }

    #[tokio::test]
    async fn test_create_with_invalid_theme_returns_bad_request() {
        let app = pages_router();
        let (status, body) = request(
            &app,
            "POST",
            "/api/pages",
            Some(json!({ "brandName": "Noor", "themeId": "neon-rave" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid theme");
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let app = pages_router();
        let (_, created) = request(
            &app,
            "POST",
            "/api/pages",
            Some(json!({ "brandName": "Noor", "themeId": "modern-luxury" })),
        )
        .await;
        let id = created["page"]["id"].as_str().unwrap().to_string();

        let (status, body) = request(
            &app,
            "PUT",
            &format!("/api/pages/{}", id),
            Some(json!({ "tagline": "", "themeId": "luxury-oud" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"]["tagline"], "Luxury Scents. Timeless Elegance.");
        assert_eq!(body["page"]["themeName"], "Luxury Oud");
    }

    #[tokio::test]
    async fn test_duplicate_appends_copy_suffix() {
        let app = pages_router();
        let (_, created) = request(
            &app,
            "POST",
            "/api/pages",
            Some(json!({ "brandName": "Noor", "themeId": "modern-luxury" })),
        )
        .await;
        let id = created["page"]["id"].as_str().unwrap().to_string();

        let (status, body) =
            request(&app, "POST", &format!("/api/pages/{}/duplicate", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"]["brandName"], "Noor (Copy)");
        assert_ne!(body["page"]["id"], created["page"]["id"]);
    }

    #[tokio::test]
    async fn test_delete_then_not_found() {
        let app = pages_router();
        let (_, created) = request(
            &app,
            "POST",
            "/api/pages",
            Some(json!({ "brandName": "Noor", "themeId": "modern-luxury" })),
        )
        .await;
        let id = created["page"]["id"].as_str().unwrap().to_string();

        let (status, body) = request(&app, "DELETE", &format!("/api/pages/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = request(&app, "DELETE", &format!("/api/pages/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_starts_empty() {
        let app = pages_router();
        let (status, body) = request(&app, "GET", "/api/pages", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
