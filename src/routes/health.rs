/**
 * Health Routes
 * Endpoints for checking backend health status
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::store::SiteStore;

// Track server start time for uptime calculation
lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Initialize the server start time
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

/// Simple health response
#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub status: String,
}

/// Single service check result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Detailed health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub page_store: ServiceCheck,
    pub theme_catalog: ServiceCheck,
}

/// GET /health - Simple health ping
pub async fn health_ping() -> impl IntoResponse {
    Json(SimpleHealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /health/detailed - uptime plus page-store and catalog checks
pub async fn health_detailed(State(store): State<Arc<SiteStore>>) -> impl IntoResponse {
    let uptime = SERVER_START.elapsed().as_secs();

    let page_store = match store.list_pages().await {
        Ok(pages) => ServiceCheck {
            status: "healthy".to_string(),
            detail: Some(format!("{} pages", pages.len())),
            error: None,
        },
        Err(e) => ServiceCheck {
            status: "unhealthy".to_string(),
            detail: None,
            error: Some(e.to_string()),
        },
    };

    let theme_count = store.catalog().themes().len();
    let theme_catalog = ServiceCheck {
        status: if theme_count > 0 {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        detail: Some(format!("{} themes", theme_count)),
        error: None,
    };

    let overall = if page_store.status == "healthy" && theme_catalog.status == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    (
        if overall == "healthy" {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        },
        Json(DetailedHealthResponse {
            status: overall.to_string(),
            timestamp: Utc::now(),
            uptime,
            checks: HealthChecks {
                page_store,
                theme_catalog,
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::theme::ThemeCatalog;
    use crate::store::StoreConfig;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn health_router() -> Router {
        let data_dir = std::env::temp_dir().join(format!("scentpage-health-{}", Uuid::new_v4()));
        let store = Arc::new(SiteStore::new(
            StoreConfig { data_dir },
            ThemeCatalog::builtin(),
        ));
        Router::new()
            .route("/health", get(health_ping))
            .route("/health/detailed", get(health_detailed))
            .with_state(store)
    }

    #[tokio::test]
    async fn test_health_ping_returns_ok() {
        let res = health_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_detailed_reports_checks() {
        let res = health_router()
            .oneshot(
                Request::get("/health/detailed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: DetailedHealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.checks.theme_catalog.status, "healthy");
    }
}
