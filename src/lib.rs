//! Scentpage Backend - landing page builder for perfume brands.
//! The library wires the page engine, store and routes; main.rs only
//! delegates here.

pub mod engine;
pub mod logging;
pub mod routes;
pub mod store;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir, trace::TraceLayer,
};

use crate::engine::theme::ThemeCatalog;
use crate::store::{SiteStore, StoreConfig};

// Uploads are capped at 5MB in the handler; leave headroom for the
// multipart framing.
const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN.
/// Falls back to localhost dev origins.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            vec![
                "http://localhost:3000".parse().unwrap(),
                "http://127.0.0.1:3000".parse().unwrap(),
            ]
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Create and configure the application router.
pub fn create_app(store: Arc<SiteStore>) -> Router {
    let cors = configure_cors();
    let generated_dir = store.config().generated_dir();
    let upload_dir = store.config().upload_dir();

    Router::new()
        .route("/api/themes", get(routes::themes::list_themes))
        .route("/api/themes/{id}", get(routes::themes::get_theme))
        .route(
            "/api/pages",
            get(routes::pages::list_pages).post(routes::pages::create_page),
        )
        .route(
            "/api/pages/{id}",
            get(routes::pages::get_page)
                .put(routes::pages::update_page)
                .delete(routes::pages::delete_page),
        )
        .route(
            "/api/pages/{id}/duplicate",
            post(routes::pages::duplicate_page),
        )
        .route(
            "/api/ai/suggest-theme",
            post(routes::assistant::suggest_theme_handler),
        )
        .route(
            "/api/ai/generate-copy",
            post(routes::assistant::generate_copy_handler),
        )
        .route("/api/upload-logo", post(routes::upload::upload_logo))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .nest_service("/generated", ServeDir::new(generated_dir))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(store)
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Guards MUST be held for the process lifetime; dropping them early
    // shuts down background log-writer threads and loses buffered lines.
    let _log_guards = logging::init();

    routes::health::init_start_time();

    let config = StoreConfig::default();
    let catalog = match ThemeCatalog::load(&config.themes_file()) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load theme catalog: {}. Using built-in seed.", e);
            ThemeCatalog::builtin()
        }
    };
    tracing::info!(
        "Page store at {} with {} themes",
        config.data_dir.display(),
        catalog.themes().len()
    );
    let store = Arc::new(SiteStore::new(config, catalog));

    let app = create_app(store);

    // Bind address is configurable via HOST / PORT env vars, defaulting to
    // 127.0.0.1:5000 so existing dev setups keep working unchanged.
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST/PORT configuration");
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_create_app_returns_router() {
        let data_dir = std::env::temp_dir().join(format!("scentpage-app-{}", Uuid::new_v4()));
        let store = Arc::new(SiteStore::new(
            StoreConfig { data_dir },
            ThemeCatalog::builtin(),
        ));
        let _app = create_app(store);
    }
}
