/**
 * Upload Routes
 * Multipart logo upload. The stored path is handed back to the client and
 * later attached to a page as `logoPath`; the engine never inspects the
 * image beyond this validation.
 */
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::routes::ErrorResponse;
use crate::store::SiteStore;

const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5MB
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "svg", "webp"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub path: String,
}

fn bad_request(error: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            message: None,
        }),
    )
        .into_response()
}

/// Sniff raster image types from their magic bytes. SVG is text and is
/// validated by extension only.
fn sniff_raster_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }
    match bytes {
        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Some("jpg"),
        // PNG: 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("png"),
        // WebP: RIFF....WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("webp"),
        _ => None,
    }
}

/// POST /api/upload-logo - multipart field `logo`
pub async fn upload_logo(
    State(store): State<Arc<SiteStore>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let upload_dir = store.config().upload_dir();
    if let Err(e) = tokio::fs::create_dir_all(&upload_dir).await {
        tracing::error!("Failed to create upload directory: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to initialize upload directory".to_string(),
                message: None,
            }),
        )
            .into_response();
    }

    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("logo") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => return bad_request("No file uploaded"),
            Err(e) => {
                tracing::error!("Multipart error: {}", e);
                return bad_request("Invalid multipart data");
            }
        }
    };

    let original_name = field.file_name().unwrap_or("unknown").to_string();
    let ext = original_name
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return bad_request("Only image files are allowed");
    }

    let bytes = match field.bytes().await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to read upload bytes: {}", e);
            return bad_request("Failed to read file data");
        }
    };
    if bytes.is_empty() {
        return bad_request("Empty file");
    }
    if bytes.len() > MAX_FILE_SIZE {
        return bad_request("File too large. Maximum size is 5MB.");
    }
    if ext != "svg" && sniff_raster_type(&bytes).is_none() {
        return bad_request("File content does not match an allowed image type.");
    }

    let filename = format!("{}.{}", Uuid::new_v4(), ext);
    let file_path = upload_dir.join(&filename);
    if let Err(e) = tokio::fs::write(&file_path, &bytes).await {
        tracing::error!("Failed to write upload file: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to save file".to_string(),
                message: None,
            }),
        )
            .into_response();
    }

    tracing::info!("Logo uploaded: {} ({} bytes)", filename, bytes.len());
    (
        StatusCode::OK,
        Json(UploadResponse {
            success: true,
            path: format!("/uploads/{}", filename),
            filename,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_raster_type_by_magic_bytes() {
        assert_eq!(sniff_raster_type(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("jpg"));
        assert_eq!(
            sniff_raster_type(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some("png")
        );
        assert_eq!(
            sniff_raster_type(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
            Some("webp")
        );
        assert_eq!(sniff_raster_type(b"<svg xmlns="), None);
        assert_eq!(sniff_raster_type(&[0x00]), None);
    }
}
