//! Image upload endpoint.
//!
//! Accepts `multipart/form-data` with one or more file fields, stores each
//! file through the configured [`crate::storage::ImageStore`] and returns
//! the public URLs. The stored URLs are what clients put into the `images`
//! arrays of cars and parts.

use crate::app::AppState;
use crate::errors::ApiError;
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedImages {
    /// Public URL paths of the stored files, in upload order.
    pub urls: Vec<String>,
}

fn allowed_extension(file_name: &str) -> Result<String, ApiError> {
    let extension = file_name
        .rsplit('.')
        .next()
        .filter(|ext| !ext.is_empty() && *ext != file_name)
        .map(str::to_lowercase)
        .ok_or_else(|| {
            ApiError::bad_request(format!("file '{file_name}' has no extension"))
        })?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::bad_request(format!(
            "unsupported image type '{extension}' (allowed: {})",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }
    Ok(extension)
}

#[utoipa::path(
    post,
    path = "/",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "One or more image files (jpg, jpeg, png, webp, gif)"),
    responses(
        (status = 201, description = "Files stored", body = ApiResponse<UploadedImages>),
        (status = 400, description = "No file, empty file, or unsupported type")
    ),
    operation_id = "upload_images",
    summary = "Upload images",
    tag = "uploads"
)]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedImages>>), ApiError> {
    let mut urls = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(format!("invalid multipart payload: {err}")))?
    {
        // Fields without a filename are form values, not uploads.
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let extension = allowed_extension(&file_name)?;
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::bad_request(format!("failed to read '{file_name}': {err}")))?;
        if bytes.is_empty() {
            return Err(ApiError::bad_request(format!("file '{file_name}' is empty")));
        }
        urls.push(state.images.store(&extension, &bytes).await?);
    }

    if urls.is_empty() {
        return Err(ApiError::bad_request(
            "the multipart payload contains no file",
        ));
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UploadedImages { urls })),
    ))
}

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(upload_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allowlist() {
        assert_eq!(allowed_extension("photo.jpg").unwrap(), "jpg");
        assert_eq!(allowed_extension("photo.JPEG").unwrap(), "jpeg");
        assert_eq!(allowed_extension("scan.webp").unwrap(), "webp");
        assert!(allowed_extension("archive.zip").is_err());
        assert!(allowed_extension("malware.exe").is_err());
    }

    #[test]
    fn test_extension_requires_a_dot() {
        assert!(allowed_extension("noextension").is_err());
        assert!(allowed_extension("trailingdot.").is_err());
    }
}
