use axum::{
    body::Body,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::Response,
    Json,
};
use futures::TryStreamExt;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{FileListResponseDto, UploadFileDto, UploadFileResponseDto};
use crate::features::files::services::{file_too_large, FileService};
use crate::shared::types::{ErrorResponse, MessageResponse};

/// Upload a file
///
/// Accepts multipart/form-data with a `file` part. The file is stored under
/// its sanitised name with a random 8 hex character suffix.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "files",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "File upload form",
    ),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadFileResponseDto),
        (status = 400, description = "No file, empty filename or disallowed type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Disk write failed", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(service): State<Arc<FileService>>,
    headers: HeaderMap,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadFileResponseDto>> {
    service.check_declared_size(declared_length(&headers))?;

    let mut multipart = multipart.map_err(|e| {
        debug!("Upload without multipart body: {}", e);
        no_file_provided()
    })?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "file" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        FileService::validate_upload_name(&file_name)?;

        let response = service
            .upload_file(&file_name, field.map_err(multipart_error))
            .await?;
        return Ok(Json(response));
    }

    Err(no_file_provided())
}

/// List all uploaded files, newest first
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    responses(
        (status = 200, description = "Stored files", body = FileListResponseDto),
        (status = 500, description = "File store unreadable", body = ErrorResponse)
    )
)]
pub async fn list_files(
    State(service): State<Arc<FileService>>,
) -> Result<Json<FileListResponseDto>> {
    let files = service.list_files().await?;
    Ok(Json(FileListResponseDto { files }))
}

/// Download a stored file as an attachment
#[utoipa::path(
    get,
    path = "/api/download/{filename}",
    tag = "files",
    params(("filename" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "File content as an attachment"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn download_file(
    State(service): State<Arc<FileService>>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let file = service.download_file(&filename).await?;

    let fallback_name = file.name.replace(['"', '\\'], "_");
    let encoded_name = urlencoding::encode(&file.name);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_LENGTH, file.size)
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"; filename*=UTF-8''{}",
                fallback_name, encoded_name
            ),
        )
        .body(Body::from_stream(file.body))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}

/// Delete a stored file
#[utoipa::path(
    delete,
    path = "/api/delete/{filename}",
    tag = "files",
    params(("filename" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "File deleted successfully", body = MessageResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn delete_file(
    State(service): State<Arc<FileService>>,
    Path(filename): Path<String>,
) -> Result<Json<MessageResponse>> {
    service.delete_file(&filename).await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

fn no_file_provided() -> AppError {
    AppError::Validation("No file provided".to_string())
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

fn multipart_error(e: MultipartError) -> AppError {
    debug!("Failed to read multipart data: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        file_too_large()
    } else {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
    }
}
