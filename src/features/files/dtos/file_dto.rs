use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::storage::StoredEntry;
use crate::shared::timestamp;

/// Upload file request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Response DTO for a successful upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadFileResponseDto {
    pub message: String,
    /// Name the file is stored (and downloadable) under
    #[schema(example = "report_1a2b3c4d.pdf")]
    pub filename: String,
    /// Sanitised form of the name the client sent
    #[schema(example = "report.pdf")]
    pub original_name: String,
}

/// One stored file in a listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileInfoDto {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time reported by the filesystem
    #[serde(with = "timestamp")]
    pub modified: DateTime<Utc>,
}

impl From<StoredEntry> for FileInfoDto {
    fn from(entry: StoredEntry) -> Self {
        Self {
            name: entry.name,
            size: entry.size,
            modified: entry.modified,
        }
    }
}

/// Response DTO for the file listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileListResponseDto {
    pub files: Vec<FileInfoDto>,
}

/// Get content type from a file extension (case-insensitive)
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "txt" => "text/plain; charset=utf-8",
        "csv" => "text/csv",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "gif" => "image/gif",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "zip" => "application/zip",
        "rar" => "application/vnd.rar",
        _ => "application/octet-stream",
    }
}
