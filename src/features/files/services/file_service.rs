use axum::body::Bytes;
use futures::Stream;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{
    content_type_for_extension, FileInfoDto, UploadFileResponseDto,
};
use crate::modules::storage::{ByteStream, LocalStore};
use crate::shared::constants::FILE_SUFFIX_LEN;
use crate::shared::validation::{
    base_name, file_extension, is_extension_allowed, is_safe_path_segment, secure_filename,
};

/// A stored file opened for download
pub struct DownloadedFile {
    pub name: String,
    pub content_type: &'static str,
    pub size: u64,
    pub body: ByteStream,
}

/// Service for file operations
pub struct FileService {
    store: LocalStore,
    max_upload_size: usize,
}

impl FileService {
    pub fn new(store: LocalStore, max_upload_size: usize) -> Self {
        Self {
            store,
            max_upload_size,
        }
    }

    /// Largest accepted upload request, in bytes
    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }

    /// Reject an upload whose declared length is over the limit before its body is read
    pub fn check_declared_size(&self, content_length: Option<u64>) -> Result<()> {
        match content_length {
            Some(length) if length > self.max_upload_size as u64 => {
                debug!(
                    "Upload rejected: declared {} bytes, limit {}",
                    length, self.max_upload_size
                );
                Err(file_too_large())
            }
            _ => Ok(()),
        }
    }

    /// Check a client supplied file name before any bytes are read
    pub fn validate_upload_name(filename: &str) -> Result<()> {
        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        if !is_extension_allowed(base_name(filename)) {
            return Err(AppError::Validation("File type not allowed".to_string()));
        }
        Ok(())
    }

    /// Store an uploaded body under a fresh unique name
    ///
    /// # Arguments
    /// * `original_filename` - The name the client sent with the file part
    /// * `body` - The file content, chunk by chunk
    ///
    /// # Returns
    /// The stored name and the sanitised original name
    pub async fn upload_file<S>(
        &self,
        original_filename: &str,
        body: S,
    ) -> Result<UploadFileResponseDto>
    where
        S: Stream<Item = Result<Bytes>>,
    {
        Self::validate_upload_name(original_filename)?;

        let (stored_name, original_name) = stored_name_for(original_filename);
        let size = self.store.write_stream(&stored_name, body).await?;

        info!(
            "File uploaded: stored_name={}, original_name={}, size={}",
            stored_name, original_name, size
        );

        Ok(UploadFileResponseDto {
            message: "File uploaded successfully".to_string(),
            filename: stored_name,
            original_name,
        })
    }

    /// List every stored file, newest first
    pub async fn list_files(&self) -> Result<Vec<FileInfoDto>> {
        let mut files: Vec<FileInfoDto> = self
            .store
            .entries()
            .await?
            .into_iter()
            .map(FileInfoDto::from)
            .collect();

        files.sort_by(|a, b| b.modified.cmp(&a.modified));
        debug!("Listed {} files", files.len());

        Ok(files)
    }

    /// Open a stored file for download
    pub async fn download_file(&self, filename: &str) -> Result<DownloadedFile> {
        check_path_name(filename)?;

        let (entry, body) = self
            .store
            .open(filename)
            .await?
            .ok_or_else(file_not_found)?;

        let content_type = file_extension(filename)
            .map(content_type_for_extension)
            .unwrap_or("application/octet-stream");

        debug!("Serving file {} ({} bytes)", filename, entry.size);

        Ok(DownloadedFile {
            name: entry.name,
            content_type,
            size: entry.size,
            body,
        })
    }

    /// Delete a stored file
    pub async fn delete_file(&self, filename: &str) -> Result<()> {
        check_path_name(filename)?;

        if !self.store.remove(filename).await? {
            return Err(file_not_found());
        }

        info!("File deleted: {}", filename);
        Ok(())
    }
}

/// Build `{stem}_{suffix}.{ext}` from an already validated client file name.
///
/// Returns the stored name and the sanitised original name.
fn stored_name_for(original_filename: &str) -> (String, String) {
    let base = base_name(original_filename);
    let (stem, extension) = base.rsplit_once('.').unwrap_or((base, ""));

    let sanitized_stem = secure_filename(stem);
    let safe_stem = if sanitized_stem.is_empty() {
        "file".to_string()
    } else {
        sanitized_stem
    };
    let safe_extension = secure_filename(extension);

    let suffix = Uuid::new_v4().simple().to_string();
    let suffix = &suffix[..FILE_SUFFIX_LEN];

    let stored_name = if safe_extension.is_empty() {
        format!("{}_{}", safe_stem, suffix)
    } else {
        format!("{}_{}.{}", safe_stem, suffix, safe_extension)
    };

    let original_name = match secure_filename(base) {
        name if name.starts_with(safe_stem.as_str()) => name,
        _ => format!("{}.{}", safe_stem, safe_extension),
    };

    (stored_name, original_name)
}

fn check_path_name(filename: &str) -> Result<()> {
    if is_safe_path_segment(filename) {
        Ok(())
    } else {
        Err(AppError::Validation("Invalid filename".to_string()))
    }
}

fn file_not_found() -> AppError {
    AppError::NotFound("File not found".to_string())
}

pub fn file_too_large() -> AppError {
    AppError::PayloadTooLarge("File too large".to_string())
}
