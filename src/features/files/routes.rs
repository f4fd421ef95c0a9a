use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers::{delete_file, download_file, list_files, upload_file};
use crate::features::files::services::FileService;

/// Create routes for the files feature
///
/// The service's upload limit bounds the whole multipart request of the
/// upload route.
pub fn routes(file_service: Arc<FileService>) -> Router {
    let max_upload_size = file_service.max_upload_size();

    Router::new()
        .route(
            "/api/upload",
            post(upload_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/api/files", get(list_files))
        .route("/api/download/{filename}", get(download_file))
        .route("/api/delete/{filename}", delete(delete_file))
        .with_state(file_service)
}
