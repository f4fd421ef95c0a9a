use utoipa::{Modify, OpenApi};

use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::features::texts::{dtos as texts_dtos, handlers as texts_handlers};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Files
        files_handlers::upload_file,
        files_handlers::list_files,
        files_handlers::download_file,
        files_handlers::delete_file,
        // Texts
        texts_handlers::create_text,
        texts_handlers::list_texts,
        texts_handlers::get_text,
        texts_handlers::update_text,
        texts_handlers::delete_text,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            // Files
            files_dtos::UploadFileDto,
            files_dtos::UploadFileResponseDto,
            files_dtos::FileInfoDto,
            files_dtos::FileListResponseDto,
            // Texts
            texts_dtos::CreateTextDto,
            texts_dtos::UpdateTextDto,
            texts_dtos::TextDto,
            texts_dtos::TextSummaryDto,
            texts_dtos::TextMutationResponseDto,
            texts_dtos::TextResponseDto,
            texts_dtos::TextListResponseDto,
        )
    ),
    tags(
        (name = "files", description = "File upload, listing, download and deletion"),
        (name = "texts", description = "Plain-text document management"),
    ),
    info(
        title = "Storage Gateway API",
        version = "0.1.0",
        description = "File and text sharing over local disk storage",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
