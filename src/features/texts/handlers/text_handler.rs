use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::texts::dtos::{
    CreateTextDto, TextListResponseDto, TextMutationResponseDto, TextResponseDto, UpdateTextDto,
};
use crate::features::texts::services::TextService;
use crate::shared::types::{ErrorResponse, MessageResponse};

/// Create a text document
#[utoipa::path(
    post,
    path = "/api/texts",
    tag = "texts",
    request_body = CreateTextDto,
    responses(
        (status = 201, description = "Text created successfully", body = TextMutationResponseDto),
        (status = 400, description = "Title or content missing", body = ErrorResponse)
    )
)]
pub async fn create_text(
    State(service): State<Arc<TextService>>,
    AppJson(dto): AppJson<CreateTextDto>,
) -> Result<(StatusCode, Json<TextMutationResponseDto>)> {
    let text = service.create(dto.into_fields()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(TextMutationResponseDto {
            message: "Text created successfully".to_string(),
            text,
        }),
    ))
}

/// List text documents without their content, most recently modified first
#[utoipa::path(
    get,
    path = "/api/texts",
    tag = "texts",
    responses(
        (status = 200, description = "Text summaries", body = TextListResponseDto),
        (status = 500, description = "Text store unreadable", body = ErrorResponse)
    )
)]
pub async fn list_texts(
    State(service): State<Arc<TextService>>,
) -> Result<Json<TextListResponseDto>> {
    let texts = service.list().await?;
    Ok(Json(TextListResponseDto { texts }))
}

/// Get a text document by id
#[utoipa::path(
    get,
    path = "/api/texts/{id}",
    tag = "texts",
    params(("id" = String, Path, description = "Text id (12 hex characters)")),
    responses(
        (status = 200, description = "Text document", body = TextResponseDto),
        (status = 404, description = "Text not found", body = ErrorResponse)
    )
)]
pub async fn get_text(
    State(service): State<Arc<TextService>>,
    Path(id): Path<String>,
) -> Result<Json<TextResponseDto>> {
    let text = service.get(&id).await?;
    Ok(Json(TextResponseDto { text }))
}

/// Update a text document
///
/// Title and content are replaced; the author only when present in the body.
#[utoipa::path(
    put,
    path = "/api/texts/{id}",
    tag = "texts",
    params(("id" = String, Path, description = "Text id (12 hex characters)")),
    request_body = UpdateTextDto,
    responses(
        (status = 200, description = "Text updated successfully", body = TextMutationResponseDto),
        (status = 400, description = "Title or content missing", body = ErrorResponse),
        (status = 404, description = "Text not found", body = ErrorResponse)
    )
)]
pub async fn update_text(
    State(service): State<Arc<TextService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateTextDto>,
) -> Result<Json<TextMutationResponseDto>> {
    // Missing fields are reported before a missing record
    let text = service.update(&id, dto.into_fields()?).await?;
    Ok(Json(TextMutationResponseDto {
        message: "Text updated successfully".to_string(),
        text,
    }))
}

/// Delete a text document
#[utoipa::path(
    delete,
    path = "/api/texts/{id}",
    tag = "texts",
    params(("id" = String, Path, description = "Text id (12 hex characters)")),
    responses(
        (status = 200, description = "Text deleted successfully", body = MessageResponse),
        (status = 404, description = "Text not found", body = ErrorResponse)
    )
)]
pub async fn delete_text(
    State(service): State<Arc<TextService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Text deleted successfully")))
}
