use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::texts::models::TextRecord;
use crate::shared::constants::{PREVIEW_ELLIPSIS, PREVIEW_LENGTH};
use crate::shared::timestamp;

/// Message used for every missing title/content failure
pub const MISSING_FIELDS_MESSAGE: &str = "Title and content are required";

/// Request DTO for creating a text document
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTextDto {
    /// Title (required, stored trimmed)
    #[validate(required(message = "Title and content are required"))]
    pub title: Option<String>,

    /// Body text (required, stored as-is)
    #[validate(required(message = "Title and content are required"))]
    pub content: Option<String>,

    /// Author name, "Anonymous" when absent or blank
    pub author: Option<String>,
}

/// Request DTO for replacing a text document
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTextDto {
    #[validate(required(message = "Title and content are required"))]
    pub title: Option<String>,

    #[validate(required(message = "Title and content are required"))]
    pub content: Option<String>,

    /// Replaces the stored author only when present
    pub author: Option<String>,
}

impl CreateTextDto {
    /// Validate the request, then take its fields
    pub fn into_fields(self) -> Result<TextFields> {
        self.validate().map_err(|_| missing_fields())?;
        Ok(TextFields::validated(self.title, self.content, self.author))
    }
}

impl UpdateTextDto {
    /// Validate the request, then take its fields
    pub fn into_fields(self) -> Result<TextFields> {
        self.validate().map_err(|_| missing_fields())?;
        Ok(TextFields::validated(self.title, self.content, self.author))
    }
}

/// Fields of a create or update request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFields {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
}

impl TextFields {
    // Both are `Some` once `required` validation has passed
    fn validated(title: Option<String>, content: Option<String>, author: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_default(),
            content: content.unwrap_or_default(),
            author,
        }
    }
}

fn missing_fields() -> AppError {
    AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())
}

/// Full text document as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TextDto {
    #[schema(example = "3f2a9c0b1d4e")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub modified: DateTime<Utc>,
    pub author: String,
}

impl From<TextRecord> for TextDto {
    fn from(record: TextRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            created: record.created,
            modified: record.modified,
            author: record.author,
        }
    }
}

/// Listing entry: a text document without its full content
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TextSummaryDto {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub modified: DateTime<Utc>,
    /// First 100 characters of the content, followed by "..." when cut
    pub preview: String,
}

impl From<TextRecord> for TextSummaryDto {
    fn from(record: TextRecord) -> Self {
        Self {
            preview: preview(&record.content),
            id: record.id,
            title: record.title,
            author: record.author,
            created: record.created,
            modified: record.modified,
        }
    }
}

/// Response DTO for create and update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TextMutationResponseDto {
    pub message: String,
    pub text: TextDto,
}

/// Response DTO for a single text document
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TextResponseDto {
    pub text: TextDto,
}

/// Response DTO for the text listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TextListResponseDto {
    pub texts: Vec<TextSummaryDto>,
}

/// Shorten `content` to the listing preview, counting characters rather than bytes
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}{}", &content[..cut], PREVIEW_ELLIPSIS),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_content_is_untouched() {
        assert_eq!(preview(""), "");
        assert_eq!(preview("Hello"), "Hello");

        let exact = "a".repeat(PREVIEW_LENGTH);
        assert_eq!(preview(&exact), exact);
    }

    #[test]
    fn test_preview_long_content_is_cut() {
        let long = "b".repeat(PREVIEW_LENGTH + 1);
        let expected = format!("{}{}", "b".repeat(PREVIEW_LENGTH), PREVIEW_ELLIPSIS);
        assert_eq!(preview(&long), expected);
    }

    #[test]
    fn test_preview_counts_characters() {
        let long = "é".repeat(PREVIEW_LENGTH + 5);
        let cut = preview(&long);

        assert_eq!(cut.chars().count(), PREVIEW_LENGTH + PREVIEW_ELLIPSIS.len());
        assert!(cut.starts_with(&"é".repeat(PREVIEW_LENGTH)));
    }

    #[test]
    fn test_required_fields_validation() {
        let complete = CreateTextDto {
            title: Some("Note".to_string()),
            content: Some(String::new()),
            author: None,
        };
        assert!(complete.validate().is_ok());

        let missing_content = CreateTextDto {
            title: Some("Note".to_string()),
            ..Default::default()
        };
        assert!(missing_content.validate().is_err());

        let missing_title = UpdateTextDto {
            content: Some("Hello".to_string()),
            ..Default::default()
        };
        assert!(missing_title.validate().is_err());
    }

    #[test]
    fn test_into_fields() {
        let fields = UpdateTextDto {
            title: Some("Note".to_string()),
            content: Some("Hello".to_string()),
            author: Some("Ada".to_string()),
        }
        .into_fields()
        .unwrap();
        assert_eq!(
            fields,
            TextFields {
                title: "Note".to_string(),
                content: "Hello".to_string(),
                author: Some("Ada".to_string()),
            }
        );

        let missing = CreateTextDto {
            title: Some("Only title".to_string()),
            ..Default::default()
        }
        .into_fields();
        assert!(matches!(
            missing,
            Err(AppError::Validation(msg)) if msg == MISSING_FIELDS_MESSAGE
        ));
    }

    #[test]
    fn test_author_null_deserializes_as_absent() {
        let dto: UpdateTextDto =
            serde_json::from_str(r#"{"title":"t","content":"c","author":null}"#).unwrap();
        assert_eq!(dto.author, None);
    }
}
