use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::texts::dtos::{TextDto, TextFields, TextSummaryDto};
use crate::features::texts::models::TextRecord;
use crate::modules::storage::LocalStore;
use crate::shared::constants::{DEFAULT_AUTHOR, TEXT_ID_LEN};
use crate::shared::timestamp;
use crate::shared::validation::is_safe_path_segment;

/// Service for text document operations
pub struct TextService {
    store: LocalStore,
}

impl TextService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Create a text document under a fresh 12 hex character id
    ///
    /// Ids are not checked for collisions; 48 random bits make one
    /// vanishingly unlikely for a store of this kind.
    pub async fn create(&self, fields: TextFields) -> Result<TextDto> {
        let now = timestamp::now();

        let record = TextRecord {
            id: generate_id(),
            title: fields.title.trim().to_string(),
            content: fields.content,
            created: now,
            modified: now,
            author: normalize_author(fields.author.as_deref()),
        };

        self.save(&record).await?;
        info!("Text created: id={}, author={}", record.id, record.author);

        Ok(record.into())
    }

    /// List summaries of every readable record, most recently modified first
    pub async fn list(&self) -> Result<Vec<TextSummaryDto>> {
        let mut texts = Vec::new();

        for entry in self.store.entries().await? {
            let Some(id) = TextRecord::id_from_file_name(&entry.name) else {
                continue;
            };
            match self.load(id).await {
                Ok(Some(record)) => texts.push(TextSummaryDto::from(record)),
                Ok(None) => {}
                Err(e) => warn!("Skipping text record {}: {}", entry.name, e),
            }
        }

        texts.sort_by(|a, b| b.modified.cmp(&a.modified));
        debug!("Listed {} texts", texts.len());

        Ok(texts)
    }

    /// Get one text document with its full content
    pub async fn get(&self, id: &str) -> Result<TextDto> {
        let record = self.find(id).await?;
        Ok(record.into())
    }

    /// Replace title and content of an existing document.
    ///
    /// The author changes only when supplied; `id` and `created` never change
    /// and `modified` never moves backwards.
    pub async fn update(&self, id: &str, fields: TextFields) -> Result<TextDto> {
        let mut record = self.find(id).await?;

        record.title = fields.title.trim().to_string();
        record.content = fields.content;
        record.modified = timestamp::now().max(record.modified);
        if let Some(author) = fields.author.as_deref() {
            record.author = normalize_author(Some(author));
        }

        self.save(&record).await?;
        info!("Text updated: id={}", record.id);

        Ok(record.into())
    }

    /// Delete a text document
    pub async fn delete(&self, id: &str) -> Result<()> {
        check_id(id)?;

        if !self.store.remove(&TextRecord::file_name(id)).await? {
            return Err(text_not_found());
        }

        info!("Text deleted: id={}", id);
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<TextRecord> {
        check_id(id)?;

        match self.load(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(text_not_found()),
            Err(AppError::Serialization(e)) => {
                warn!("Text record {} is unreadable: {}", id, e);
                Err(text_not_found())
            }
            Err(e) => Err(e),
        }
    }

    async fn load(&self, id: &str) -> Result<Option<TextRecord>> {
        let Some(data) = self.store.read(&TextRecord::file_name(id)).await? else {
            return Ok(None);
        };
        Ok(Some(TextRecord::from_json(&data)?))
    }

    async fn save(&self, record: &TextRecord) -> Result<()> {
        let data = record.to_json()?;
        self.store
            .write(&TextRecord::file_name(&record.id), &data)
            .await
    }
}

fn normalize_author(author: Option<&str>) -> String {
    match author.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_AUTHOR.to_string(),
    }
}

fn generate_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..TEXT_ID_LEN].to_string()
}

fn check_id(id: &str) -> Result<()> {
    if is_safe_path_segment(id) {
        Ok(())
    } else {
        Err(AppError::Validation("Invalid text id".to_string()))
    }
}

fn text_not_found() -> AppError {
    AppError::NotFound("Text not found".to_string())
}
