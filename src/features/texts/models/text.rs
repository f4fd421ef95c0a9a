use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::constants::TEXT_RECORD_EXTENSION;
use crate::shared::timestamp;

/// Persisted form of a text document, stored as `{id}.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub modified: DateTime<Utc>,
    pub author: String,
}

impl TextRecord {
    /// Name of the store entry holding the record with `id`
    pub fn file_name(id: &str) -> String {
        format!("{}.{}", id, TEXT_RECORD_EXTENSION)
    }

    /// Id encoded in a store entry name, if the entry is a text record
    pub fn id_from_file_name(name: &str) -> Option<&str> {
        name.strip_suffix(TEXT_RECORD_EXTENSION)
            .and_then(|stem| stem.strip_suffix('.'))
            .filter(|id| !id.is_empty())
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    pub fn from_json(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_mapping() {
        assert_eq!(TextRecord::file_name("0123456789ab"), "0123456789ab.json");
        assert_eq!(
            TextRecord::id_from_file_name("0123456789ab.json"),
            Some("0123456789ab")
        );
        assert_eq!(TextRecord::id_from_file_name(".json"), None);
        assert_eq!(TextRecord::id_from_file_name("notes.txt"), None);
        assert_eq!(TextRecord::id_from_file_name("xjson"), None);
    }

    #[test]
    fn test_reads_record_with_naive_timestamps() {
        let raw = r#"{
  "id": "abcdef012345",
  "title": "Legacy",
  "content": "Über",
  "created": "2024-05-01T10:00:00.123456",
  "modified": "2024-05-02T11:30:00.654321",
  "author": "Anonymous"
}"#;
        let record = TextRecord::from_json(raw.as_bytes()).unwrap();

        assert_eq!(record.content, "Über");
        assert!(record.modified > record.created);
        assert_eq!(
            timestamp::format(&record.created),
            "2024-05-01T10:00:00.123456Z"
        );
    }

    #[test]
    fn test_written_json_keeps_field_order_and_unicode() {
        let record = TextRecord {
            id: "abcdef012345".to_string(),
            title: "Grüße".to_string(),
            content: "line one\nline two".to_string(),
            created: timestamp::parse("2024-05-01T10:00:00Z").unwrap(),
            modified: timestamp::parse("2024-05-01T10:00:00Z").unwrap(),
            author: "Anonymous".to_string(),
        };
        let json = String::from_utf8(record.to_json().unwrap()).unwrap();

        let keys: Vec<usize> = [
            "\"id\"",
            "\"title\"",
            "\"content\"",
            "\"created\"",
            "\"modified\"",
            "\"author\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(json.contains("Grüße"));
        assert!(json.contains("\n  \"title\""));
    }
}
