use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::texts::handlers;
use crate::features::texts::services::TextService;

/// Create routes for the texts feature
pub fn routes(service: Arc<TextService>) -> Router {
    Router::new()
        .route(
            "/api/texts",
            get(handlers::list_texts).post(handlers::create_text),
        )
        .route(
            "/api/texts/{id}",
            get(handlers::get_text)
                .put(handlers::update_text)
                .delete(handlers::delete_text),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::LocalStore;
    use crate::shared::test_helpers::temp_store;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    async fn server(temp: &TempDir) -> (TestServer, LocalStore) {
        let store = temp_store(temp, "texts").await;
        let service = Arc::new(TextService::new(store.clone()));
        (TestServer::new(routes(service)).unwrap(), store)
    }

    #[tokio::test]
    async fn test_note_lifecycle() {
        let temp = TempDir::new().unwrap();
        let (server, _) = server(&temp).await;

        let created = server
            .post("/api/texts")
            .json(&json!({"title": "Note", "content": "Hello"}))
            .await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        assert_eq!(body["message"], "Text created successfully");
        let text = &body["text"];
        let id = text["id"].as_str().unwrap().to_string();
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(text["author"], "Anonymous");
        assert_eq!(text["created"], text["modified"]);

        let updated = server
            .put(&format!("/api/texts/{}", id))
            .json(&json!({"title": "Note2", "content": "Hello world"}))
            .await;
        updated.assert_status_ok();
        let updated: Value = updated.json();
        assert_eq!(updated["message"], "Text updated successfully");
        assert_eq!(updated["text"]["id"], id.as_str());
        assert_eq!(updated["text"]["title"], "Note2");
        assert_eq!(updated["text"]["author"], "Anonymous");
        assert_eq!(updated["text"]["created"], text["created"]);
        assert!(
            updated["text"]["modified"].as_str().unwrap() >= text["modified"].as_str().unwrap()
        );

        let fetched: Value = server.get(&format!("/api/texts/{}", id)).await.json();
        assert_eq!(fetched["text"]["content"], "Hello world");

        let deleted = server.delete(&format!("/api/texts/{}", id)).await;
        deleted.assert_status_ok();
        assert_eq!(
            deleted.json::<Value>()["message"],
            "Text deleted successfully"
        );

        let gone = server.get(&format!("/api/texts/{}", id)).await;
        gone.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(gone.json::<Value>()["error"], "Text not found");
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let temp = TempDir::new().unwrap();
        let (server, store) = server(&temp).await;

        let response = server
            .post("/api/texts")
            .json(&json!({"title": "No content"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Title and content are required"
        );
        assert!(store.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_malformed_json() {
        let temp = TempDir::new().unwrap();
        let (server, _) = server(&temp).await;

        let response = server
            .post("/api/texts")
            .content_type("application/json")
            .bytes("{\"title\": ".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_validation_precedes_lookup() {
        let temp = TempDir::new().unwrap();
        let (server, _) = server(&temp).await;

        let response = server
            .put("/api/texts/000000000000")
            .json(&json!({"content": "no title"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .put("/api/texts/000000000000")
            .json(&json!({"title": "t", "content": "c"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_text_leaves_store_unchanged() {
        let temp = TempDir::new().unwrap();
        let (server, store) = server(&temp).await;

        server
            .post("/api/texts")
            .json(&json!({"title": "Keep", "content": "me"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.delete("/api/texts/ffffffffffff").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(store.entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_texts_previews() {
        let temp = TempDir::new().unwrap();
        let (server, _) = server(&temp).await;

        let long = "y".repeat(120);
        server
            .post("/api/texts")
            .json(&json!({"title": "Long", "content": long, "author": "  Ada  "}))
            .await
            .assert_status(StatusCode::CREATED);

        let listing: Value = server.get("/api/texts").await.json();
        let texts = listing["texts"].as_array().unwrap();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0]["author"], "Ada");
        assert_eq!(texts[0]["preview"], format!("{}...", "y".repeat(100)));
        assert!(texts[0].get("content").is_none());
    }
}
