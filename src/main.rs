mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::files::{routes as files_routes, FileService};
use crate::features::texts::{routes as texts_routes, TextService};
use crate::modules::storage::LocalStore;
use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Initialize stores
    let file_store = LocalStore::new(config.storage.upload_dir.clone());
    let text_store = LocalStore::new(config.storage.text_dir.clone());
    for store in [&file_store, &text_store] {
        store.ensure_root().await.map_err(|e| {
            anyhow::anyhow!("Failed to create store {}: {}", store.root().display(), e)
        })?;
    }
    tracing::info!(
        "Stores ready: uploads={}, texts={}, max_upload_size={} bytes",
        file_store.root().display(),
        text_store.root().display(),
        config.storage.max_upload_size
    );

    let file_service = Arc::new(FileService::new(
        file_store,
        config.storage.max_upload_size,
    ));
    let text_service = Arc::new(TextService::new(text_store));
    tracing::info!("File and text services initialized");

    let app = build_app(&config, file_service, text_service);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the application router with all middleware layers
fn build_app(
    config: &Config,
    file_service: Arc<FileService>,
    text_service: Arc<TextService>,
) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let api_routes = Router::new()
        .merge(files_routes(file_service))
        .merge(texts_routes(text_service))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size));

    Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AppConfig, StorageConfig, SwaggerConfig};
    use crate::shared::test_helpers::temp_store;
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    async fn test_server(temp: &TempDir) -> TestServer {
        let config = Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_allowed_origins: vec!["*".to_string()],
                max_request_body_size: 1024,
            },
            storage: StorageConfig {
                upload_dir: temp.path().join("uploads"),
                text_dir: temp.path().join("texts"),
                max_upload_size: 4096,
            },
            swagger: SwaggerConfig {
                title: "Test".to_string(),
                version: "0.0.0".to_string(),
                description: "Test".to_string(),
            },
        };
        let file_service = Arc::new(FileService::new(
            temp_store(temp, "uploads").await,
            config.storage.max_upload_size,
        ));
        let text_service = Arc::new(TextService::new(temp_store(temp, "texts").await));

        TestServer::new(build_app(&config, file_service, text_service)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let temp = TempDir::new().unwrap();
        let server = test_server(&temp).await;

        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_cross_origin_requests_allowed() {
        let temp = TempDir::new().unwrap();
        let server = test_server(&temp).await;

        let response = server
            .get("/api/texts")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://elsewhere.test"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            HeaderValue::from_static("*")
        );
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let temp = TempDir::new().unwrap();
        let server = test_server(&temp).await;

        let response = server.get("/api/files").await;

        response.assert_status_ok();
        assert!(response.maybe_header("x-request-id").is_some());
    }

    #[tokio::test]
    async fn test_json_body_limit_applies_to_text_routes() {
        let temp = TempDir::new().unwrap();
        let server = test_server(&temp).await;

        let response = server
            .post("/api/texts")
            .json(&json!({"title": "Big", "content": "z".repeat(4096)}))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let temp = TempDir::new().unwrap();
        let server = test_server(&temp).await;

        let doc: Value = server.get("/api-docs/openapi.json").await.json();
        assert_eq!(doc["info"]["title"], "Test");
    }
}
