//! HTTP surface: the EDL feed endpoint plus the JSON admin API.

pub mod categories;
pub mod edl;
pub mod indicators;
pub mod whitelist;

use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // The EDL endpoint is unauthenticated by design: firewalls
        // fetch it without credentials.
        .route("/edl/:category", get(edl::serve_edl))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/indicators", post(indicators::create_indicator))
        .route("/indicators/reassign", post(indicators::reassign_indicators))
        .route("/indicators/:id", delete(indicators::delete_indicator))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            axum::routing::patch(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/categories/:id/indicators",
            get(indicators::list_category_indicators),
        )
        .route(
            "/whitelist",
            get(whitelist::list_whitelist).post(whitelist::create_whitelist_entry),
        )
        // Wildcard so CIDR tokens with a slash stay addressable.
        .route("/whitelist/*token", delete(whitelist::delete_whitelist_entry))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use palisade_store::{CategorySpec, MemoryStore, NewIndicator};
    use serde_json::json;

    fn test_server() -> (TestServer, MemoryStore) {
        let store = MemoryStore::new();
        let router = build_router(AppState {
            store: store.clone(),
        });
        (TestServer::new(router).unwrap(), store)
    }

    fn make_category(store: &MemoryStore, name: &str) -> palisade_core::types::Category {
        store
            .create_category(CategorySpec {
                name: name.to_string(),
                label: name.to_string(),
                description: String::new(),
                color: "#607d8b".to_string(),
                icon: "shield".to_string(),
                is_default: false,
                expiration_secs: None,
                auto_cleanup: false,
            })
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let (server, _) = test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn edl_serves_tokens_with_no_cache_headers() {
        let (server, store) = test_server();
        let category = make_category(&store, "malware");
        store
            .insert(NewIndicator::manual("203.0.113.7", category.id, ""))
            .unwrap();

        let response = server.get("/edl/malware").await;
        response.assert_status_ok();
        assert!(response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(
            response.headers().get("cache-control").unwrap(),
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(response.text(), "203.0.113.7");
    }

    #[tokio::test]
    async fn edl_empty_category_serves_comment_line() {
        let (server, store) = test_server();
        make_category(&store, "empty");

        let response = server.get("/edl/empty").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "# No entries found");
    }

    #[tokio::test]
    async fn edl_unknown_category_is_404() {
        let (server, _) = test_server();
        let response = server.get("/edl/missing").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn insert_then_duplicate_conflict() {
        let (server, store) = test_server();
        make_category(&store, "malware");

        let response = server
            .post("/api/indicators")
            .json(&json!({
                "token": "evil.example.com",
                "category": "malware",
                "description": "C2 domain"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<serde_json::Value>()["kind"], "fqdn");

        let duplicate = server
            .post("/api/indicators")
            .json(&json!({
                "token": "evil.example.com",
                "category": "malware"
            }))
            .await;
        duplicate.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn whitelisted_token_insert_is_conflict() {
        let (server, store) = test_server();
        make_category(&store, "malware");
        store.add_whitelist_entry("10.0.0.1", "gateway").unwrap();

        let response = server
            .post("/api/indicators")
            .json(&json!({"token": "10.0.0.1", "category": "malware"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn reassign_unknown_target_is_404_and_atomic() {
        let (server, store) = test_server();
        let sources = make_category(&store, "sources");
        let a = store
            .insert(NewIndicator::manual("1.2.3.4", sources.id, ""))
            .unwrap();

        let response = server
            .post("/api/indicators/reassign")
            .json(&json!({
                "ids": [a.id],
                "target_category_id": uuid::Uuid::new_v4()
            }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(store.get(a.id).unwrap().category_id, sources.id);
    }

    #[tokio::test]
    async fn whitelist_cidr_token_deletable_via_wildcard() {
        let (server, store) = test_server();
        store.add_whitelist_entry("10.0.0.0/8", "rfc1918").unwrap();

        let response = server.delete("/api/whitelist/10.0.0.0/8").await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert!(!store.is_whitelisted("10.0.0.0/8"));
    }
}
