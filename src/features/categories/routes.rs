use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Read-only category routes (no authentication required)
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/v1/categories", get(handlers::list_categories))
        .route("/api/v1/categories/{id}", get(handlers::get_category))
        .with_state(service)
}

/// Category writes; the caller layers JWT authentication on top
pub fn protected_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/v1/categories", post(handlers::create_category))
        .route(
            "/api/v1/categories/{id}",
            post(handlers::update_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fake::faker::lorem::en::Word;
    use fake::Fake;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::core::config::PaginationConfig;
    use crate::features::categories::repositories::InMemoryCategoryRepository;
    use crate::shared::test_helpers::with_test_user;

    const BASE: &str = "/api/v1/categories";

    fn app() -> Router {
        let service = Arc::new(CategoryService::new(
            Arc::new(InMemoryCategoryRepository::new()),
            PaginationConfig::default(),
        ));
        Router::new()
            .merge(public_routes(Arc::clone(&service)))
            .merge(with_test_user(protected_routes(service)))
    }

    fn server() -> TestServer {
        TestServer::new(app()).unwrap()
    }

    async fn create(server: &TestServer, name: &str) -> Value {
        let response = server.post(BASE).json(&json!({ "name": name })).await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }

    fn item_url(id: &str) -> String {
        format!("{}/{}", BASE, id)
    }

    #[tokio::test]
    async fn test_create_returns_slugged_category() {
        let server = server();
        let data = create(&server, "Electronics").await;

        assert_eq!(data["name"], "Electronics");
        assert_eq!(data["slug"], "electronics");
        assert!(data["id"].is_string());
        assert!(data["createdAt"].is_string());
        assert!(data["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_update_renames_and_keeps_id() {
        let server = server();
        let created = create(&server, "Electronics").await;
        let id = created["id"].as_str().unwrap();

        let response = server
            .put(&item_url(id))
            .json(&json!({ "name": "Home Appliances" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let data = response.json::<Value>()["data"].clone();
        assert_eq!(data["id"], id);
        assert_eq!(data["name"], "Home Appliances");
        assert_eq!(data["slug"], "home-appliances");

        // POST is an alias for update
        let response = server
            .post(&item_url(id))
            .json(&json!({ "name": "Kitchen" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["data"]["slug"], "kitchen");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let server = server();
        let created = create(&server, "Garden").await;
        let id = created["id"].as_str().unwrap();

        let response = server.delete(&item_url(id)).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Category deleted" })
        );

        let response = server.get(&item_url(id)).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_everywhere() {
        let server = server();
        let id = Uuid::now_v7().to_string();

        let responses = [
            server.get(&item_url(&id)).await,
            server
                .put(&item_url(&id))
                .json(&json!({ "name": "Books" }))
                .await,
            server.delete(&item_url(&id)).await,
        ];
        for response in responses {
            assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
            let body = response.json::<Value>();
            assert_eq!(body["statusCode"], 404);
            assert_eq!(
                body["message"],
                format!("No Category found by this id: {}", id)
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let server = server();
        let response = server.get(&item_url("not-a-uuid")).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["statusCode"], 400);
    }

    #[tokio::test]
    async fn test_get_existing_category() {
        let server = server();
        let created = create(&server, "Books").await;
        let id = created["id"].as_str().unwrap();

        let response = server.get(&item_url(id)).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["data"], created);
    }

    #[tokio::test]
    async fn test_list_defaults() {
        let server = server();
        for name in ["Books", "Garden", "Toys"] {
            create(&server, name).await;
        }

        let response = server.get(BASE).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        let data = body["data"].as_array().unwrap();
        assert_eq!(body["results"], data.len());
        assert_eq!(data.len(), 3);
        assert_eq!(body["paginationResult"]["currentPage"], 1);
        assert_eq!(body["paginationResult"]["numberOfPages"], 1);
        assert!(body["paginationResult"].get("next").is_none());
    }

    #[tokio::test]
    async fn test_list_empty_is_ok() {
        let response = server().get(BASE).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["results"], 0);
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let server = server();
        for name in ["Books", "Garden", "Toys"] {
            create(&server, name).await;
        }

        let response = server
            .get(BASE)
            .add_query_param("page", 2)
            .add_query_param("limit", 1)
            .add_query_param("sort", "name")
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["results"], 1);
        assert_eq!(body["data"][0]["name"], "Garden");
        let pagination = &body["paginationResult"];
        assert_eq!(pagination["currentPage"], 2);
        assert_eq!(pagination["limit"], 1);
        assert_eq!(pagination["numberOfPages"], 3);
        assert_eq!(pagination["next"], 3);
        assert_eq!(pagination["prev"], 1);
    }

    #[tokio::test]
    async fn test_list_filter_search_and_fields() {
        let server = server();
        for name in ["Smart TVs", "TV Mounts", "Books"] {
            create(&server, name).await;
        }

        let response = server.get(BASE).add_query_param("name", "Books").await;
        let body = response.json::<Value>();
        assert_eq!(body["results"], 1);
        assert_eq!(body["data"][0]["slug"], "books");

        let response = server
            .get(BASE)
            .add_query_param("keyword", "TV")
            .add_query_param("sort", "-name")
            .add_query_param("fields", "name")
            .await;
        let body = response.json::<Value>();
        assert_eq!(body["results"], 2);
        assert_eq!(body["data"][0]["name"], "TV Mounts");
        assert_eq!(body["data"][1]["name"], "Smart TVs");
        assert!(body["data"][0].get("slug").is_none());
        assert!(body["data"][0].get("id").is_some());
    }

    #[tokio::test]
    async fn test_list_pagination_uses_collection_total() {
        let server = server();
        for name in ["Smart TVs", "TV Mounts", "Books", "Garden"] {
            create(&server, name).await;
        }

        let response = server
            .get(BASE)
            .add_query_param("keyword", "tv")
            .add_query_param("limit", 1)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["results"], 1);
        assert_eq!(body["paginationResult"]["numberOfPages"], 4);
        assert_eq!(body["paginationResult"]["next"], 2);
    }

    #[tokio::test]
    async fn test_create_non_latin_names() {
        let server = server();
        let data = create(&server, "Электроника").await;
        assert_eq!(data["name"], "Электроника");
        assert_eq!(data["slug"], "elektronika");

        for name in ["Ηλεκτρονικά", "家電製品"] {
            let data = create(&server, name).await;
            assert_eq!(data["name"], name);
            assert!(!data["slug"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_control_characters_are_bad_requests() {
        let server = server();

        let response = server.get(BASE).add_query_param("keyword", "tv\0").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let response = server.post(BASE).json(&json!({ "name": "Books\0" })).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_rejects_invalid_params() {
        let server = server();
        for (key, value) in [
            ("page", "0"),
            ("limit", "abc"),
            ("sort", "color"),
            ("fields", "name,-slug"),
            ("createdAt[gte]", "yesterday"),
            ("color", "red"),
        ] {
            let response = server.get(BASE).add_query_param(key, value).await;
            assert_eq!(
                response.status_code(),
                StatusCode::BAD_REQUEST,
                "{}={} should be rejected",
                key,
                value
            );
        }
    }

    #[tokio::test]
    async fn test_create_validation() {
        let server = server();
        for body in [
            json!({}),
            json!({ "name": "ab" }),
            json!({ "name": "x".repeat(33) }),
            json!({ "name": "   " }),
        ] {
            let response = server.post(BASE).json(&body).await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(response.json::<Value>()["status"], "fail");
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let server = server();
        let name: String = Word().fake();
        let name = format!("{} shop", name);
        create(&server, &name).await;

        let response = server.post(BASE).json(&json!({ "name": name })).await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_writes_require_authentication() {
        let service = Arc::new(CategoryService::new(
            Arc::new(InMemoryCategoryRepository::new()),
            PaginationConfig::default(),
        ));
        let server = TestServer::new(protected_routes(service)).unwrap();

        let response = server.post(BASE).json(&json!({ "name": "Books" })).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}
