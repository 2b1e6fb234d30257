use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use medicine_api::domain::Medicine;
use medicine_api::{build_router, create_noop_metrics, create_router, AppState, ErrorBody};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::TestServer;

async fn error_of(response: reqwest::Response) -> String {
    // ---
    response
        .json::<ErrorBody>()
        .await
        .expect("error body should be JSON")
        .error
}

#[tokio::test]
#[serial_test::serial]
async fn router_builds_from_environment() {
    // ---
    std::env::set_var("MEDICINE_METRICS_TYPE", "noop");
    let _router = create_router().await.expect("Should be able to create router");
    std::env::remove_var("MEDICINE_METRICS_TYPE");
}

#[tokio::test]
async fn health_and_root_endpoints_work() {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.json::<serde_json::Value>().await.unwrap(),
        json!({"status": "ok"})
    );

    let response = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("/medicines"));
}

#[tokio::test]
async fn list_returns_seeded_records() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let response = server.client.get(server.url("/medicines")).send().await?;
    assert_eq!(response.status(), 200);

    let medicines: Vec<Medicine> = response.json().await?;
    assert_eq!(
        medicines,
        vec![
            Medicine::new(1, "ABC", "1234", 15.5, 100),
            Medicine::new(2, "EFG", "5678", 12.0, 50),
            Medicine::new(3, "XYZ", "9999", 5.8, 200),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn delete_then_list_and_get() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .delete(server.url("/medicines/2"))
        .send()
        .await?;
    assert_eq!(response.status(), 204);
    assert!(response.bytes().await?.is_empty());

    let medicines: Vec<Medicine> = server
        .client
        .get(server.url("/medicines"))
        .send()
        .await?
        .json()
        .await?;
    let ids: Vec<i64> = medicines.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let response = server.client.get(server.url("/medicines/2")).send().await?;
    assert_eq!(response.status(), 404);
    assert_eq!(error_of(response).await, "Medicine is not exist.");
    Ok(())
}

#[tokio::test]
async fn create_assigns_next_id() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .post(server.url("/medicines"))
        .json(&json!({"name": "NEW", "manufacturer": "M", "price": 1.5, "stock": 10}))
        .send()
        .await?;
    assert_eq!(response.status(), 201);

    let created: Medicine = response.json().await?;
    assert_eq!(created, Medicine::new(4, "NEW", "M", 1.5, 10));

    let fetched: Medicine = server
        .client
        .get(server.url("/medicines/4"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn create_ignores_client_id() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let created: Medicine = server
        .client
        .post(server.url("/medicines"))
        .json(&json!({"id": 1, "name": "DUP"}))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(created.id, 4);
    assert_eq!(server.state.store().get_by_id(1)?.name, "ABC");
    Ok(())
}

#[tokio::test]
async fn update_keeps_path_id() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .put(server.url("/medicines/1"))
        .json(&json!({"id": 99, "name": "RENAMED", "manufacturer": "X", "price": 2.0, "stock": -5}))
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    let updated: Medicine = response.json().await?;
    assert_eq!(updated, Medicine::new(1, "RENAMED", "X", 2.0, -5));
    assert_eq!(server.state.store().get_by_id(1)?, updated);
    assert_eq!(server.state.store().len(), 3);
    Ok(())
}

#[tokio::test]
async fn invalid_ids_are_rejected_before_the_store() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let get = server.client.get(server.url("/medicines/abc"));
    let put = server
        .client
        .put(server.url("/medicines/abc"))
        .header("content-type", "application/json")
        .body("{ not json");
    let delete = server.client.delete(server.url("/medicines/1.5"));

    for request in [get, put, delete] {
        let response = request.send().await?;
        assert_eq!(response.status(), 400);
        assert_eq!(error_of(response).await, "Unavailable ID");
    }

    assert_eq!(server.state.store().len(), 3);
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let get = server.client.get(server.url("/medicines/42"));
    let put = server
        .client
        .put(server.url("/medicines/42"))
        .json(&json!({"name": "GHOST"}));
    let delete = server.client.delete(server.url("/medicines/42"));

    for request in [get, put, delete] {
        let response = request.send().await?;
        assert_eq!(response.status(), 404);
        assert_eq!(error_of(response).await, "Medicine is not exist.");
    }

    assert_eq!(server.state.store().len(), 3);
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let syntax = server
        .client
        .post(server.url("/medicines"))
        .header("content-type", "application/json")
        .body("{ invalid json }");
    let shape = server
        .client
        .post(server.url("/medicines"))
        .json(&json!({"name": "X", "price": "free"}));
    let no_content_type = server
        .client
        .post(server.url("/medicines"))
        .body("{}");
    let bad_update = server
        .client
        .put(server.url("/medicines/1"))
        .header("content-type", "application/json")
        .body("[1, 2");
    let empty_array = server
        .client
        .post(server.url("/medicines"))
        .json(&json!([]));
    let positional_create = server
        .client
        .post(server.url("/medicines"))
        .json(&json!([0, "X", "Y", 1.0, 2]));
    let positional_update = server
        .client
        .put(server.url("/medicines/1"))
        .json(&json!([0, "X", "Y", 1.0, 2]));
    let scalar = server
        .client
        .post(server.url("/medicines"))
        .json(&json!("ABC"));

    for request in [
        syntax,
        shape,
        no_content_type,
        bad_update,
        empty_array,
        positional_create,
        positional_update,
        scalar,
    ] {
        let response = request.send().await?;
        assert_eq!(response.status(), 400);
        assert!(!error_of(response).await.is_empty());
    }

    assert_eq!(server.state.store().len(), 3);
    assert_eq!(server.state.store().get_by_id(1)?.name, "ABC");
    Ok(())
}

#[tokio::test]
async fn invalid_routes_return_404() {
    // ---
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/nonexistent"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn request_counter_matches_concurrent_requests() {
    // ---
    let server = Arc::new(TestServer::new().await);

    let futures = (0..50).map(|i| {
        let server = Arc::clone(&server);
        async move {
            let path = match i % 4 {
                0 => "/medicines",
                1 => "/medicines/1",
                2 => "/medicines/abc",
                _ => "/does-not-exist",
            };
            server.client.get(server.url(path)).send().await
        }
    });

    let responses = futures::future::join_all(futures).await;
    for response in responses {
        response.expect("Request should complete");
    }

    assert_eq!(server.state.requests().get(), 50);
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() -> Result<()> {
    // ---
    let server = Arc::new(TestServer::new().await);

    let futures = (0..20).map(|i| {
        let server = Arc::clone(&server);
        async move {
            let response = server
                .client
                .post(server.url("/medicines"))
                .json(&json!({"name": format!("M{i}")}))
                .send()
                .await?;
            Ok::<Medicine, reqwest::Error>(response.json::<Medicine>().await?)
        }
    });

    let mut ids: Vec<i64> = futures::future::join_all(futures)
        .await
        .into_iter()
        .map(|r| r.map(|m| m.id))
        .collect::<Result<_, _>>()?;
    ids.sort_unstable();

    assert_eq!(ids, (4..24).collect::<Vec<i64>>());
    assert_eq!(server.state.store().len(), 23);
    Ok(())
}

#[tokio::test]
async fn swagger_serves_document_and_ui() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let doc: serde_json::Value = server
        .client
        .get(server.url("/swagger/doc.json"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(doc["info"]["title"], "Pharmacy API");
    assert!(doc["paths"]["/medicines/{id}"]["delete"].is_object());

    let response = server
        .client
        .get(server.url("/swagger/index.html"))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    assert!(response.text().await?.contains("swagger-ui"));
    Ok(())
}

#[tokio::test]
async fn oneshot_delete_on_fresh_router() -> Result<()> {
    // ---
    let state = AppState::with_metrics(create_noop_metrics()?);
    let app = build_router(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/medicines/3")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    assert!(body.is_empty());
    assert_eq!(state.store().len(), 2);
    assert_eq!(state.requests().get(), 1);
    Ok(())
}
