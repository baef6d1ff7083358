//! Product JSON API tests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use inventory_integration_tests::{TestApp, tee};
use serde_json::json;

// =============================================================================
// Create / Read
// =============================================================================

#[tokio::test]
async fn test_create_normalizes_sku_and_size() {
    let mut app = TestApp::logged_in().await;

    let res = app
        .post_json(
            "/api/products",
            &json!({
                "name": "Basic Tee",
                "sku": "ts-1",
                "price": 19.99,
                "size": "m",
                "quantity": 10,
            }),
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    let body = res.json();
    assert_eq!(body["sku"], "TS-1");
    assert_eq!(body["size"], "M");
    assert_eq!(body["price"], 19.99);
    assert_eq!(body["quantity"], 10);
    assert_eq!(body["color"], serde_json::Value::Null);
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let mut app = TestApp::logged_in().await;

    let created = app
        .post_json(
            "/api/products",
            &json!({
                "name": "  Zip Hoodie ",
                "sku": " hd-zip ",
                "price": "189.00",
                "size": "xl",
                "color": " navy ",
                "quantity": "8",
                "brand": "  ",
                "category": "hoodies",
            }),
        )
        .await
        .json();

    let id = created["id"].as_i64().unwrap();
    let res = app.get(&format!("/api/products/{id}")).await;
    assert_eq!(res.status, StatusCode::OK);

    let fetched = res.json();
    assert_eq!(fetched, created);
    assert_eq!(fetched["name"], "Zip Hoodie");
    assert_eq!(fetched["sku"], "HD-ZIP");
    assert_eq!(fetched["color"], "navy");
    assert_eq!(fetched["brand"], serde_json::Value::Null);
    assert_eq!(fetched["category"], "hoodies");
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let mut app = TestApp::logged_in().await;
    for sku in ["a-1", "b-1", "c-1"] {
        let res = app.post_json("/api/products", &tee(sku)).await;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let res = app.get("/api/products").await;
    assert_eq!(res.status, StatusCode::OK);
    let skus: Vec<String> = res
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["sku"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(skus, ["C-1", "B-1", "A-1"]);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_validation_errors() {
    let mut app = TestApp::logged_in().await;

    let cases = [
        (json!({"name": "X", "sku": "x-1", "price": -1, "size": "M", "quantity": 1}), "Invalid price."),
        (json!({"name": "X", "sku": "x-1", "price": 1, "size": "XXL", "quantity": 1}), "Invalid size. Allowed: XS, S, M, L, XL."),
        (json!({"name": "X", "sku": "x-1", "price": 1, "size": "M", "quantity": "abc"}), "Invalid quantity."),
        (json!({"sku": "x-1", "price": 1, "size": "M"}), "Missing required fields: name, quantity."),
    ];

    for (body, message) in cases {
        let res = app.post_json("/api/products", &body).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(res.json()["error"], message, "{body}");
    }

    let list = app.get("/api/products").await.json();
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let mut app = TestApp::logged_in().await;

    let res = app
        .post_raw("/api/products", "application/json", "{not json")
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(
        res.json()["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON body")
    );
}

// =============================================================================
// Uniqueness
// =============================================================================

#[tokio::test]
async fn test_duplicate_sku_is_rejected_case_insensitively() {
    let mut app = TestApp::logged_in().await;

    let first = app.post_json("/api/products", &tee("ts-basic")).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.post_json("/api/products", &tee("TS-BASIC")).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.json()["error"], "SKU must be unique.");

    let list = app.get("/api/products").await.json();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0], first.json());
}

#[tokio::test]
async fn test_update_into_existing_sku_is_rejected() {
    let mut app = TestApp::logged_in().await;
    app.post_json("/api/products", &tee("a-1")).await;
    let b = app.post_json("/api/products", &tee("b-1")).await.json();

    let res = app
        .put_json(&format!("/api/products/{}", b["id"]), &tee("a-1"))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "SKU must be unique.");

    // Keeping its own SKU is fine.
    let res = app
        .put_json(&format!("/api/products/{}", b["id"]), &tee("b-1"))
        .await;
    assert_eq!(res.status, StatusCode::OK);
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let mut app = TestApp::logged_in().await;
    let created = app.post_json("/api/products", &tee("ts-1")).await.json();
    let id = created["id"].as_i64().unwrap();

    let res = app
        .put_json(
            &format!("/api/products/{id}"),
            &json!({
                "name": "Basic Tee v2",
                "sku": "ts-2",
                "price": 55,
                "size": "l",
                "quantity": 0,
            }),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    let updated = res.json();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Basic Tee v2");
    assert_eq!(updated["sku"], "TS-2");
    assert_eq!(updated["size"], "L");
    assert_eq!(updated["quantity"], 0);
    assert_eq!(updated["color"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_update_missing_id_is_not_found_and_changes_nothing() {
    let mut app = TestApp::logged_in().await;
    let created = app.post_json("/api/products", &tee("ts-1")).await.json();

    let res = app.put_json("/api/products/9999", &tee("ts-9")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["error"], "Not found.");

    let list = app.get("/api/products").await.json();
    assert_eq!(list.as_array().unwrap().as_slice(), [created]);
}

#[tokio::test]
async fn test_delete_is_not_idempotent() {
    let mut app = TestApp::logged_in().await;
    let created = app.post_json("/api/products", &tee("ts-1")).await.json();
    let uri = format!("/api/products/{}", created["id"]);

    let first = app.delete(&uri).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert!(first.body.is_empty());

    let second = app.delete(&uri).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);

    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let mut app = TestApp::logged_in().await;

    for res in [
        app.get("/api/products/abc").await,
        app.put_json("/api/products/abc", &tee("x-1")).await,
        app.delete("/api/products/abc").await,
    ] {
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.json()["error"], "Invalid id.");
    }
}

// =============================================================================
// Without authentication
// =============================================================================

#[tokio::test]
async fn test_api_is_open_when_auth_is_disabled() {
    let mut app = TestApp::without_auth().await;

    let res = app.post_json("/api/products", &tee("open-1")).await;
    assert_eq!(res.status, StatusCode::CREATED);

    assert_eq!(app.get("/api/products").await.status, StatusCode::OK);
    // Auth routes are not mounted at all.
    assert_eq!(app.get("/api/auth/me").await.status, StatusCode::NOT_FOUND);
}
