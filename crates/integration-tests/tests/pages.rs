//! HTML product pages.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use inventory_integration_tests::TestApp;
use serde_json::Value;

const HOODIE: &[(&str, &str)] = &[
    ("name", "Zip Hoodie"),
    ("sku", "hd-zip"),
    ("price", "189"),
    ("size", "XL"),
    ("color", "navy"),
    ("quantity", "3"),
    ("brand", ""),
    ("category", "hoodies"),
];

async fn products(app: &mut TestApp) -> Vec<Value> {
    app.get("/api/products")
        .await
        .json()
        .as_array()
        .unwrap()
        .clone()
}

#[tokio::test]
async fn test_index_lists_products() {
    let mut app = TestApp::logged_in().await;
    let res = app.post_form("/add", HOODIE).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), Some("/"));

    let page = app.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    let html = page.text();
    assert!(html.contains("Zip Hoodie"));
    assert!(html.contains("HD-ZIP"));
    assert!(html.contains("189.00 PLN"));
    assert!(html.contains(r#"class="qty low""#));
    assert!(html.contains(r#"action="/add""#));
    assert!(html.contains("admin@example.com"));
}

#[tokio::test]
async fn test_form_add_stores_normalized_product() {
    let mut app = TestApp::logged_in().await;
    app.post_form("/add", HOODIE).await;

    let stored = products(&mut app).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["sku"], "HD-ZIP");
    assert_eq!(stored[0]["price"], 189.0);
    assert_eq!(stored[0]["quantity"], 3);
    assert_eq!(stored[0]["brand"], Value::Null);
}

#[tokio::test]
async fn test_edit_query_prefills_form() {
    let mut app = TestApp::logged_in().await;
    app.post_form("/add", HOODIE).await;
    let id = products(&mut app).await[0]["id"].as_i64().unwrap();

    let html = app.get(&format!("/?edit={id}")).await.text();
    assert!(html.contains(&format!(r#"action="/update/{id}""#)));
    assert!(html.contains(r#"value="Zip Hoodie""#));
    assert!(html.contains(r#"<option value="XL" selected>"#));
    assert!(html.contains(&format!("Editing #{id}")));

    // Unknown or malformed ids fall back to the blank form.
    for query in ["/?edit=9999", "/?edit=abc"] {
        let res = app.get(query).await;
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.text().contains(r#"action="/add""#));
    }
}

#[tokio::test]
async fn test_form_update_and_delete() {
    let mut app = TestApp::logged_in().await;
    app.post_form("/add", HOODIE).await;
    let id = products(&mut app).await[0]["id"].as_i64().unwrap();

    let mut fields = HOODIE.to_vec();
    fields[5] = ("quantity", "12");
    let res = app.post_form(&format!("/update/{id}"), &fields).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(products(&mut app).await[0]["quantity"], 12);

    let res = app.post_form(&format!("/delete/{id}"), &[]).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert!(products(&mut app).await.is_empty());

    let res = app.post_form(&format!("/delete/{id}"), &[]).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.text(), "Not found.");
}

#[tokio::test]
async fn test_form_errors_are_plain_text() {
    let mut app = TestApp::logged_in().await;
    app.post_form("/add", HOODIE).await;

    let res = app.post_form("/add", HOODIE).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.text(), "SKU must be unique.");

    let res = app
        .post_form("/add", &[("name", "X"), ("sku", "x-1"), ("price", "-5")])
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.text(), "Missing required fields: size, quantity.");

    let res = app.post_form("/update/abc", HOODIE).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.text(), "Invalid id.");

    let res = app.post_form("/update/9999", HOODIE).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pages_are_open_when_auth_is_disabled() {
    let mut app = TestApp::without_auth().await;

    let page = app.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.text().contains(r#"action="/logout""#));

    assert_eq!(app.get("/login").await.status, StatusCode::NOT_FOUND);
}
