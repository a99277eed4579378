mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_empty_cart_is_created_lazily() {
    let app = TestApp::new().await;
    let (id, token) = app.customer("Alice", "alice@example.com").await;

    let (status, body) = app.get("/api/cart", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["customer_id"], id);
    assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["cart"]["total"], 0.0);
}

#[tokio::test]
async fn test_adding_same_book_aggregates_quantity() {
    let app = TestApp::new().await;
    let (_, token) = app.customer("Alice", "alice@example.com").await;
    let dune = app.add_book("Dune", "Frank Herbert", 19.99, 10).await;

    app.post("/api/cart/items", Some(&token), json!({ "book_id": dune }))
        .await;
    let (status, body) = app
        .post(
            "/api/cart/items",
            Some(&token),
            json!({ "book_id": dune, "quantity": 2 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let items = body["cart"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["subtotal"], 59.97);
    assert_eq!(body["cart"]["total_quantity"], 3);

    // Cart operations never touch stock
    assert_eq!(app.stock_of(dune).await, 10);
}

#[tokio::test]
async fn test_adding_beyond_stock_leaves_cart_unchanged() {
    let app = TestApp::new().await;
    let (_, token) = app.customer("Alice", "alice@example.com").await;
    let book = app.add_book("Neuromancer", "William Gibson", 17.99, 3).await;

    let (status, _) = app
        .post(
            "/api/cart/items",
            Some(&token),
            json!({ "book_id": book, "quantity": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/cart/items",
            Some(&token),
            json!({ "book_id": book, "quantity": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = app.get("/api/cart", Some(&token)).await;
    assert_eq!(body["cart"]["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_add_rejects_missing_and_out_of_stock_books() {
    let app = TestApp::new().await;
    let (_, token) = app.customer("Alice", "alice@example.com").await;
    let sold_out = app.add_book("Sold Out", "Nobody", 9.99, 0).await;

    let (status, _) = app
        .post("/api/cart/items", Some(&token), json!({ "book_id": 4242 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .post("/api/cart/items", Some(&token), json!({ "book_id": sold_out }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("out of stock"));

    let (status, _) = app
        .post(
            "/api/cart/items",
            Some(&token),
            json!({ "book_id": sold_out, "quantity": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_item_quantity_rules() {
    let app = TestApp::new().await;
    let (_, token) = app.customer("Alice", "alice@example.com").await;
    let book = app.add_book("The Hobbit", "J.R.R. Tolkien", 18.99, 4).await;

    let (_, body) = app
        .post("/api/cart/items", Some(&token), json!({ "book_id": book }))
        .await;
    let item_id = body["cart"]["items"][0]["id"].as_i64().unwrap();
    let uri = format!("/api/cart/items/{}", item_id);

    let (status, body) = app.put(&uri, Some(&token), json!({ "quantity": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["items"][0]["quantity"], 4);

    let (status, _) = app.put(&uri, Some(&token), json!({ "quantity": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.put(&uri, Some(&token), json!({ "quantity": 0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 0);

    let (status, _) = app.put(&uri, Some(&token), json!({ "quantity": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_touch_another_customers_item() {
    let app = TestApp::new().await;
    let (_, alice) = app.customer("Alice", "alice@example.com").await;
    let (_, bob) = app.customer("Bob", "bob@example.com").await;
    let book = app.add_book("1984", "George Orwell", 14.99, 10).await;

    let (_, body) = app
        .post("/api/cart/items", Some(&alice), json!({ "book_id": book }))
        .await;
    let uri = format!("/api/cart/items/{}", body["cart"]["items"][0]["id"]);

    let (status, _) = app.put(&uri, Some(&bob), json!({ "quantity": 2 })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, Some(&bob)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.delete(&uri, Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_clear_cart() {
    let app = TestApp::new().await;
    let (_, token) = app.customer("Alice", "alice@example.com").await;
    let a = app.add_book("Dune", "Frank Herbert", 19.99, 5).await;
    let b = app.add_book("1984", "George Orwell", 14.99, 5).await;

    app.post("/api/cart/items", Some(&token), json!({ "book_id": a }))
        .await;
    app.post("/api/cart/items", Some(&token), json!({ "book_id": b }))
        .await;

    let (status, body) = app.delete("/api/cart", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["item_count"], 0);

    let (_, body) = app.get("/api/cart", Some(&token)).await;
    assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_cart_requires_login() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/api/cart", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_adding_huge_quantity_on_top_of_a_line_is_rejected() {
    let app = TestApp::new().await;
    let (_, token) = app.customer("Alice", "alice@example.com").await;
    let book = app.add_book("Dune", "Frank Herbert", 19.99, 10).await;

    let (status, _) = app
        .post("/api/cart/items", Some(&token), json!({ "book_id": book }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/cart/items",
            Some(&token),
            json!({ "book_id": book, "quantity": i32::MAX }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["success"], false);

    let (_, body) = app.get("/api/cart", Some(&token)).await;
    let items = body["cart"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 1);
}

#[tokio::test]
async fn test_concurrent_first_visits_share_one_cart() {
    let app = TestApp::new().await;
    let (_, token) = app.customer("Alice", "alice@example.com").await;

    let (first, second) = tokio::join!(
        app.get("/api/cart", Some(&token)),
        app.get("/api/cart", Some(&token))
    );
    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);
    assert_eq!(first.1["cart"]["id"], second.1["cart"]["id"]);
}
