#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bookstore::auth::JwtKeys;
use bookstore::config::StaffBootstrap;
use bookstore::infrastructure::AppState;
use bookstore::models::{book, payment, shipping};
use bookstore::{db, seed, server};
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

pub const STAFF_EMAIL: &str = "manager@bookstore.test";
pub const STAFF_PASSWORD: &str = "manager-pass";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = db::init_db("sqlite::memory:")
            .await
            .expect("Failed to init DB");
        let state = AppState::new(db.clone(), JwtKeys::new("integration-test-secret"));
        let router = server::build_router(state, &[]);
        Self { router, db }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method(method);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("DELETE", uri, token, None).await
    }

    /// Register a customer and log in; returns (customer id, token)
    pub async fn customer(&self, name: &str, email: &str) -> (i32, String) {
        let (status, body) = self
            .post(
                "/api/customers/register",
                None,
                json!({
                    "name": name,
                    "email": email,
                    "password": "secret123",
                    "confirm_password": "secret123"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let id = body["customer"]["id"].as_i64().unwrap() as i32;

        let (status, body) = self
            .post(
                "/api/customers/login",
                None,
                json!({ "email": email, "password": "secret123" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        (id, body["token"].as_str().unwrap().to_string())
    }

    /// Bootstrap the staff account and log in with it
    pub async fn staff_token(&self) -> String {
        seed::bootstrap_staff(
            &self.db,
            &StaffBootstrap {
                name: "Manager John".to_string(),
                email: STAFF_EMAIL.to_string(),
                password: STAFF_PASSWORD.to_string(),
            },
        )
        .await
        .unwrap();

        let (status, body) = self
            .post(
                "/api/staff/login",
                None,
                json!({ "email": STAFF_EMAIL, "password": STAFF_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "staff login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn add_book(&self, title: &str, author: &str, price: f64, stock: i32) -> i32 {
        let now = chrono::Utc::now().to_rfc3339();
        let model = book::ActiveModel {
            title: Set(title.to_string()),
            author: Set(author.to_string()),
            price: Set(price),
            stock: Set(stock),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        book::Entity::insert(model)
            .exec(&self.db)
            .await
            .expect("Failed to create book")
            .last_insert_id
    }

    pub async fn add_shipping(&self, name: &str, fee: f64) -> i32 {
        let model = shipping::ActiveModel {
            method_name: Set(name.to_string()),
            fee: Set(fee),
            ..Default::default()
        };
        shipping::Entity::insert(model)
            .exec(&self.db)
            .await
            .expect("Failed to create shipping method")
            .last_insert_id
    }

    pub async fn add_payment(&self, name: &str, status: &str) -> i32 {
        let model = payment::ActiveModel {
            method_name: Set(name.to_string()),
            status: Set(status.to_string()),
            ..Default::default()
        };
        payment::Entity::insert(model)
            .exec(&self.db)
            .await
            .expect("Failed to create payment method")
            .last_insert_id
    }

    pub async fn stock_of(&self, book_id: i32) -> i32 {
        book::Entity::find_by_id(book_id)
            .one(&self.db)
            .await
            .unwrap()
            .expect("book exists")
            .stock
    }
}
