use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use roster::config::{Config, StoreBackend};
use roster::store::MemoryStore;

/// A running test server over a fresh in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create a user, return (body, status).
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        role: &str,
        status: &str,
    ) -> (Value, StatusCode) {
        self.post(
            "/users",
            &json!({ "name": name, "email": email, "role": role, "status": status }),
        )
        .await
    }

    /// Create a user that is expected to succeed, return the user JSON.
    pub async fn create_user_ok(&self, name: &str, email: &str, role: &str, status: &str) -> Value {
        let (body, status_code) = self.create_user(name, email, role, status).await;
        assert_eq!(
            status_code,
            StatusCode::CREATED,
            "create user failed: {body}"
        );
        body
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app on an OS-assigned port with an empty in-memory store.
pub async fn spawn_app() -> TestApp {
    let config = Config {
        backend: StoreBackend::Memory,
        database_url: None,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 1_048_576,
        seed_demo: false,
        log_level: "warn".to_string(),
    };

    let app = roster::build_app(Arc::new(MemoryStore::new()), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::new();

    TestApp { addr, client }
}
