//! Shared test fixtures: a fake inference upstream served by axum on a
//! local port, and helpers to build a service over an in-memory database.

#![allow(dead_code)]

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use peopledir_common::config::ApiSettings;
use peopledir_common::db::init_memory_database;
use peopledir_svc::db::SqliteUserStore;
use peopledir_svc::inference::HttpUserApi;
use peopledir_svc::service::UserService;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted answers of the three inference services
#[derive(Clone)]
pub struct Upstream {
    pub age: Value,
    pub gender: Value,
    pub nation: Value,
    pub age_delay: Duration,
    /// (service, name) per request, in arrival order
    pub hits: Arc<Mutex<Vec<(String, String)>>>,
}

impl Upstream {
    pub fn new(age: Value, gender: Value, nation: Value) -> Self {
        Self {
            age,
            gender,
            nation,
            age_delay: Duration::ZERO,
            hits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Ivan: 42 years, male 0.9, RU 0.7 / UA 0.8
    pub fn ivan() -> Self {
        Self::new(
            serde_json::json!({"count": 10, "name": "Ivan", "age": 42}),
            serde_json::json!({"count": 10, "name": "Ivan", "gender": "male", "probability": 0.9}),
            serde_json::json!({"count": 10, "name": "Ivan", "country": [
                {"country_id": "RU", "probability": 0.7},
                {"country_id": "UA", "probability": 0.8}
            ]}),
        )
    }

    pub fn hits(&self) -> Vec<(String, String)> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_for(&self, service: &str) -> usize {
        self.hits().iter().filter(|(s, _)| s == service).count()
    }

    fn record(&self, service: &str, params: &HashMap<String, String>) {
        let name = params.get("name").cloned().unwrap_or_default();
        self.hits.lock().unwrap().push((service.to_string(), name));
    }

    /// Serve on 127.0.0.1:<random>; returns matching API settings
    pub async fn spawn(self) -> ApiSettings {
        async fn age(
            State(up): State<Upstream>,
            Query(params): Query<HashMap<String, String>>,
        ) -> Json<Value> {
            up.record("age", &params);
            tokio::time::sleep(up.age_delay).await;
            Json(up.age.clone())
        }
        async fn gender(
            State(up): State<Upstream>,
            Query(params): Query<HashMap<String, String>>,
        ) -> Json<Value> {
            up.record("gender", &params);
            Json(up.gender.clone())
        }
        async fn nation(
            State(up): State<Upstream>,
            Query(params): Query<HashMap<String, String>>,
        ) -> Json<Value> {
            up.record("nation", &params);
            Json(up.nation.clone())
        }

        let app = Router::new()
            .route("/age", get(age))
            .route("/gender", get(gender))
            .route("/nation", get(nation))
            .with_state(self);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        ApiSettings {
            age_url: format!("http://{}/age", addr),
            gender_url: format!("http://{}/gender", addr),
            nation_url: format!("http://{}/nation", addr),
            timeout_secs: 5,
        }
    }
}

/// Service wired to the real HTTP client and an in-memory store
pub async fn http_service(settings: &ApiSettings, timeout: Duration) -> (UserService, SqliteUserStore) {
    let api = HttpUserApi::with_timeout(settings, timeout).unwrap();
    let store = SqliteUserStore::new(init_memory_database().await.unwrap());
    let service = UserService::new(Arc::new(api), Arc::new(store.clone()));
    (service, store)
}
