//! Shared harness: the real router over a migrated in-memory SQLite database.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use meteo_db::common::AppState;
use meteo_db::config::{Config, Deployment};
use meteo_db::entity::temperatures;
use meteo_db::routes;

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        request_body_limit_bytes: 1024 * 1024,
        deployment: Deployment::Local,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let config = test_config();
        // One connection: every pooled connection would get its own in-memory database.
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();

        let router = routes::build_router(AppState::new(db.clone(), config));
        Self { router, db }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn create_country(&self, name: &str, lat: f64, lon: f64) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/countries",
                Some(json!({ "nume": name, "lat": lat, "lon": lon })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create country: {body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn create_city(&self, country_id: i64, name: &str, lat: f64, lon: f64) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/cities",
                Some(json!({ "nume": name, "lat": lat, "lon": lon, "idTara": country_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create city: {body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn create_temperature(&self, city_id: i64, value: f64) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/temperatures",
                Some(json!({ "idOras": city_id, "valoare": value })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create temperature: {body}");
        body["id"].as_i64().unwrap()
    }

    /// Insert a reading with a fixed timestamp, bypassing the API.
    pub async fn seed_temperature(&self, city_id: i64, value: f64, at: NaiveDateTime) -> i32 {
        temperatures::ActiveModel {
            city_id: Set(i32::try_from(city_id).unwrap()),
            value: Set(value),
            timestamp: Set(at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .unwrap()
        .id
    }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}

/// Ids of a JSON array of entities, in response order.
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
