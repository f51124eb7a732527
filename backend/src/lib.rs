//! # Payer Rotation Backend
//!
//! Wires the CSV member store, the domain services and the REST layer into
//! a single axum application.
//!
//! - **config**: service configuration (YAML file plus environment overrides)
//! - **domain**: rotation rules and services
//! - **storage**: member persistence
//! - **io**: REST handlers and DTO mappers

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

pub use config::ServiceConfig;
use domain::{MemberService, PayerService};
use storage::{CsvConnection, MemberRepository, MemberStorage};

/// Services shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub member_service: MemberService,
    pub payer_service: PayerService,
}

impl AppState {
    /// Build both services on top of one member store
    pub fn new(store: Arc<dyn MemberStorage>, config: &ServiceConfig) -> Self {
        Self {
            member_service: MemberService::new(store.clone()),
            payer_service: PayerService::new(store, config.anchor_date),
        }
    }
}

/// Open the CSV store under the configured data directory and build the services
pub fn initialize_backend(config: &ServiceConfig) -> Result<AppState> {
    info!("Using data directory {}", config.data_directory.display());

    let connection = CsvConnection::new(&config.data_directory)
        .with_context(|| {
            format!("Failed to open data directory {}", config.data_directory.display())
        })?;
    connection.ensure_members_file_exists()?;

    let repository: Arc<dyn MemberStorage> = Arc::new(MemberRepository::new(connection));

    info!("Rotation anchored at {}", config.anchor_date);
    Ok(AppState::new(repository, config))
}

/// Build the application router with CORS restricted to `allowed_origin`
pub fn create_router(app_state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin '{}'", allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(io::rest::health))
        .route(
            "/members",
            get(io::rest::member_apis::list_members).post(io::rest::member_apis::create_member),
        )
        .route("/payer", get(io::rest::payer_apis::get_payer_for_date))
        .route("/payer/today", get(io::rest::payer_apis::get_today))
        .route("/payer/upcoming", get(io::rest::payer_apis::get_upcoming));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Member, RemoteWeekday};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_config(temp_dir: &TempDir) -> ServiceConfig {
        ServiceConfig {
            data_directory: temp_dir.path().to_path_buf(),
            ..ServiceConfig::default()
        }
    }

    fn setup_test() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let state = initialize_backend(&config).unwrap();
        let router = create_router(state, &config.allowed_origin).unwrap();
        (router, temp_dir)
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_member(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/members")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    struct UnavailableStore;

    #[async_trait]
    impl MemberStorage for UnavailableStore {
        async fn list_members(&self) -> Result<Vec<Member>> {
            Err(anyhow::anyhow!("disk not mounted"))
        }

        async fn append_member(
            &self,
            _name: &str,
            _remote_weekday: Option<RemoteWeekday>,
        ) -> Result<Member> {
            Err(anyhow::anyhow!("disk not mounted"))
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _temp_dir) = setup_test();

        let (status, body) = send(&router, get_request("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_member_returns_recomputed_queue() {
        let (router, _temp_dir) = setup_test();

        let request = post_member(r#"{"name":"Ana","remote_weekday":"tuesday"}"#);
        let (status, body) = send(&router, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["member"]["name"], "Ana");
        assert_eq!(body["member"]["rotation_rank"], 1);
        assert_eq!(body["member"]["remote_weekday"], "tuesday");
        assert_eq!(body["overview"]["members"].as_array().unwrap().len(), 1);

        let (status, body) = send(&router, get_request("/api/members")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["members"][0]["name"], "Ana");
    }

    #[tokio::test]
    async fn test_create_member_with_blank_name_is_rejected() {
        let (router, _temp_dir) = setup_test();

        let (status, body) = send(&router, post_member(r#"{"name":"   "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");

        let (_, body) = send(&router, get_request("/api/members")).await;
        assert!(body["members"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_payer_for_date() {
        let (router, _temp_dir) = setup_test();
        send(&router, post_member(r#"{"name":"A","remote_weekday":"tuesday"}"#)).await;
        send(&router, post_member(r#"{"name":"B","remote_weekday":"monday"}"#)).await;

        let (status, body) = send(&router, get_request("/api/payer?date=2023-10-02")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assigned_payer"]["name"], "A");

        let (status, body) = send(&router, get_request("/api/payer?date=2023-10-03")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assigned_payer"]["name"], "B");
        assert_eq!(body["pointer"], 0);
        assert_eq!(body["members"][1]["is_paying"], true);
        assert_eq!(body["members"][0]["is_paying"], false);
    }

    #[tokio::test]
    async fn test_date_before_anchor_is_unprocessable() {
        let (router, _temp_dir) = setup_test();

        let (status, body) = send(&router, get_request("/api/payer?date=2023-09-29")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_range");
    }

    #[tokio::test]
    async fn test_malformed_date_is_bad_request() {
        let (router, _temp_dir) = setup_test();

        let (status, body) = send(&router, get_request("/api/payer?date=02/10/2023")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_upcoming_payers() {
        let (router, _temp_dir) = setup_test();
        send(&router, post_member(r#"{"name":"A"}"#)).await;
        send(&router, post_member(r#"{"name":"B"}"#)).await;

        let request = get_request("/api/payer/upcoming?from=2023-10-06&days=3");
        let (status, body) = send(&router, request).await;

        assert_eq!(status, StatusCode::OK);
        let days = body["days"].as_array().unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0]["date"], "2023-10-06");
        assert_eq!(days[1]["date"], "2023-10-09");
        assert_eq!(days[2]["date"], "2023-10-10");
    }

    #[tokio::test]
    async fn test_unavailable_store_maps_to_503() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let state = AppState::new(Arc::new(UnavailableStore), &config);
        let router = create_router(state, &config.allowed_origin).unwrap();

        let (status, body) = send(&router, get_request("/api/members")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "store_unavailable");

        let (status, _) = send(&router, get_request("/api/payer?date=2023-10-03")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_member_is_kept_when_queue_cannot_be_recomputed() {
        let temp_dir = TempDir::new().unwrap();
        let config = ServiceConfig {
            anchor_date: NaiveDate::from_ymd_opt(2099, 1, 5).unwrap(),
            ..test_config(&temp_dir)
        };
        let state = initialize_backend(&config).unwrap();
        let router = create_router(state, &config.allowed_origin).unwrap();

        let (status, body) = send(&router, post_member(r#"{"name":"Ana"}"#)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["member"]["name"], "Ana");
        assert_eq!(body["overview"], Value::Null);
        assert_eq!(body["overview_error"]["error"], "invalid_range");

        let (_, body) = send(&router, get_request("/api/members")).await;
        assert_eq!(body["members"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_member_body_is_bad_request() {
        let (router, _temp_dir) = setup_test();

        let (status, body) = send(&router, post_member(r#"{"remote_weekday":"monday"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().contains("name"));

        let (status, body) = send(&router, post_member("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_invalid_query_is_bad_request() {
        let (router, _temp_dir) = setup_test();

        let (status, body) = send(&router, get_request("/api/payer/upcoming?days=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");

        let (status, body) = send(&router, get_request("/api/payer/upcoming?days=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_remote_weekday_accepts_form_codes_and_locale_names() {
        let (router, _temp_dir) = setup_test();

        let request = post_member(r#"{"name":"Ana","remote_weekday":2}"#);
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["member"]["remote_weekday"], "tuesday");
        assert_eq!(body["member"]["remote_day_code"], 2);

        let request = post_member(r#"{"name":"Bia","remote_weekday":"segunda-feira"}"#);
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["member"]["remote_weekday"], "monday");
        assert_eq!(body["member"]["remote_day_label"], "Segunda");

        let request = post_member(r#"{"name":"Caio","remote_weekday":6}"#);
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");

        let (_, body) = send(&router, get_request("/api/members")).await;
        assert_eq!(body["members"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let state = initialize_backend(&config).unwrap();

        assert!(create_router(state, "bad\norigin").is_err());
    }
}
