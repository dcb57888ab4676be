//! Integration tests for the HTTP transport.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; no
//! socket is opened.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use catalog::{DailyTarget, Movie, MovieCatalog};
use chrono::NaiveDate;
use selection::{DailySelector, MemoryTargetStore, TargetStore};
use serde_json::{Value, json};
use server::{Clock, GuessService, ServerConfig, router};
use tower::ServiceExt;

struct FixedClock(NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn test_catalog() -> Arc<MovieCatalog> {
    let target = Movie {
        id: 1,
        title: "Target".to_string(),
        release_date: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
        duration_minutes: 120,
        rating: 7.5,
        budget: 1000,
        revenue: 5000,
        genres: strings(&["drama"]),
        director_names: strings(&["Director"]),
        main_actors: strings(&["Lead", "Support"]),
        writers: strings(&["Writer"]),
        producer_company: "Studio".to_string(),
        producer_country: "Japan".to_string(),
    };
    let guess = Movie {
        id: 2,
        title: "Guess".to_string(),
        release_date: NaiveDate::from_ymd_opt(2005, 1, 1).unwrap(),
        duration_minutes: 100,
        rating: 8.0,
        genres: strings(&["comedy", "drama"]),
        main_actors: strings(&["Support", "Stranger"]),
        ..target.clone()
    };
    Arc::new(MovieCatalog::from_movies(vec![guess, target]).unwrap())
}

async fn setup(secret: Option<&str>, preselect: bool) -> (Router, Arc<MemoryTargetStore>) {
    let catalog = test_catalog();
    let store = Arc::new(MemoryTargetStore::new());
    if preselect {
        store
            .insert_if_absent(DailyTarget::new(today(), 1))
            .await
            .unwrap();
    }
    let selector = Arc::new(DailySelector::new(catalog.clone(), store.clone()).with_seed(11));
    let service = GuessService::new(catalog, selector);
    let app = router(
        service,
        Arc::new(FixedClock(today())),
        secret.map(str::to_string),
    );
    (app, store)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_guess(body: Value) -> Request<Body> {
    Request::post("/api/guess")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_list_movies() {
    let (app, _) = setup(None, false).await;

    let (status, body) = send(app, get("/api/movies")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"data": [
            {"movie_id": 1, "title": "Target"},
            {"movie_id": 2, "title": "Guess"}
        ]})
    );
}

#[tokio::test]
async fn test_guess_returns_comparison() {
    let (app, _) = setup(None, true).await;

    let (status, body) = send(app, post_guess(json!({"movie_id": 2}))).await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["data"][0];
    assert_eq!(result["movie_id"], json!({"value": 2, "status": "incorrect"}));
    assert_eq!(result["duration_minutes"], json!({"value": 100, "status": "higher"}));
    assert_eq!(result["rating"], json!({"value": 8.0, "status": "lower"}));
    assert_eq!(result["budget"], json!({"value": 1000, "status": "correct"}));
    assert_eq!(result["release_date"], json!({"value": "2005-01-01", "status": "earlier"}));
    assert_eq!(
        result["genres"],
        json!([
            {"value": "comedy", "status": "no_match"},
            {"value": "drama", "status": "match"}
        ])
    );
    assert_eq!(
        result["main_actors"],
        json!([
            {"value": "Support", "status": "match"},
            {"value": "Stranger", "status": "no_match"}
        ])
    );
    assert_eq!(result["producer_country"]["status"], "correct");
}

#[tokio::test]
async fn test_guess_accepts_camel_case_string_id() {
    let (app, _) = setup(None, true).await;

    let (status, body) = send(app, post_guess(json!({"movieId": "1"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"]["status"], "correct");
}

#[tokio::test]
async fn test_guess_validation_errors() {
    let (app, _) = setup(None, true).await;

    let (status, body) = send(app.clone(), post_guess(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["message"], "movie_id is required");

    let (status, body) = send(app.clone(), post_guess(json!({"movie_id": "twelve"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "movie_id must be a valid number");

    let request = Request::post("/api/guess")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_guess_unknown_movie() {
    let (app, store) = setup(None, true).await;

    let (status, body) = send(app, post_guess(json!({"movie_id": 999}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_guess_before_selection() {
    let (app, store) = setup(None, false).await;

    let (status, body) = send(app, post_guess(json!({"movie_id": 2}))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "no_target_for_today");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_cron_requires_secret() {
    let (app, store) = setup(Some("s3cret"), false).await;

    let (status, body) = send(app.clone(), get("/api/cron/daily")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unauthorized");

    let wrong = Request::get("/api/cron/daily")
        .header("x-cron-secret", "nope")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_cron_selects_once_then_guess_works() {
    let (app, store) = setup(Some("s3cret"), false).await;
    let trigger = || {
        Request::get("/api/cron/daily")
            .header("x-cron-secret", "s3cret")
            .body(Body::empty())
            .unwrap()
    };

    let (status, first) = send(app.clone(), trigger()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"][0]["date"], "2025-07-04");

    let (_, second) = send(app.clone(), trigger()).await;
    assert_eq!(first, second);
    assert_eq!(store.len().await, 1);

    let target_id = first["data"][0]["movie_id"].clone();
    let (status, body) = send(app, post_guess(json!({ "movie_id": target_id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["movie_id"]["status"], "correct");
}

#[tokio::test]
async fn test_cron_without_configured_secret_is_open() {
    let (app, store) = setup(None, false).await;

    let (status, _) = send(app, get("/api/cron/daily")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(store.get(today()).await.unwrap().is_some());
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = setup(None, false).await;
    let request = Request::options("/api/guess")
        .header("origin", "https://example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn test_health() {
    let (app, _) = setup(None, false).await;
    let (status, body) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_build_service_from_sample_catalog() {
    let path = PathBuf::from("../../data/movies.json");
    if !path.exists() {
        return;
    }
    let config = ServerConfig {
        catalog_path: path,
        database_url: "memory".to_string(),
        selection_seed: Some(1),
        ..ServerConfig::default()
    };

    let service = server::build_service(&config).await.unwrap();
    let target = service.trigger_daily_selection(today()).await.unwrap();
    let result = service.evaluate_guess(today(), target.movie_id).await.unwrap();

    assert!(result.is_solved());
}
