use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use velocity_zones::adapters::storage::JsonStoreOptions;
use velocity_zones::domain::ports::Environment;
use velocity_zones::{build_router, AppContainer, HttpOptions};

fn app_with(container: AppContainer, environment: Environment) -> Router {
    let options = HttpOptions {
        environment,
        ..HttpOptions::default()
    };
    build_router(Arc::new(container), &options).unwrap()
}

fn memory_app() -> Router {
    app_with(AppContainer::in_memory(), Environment::Development)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post_rep(app: &Router, exercise_id: &str, velocity: f64) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/v1/reps",
        Some(json!({ "exerciseId": exercise_id, "velocity": velocity })),
    )
    .await
}

#[tokio::test]
async fn test_create_and_fetch_rep() {
    let app = memory_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/v1/reps",
        Some(json!({
            "exerciseId": "squat",
            "velocity": 0.42,
            "metadata": { "load": 140, "set": 3 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["exerciseId"], "squat");
    assert_eq!(created["velocity"], 0.42);
    assert_eq!(created["metadata"]["load"], 140);
    let timestamp = created["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/v1/reps/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_invalid_velocity_is_rejected_with_envelope() {
    let app = memory_app();

    let (status, body) = post_rep(&app, "ex1", 11.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "message": "Velocity exceeds maximum allowed value",
            "code": "VALIDATION_ERROR",
            "statusCode": 400
        })
    );

    let (status, body) = post_rep(&app, "ex1", -0.5).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Velocity cannot be negative");

    let (status, _) = post_rep(&app, "ex1", 0.0).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, reps) = send(&app, Method::GET, "/v1/reps", None).await;
    assert_eq!(reps.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/reps",
        Some(json!({ "velocity": "fast" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn test_zones_carry_rep_counts() {
    let app = memory_app();
    for velocity in [0.1, 0.3, 0.5, 0.9, 1.5, 5.0] {
        let (status, _) = post_rep(&app, "ex1", velocity).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = post_rep(&app, "ex1", 12.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, zones) = send(&app, Method::GET, "/v1/zones", None).await;
    assert_eq!(status, StatusCode::OK);

    let counts: Vec<(String, u64)> = zones
        .as_array()
        .unwrap()
        .iter()
        .map(|z| {
            (
                z["name"].as_str().unwrap().to_string(),
                z["repCount"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Strength".to_string(), 2),
            ("Power".to_string(), 1),
            ("Speed-Strength".to_string(), 1),
            ("Speed".to_string(), 1),
        ]
    );

    let (status, zone) = send(&app, Method::GET, "/v1/zones/zone-power", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(zone["minVelocity"], 0.3);
    assert_eq!(zone["maxVelocity"], 0.6);
    assert_eq!(zone["color"], "#ffaa00");
    assert_eq!(zone["repCount"], 1);
}

#[tokio::test]
async fn test_unknown_zone_is_not_found() {
    let app = memory_app();

    let (status, body) = send(&app, Method::GET, "/v1/zones/zone-nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Velocity zone not found");

    let (status, _) = send(&app, Method::GET, "/v1/reps?zoneId=zone-nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/v1/reps/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Rep not found");
}

#[tokio::test]
async fn test_list_reps_filters_and_paginates() {
    let app = memory_app();
    let mut ids = Vec::new();
    for i in 0..10 {
        let exercise = if i % 2 == 0 { "squat" } else { "bench" };
        let (_, created) = post_rep(&app, exercise, 0.05 * (i + 1) as f64).await;
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let (status, page) = send(&app, Method::GET, "/v1/reps?offset=3&limit=4", None).await;
    assert_eq!(status, StatusCode::OK);
    let page_ids: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(page_ids, ids[3..7].iter().map(String::as_str).collect::<Vec<_>>());

    let (_, squats) = send(&app, Method::GET, "/v1/reps?exerciseId=squat&limit=2", None).await;
    let squats = squats.as_array().unwrap();
    assert_eq!(squats.len(), 2);
    assert!(squats.iter().all(|r| r["exerciseId"] == "squat"));

    // zoneId 只看區間包含，不看 first-match 的歸屬
    let (_, power) = send(&app, Method::GET, "/v1/reps?zoneId=zone-power", None).await;
    let velocities: Vec<f64> = power
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["velocity"].as_f64().unwrap())
        .collect();
    assert!(!velocities.is_empty());
    assert!(velocities.iter().all(|v| (0.3..=0.6).contains(v)));

    let (_, future) = send(&app, Method::GET, "/v1/reps?startDate=2999-01-01", None).await;
    assert_eq!(future, json!([]));
}

#[tokio::test]
async fn test_invalid_query_parameters() {
    let app = memory_app();

    for uri in [
        "/v1/reps?limit=0",
        "/v1/reps?limit=500",
        "/v1/reps?offset=-2",
        "/v1/reps?startDate=not-a-date",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_health_and_fallback() {
    let app = memory_app();

    let (status, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/v2/zones", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Resource not found");
    assert_eq!(body["path"], "/v2/zones");
}

#[tokio::test]
async fn test_security_and_cors_headers() {
    let app = memory_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/v1/zones")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    let request = Request::builder()
        .uri("/v1/zones")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
}

#[tokio::test]
async fn test_store_failure_details_depend_on_environment() {
    for (environment, expect_details) in [
        (Environment::Development, true),
        (Environment::Production, false),
    ] {
        let temp_dir = TempDir::new().unwrap();
        let container = AppContainer::json_file(temp_dir.path(), JsonStoreOptions::default())
            .await
            .unwrap();
        let app = app_with(container, environment);

        std::fs::remove_file(temp_dir.path().join("db.json")).unwrap();

        let (status, body) = send(&app, Method::GET, "/v1/zones", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body.get("details").is_some(), expect_details);
    }
}

#[tokio::test]
async fn test_unsupported_method_uses_not_found_envelope() {
    let app = memory_app();

    for (method, uri) in [
        (Method::DELETE, "/v1/reps"),
        (Method::PUT, "/v1/zones/zone-power"),
        (Method::POST, "/health"),
    ] {
        let (status, body) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(
            body,
            json!({
                "message": "Resource not found",
                "code": "NOT_FOUND",
                "statusCode": 404,
                "path": uri
            })
        );
    }
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = memory_app();

    let (status, doc) = send(&app, Method::GET, "/docs.json", None).await;
    assert_eq!(status, StatusCode::OK);

    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/v1/reps"));
    assert!(paths.contains_key("/v1/zones"));
    assert!(doc["components"]["schemas"]["RepResponse"].is_object());
}
