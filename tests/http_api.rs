//! End-to-end tests driving the full router against in-memory backends

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use formula_one_api::api::create_router_with_state;
use formula_one_api::create_in_memory_state;
use formula_one_api::infrastructure::auth::{JwtConfig, JwtService, TokenIssuer};

const SECRET: &str = "integration-test-secret-0123456789abcdef";

fn jwt() -> JwtService {
    JwtService::new(JwtConfig::new(SECRET)).unwrap()
}

fn app() -> Router {
    create_router_with_state(create_in_memory_state(Arc::new(jwt())))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, headers, value)
}

async fn register(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(
        app,
        Method::POST,
        "/api/Authentication/Register",
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    (status, body)
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(
        app,
        Method::POST,
        "/api/Authentication/Login",
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    (status, body)
}

#[tokio::test]
async fn register_returns_token_then_rejects_duplicate() {
    let app = app();

    let (status, body) = register(&app, "charles@ferrari.com", "Leclerc#16").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], true);
    assert!(!body["token"].as_str().unwrap().is_empty());

    let (status, body) = register(&app, "charles@ferrari.com", "Leclerc#16").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "result": false, "errors": ["Email already exist"] }));
}

#[tokio::test]
async fn register_weak_password_reports_server_error() {
    let app = app();

    let (status, body) = register(&app, "oscar@mclaren.com", "password").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "result": false, "errors": ["Server error"] }));
}

#[tokio::test]
async fn register_existing_email_with_weak_password_is_duplicate() {
    let app = app();
    register(&app, "george@mercedes.com", "Russell#63").await;

    let (status, body) = register(&app, "George@Mercedes.com", "password").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "result": false, "errors": ["Email already exist"] }));
}

#[tokio::test]
async fn register_missing_fields_lists_validation_errors() {
    let app = app();

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/Authentication/Register",
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["result"], false);
    assert_eq!(
        body["errors"],
        json!(["The Email field is required.", "The Password field is required."])
    );
}

#[tokio::test]
async fn login_token_claims_match_identity() {
    let app = app();
    register(&app, "lando@mclaren.com", "Norris#4abc").await;

    let (status, body) = login(&app, "lando@mclaren.com", "Norris#4abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], true);

    let claims = jwt().validate(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, "lando@mclaren.com");
    assert_eq!(claims.email, "lando@mclaren.com");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn login_is_case_insensitive_on_email() {
    let app = app();
    register(&app, "George@Mercedes.com", "Russell#63").await;

    let (status, body) = login(&app, "george@mercedes.com", "Russell#63").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], true);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = app();
    register(&app, "fernando@aston.com", "Alonso#14x").await;

    let unknown = login(&app, "nobody@aston.com", "Alonso#14x").await;
    let wrong = login(&app, "fernando@aston.com", "Alonso#15x").await;

    assert_eq!(unknown.0, StatusCode::BAD_REQUEST);
    assert_eq!(unknown, wrong);
    assert_eq!(unknown.1, json!({ "result": false, "errors": ["Invalid payload"] }));
}

#[tokio::test]
async fn tokens_for_same_identity_have_distinct_jti() {
    let app = app();
    register(&app, "yuki@rb.com", "Tsunoda#22").await;

    let (_, first) = login(&app, "yuki@rb.com", "Tsunoda#22").await;
    let (_, second) = login(&app, "yuki@rb.com", "Tsunoda#22").await;

    let first = jwt().validate(first["token"].as_str().unwrap()).unwrap();
    let second = jwt().validate(second["token"].as_str().unwrap()).unwrap();

    assert_ne!(first.jti, second.jti);
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/Authentication/Login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\":"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn team_crud_round_trip() {
    let app = app();

    let (status, headers, created) = send(
        &app,
        Method::POST,
        "/api/Team",
        Some(json!({ "id": 500, "name": "Scuderia Ferrari", "country": "Italy", "teamPrinciple": "Fred Vasseur" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_ne!(id, 500);
    assert_eq!(headers[header::LOCATION], format!("/api/Team/{}", id));

    let (status, _, fetched) = send(&app, Method::GET, &format!("/api/Team/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["teamPrinciple"], "Fred Vasseur");

    let (status, _, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/Team?id={}&country=Monaco", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, _, patched) = send(&app, Method::GET, &format!("/api/Team/{}", id), None).await;
    assert_eq!(patched["country"], "Monaco");
    assert_eq!(patched["name"], created["name"]);
    assert_eq!(patched["teamPrinciple"], created["teamPrinciple"]);

    let (status, _, _) = send(&app, Method::DELETE, &format!("/api/Team?id={}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, body) = send(&app, Method::GET, &format!("/api/Team/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid Id");
}

#[tokio::test]
async fn team_list_returns_all() {
    let app = app();

    for country in ["Austria", "Germany"] {
        send(&app, Method::POST, "/api/Team", Some(json!({ "country": country }))).await;
    }

    let (status, _, body) = send(&app, Method::GET, "/api/Team", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["country"], "Austria");
}

#[tokio::test]
async fn team_unknown_or_malformed_id_is_invalid_id() {
    let app = app();

    for (method, uri) in [
        (Method::GET, "/api/Team/41"),
        (Method::GET, "/api/Team/abc"),
        (Method::PATCH, "/api/Team?id=41&country=Spain"),
        (Method::DELETE, "/api/Team?id=41"),
        (Method::DELETE, "/api/Team"),
    ] {
        let (status, _, body) = send(&app, method, uri, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["message"], "Invalid Id", "{}", uri);
    }
}

#[tokio::test]
async fn team_patch_requires_country() {
    let app = app();
    let (_, _, created) = send(&app, Method::POST, "/api/Team", Some(json!({ "country": "France" }))).await;

    let (status, _, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/Team?id={}", created["id"]),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoints_and_headers() {
    let app = app();

    let (status, headers, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert!(headers.contains_key("x-request-id"));

    let (status, _, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "up");

    let (status, _, _) = send(&app, Method::GET, "/live", None).await;
    assert_eq!(status, StatusCode::OK);
}
