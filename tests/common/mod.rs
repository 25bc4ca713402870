// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use personal_todo::config::Config;
use personal_todo::db::FirestoreDb;
use personal_todo::routes::create_router;
use personal_todo::services::{AuthGateway, IdentityClient, SessionStore};
use personal_todo::views::Views;
use personal_todo::AppState;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by the in-memory store, talking to `identity`.
#[allow(dead_code)]
pub fn create_test_app(identity: &MockServer) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(identity, FirestoreDb::new_in_memory())
}

/// Create a test app with a specific store.
#[allow(dead_code)]
pub fn create_test_app_with_db(
    identity: &MockServer,
    db: FirestoreDb,
) -> (axum::Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.identity_base_url = identity.uri();

    let client = IdentityClient::new(&config).expect("identity client");
    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));

    let state = Arc::new(AppState {
        config,
        db,
        auth: AuthGateway::new(client, sessions),
        views: Views::new().expect("templates should compile"),
    });

    (create_router(state.clone()), state)
}

/// Make the fake provider accept one email/password pair as `uid`.
#[allow(dead_code)]
pub async fn mock_sign_in(identity: &MockServer, email: &str, password: &str, uid: &str) {
    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .and(query_param("key", "test-api-key"))
        .and(body_partial_json(json!({ "email": email, "password": password })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": uid,
            "email": email,
            "displayName": "",
            "idToken": format!("id-token-for-{uid}"),
            "registered": true,
            "refreshToken": "refresh",
            "expiresIn": "3600"
        })))
        .mount(identity)
        .await;
}

/// A provider error body as Identity Toolkit sends it.
#[allow(dead_code)]
pub fn provider_error(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "error": {
            "code": 400,
            "message": message,
            "errors": [{ "message": message, "domain": "global", "reason": "invalid" }]
        }
    }))
}

/// POST an urlencoded form, optionally with a cookie.
#[allow(dead_code)]
pub async fn post_form(
    app: &axum::Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// GET a page, optionally with a cookie.
#[allow(dead_code)]
pub async fn get_page(app: &axum::Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `name=value` of the session cookie set by a response, if any.
#[allow(dead_code)]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("todo_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Log in through the login page and return the session cookie.
#[allow(dead_code)]
pub async fn log_in(
    app: &axum::Router,
    identity: &MockServer,
    email: &str,
    password: &str,
    uid: &str,
) -> String {
    mock_sign_in(identity, email, password, uid).await;

    let body = format!(
        "email={}&password={}",
        email.replace('@', "%40"),
        password
    );
    let response = post_form(app, "/login", &body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("login should set a session cookie")
}

/// Location header of a redirect.
#[allow(dead_code)]
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Session id named by a `todo_session=<jwt>` cookie.
#[allow(dead_code)]
pub fn session_id(state: &AppState, cookie: &str) -> String {
    let token = cookie.trim_start_matches("todo_session=");
    jsonwebtoken::decode::<personal_todo::middleware::session::Claims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(&state.config.session_signing_key),
        &jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256),
    )
    .expect("session cookie should carry a valid token")
    .claims
    .sub
}
