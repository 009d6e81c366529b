//! Administrator authentication scenarios.

mod support;

use axum_extra::extract::cookie::SameSite;
use http::{header, StatusCode};
use portfolio::config::CookieSecure;
use serde_json::json;

use self::support::{
    cookie, now, server, sign_in, token, EMAIL, PASSWORD, SECRET,
};

#[tokio::test]
async fn login_sets_session_cookie() {
    let server = server(CookieSecure::Auto);

    let res = server
        .post("/api/auth/login")
        .json(&json!({"email": EMAIL, "password": PASSWORD}))
        .await;

    res.assert_status_ok();
    res.assert_json(&json!({"success": true}));

    let cookie = res.cookie("admin-token");
    assert_eq!(cookie.value().split('.').count(), 3);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    assert_ne!(cookie.secure(), Some(true));
}

#[tokio::test]
async fn login_over_https_sets_secure_cookie() {
    let server = server(CookieSecure::Auto);

    let res = server
        .post("/api/auth/login")
        .add_header(
            header::HeaderName::from_static("x-forwarded-proto"),
            header::HeaderValue::from_static("https"),
        )
        .json(&json!({"email": EMAIL, "password": PASSWORD}))
        .await;

    res.assert_status_ok();
    assert_eq!(res.cookie("admin-token").secure(), Some(true));
}

#[tokio::test]
async fn login_rejects_wrong_credentials_uniformly() {
    let server = server(CookieSecure::Auto);

    for (email, password) in [
        (EMAIL, "wrong-password"),
        ("other@example.com", PASSWORD),
    ] {
        let res = server
            .post("/api/auth/login")
            .json(&json!({"email": email, "password": password}))
            .await;

        res.assert_status(StatusCode::UNAUTHORIZED);
        res.assert_json(&json!({"error": "Invalid email or password"}));
        assert!(res.maybe_cookie("admin-token").is_none());
    }
}

#[tokio::test]
async fn login_rejects_malformed_input() {
    let server = server(CookieSecure::Auto);

    let res = server
        .post("/api/auth/login")
        .json(&json!({"email": "admin", "password": PASSWORD}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    res.assert_json(&json!({
        "error": "Invalid input data",
        "details": "email: Invalid email address",
    }));

    let res = server
        .post("/api/auth/login")
        .json(&json!({"email": format!(" {EMAIL} "), "password": PASSWORD}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    res.assert_json(&json!({
        "error": "Invalid input data",
        "details": "email: Invalid email address",
    }));

    let res = server
        .post("/api/auth/login")
        .json(&json!({"email": EMAIL, "password": "123"}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    res.assert_json(&json!({
        "error": "Invalid input data",
        "details": "password: Password must be at least 6 characters",
    }));

    let res = server
        .post("/api/auth/login")
        .text("not json")
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>()["error"], "Invalid input data");
    assert!(res.maybe_cookie("admin-token").is_none());
}

#[tokio::test]
async fn me_returns_session_identity() {
    let server = server(CookieSecure::Auto);
    let token = sign_in(&server).await;

    let res = server
        .get("/api/auth/me")
        .add_header(header::COOKIE, cookie(&token))
        .await;

    res.assert_status_ok();
    let body = res.json::<serde_json::Value>();
    assert_eq!(body["admin"]["adminId"], EMAIL);
    assert_eq!(body["admin"]["email"], EMAIL);
    assert!(body["admin"]["expiresAt"].is_string());
}

#[tokio::test]
async fn me_rejects_missing_and_invalid_sessions() {
    let server = server(CookieSecure::Auto);

    let res = server.get("/api/auth/me").await;
    res.assert_status(StatusCode::UNAUTHORIZED);
    res.assert_json(&json!({"error": "Unauthorized"}));

    for invalid in [
        "garbage".to_owned(),
        token(SECRET, now() - 60),
        token("other-secret", now() + 60),
    ] {
        let res = server
            .get("/api/auth/me")
            .add_header(header::COOKIE, cookie(&invalid))
            .await;

        res.assert_status(StatusCode::UNAUTHORIZED);
        res.assert_json(&json!({"error": "Unauthorized"}));
    }
}

#[tokio::test]
async fn logout_clears_session_cookie() {
    let server = server(CookieSecure::Auto);
    let token = sign_in(&server).await;

    let res = server
        .post("/api/auth/logout")
        .add_header(header::COOKIE, cookie(&token))
        .await;

    res.assert_status_ok();
    res.assert_json(&json!({"success": true}));
    let cookie = res.cookie("admin-token");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
}

#[tokio::test]
async fn mutations_require_session_before_reading_body() {
    let server = server(CookieSecure::Auto);

    for res in [
        server.post("/api/profile").text("not json").await,
        server.post("/api/projects").json(&json!({})).await,
        server.post("/api/skills").json(&json!({})).await,
        server.post("/api/tech-stack").json(&json!({})).await,
        server
            .delete("/api/projects/00000000-0000-0000-0000-000000000000")
            .await,
        server.put("/api/skills/not-a-uuid").json(&json!({})).await,
    ] {
        res.assert_status(StatusCode::UNAUTHORIZED);
        res.assert_json(&json!({"error": "Unauthorized"}));
    }
}

#[tokio::test]
async fn mutations_validate_input() {
    let server = server(CookieSecure::Auto);
    let token = sign_in(&server).await;

    let res = server
        .post("/api/projects")
        .add_header(header::COOKIE, cookie(&token))
        .json(&json!({"description": "No title."}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    res.assert_json(&json!({
        "error": "Invalid input data",
        "details": "title: Required",
    }));

    let res = server
        .put("/api/tech-stack/not-a-uuid")
        .add_header(header::COOKIE, cookie(&token))
        .json(&json!({"name": "Rust", "category": "Backend"}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>()["error"], "Invalid input data");
}

#[tokio::test]
async fn unknown_api_path_is_not_found() {
    let server = server(CookieSecure::Auto);

    let res = server.get("/api/unknown").await;

    res.assert_status(StatusCode::NOT_FOUND);
    res.assert_json(&json!({"error": "Not found"}));
}
