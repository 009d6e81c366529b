//! Helpers shared by the HTTP scenario tests.

use std::time::Duration;

use axum_test::TestServer;
use portfolio::config::{Auth, CookieSecure};
use serde_json::json;
use service::{domain::admin::Credentials, infra::Postgres, Service};

pub const SECRET: &str = "test-secret";
pub const EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "s3cret!";
pub const WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Spins up the application over a never-connected database.
pub fn server(cookie_secure: CookieSecure) -> TestServer {
    let auth = Auth {
        jwt_secret: Some(SECRET.to_owned()),
        admin_email: Some(EMAIL.to_owned()),
        admin_password: Some(PASSWORD.to_owned()),
        cookie_secure,
        ..Auth::default()
    };
    let service = Service::new(
        service::Config::new(SECRET, Credentials::new(EMAIL, PASSWORD), WEEK),
        Postgres::new(&portfolio::config::Postgres::default().into())
            .unwrap(),
    );

    TestServer::new(portfolio::app(service, &auth)).unwrap()
}

/// Signs in and returns the issued session token.
pub async fn sign_in(server: &TestServer) -> String {
    server
        .post("/api/auth/login")
        .json(&json!({"email": EMAIL, "password": PASSWORD}))
        .await
        .cookie("admin-token")
        .value()
        .to_owned()
}

/// Mints a session token signed with the provided `secret` and expiring at
/// the provided Unix timestamp.
pub fn token(secret: &str, exp: i64) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({
            "adminId": EMAIL,
            "email": EMAIL,
            "iat": exp - 604_800,
            "exp": exp,
        }),
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Current Unix timestamp.
pub fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
        .try_into()
        .unwrap()
}

/// `Cookie` header value carrying the provided session `token`.
pub fn cookie(token: &str) -> http::HeaderValue {
    format!("admin-token={token}").parse().unwrap()
}
