//! Admin area route guard scenarios.

mod support;

use http::{header, StatusCode};
use portfolio::config::CookieSecure;

use self::support::{cookie, now, server, sign_in, token, SECRET};

#[tokio::test]
async fn redirects_anonymous_visitor_to_login() {
    let server = server(CookieSecure::Auto);

    for path in ["/admin", "/admin/projects", "/admin/unknown"] {
        let res = server.get(path).await;

        res.assert_status(StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(res.header(header::LOCATION), "/admin/login", "{path}");
    }
}

#[tokio::test]
async fn lets_anonymous_visitor_reach_login() {
    let server = server(CookieSecure::Auto);

    let res = server.get("/admin/login").await;

    res.assert_status_ok();
    assert!(res.text().contains("<title>Sign in | Admin</title>"));
}

#[tokio::test]
async fn redirects_signed_in_admin_away_from_login() {
    let server = server(CookieSecure::Auto);
    let token = sign_in(&server).await;

    let res = server
        .get("/admin/login")
        .add_header(header::COOKIE, cookie(&token))
        .await;

    res.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.header(header::LOCATION), "/admin");
}

#[tokio::test]
async fn lets_signed_in_admin_through_repeatedly() {
    let server = server(CookieSecure::Auto);
    let token = sign_in(&server).await;

    for _ in 0..3 {
        for (path, title) in [
            ("/admin", "Dashboard"),
            ("/admin/profile", "Profile"),
            ("/admin/tech-stack", "Tech stack"),
        ] {
            let res = server
                .get(path)
                .add_header(header::COOKIE, cookie(&token))
                .await;

            res.assert_status_ok();
            assert!(
                res.text().contains(&format!("<title>{title} | Admin</title>")),
                "{path}",
            );
            assert!(res.maybe_cookie("admin-token").is_none(), "{path}");
        }
    }
}

#[tokio::test]
async fn serves_not_found_for_unknown_section_once_signed_in() {
    let server = server(CookieSecure::Auto);
    let token = sign_in(&server).await;

    let res = server
        .get("/admin/unknown")
        .add_header(header::COOKIE, cookie(&token))
        .await;

    res.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expels_expired_session() {
    let server = server(CookieSecure::Auto);
    let expired = token(SECRET, now() - 60);

    for path in ["/admin", "/admin/login"] {
        let res = server
            .get(path)
            .add_header(header::COOKIE, cookie(&expired))
            .await;

        res.assert_status(StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(res.header(header::LOCATION), "/admin/login", "{path}");
        let removal = res.cookie("admin-token");
        assert_eq!(removal.value(), "", "{path}");
        assert_eq!(removal.max_age(), Some(time::Duration::ZERO), "{path}");
    }
}

#[tokio::test]
async fn expels_tampered_session() {
    let server = server(CookieSecure::Auto);
    let mut tampered = sign_in(&server).await;
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let res = server
        .get("/admin/projects")
        .add_header(header::COOKIE, cookie(&tampered))
        .await;

    res.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.header(header::LOCATION), "/admin/login");
    assert_eq!(res.cookie("admin-token").value(), "");
}

#[tokio::test]
async fn leaves_other_paths_alone() {
    let server = server(CookieSecure::Auto);

    let res = server.get("/administrator").await;

    res.assert_status(StatusCode::NOT_FOUND);
    assert!(res.headers().get(header::LOCATION).is_none());
}
