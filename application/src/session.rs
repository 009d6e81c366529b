//! Session cookie management.

use std::time::Duration;

use axum::{async_trait, extract::FromRequestParts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::domain::admin::session;

use crate::{config::CookieSecure, Error};

/// Name of the cookie carrying a [`session::Token`].
pub const COOKIE_NAME: &str = "admin-token";

/// Settings of the session cookie, shared via an [`axum::Extension`].
#[derive(Clone, Copy, Debug)]
pub struct CookieSettings {
    /// Policy of setting the `Secure` attribute.
    pub secure: CookieSecure,

    /// `Max-Age` of an issued cookie.
    pub max_age: Duration,
}

/// Session cookie of the current HTTP request.
#[derive(Clone, Debug)]
pub struct SessionCookie {
    /// Cookies of the current HTTP request.
    jar: CookieJar,

    /// Indicator whether the `Secure` attribute is set.
    secure: bool,

    /// `Max-Age` of an issued cookie.
    max_age: Duration,
}

impl SessionCookie {
    /// Returns the [`session::Token`] carried by the current HTTP request, if
    /// any.
    #[must_use]
    pub fn token(&self) -> Option<session::Token> {
        self.jar
            .get(COOKIE_NAME)
            .map(|c| c.value().to_owned().into())
    }

    /// Stores the provided [`session::Token`] in the cookie.
    #[must_use]
    pub fn issue(self, token: session::Token) -> CookieJar {
        self.jar.add(issued(token, self.secure, self.max_age))
    }

    /// Deletes the cookie.
    #[must_use]
    pub fn clear(self) -> CookieJar {
        self.jar.add(removal(self.secure))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let settings = parts
            .extensions
            .get::<CookieSettings>()
            .copied()
            .ok_or_else(|| {
                Error::internal(&"missing `CookieSettings` extension")
            })?;

        let secure = match settings.secure {
            CookieSecure::Always => true,
            CookieSecure::Never => false,
            CookieSecure::Auto => is_https(parts),
        };

        Ok(Self {
            jar: CookieJar::from_headers(&parts.headers),
            secure,
            max_age: settings.max_age,
        })
    }
}

/// Checks whether the HTTP request arrived over HTTPS.
fn is_https(parts: &http::request::Parts) -> bool {
    parts.uri.scheme() == Some(&http::uri::Scheme::HTTPS)
        || parts
            .headers
            .get("X-Forwarded-Proto")
            .and_then(|h| h.to_str().ok())
            .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}

/// Builds a cookie carrying the provided [`session::Token`].
fn issued(
    token: session::Token,
    secure: bool,
    max_age: Duration,
) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token.into_inner()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(
            time::Duration::try_from(max_age).unwrap_or(time::Duration::MAX),
        )
        .build()
}

/// Builds a cookie deleting the session cookie.
fn removal(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((COOKIE_NAME, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use axum_extra::extract::cookie::SameSite;

    use super::{issued, removal, COOKIE_NAME};

    #[test]
    fn issued_cookie_attributes() {
        let cookie = issued(
            "a.b.c".to_owned().into(),
            false,
            Duration::from_secs(7 * 24 * 60 * 60),
        );

        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.value(), "a.b.c");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
        assert_ne!(cookie.secure(), Some(true));

        let secure = issued("a.b.c".to_owned().into(), true, Duration::ZERO);
        assert_eq!(secure.secure(), Some(true));
    }

    #[test]
    fn removal_cookie_attributes() {
        let cookie = removal(false);

        assert_eq!(cookie.name(), COOKIE_NAME);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert!(cookie
            .expires_datetime()
            .is_some_and(|at| at < time::OffsetDateTime::now_utc()));
    }
}
