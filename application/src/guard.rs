//! Route guard of the admin area.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts as _, Request, State},
    middleware::Next,
    response::{IntoResponse as _, Redirect, Response},
};
use tracing as log;

use crate::{config, session::SessionCookie, Context};

/// Route guard of the admin area, applied as an [`axum::middleware`].
#[derive(Clone, Debug)]
pub struct Guard {
    /// Path prefix of the protected admin area.
    prefix: String,

    /// Path of the login page.
    login: String,
}

impl Guard {
    /// Creates a new [`Guard`] protecting the configured prefix.
    #[must_use]
    pub fn new(conf: &config::Guard) -> Self {
        let prefix = conf.prefix.trim_end_matches('/').to_owned();
        let login = format!("{prefix}/login");
        Self { prefix, login }
    }

    /// Returns the path of the admin area landing page.
    #[must_use]
    pub fn landing(&self) -> &str {
        if self.prefix.is_empty() {
            "/"
        } else {
            &self.prefix
        }
    }

    /// Returns the path of the login page.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Classifies the provided request `path` against this [`Guard`].
    ///
    /// [`None`] is returned for paths outside the protected admin area.
    #[must_use]
    pub fn target(&self, path: &str) -> Option<Target> {
        if path == self.login {
            return Some(Target::Login);
        }
        let rest = path.strip_prefix(self.prefix.as_str())?;
        (rest.is_empty() || rest.starts_with('/')).then_some(Target::Protected)
    }
}

/// Target of an HTTP request inside the admin area.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    /// Login page.
    Login,

    /// Any other page of the admin area.
    Protected,
}

/// State of the session token carried by an HTTP request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenState {
    /// No token is carried.
    Absent,

    /// Carried token verifies successfully.
    Valid,

    /// Carried token is malformed, tampered or expired.
    Invalid,
}

/// Decision of the [`Guard`] about an HTTP request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Let the request through unmodified.
    Pass,

    /// Redirect to the login page.
    RedirectToLogin,

    /// Redirect to the admin area landing page.
    RedirectToLanding,

    /// Delete the session cookie and redirect to the login page.
    Expel,
}

/// Decides what to do with an HTTP request to the provided [`Target`]
/// carrying a token in the provided [`TokenState`].
#[must_use]
pub fn decide(target: Target, token: TokenState) -> Decision {
    match (token, target) {
        (TokenState::Absent, Target::Login)
        | (TokenState::Valid, Target::Protected) => Decision::Pass,
        (TokenState::Absent, Target::Protected) => Decision::RedirectToLogin,
        (TokenState::Valid, Target::Login) => Decision::RedirectToLanding,
        (TokenState::Invalid, Target::Login | Target::Protected) => {
            Decision::Expel
        }
    }
}

/// [`axum::middleware`] enforcing the [`Guard`] before any handler runs.
pub async fn enforce(
    State(guard): State<Arc<Guard>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(target) = guard.target(req.uri().path()) else {
        return next.run(req).await;
    };

    let (mut parts, body) = req.into_parts();
    let ctx = match Context::from_request_parts(&mut parts, &()).await {
        Ok(ctx) => ctx,
        Err(e) => return e.into_response(),
    };
    let token = if !ctx.has_token() {
        TokenState::Absent
    } else if ctx.current_session().await.is_ok() {
        TokenState::Valid
    } else {
        TokenState::Invalid
    };

    let decision = decide(target, token);
    log::debug!(?target, ?token, ?decision, "admin area guarded");

    match decision {
        Decision::Pass => next.run(Request::from_parts(parts, body)).await,
        Decision::RedirectToLogin => {
            Redirect::temporary(guard.login()).into_response()
        }
        Decision::RedirectToLanding => {
            Redirect::temporary(guard.landing()).into_response()
        }
        Decision::Expel => {
            match SessionCookie::from_request_parts(&mut parts, &()).await {
                Ok(cookie) => {
                    (cookie.clear(), Redirect::temporary(guard.login()))
                        .into_response()
                }
                Err(e) => e.into_response(),
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::config;

    use super::{decide, Decision, Guard, Target, TokenState};

    fn guard(prefix: &str) -> Guard {
        Guard::new(&config::Guard {
            prefix: prefix.to_owned(),
        })
    }

    #[test]
    fn decides_every_combination() {
        for (target, token, expected) in [
            (Target::Login, TokenState::Absent, Decision::Pass),
            (Target::Protected, TokenState::Absent, Decision::RedirectToLogin),
            (Target::Login, TokenState::Valid, Decision::RedirectToLanding),
            (Target::Protected, TokenState::Valid, Decision::Pass),
            (Target::Login, TokenState::Invalid, Decision::Expel),
            (Target::Protected, TokenState::Invalid, Decision::Expel),
        ] {
            assert_eq!(decide(target, token), expected, "{target:?} {token:?}");
        }
    }

    #[test]
    fn decides_the_same_on_repeat() {
        let first = decide(Target::Protected, TokenState::Valid);
        for _ in 0..100 {
            assert_eq!(decide(Target::Protected, TokenState::Valid), first);
        }
    }

    #[test]
    fn classifies_paths() {
        let guard = guard("/admin");

        assert_eq!(guard.target("/admin"), Some(Target::Protected));
        assert_eq!(guard.target("/admin/"), Some(Target::Protected));
        assert_eq!(guard.target("/admin/projects"), Some(Target::Protected));
        assert_eq!(guard.target("/admin/login"), Some(Target::Login));

        assert_eq!(guard.target("/"), None);
        assert_eq!(guard.target("/administrator"), None);
        assert_eq!(guard.target("/api/auth/login"), None);
    }

    #[test]
    fn normalizes_prefix() {
        let guard = guard("/panel/");

        assert_eq!(guard.landing(), "/panel");
        assert_eq!(guard.login(), "/panel/login");
        assert_eq!(guard.target("/panel/login"), Some(Target::Login));
    }
}
