//! [`Context`]-related definitions.

use axum::{async_trait, extract::FromRequestParts};
use service::{
    command::{self, Command as _},
    domain::admin::{session, Session},
};
use tokio::sync::OnceCell;
use tracing as log;

use crate::{define_error, session::SessionCookie, AsError, Error, Service};

/// Application context of an HTTP request.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// [`session::Token`] provided with the HTTP request, if any.
    token: Option<session::Token>,

    /// Current [`Session`].
    current_session: OnceCell<Session>,
}

impl Context {
    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Indicates whether the HTTP request carries a [`session::Token`] at
    /// all, regardless of its validity.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the current [`Session`] for this [`Context`].
    ///
    /// # Errors
    ///
    /// Errors if the HTTP request carries no [`session::Token`], or the
    /// carried one is malformed, tampered or expired. All of these cases
    /// result in the same [`AuthError::Unauthorized`].
    pub async fn current_session(&self) -> Result<Session, Error> {
        self.current_session
            .get_or_try_init(|| async {
                let token = self
                    .token
                    .clone()
                    .ok_or_else(|| Error::from(AuthError::Unauthorized))?;
                self.service
                    .execute(command::AuthorizeAdminSession { token })
                    .await
                    .map_err(|e| {
                        log::debug!("session rejected: {e}");
                        e.into_error()
                    })
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let service = parts
            .extensions
            .get::<Service>()
            .cloned()
            .ok_or_else(|| Error::internal(&"missing `Service` extension"))?;
        let token = SessionCookie::from_request_parts(parts, state)
            .await?
            .token();

        Ok(Self {
            service,
            token,
            current_session: OnceCell::new(),
        })
    }
}

/// [`Context`] of an HTTP request authorized by a valid administrator
/// [`Session`].
///
/// Rejects with `401 Unauthorized` before any request body is read.
#[derive(Debug)]
pub struct Authorized(pub Context);

#[async_trait]
impl<S> FromRequestParts<S> for Authorized
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let ctx = Context::from_request_parts(parts, state).await?;
        _ = ctx.current_session().await?;
        Ok(Self(ctx))
    }
}

impl AsError for command::authorize_admin_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::JsonWebTokenDecodeError(_) => {
                Some(AuthError::Unauthorized.into())
            }
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "UNAUTHORIZED"]
        #[status = UNAUTHORIZED]
        #[message = "Unauthorized"]
        Unauthorized,
    }
}
