//! Administrator authentication endpoints.

use axum::Json;
use axum_extra::extract::CookieJar;
use derive_more::Debug;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, create_admin_session, Command as _},
    domain::admin::{self, Session},
};

use crate::{
    api::{InvalidField, Success, Validate, Validated},
    define_error,
    session::SessionCookie,
    AsError, Authorized, Context, Error,
};

/// Credentials submitted to [`login()`].
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    /// E-mail of the administrator.
    #[serde(default)]
    email: Option<String>,

    /// Password of the administrator.
    #[debug(skip)]
    #[serde(default)]
    password: Option<String>,
}

impl Validate for LoginInput {
    type Output = command::CreateAdminSession;

    fn validate(self) -> Result<Self::Output, InvalidField> {
        let email = self
            .email
            .and_then(admin::Email::new)
            .ok_or_else(|| InvalidField::new("email", "Invalid email address"))?;
        let password =
            self.password.and_then(admin::Password::new).ok_or_else(|| {
                InvalidField::new(
                    "password",
                    "Password must be at least 6 characters",
                )
            })?;

        Ok(command::CreateAdminSession {
            email,
            password: secrecy::SecretBox::init_with(move || password),
        })
    }
}

/// Signs the administrator in, storing a new session token in the session
/// cookie.
///
/// # Errors
///
/// With `401 Unauthorized` if the credentials don't match the configured
/// ones, regardless of which of them mismatched.
#[tracing::instrument(skip_all, fields(email = %cmd.email))]
pub async fn login(
    ctx: Context,
    cookie: SessionCookie,
    Validated(cmd): Validated<LoginInput>,
) -> Result<(CookieJar, Json<Success>), Error> {
    let output = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok((cookie.issue(output.token), Json(Success::OK)))
}

/// Body of a [`me()`] response.
#[derive(Clone, Debug, Serialize)]
pub struct Me {
    /// Signed in administrator.
    pub admin: Admin,
}

/// Administrator identity carried by a [`Session`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    /// ID of the administrator.
    pub admin_id: admin::Id,

    /// E-mail of the administrator.
    pub email: admin::Email,

    /// [RFC 3339] date and time when the [`Session`] expires.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub expires_at: String,
}

impl From<Session> for Admin {
    fn from(session: Session) -> Self {
        Self {
            admin_id: session.identity.admin_id,
            email: session.identity.email,
            expires_at: session.expires_at.to_rfc3339(),
        }
    }
}

/// Returns the identity of the signed in administrator.
///
/// # Errors
///
/// With `401 Unauthorized` if there is no valid session.
#[tracing::instrument(skip_all)]
pub async fn me(Authorized(ctx): Authorized) -> Result<Json<Me>, Error> {
    let session = ctx.current_session().await?;
    Ok(Json(Me {
        admin: session.into(),
    }))
}

/// Signs the administrator out by deleting the session cookie.
///
/// The token itself stays valid until its expiration.
#[expect(
    clippy::unused_async,
    reason = "`async` is required to match signature"
)]
pub async fn logout(cookie: SessionCookie) -> (CookieJar, Json<Success>) {
    (cookie.clear(), Json(Success::OK))
}

impl AsError for create_admin_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum LoginError {
                #[code = "WRONG_CREDENTIALS"]
                #[status = UNAUTHORIZED]
                #[message = "Invalid email or password"]
                WrongCredentials,
            }
        }

        match self {
            Self::WrongCredentials => Some(LoginError::WrongCredentials.into()),
            Self::ExpirationOutOfRange | Self::JsonWebTokenEncodeError(_) => {
                None
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::api::Validate as _;

    use super::LoginInput;

    fn input(email: Option<&str>, password: Option<&str>) -> LoginInput {
        LoginInput {
            email: email.map(ToOwned::to_owned),
            password: password.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn validates_credentials() {
        let cmd = input(Some("admin@example.com"), Some("s3cret!"))
            .validate()
            .unwrap();
        let email: &str = cmd.email.as_ref();
        assert_eq!(email, "admin@example.com");
    }

    #[test]
    fn reports_first_invalid_field() {
        for (email, password, expected) in [
            (None, Some("s3cret!"), "email: Invalid email address"),
            (Some("admin"), Some("s3cret!"), "email: Invalid email address"),
            (
                Some(" admin@example.com "),
                Some("s3cret!"),
                "email: Invalid email address",
            ),
            (Some("admin"), Some("123"), "email: Invalid email address"),
            (
                Some("admin@example.com"),
                Some("12345"),
                "password: Password must be at least 6 characters",
            ),
            (
                Some("admin@example.com"),
                None,
                "password: Password must be at least 6 characters",
            ),
        ] {
            let err = input(email, password).validate().unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
    }
}
