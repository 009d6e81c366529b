//! [`Command`] for creating a new administrator [`Session`].

use common::DateTime;
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::admin::{
        self,
        session::{self, Identity},
        Session,
    },
    Service,
};

use super::Command;

/// [`Command`] for creating a new administrator [`Session`] by credentials.
#[derive(Clone, Debug)]
pub struct CreateAdminSession {
    /// [`admin::Email`] the administrator signs in with.
    pub email: admin::Email,

    /// [`admin::Password`] the administrator signs in with.
    pub password: SecretBox<admin::Password>,
}

/// Output of [`CreateAdminSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`session::Token`] of the created [`Session`].
    pub token: session::Token,

    /// Created [`Session`].
    pub session: Session,
}

impl<Db> Command<CreateAdminSession> for Service<Db> {
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateAdminSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAdminSession { email, password } = cmd;

        let Some(credentials) = &self.config().admin else {
            log::warn!("sign-in rejected: no administrator is configured");
            return Err(tracerr::new!(E::WrongCredentials));
        };
        if !credentials.matches(&email, password.expose_secret()) {
            log::warn!("sign-in rejected: wrong credentials");
            return Err(tracerr::new!(E::WrongCredentials));
        }

        let session = Session::new(
            Identity::from(credentials.email.clone()),
            DateTime::now().coerce(),
            self.config().session_ttl,
        )
        .ok_or_else(|| tracerr::new!(E::ExpirationOutOfRange))?;
        let token = jsonwebtoken::encode::<Session>(
            &jsonwebtoken::Header::default(),
            &session,
            &self.config().jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        Ok(Output {
            token: token.into(),
            session,
        })
    }
}

/// Error of [`CreateAdminSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Configured session lifetime puts the [`Session`] expiration out of
    /// the representable range.
    #[display("`Session` expiration is out of range")]
    ExpirationOutOfRange,

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// Provided credentials don't match the configured ones, or there are no
    /// configured ones at all.
    #[display("Wrong administrator credentials")]
    WrongCredentials,
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use secrecy::SecretBox;

    use crate::{
        domain::admin::{Credentials, Email, Password},
        Command as _, Config, Service,
    };

    use super::{CreateAdminSession, ExecutionError};

    fn service(admin: Option<Credentials>) -> Service<()> {
        Service::new(
            Config::new(
                "test-secret",
                admin,
                Duration::from_secs(7 * 24 * 60 * 60),
            ),
            (),
        )
    }

    fn cmd(email: &str, password: &str) -> CreateAdminSession {
        let password = Password::new(password).unwrap();
        CreateAdminSession {
            email: Email::new(email).unwrap(),
            password: SecretBox::init_with(move || password),
        }
    }

    #[tokio::test]
    async fn issues_session_for_valid_credentials() {
        let svc = service(Credentials::new("admin@example.com", "s3cret!"));

        let out = svc
            .execute(cmd("admin@example.com", "s3cret!"))
            .await
            .unwrap();

        let email: &str = out.session.identity.email.as_ref();
        assert_eq!(email, "admin@example.com");
        assert_eq!(
            out.session.expires_at.unix_timestamp()
                - out.session.issued_at.unix_timestamp(),
            604_800,
        );
        let token: &str = out.token.as_ref();
        assert_eq!(token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn rejects_wrong_credentials() {
        let svc = service(Credentials::new("admin@example.com", "s3cret!"));

        for (email, password) in [
            ("admin@example.com", "wrong-password"),
            ("other@example.com", "s3cret!"),
            ("other@example.com", "wrong-password"),
        ] {
            let err = svc.execute(cmd(email, password)).await.unwrap_err();
            assert!(
                matches!(err.as_ref(), ExecutionError::WrongCredentials),
                "{email} / {password}",
            );
        }
    }

    #[tokio::test]
    async fn fails_closed_without_configured_credentials() {
        let svc = service(Credentials::new("", ""));

        let err = svc
            .execute(cmd("admin@example.com", "s3cret!"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::WrongCredentials));
    }

    #[tokio::test]
    async fn rejects_unrepresentable_expiration() {
        let svc = Service::new(
            Config::new(
                "test-secret",
                Credentials::new("admin@example.com", "s3cret!"),
                Duration::from_secs(300_000 * 31_557_600),
            ),
            (),
        );

        let err = svc
            .execute(cmd("admin@example.com", "s3cret!"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::ExpirationOutOfRange));
    }
}
