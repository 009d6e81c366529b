//! [`Command`] for authorizing an administrator [`Session`].

use derive_more::{Display, Error, From};
use jsonwebtoken::{Algorithm, Validation};
use tracerr::Traced;

use crate::{
    domain::admin::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing an administrator [`Session`] by its
/// [`session::Token`].
#[derive(Clone, Debug, From)]
pub struct AuthorizeAdminSession {
    /// [`session::Token`] to authorize.
    pub token: session::Token,
}

impl<Db> Command<AuthorizeAdminSession> for Service<Db> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeAdminSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeAdminSession { token } = cmd;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &validation,
        )
        .map(|data| data.claims)
        .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`AuthorizeAdminSession`] [`Command`] execution.
///
/// Covers malformed, tampered and expired [`session::Token`]s alike.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use crate::{
        command::{AuthorizeAdminSession, CreateAdminSession},
        domain::admin::{
            session::{Identity, Token},
            Credentials, Email, Password, Session,
        },
        Command as _, Config, Service,
    };

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn service(secret: &str) -> Service<()> {
        Service::new(
            Config::new(
                secret,
                Credentials::new("admin@example.com", "s3cret!"),
                7 * DAY,
            ),
            (),
        )
    }

    async fn sign_in(svc: &Service<()>) -> Token {
        let password = Password::new("s3cret!").unwrap();
        svc.execute(CreateAdminSession {
            email: Email::new("admin@example.com").unwrap(),
            password: secrecy::SecretBox::init_with(move || password),
        })
        .await
        .unwrap()
        .token
    }

    /// Encodes a [`Session`] issued the provided time `ago`.
    fn issued_ago(svc: &Service<()>, ago: Duration) -> Token {
        let session = Session::new(
            Identity::from(Email::new("admin@example.com").unwrap()),
            (DateTime::now() - ago).coerce(),
            svc.config().session_ttl,
        )
        .unwrap();
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &session,
            &svc.config().jwt_encoding_key,
        )
        .unwrap()
        .into()
    }

    #[tokio::test]
    async fn verifies_issued_token() {
        let svc = service("test-secret");
        let token = sign_in(&svc).await;

        let session = svc
            .execute(AuthorizeAdminSession { token })
            .await
            .unwrap();

        let admin_id: &str = session.identity.admin_id.as_ref();
        assert_eq!(admin_id, "admin@example.com");
    }

    #[tokio::test]
    async fn verifies_until_expiry() {
        let svc = service("test-secret");

        let fresh = issued_ago(&svc, 6 * DAY);
        assert!(svc.execute(AuthorizeAdminSession { token: fresh }).await.is_ok());

        let stale = issued_ago(&svc, 8 * DAY);
        assert!(svc.execute(AuthorizeAdminSession { token: stale }).await.is_err());
    }

    #[tokio::test]
    async fn rejects_tampered_token() {
        let svc = service("test-secret");
        let token = sign_in(&svc).await;
        let token: &str = token.as_ref();

        for (i, c) in token.char_indices() {
            if c == '.' {
                continue;
            }
            let replacement = if c == 'A' { "B" } else { "A" };
            let mut tampered = token.to_owned();
            tampered.replace_range(i..=i, replacement);

            let res = svc
                .execute(AuthorizeAdminSession {
                    token: tampered.into(),
                })
                .await;

            assert!(res.is_err(), "tampered at {i}");
        }
    }

    #[tokio::test]
    async fn rejects_token_signed_with_other_secret() {
        let token = sign_in(&service("other-secret")).await;

        let res = service("test-secret")
            .execute(AuthorizeAdminSession { token })
            .await;

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let svc = service("test-secret");

        for garbage in ["", "abc", "a.b.c", "..."] {
            let res = svc
                .execute(AuthorizeAdminSession {
                    token: garbage.to_owned().into(),
                })
                .await;

            assert!(res.is_err(), "{garbage:?}");
        }
    }
}
