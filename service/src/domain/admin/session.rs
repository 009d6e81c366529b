//! [`Session`] definitions.

use std::{fmt, time::Duration};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, From, FromStr};
use serde::{Deserialize, Serialize};

use crate::domain::{admin, contact::Email};

/// Identity of the administrator carried by a [`Session`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// ID of the administrator.
    pub admin_id: admin::Id,

    /// [`Email`] of the administrator.
    pub email: Email,
}

impl From<Email> for Identity {
    fn from(email: Email) -> Self {
        Self {
            admin_id: admin::Id::from(&email),
            email,
        }
    }
}

/// Administrator session.
///
/// Serialized as the claims of a [JWT].
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    /// [`Identity`] this [`Session`] is issued for.
    #[serde(flatten)]
    pub identity: Identity,

    /// [`DateTime`] when this [`Session`] was issued.
    #[serde(rename = "iat", with = "common::datetime::serde::unix_timestamp")]
    pub issued_at: IssuanceDateTime,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Session {
    /// Creates a new [`Session`] issued at the provided [`DateTime`] and
    /// living for the provided `ttl`.
    ///
    /// [`None`] is returned if the expiration moment is out of range.
    #[must_use]
    pub fn new(
        identity: Identity,
        issued_at: IssuanceDateTime,
        ttl: Duration,
    ) -> Option<Self> {
        Some(Self {
            identity,
            issued_at,
            expires_at: issued_at.checked_add(ttl)?.coerce(),
        })
    }
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Eq, From, FromStr, PartialEq)]
#[as_ref(str)]
pub struct Token(String);

impl Token {
    /// Returns the string representation of this [`Token`].
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// [`DateTime`] of a [`Session`] issuance.
pub type IssuanceDateTime = DateTimeOf<(Session, unit::Issuance)>;

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use crate::domain::contact::Email;

    use super::{Identity, Session};

    fn session() -> Session {
        let email = Email::new("admin@example.com").unwrap();
        Session::new(
            Identity::from(email),
            DateTime::from_unix_timestamp(1_700_000_000).unwrap().coerce(),
            Duration::from_secs(7 * 24 * 60 * 60),
        )
        .unwrap()
    }

    #[test]
    fn expires_after_ttl() {
        let session = session();

        assert_eq!(
            session.expires_at.unix_timestamp()
                - session.issued_at.unix_timestamp(),
            604_800,
        );
    }

    #[test]
    fn rejects_unrepresentable_expiration() {
        let email = Email::new("admin@example.com").unwrap();
        let session = Session::new(
            Identity::from(email),
            DateTime::now().coerce(),
            Duration::from_secs(300_000 * 31_557_600),
        );

        assert!(session.is_none());
    }

    #[test]
    fn serializes_as_jwt_claims() {
        let json = serde_json::to_value(session()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "adminId": "admin@example.com",
                "email": "admin@example.com",
                "iat": 1_700_000_000,
                "exp": 1_700_604_800,
            }),
        );

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, session());
    }
}
