//! Administrator definitions.
//!
//! There is exactly one administrator, described by the operator-configured
//! [`Credentials`]. No administrator records are stored.

pub mod session;

use std::fmt;

use derive_more::{AsRef, Display, From, Into};
use secrecy::{zeroize::Zeroize, CloneableSecret, ExposeSecret as _, SecretBox};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq as _;

pub use crate::domain::contact::Email;

pub use self::session::Session;

/// ID of the administrator.
///
/// The configured administrator [`Email`] doubles as its ID.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Id(String);

impl From<&Email> for Id {
    fn from(email: &Email) -> Self {
        Self(email.to_string())
    }
}

/// Password of the administrator.
#[derive(AsRef, Clone, Eq, PartialEq)]
#[as_ref(str)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let len = password.as_ref().chars().count();
        (6..=128).contains(&len)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Reference credentials the administrator signs in with.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// [`Email`] of the administrator.
    pub email: Email,

    /// [`Password`] of the administrator.
    pub password: SecretBox<Password>,
}

impl Credentials {
    /// Creates new [`Credentials`] out of the configured values.
    ///
    /// [`None`] is returned if any of the values is empty or malformed, so
    /// that a misconfigured pair never matches anything.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Option<Self> {
        let email = Email::new(email)?;
        let password = Password::new(password)?;
        Some(Self {
            email,
            password: SecretBox::init_with(move || password),
        })
    }

    /// Checks whether the provided `email` and `password` exactly match
    /// these [`Credentials`].
    ///
    /// Both values are always compared in constant time, so the result
    /// doesn't reveal which of them mismatched.
    #[must_use]
    pub fn matches(&self, email: &Email, password: &Password) -> bool {
        let expected_email: &str = self.email.as_ref();
        let actual_email: &str = email.as_ref();
        let expected_password: &str = self.password.expose_secret().as_ref();
        let actual_password: &str = password.as_ref();

        let email_eq =
            expected_email.as_bytes().ct_eq(actual_email.as_bytes());
        let password_eq =
            expected_password.as_bytes().ct_eq(actual_password.as_bytes());

        (email_eq & password_eq).into()
    }
}

#[cfg(test)]
mod spec {
    use super::{Credentials, Email, Password};

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    fn password(s: &str) -> Password {
        Password::new(s).unwrap()
    }

    #[test]
    fn matches_exact_pair_only() {
        let creds = Credentials::new("admin@example.com", "s3cret!").unwrap();

        assert!(creds.matches(&email("admin@example.com"), &password("s3cret!")));

        assert!(!creds.matches(&email("admin@example.com"), &password("s3cret")));
        assert!(!creds.matches(&email("admin@example.com"), &password("s3cret!!")));
        assert!(!creds.matches(&email("admin@example.com"), &password("S3CRET!")));
        assert!(!creds.matches(&email("Admin@example.com"), &password("s3cret!")));
        assert!(!creds.matches(&email("other@example.com"), &password("s3cret!")));
        assert!(!creds.matches(&email("other@example.com"), &password("wrong-one")));
    }

    #[test]
    fn rejects_empty_or_malformed_configuration() {
        assert!(Credentials::new("", "s3cret!").is_none());
        assert!(Credentials::new("admin@example.com", "").is_none());
        assert!(Credentials::new("", "").is_none());
        assert!(Credentials::new("not-an-email", "s3cret!").is_none());
        assert!(Credentials::new("admin@example.com", "short").is_none());
    }

    #[test]
    fn validates_password_length() {
        assert!(Password::new("123456").is_some());
        assert!(Password::new("x".repeat(128)).is_some());

        assert!(Password::new("12345").is_none());
        assert!(Password::new("x".repeat(129)).is_none());
    }

    #[test]
    fn hides_password_in_debug_output() {
        let creds = Credentials::new("admin@example.com", "s3cret!").unwrap();

        assert!(!format!("{creds:?}").contains("s3cret!"));
        assert!(!format!("{:?}", password("s3cret!")).contains("s3cret!"));
    }
}
