//! Contact details shared between domain entities.

use std::sync::LazyLock;

use derive_more::{AsRef, Display, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// E-mail address.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format:
        /// - a local part without whitespace, `@` or `"`;
        /// - a domain consisting of at least two dot-separated labels.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"^[^\s@\x22]+@[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?(?:\.[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?)+$",
            )
            .expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl TryFrom<String> for Email {
    type Error = &'static str;

    fn try_from(address: String) -> Result<Self, Self::Error> {
        Self::new(address).ok_or("invalid `Email`")
    }
}

/// Phone number (also used for messenger contacts like WhatsApp).
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format: an optional `+`,
        /// up to two optionally parenthesized groups of 1-4 digits and a
        /// trailing group of 1-9 digits, separated by `-`, `.` or a space.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"^\+?\(?[0-9]{1,4}\)?[-\s.]?\(?[0-9]{1,4}\)?[-\s.]?[0-9]{1,9}$",
            )
            .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

/// Absolute URL (`scheme://host...`).
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Url(String);

impl Url {
    /// Creates a new [`Url`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`Url`].
    fn check(url: impl AsRef<str>) -> bool {
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$")
                .expect("valid regex")
        });

        let url = url.as_ref();
        url.len() <= 2048 && REGEX.is_match(url)
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Phone, Url};

    #[test]
    fn validates_email() {
        assert!(Email::new("admin@example.com").is_some());
        assert!(Email::new("first.last+tag@sub.example.co").is_some());

        assert!(Email::new("").is_none());
        assert!(Email::new("admin").is_none());
        assert!(Email::new("admin@").is_none());
        assert!(Email::new("admin@localhost").is_none());
        assert!(Email::new("ad min@example.com").is_none());
        assert!(Email::new(" admin@example.com").is_none());
    }

    #[test]
    fn validates_phone() {
        assert!(Phone::new("+1-555-1234567").is_some());
        assert!(Phone::new("+62 812 345678").is_some());
        assert!(Phone::new("(021) 555 1234").is_some());
        assert!(Phone::new("5551234567").is_some());

        assert!(Phone::new("").is_none());
        assert!(Phone::new("call me").is_none());
        assert!(Phone::new("+1-555-").is_none());
    }

    #[test]
    fn validates_url() {
        assert!(Url::new("https://github.com/someone").is_some());
        assert!(Url::new("http://localhost:3000/img.png?x=1#top").is_some());

        assert!(Url::new("").is_none());
        assert!(Url::new("github.com/someone").is_none());
        assert!(Url::new("https://").is_none());
        assert!(Url::new("https://exa mple.com").is_none());
    }

    #[test]
    fn deserializes_only_valid_email() {
        let email: Email =
            serde_json::from_str(r#""admin@example.com""#).unwrap();
        let address: &str = email.as_ref();
        assert_eq!(address, "admin@example.com");

        assert!(serde_json::from_str::<Email>(r#""nope""#).is_err());
    }
}
