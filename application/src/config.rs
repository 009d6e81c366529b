//! [`Config`]-related definitions.

use std::{env, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Debug, Display, Error as StdError};
use serde::Deserialize;
use service::domain::admin;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Authentication configuration.
    pub auth: Auth,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the `CONF`-prefixed environment variables (if any);
    /// - overriding the [`Auth`] secrets with the `JWT_SECRET`,
    ///   `ADMIN_EMAIL` and `ADMIN_PASSWORD` environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET").ok())?
            .set_override_option(
                "auth.admin_email",
                env::var("ADMIN_EMAIL").ok(),
            )?
            .set_override_option(
                "auth.admin_password",
                env::var("ADMIN_PASSWORD").ok(),
            )?
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Authentication configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Auth {
    /// [JWT] signing secret.
    ///
    /// Has no default value: the server refuses to start without it.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[debug(skip)]
    pub jwt_secret: Option<String>,

    /// E-mail of the administrator.
    pub admin_email: Option<String>,

    /// Password of the administrator.
    #[debug(skip)]
    pub admin_password: Option<String>,

    /// Lifetime of an administrator session.
    #[default(service::Config::DEFAULT_SESSION_TTL)]
    #[serde(with = "humantime_serde")]
    pub session_ttl: time::Duration,

    /// Policy of setting the `Secure` attribute on the session cookie.
    pub cookie_secure: CookieSecure,

    /// Route guard configuration.
    pub guard: Guard,
}

impl TryFrom<Auth> for service::Config {
    type Error = Error;

    fn try_from(auth: Auth) -> Result<Self, Self::Error> {
        let Auth {
            jwt_secret,
            admin_email,
            admin_password,
            session_ttl,
            cookie_secure: _,
            guard: _,
        } = auth;

        let secret = jwt_secret
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingJwtSecret)?;
        let representable = ::time::Duration::try_from(session_ttl)
            .ok()
            .and_then(|ttl| {
                ::time::OffsetDateTime::now_utc().checked_add(ttl)
            })
            .is_some();
        if !representable {
            return Err(Error::SessionTtlOutOfRange);
        }
        let admin = admin_email
            .zip(admin_password)
            .and_then(|(email, password)| {
                admin::Credentials::new(email, password)
            });

        Ok(Self::new(secret, admin, session_ttl))
    }
}

/// Policy of setting the `Secure` attribute on the session cookie.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CookieSecure {
    /// Set the attribute whenever the request arrived over HTTPS, either
    /// directly or through a proxy reporting `X-Forwarded-Proto: https`.
    #[default]
    Auto,

    /// Always set the attribute.
    Always,

    /// Never set the attribute.
    Never,
}

/// Route guard configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Guard {
    /// Path prefix of the protected admin area.
    ///
    /// Its `/login` subpath is the login page.
    #[default("/admin".to_owned())]
    pub prefix: String,
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[debug(skip)]
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Error of building a [`service::Config`] out of the [`Auth`] section.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// No [JWT] signing secret is configured.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[display("`auth.jwt_secret` (or `JWT_SECRET`) is not set")]
    MissingJwtSecret,

    /// `auth.session_ttl` puts session expiration out of the representable
    /// range.
    #[display("`auth.session_ttl` is out of range")]
    SessionTtlOutOfRange,
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::{Auth, Error};

    fn auth(secret: Option<&str>, email: &str, password: &str) -> Auth {
        Auth {
            jwt_secret: secret.map(ToOwned::to_owned),
            admin_email: Some(email.to_owned()),
            admin_password: Some(password.to_owned()),
            ..Auth::default()
        }
    }

    #[test]
    fn requires_jwt_secret() {
        for secret in [None, Some("")] {
            let res = service::Config::try_from(auth(
                secret,
                "admin@example.com",
                "s3cret!",
            ));

            assert!(matches!(res, Err(Error::MissingJwtSecret)), "{secret:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_session_ttl() {
        let res = service::Config::try_from(Auth {
            session_ttl: Duration::from_secs(300_000 * 31_557_600),
            ..auth(Some("secret"), "admin@example.com", "s3cret!")
        });

        assert!(matches!(res, Err(Error::SessionTtlOutOfRange)));
    }

    #[test]
    fn builds_credentials() {
        let conf = service::Config::try_from(auth(
            Some("secret"),
            "admin@example.com",
            "s3cret!",
        ))
        .unwrap();

        assert!(conf.admin.is_some());
        assert_eq!(conf.session_ttl, service::Config::DEFAULT_SESSION_TTL);
    }

    #[test]
    fn leaves_no_credentials_when_incomplete() {
        let conf = service::Config::try_from(Auth {
            jwt_secret: Some("secret".to_owned()),
            admin_email: Some("admin@example.com".to_owned()),
            ..Auth::default()
        })
        .unwrap();
        assert!(conf.admin.is_none());

        let conf = service::Config::try_from(auth(Some("secret"), "", ""))
            .unwrap();
        assert!(conf.admin.is_none());
    }
}
