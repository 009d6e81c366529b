//! REST API definitions.

pub mod auth;
pub mod profile;
pub mod project;
pub mod skill;
pub mod technology;

use std::fmt;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    routing::{get, post, put},
    Json, Router,
};
use derive_more::Display;
use serde::{de::DeserializeOwned, Serialize};

use crate::{AsError, Error};

/// Builds the [`Router`] of the REST API.
pub fn router() -> Router {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        .route("/profile", get(profile::get).post(profile::update))
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/:id",
            put(project::update).delete(project::delete),
        )
        .route("/skills", get(skill::list).post(skill::create))
        .route("/skills/:id", put(skill::update).delete(skill::delete))
        .route(
            "/tech-stack",
            get(technology::list).post(technology::create),
        )
        .route(
            "/tech-stack/:id",
            put(technology::update).delete(technology::delete),
        )
}

/// Body of a response to a successful action having nothing to return.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Success {
    /// Always `true`.
    pub success: bool,
}

impl Success {
    /// Successful [`Success`].
    pub const OK: Self = Self { success: true };
}

/// Request input field failing validation.
#[derive(Clone, Debug, Display)]
#[display("{field}: {message}")]
pub struct InvalidField {
    /// Name of the invalid field.
    pub field: &'static str,

    /// Human-readable reason of the failure.
    pub message: String,
}

impl InvalidField {
    /// Creates a new [`InvalidField`] error.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl From<InvalidField> for Error {
    fn from(err: InvalidField) -> Self {
        Self::invalid_input(err.to_string())
    }
}

/// Request input convertible into a strongly-typed value.
pub trait Validate {
    /// Strongly-typed value this input is validated into.
    type Output;

    /// Validates this input, reporting the first invalid field.
    ///
    /// # Errors
    ///
    /// If any of the fields is invalid.
    fn validate(self) -> Result<Self::Output, InvalidField>;
}

/// Extractor of a JSON request body validated into a strongly-typed value.
pub struct Validated<T: Validate>(pub T::Output);

impl<T: Validate> fmt::Debug for Validated<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validated(..)")
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Error> {
        let Json(input) = Json::<T>::from_request(req, state)
            .await
            .map_err(AsError::into_error)?;
        Ok(Self(input.validate()?))
    }
}

/// Validates a required text `field`.
///
/// The `value` is trimmed before being passed to the `new` constructor.
///
/// # Errors
///
/// If the `value` is absent, or the `new` constructor rejects it.
pub fn required<T>(
    field: &'static str,
    value: Option<String>,
    new: impl FnOnce(String) -> Option<T>,
    message: &str,
) -> Result<T, InvalidField> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| InvalidField::new(field, "Required"))
        .and_then(|v| new(v).ok_or_else(|| InvalidField::new(field, message)))
}

/// Validates an optional text `field`.
///
/// The `value` is trimmed, and an empty one is considered absent.
///
/// # Errors
///
/// If the `new` constructor rejects a present `value`.
pub fn optional<T>(
    field: &'static str,
    value: Option<String>,
    new: impl FnOnce(String) -> Option<T>,
    message: &str,
) -> Result<Option<T>, InvalidField> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .map(|v| new(v).ok_or_else(|| InvalidField::new(field, message)))
        .transpose()
}

#[cfg(test)]
mod spec {
    use service::domain::contact::Url;

    use super::{optional, required, InvalidField};

    #[test]
    fn required_trims_and_validates() {
        assert_eq!(
            required("url", Some(" https://a.dev ".to_owned()), Url::new, "Invalid URL")
                .unwrap(),
            Url::new("https://a.dev").unwrap(),
        );

        let err = required("url", None, Url::new, "Invalid URL").unwrap_err();
        assert_eq!(err.to_string(), "url: Required");

        let err = required("url", Some("  ".to_owned()), Url::new, "Invalid URL")
            .unwrap_err();
        assert_eq!(err.to_string(), "url: Required");

        let err = required("url", Some("nope".to_owned()), Url::new, "Invalid URL")
            .unwrap_err();
        assert_eq!(err.to_string(), "url: Invalid URL");
    }

    #[test]
    fn optional_treats_empty_as_absent() {
        for value in [None, Some(String::new()), Some("   ".to_owned())] {
            assert_eq!(
                optional("url", value, Url::new, "Invalid URL").unwrap(),
                None,
            );
        }

        let err: InvalidField =
            optional("url", Some("nope".to_owned()), Url::new, "Invalid URL")
                .unwrap_err();
        assert_eq!(err.field, "url");
    }
}
