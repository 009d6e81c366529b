//! [`Profile`]-related endpoints.

use axum::Json;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{
        self,
        contact::{Email, Phone, Url},
        profile,
    },
    query, Query as _,
};

use crate::{
    api::{optional, required, InvalidField, Validate, Validated},
    AsError, Authorized, Context, Error,
};

/// Portfolio owner profile.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// ID of this [`Profile`].
    pub id: profile::Id,

    /// Name of the portfolio owner.
    pub name: String,

    /// Bio of the portfolio owner.
    pub bio: String,

    /// URL of the avatar image.
    pub avatar: Option<String>,

    /// URL of the GitHub account.
    pub github: Option<String>,

    /// URL of the LinkedIn account.
    pub linkedin: Option<String>,

    /// URL of the Twitter account.
    pub twitter: Option<String>,

    /// URL of the personal website.
    pub website: Option<String>,

    /// Public contact e-mail.
    pub email: Option<String>,

    /// WhatsApp number.
    pub whatsapp: Option<String>,

    /// Contact phone number.
    pub phone: Option<String>,

    /// [RFC 3339] date and time of creation.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub created_at: String,

    /// [RFC 3339] date and time of the last modification.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub updated_at: String,
}

impl From<domain::Profile> for Profile {
    fn from(profile: domain::Profile) -> Self {
        let domain::Profile {
            id,
            name,
            bio,
            avatar,
            github,
            linkedin,
            twitter,
            website,
            email,
            whatsapp,
            phone,
            created_at,
            updated_at,
        } = profile;
        Self {
            id,
            name: name.to_string(),
            bio: bio.to_string(),
            avatar: avatar.as_ref().map(ToString::to_string),
            github: github.as_ref().map(ToString::to_string),
            linkedin: linkedin.as_ref().map(ToString::to_string),
            twitter: twitter.as_ref().map(ToString::to_string),
            website: website.as_ref().map(ToString::to_string),
            email: email.as_ref().map(ToString::to_string),
            whatsapp: whatsapp.as_ref().map(ToString::to_string),
            phone: phone.as_ref().map(ToString::to_string),
            created_at: created_at.to_rfc3339(),
            updated_at: updated_at.to_rfc3339(),
        }
    }
}

/// Contents of a [`Profile`] submitted by the administrator.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileInput {
    name: Option<String>,
    bio: Option<String>,
    avatar: Option<String>,
    github: Option<String>,
    linkedin: Option<String>,
    twitter: Option<String>,
    website: Option<String>,
    email: Option<String>,
    whatsapp: Option<String>,
    phone: Option<String>,
}

impl Validate for ProfileInput {
    type Output = profile::Draft;

    fn validate(self) -> Result<Self::Output, InvalidField> {
        const INVALID_URL: &str = "Invalid URL";
        const INVALID_PHONE: &str = "Invalid phone number";

        Ok(profile::Draft {
            name: required(
                "name",
                self.name,
                profile::Name::new,
                "Name is too long",
            )?,
            bio: required(
                "bio",
                self.bio,
                profile::Bio::new,
                "Bio is too long",
            )?,
            avatar: optional("avatar", self.avatar, Url::new, INVALID_URL)?,
            github: optional("github", self.github, Url::new, INVALID_URL)?,
            linkedin: optional(
                "linkedin",
                self.linkedin,
                Url::new,
                INVALID_URL,
            )?,
            twitter: optional("twitter", self.twitter, Url::new, INVALID_URL)?,
            website: optional("website", self.website, Url::new, INVALID_URL)?,
            email: optional(
                "email",
                self.email,
                Email::new,
                "Invalid email address",
            )?,
            whatsapp: optional(
                "whatsapp",
                self.whatsapp,
                Phone::new,
                INVALID_PHONE,
            )?,
            phone: optional("phone", self.phone, Phone::new, INVALID_PHONE)?,
        })
    }
}

/// Returns the [`Profile`], or `null` if it wasn't filled in yet.
///
/// # Errors
///
/// If the [`Profile`] cannot be read.
#[tracing::instrument(skip_all)]
pub async fn get(ctx: Context) -> Result<Json<Option<Profile>>, Error> {
    let profile = ctx
        .service()
        .execute(query::profile::Current::all())
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(profile.map(Into::into)))
}

/// Creates or replaces the [`Profile`].
///
/// # Errors
///
/// If the [`Profile`] cannot be stored.
#[tracing::instrument(skip_all, fields(name = %draft.name))]
pub async fn update(
    Authorized(ctx): Authorized,
    Validated(draft): Validated<ProfileInput>,
) -> Result<Json<Profile>, Error> {
    let profile = ctx
        .service()
        .execute(command::UpdateProfile { draft })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(profile.into()))
}

impl AsError for command::update_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::api::Validate as _;

    use super::ProfileInput;

    fn input() -> ProfileInput {
        ProfileInput {
            name: Some("Jane Doe".to_owned()),
            bio: Some("Full-stack developer.".to_owned()),
            ..ProfileInput::default()
        }
    }

    #[test]
    fn drops_empty_optional_fields() {
        let draft = ProfileInput {
            github: Some(String::new()),
            phone: Some("  ".to_owned()),
            website: Some("https://jane.dev".to_owned()),
            ..input()
        }
        .validate()
        .unwrap();

        assert!(draft.github.is_none());
        assert!(draft.phone.is_none());
        assert!(draft.website.is_some());
    }

    #[test]
    fn rejects_invalid_fields() {
        for (input, expected) in [
            (
                ProfileInput {
                    name: None,
                    ..input()
                },
                "name: Required",
            ),
            (
                ProfileInput {
                    avatar: Some("not a url".to_owned()),
                    ..input()
                },
                "avatar: Invalid URL",
            ),
            (
                ProfileInput {
                    email: Some("jane".to_owned()),
                    ..input()
                },
                "email: Invalid email address",
            ),
            (
                ProfileInput {
                    whatsapp: Some("call me".to_owned()),
                    ..input()
                },
                "whatsapp: Invalid phone number",
            ),
        ] {
            assert_eq!(input.validate().unwrap_err().to_string(), expected);
        }
    }
}
