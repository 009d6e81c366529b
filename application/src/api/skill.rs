//! [`Skill`]-related endpoints.

use axum::{
    extract::{rejection::PathRejection, Path},
    Json,
};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, skill},
    query, Query as _,
};

use crate::{
    api::{optional, required, InvalidField, Success, Validate, Validated},
    define_error, AsError, Authorized, Context, Error,
};

/// Skill of the portfolio owner.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// ID of this [`Skill`].
    pub id: skill::Id,

    /// Name of this [`Skill`].
    pub name: String,

    /// Category of this [`Skill`].
    pub category: String,

    /// Proficiency level of this [`Skill`], from `1` to `5`.
    pub level: i16,

    /// Icon reference of this [`Skill`].
    pub icon: Option<String>,

    /// [RFC 3339] date and time of creation.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub created_at: String,

    /// [RFC 3339] date and time of the last modification.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub updated_at: String,
}

impl From<domain::Skill> for Skill {
    fn from(skill: domain::Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name.to_string(),
            category: skill.category.to_string(),
            level: skill.level.into(),
            icon: skill.icon.as_ref().map(ToString::to_string),
            created_at: skill.created_at.to_rfc3339(),
            updated_at: skill.updated_at.to_rfc3339(),
        }
    }
}

/// Contents of a [`Skill`] submitted by the administrator.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SkillInput {
    name: Option<String>,
    category: Option<String>,
    level: Option<i64>,
    icon: Option<String>,
}

impl Validate for SkillInput {
    type Output = skill::Draft;

    fn validate(self) -> Result<Self::Output, InvalidField> {
        let level = self
            .level
            .map_or(Some(skill::Level::MIN), |l| i16::try_from(l).ok())
            .and_then(skill::Level::new)
            .ok_or_else(|| {
                InvalidField::new(
                    "level",
                    format!(
                        "Must be between {} and {}",
                        skill::Level::MIN,
                        skill::Level::MAX,
                    ),
                )
            })?;

        Ok(skill::Draft {
            name: required(
                "name",
                self.name,
                skill::Name::new,
                "Name is too long",
            )?,
            category: required(
                "category",
                self.category,
                skill::Category::new,
                "Category is too long",
            )?,
            level,
            icon: optional("icon", self.icon, skill::Icon::new, "Icon is too long")?,
        })
    }
}

/// Lists all the [`Skill`]s, newest first.
///
/// # Errors
///
/// If the [`Skill`]s cannot be read.
#[tracing::instrument(skip_all)]
pub async fn list(ctx: Context) -> Result<Json<Vec<Skill>>, Error> {
    let skills = ctx
        .service()
        .execute(query::skills::List::all())
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(skills.into_iter().map(Into::into).collect()))
}

/// Creates a new [`Skill`].
///
/// # Errors
///
/// If the [`Skill`] cannot be stored.
#[tracing::instrument(skip_all, fields(name = %draft.name))]
pub async fn create(
    Authorized(ctx): Authorized,
    Validated(draft): Validated<SkillInput>,
) -> Result<Json<Skill>, Error> {
    let skill = ctx
        .service()
        .execute(command::CreateSkill { draft })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(skill.into()))
}

/// Replaces the contents of an existing [`Skill`].
///
/// # Errors
///
/// With `404 Not Found` if the [`Skill`] doesn't exist.
#[tracing::instrument(skip_all, fields(id = ?id))]
pub async fn update(
    Authorized(ctx): Authorized,
    id: Result<Path<skill::Id>, PathRejection>,
    Validated(draft): Validated<SkillInput>,
) -> Result<Json<Skill>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    let skill = ctx
        .service()
        .execute(command::UpdateSkill { id, draft })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(skill.into()))
}

/// Deletes a [`Skill`], succeeding even if it doesn't exist.
///
/// # Errors
///
/// If the [`Skill`] cannot be deleted.
#[tracing::instrument(skip_all, fields(id = ?id))]
pub async fn delete(
    Authorized(ctx): Authorized,
    id: Result<Path<skill::Id>, PathRejection>,
) -> Result<Json<Success>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    ctx.service()
        .execute(command::DeleteSkill { id })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Success::OK))
}

impl AsError for command::create_skill::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_skill::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum SkillError {
                #[code = "SKILL_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Skill not found"]
                NotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SkillNotExists(_) => Some(SkillError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_skill::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain::skill::Level;

    use crate::api::Validate as _;

    use super::SkillInput;

    fn input(level: Option<i64>) -> SkillInput {
        SkillInput {
            name: Some("Rust".to_owned()),
            category: Some("Backend".to_owned()),
            level,
            icon: None,
        }
    }

    #[test]
    fn defaults_level_to_lowest() {
        let draft = input(None).validate().unwrap();

        assert_eq!(draft.level, Level::new(1).unwrap());
    }

    #[test]
    fn bounds_level() {
        for level in [1, 5] {
            assert!(input(Some(level)).validate().is_ok(), "{level}");
        }
        for level in [0, 6, -1, i64::from(i16::MAX) + 1] {
            let err = input(Some(level)).validate().unwrap_err();
            assert_eq!(err.to_string(), "level: Must be between 1 and 5");
        }
    }
}
