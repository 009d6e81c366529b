//! [`Technology`]-related endpoints.

use axum::{
    extract::{rejection::PathRejection, Path},
    Json,
};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, technology},
    query, Query as _,
};

use crate::{
    api::{optional, required, InvalidField, Success, Validate, Validated},
    define_error, AsError, Authorized, Context, Error,
};

/// Tech stack item of the portfolio owner.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    /// ID of this [`Technology`].
    pub id: technology::Id,

    /// Name of this [`Technology`].
    pub name: String,

    /// Category of this [`Technology`].
    pub category: String,

    /// Icon reference of this [`Technology`].
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

impl From<domain::Technology> for Technology {
    fn from(tech: domain::Technology) -> Self {
        Self {
            id: tech.id,
            name: tech.name.to_string(),
            category: tech.category.to_string(),
            icon: tech.icon.as_ref().map(ToString::to_string),
            created_at: tech.created_at.to_rfc3339(),
            updated_at: tech.updated_at.to_rfc3339(),
        }
    }
}

/// Contents of a [`Technology`] submitted by the administrator.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TechnologyInput {
    name: Option<String>,
    category: Option<String>,
    icon: Option<String>,
}

impl Validate for TechnologyInput {
    type Output = technology::Draft;

    fn validate(self) -> Result<Self::Output, InvalidField> {
        Ok(technology::Draft {
            name: required(
                "name",
                self.name,
                technology::Name::new,
                "Name is too long",
            )?,
            category: required(
                "category",
                self.category,
                technology::Category::new,
                "Category is too long",
            )?,
            icon: optional(
                "icon",
                self.icon,
                technology::Icon::new,
                "Icon is too long",
            )?,
        })
    }
}

/// Lists the whole tech stack, newest first.
///
/// # Errors
///
/// If the [`Technology`]s cannot be read.
#[tracing::instrument(skip_all)]
pub async fn list(ctx: Context) -> Result<Json<Vec<Technology>>, Error> {
    let techs = ctx
        .service()
        .execute(query::technologies::List::all())
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(techs.into_iter().map(Into::into).collect()))
}

/// Adds a new [`Technology`] to the tech stack.
///
/// # Errors
///
/// If the [`Technology`] cannot be stored.
#[tracing::instrument(skip_all, fields(name = %draft.name))]
pub async fn create(
    Authorized(ctx): Authorized,
    Validated(draft): Validated<TechnologyInput>,
) -> Result<Json<Technology>, Error> {
    let tech = ctx
        .service()
        .execute(command::CreateTechnology { draft })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(tech.into()))
}

/// Replaces the contents of an existing [`Technology`].
///
/// # Errors
///
/// With `404 Not Found` if the [`Technology`] doesn't exist.
#[tracing::instrument(skip_all, fields(id = ?id))]
pub async fn update(
    Authorized(ctx): Authorized,
    id: Result<Path<technology::Id>, PathRejection>,
    Validated(draft): Validated<TechnologyInput>,
) -> Result<Json<Technology>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    let tech = ctx
        .service()
        .execute(command::UpdateTechnology { id, draft })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(tech.into()))
}

/// Removes a [`Technology`] from the tech stack, succeeding even if it
/// doesn't exist.
///
/// # Errors
///
/// If the [`Technology`] cannot be deleted.
#[tracing::instrument(skip_all, fields(id = ?id))]
pub async fn delete(
    Authorized(ctx): Authorized,
    id: Result<Path<technology::Id>, PathRejection>,
) -> Result<Json<Success>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    ctx.service()
        .execute(command::DeleteTechnology { id })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Success::OK))
}

impl AsError for command::create_technology::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_technology::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum TechnologyError {
                #[code = "TECHNOLOGY_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Tech stack item not found"]
                NotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TechnologyNotExists(_) => {
                Some(TechnologyError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_technology::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}
