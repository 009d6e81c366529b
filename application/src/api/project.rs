//! [`Project`]-related endpoints.

use axum::{
    extract::{rejection::PathRejection, Path},
    Json,
};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, contact::Url, project},
    query, Query as _,
};

use crate::{
    api::{optional, required, InvalidField, Success, Validate, Validated},
    define_error, AsError, Authorized, Context, Error,
};

/// Showcased project.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// ID of this [`Project`].
    pub id: project::Id,

    /// Title of this [`Project`].
    pub title: String,

    /// Description of this [`Project`].
    pub description: String,

    /// URL of the cover image.
    pub image: Option<String>,

    /// URL of the source repository.
    pub github_url: Option<String>,

    /// URL of the live deployment.
    pub live_url: Option<String>,

    /// Technologies this [`Project`] is built with.
    pub tech_stack: Vec<String>,

    /// Indicator whether this [`Project`] is highlighted.
    pub featured: bool,

    /// [RFC 3339] date and time of creation.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub created_at: String,

    /// [RFC 3339] date and time of the last modification.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub updated_at: String,
}

impl From<domain::Project> for Project {
    fn from(project: domain::Project) -> Self {
        Self {
            id: project.id,
            title: project.title.to_string(),
            description: project.description.to_string(),
            image: project.image.as_ref().map(ToString::to_string),
            github_url: project.github_url.as_ref().map(ToString::to_string),
            live_url: project.live_url.as_ref().map(ToString::to_string),
            tech_stack: project
                .tech_stack
                .iter()
                .map(ToString::to_string)
                .collect(),
            featured: project.featured,
            created_at: project.created_at.to_rfc3339(),
            updated_at: project.updated_at.to_rfc3339(),
        }
    }
}

/// Contents of a [`Project`] submitted by the administrator.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectInput {
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    github_url: Option<String>,
    live_url: Option<String>,
    tech_stack: Vec<String>,
    featured: bool,
}

impl Validate for ProjectInput {
    type Output = project::Draft;

    fn validate(self) -> Result<Self::Output, InvalidField> {
        const INVALID_URL: &str = "Invalid URL";

        let tech_stack = self
            .tech_stack
            .into_iter()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .map(|t| {
                project::Tag::new(t).ok_or_else(|| {
                    InvalidField::new("techStack", "Technology name is too long")
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(project::Draft {
            title: required(
                "title",
                self.title,
                project::Title::new,
                "Title is too long",
            )?,
            description: required(
                "description",
                self.description,
                project::Description::new,
                "Description is too long",
            )?,
            image: optional("image", self.image, Url::new, INVALID_URL)?,
            github_url: optional(
                "githubUrl",
                self.github_url,
                Url::new,
                INVALID_URL,
            )?,
            live_url: optional("liveUrl", self.live_url, Url::new, INVALID_URL)?,
            tech_stack,
            featured: self.featured,
        })
    }
}

/// Lists all the [`Project`]s, newest first.
///
/// # Errors
///
/// If the [`Project`]s cannot be read.
#[tracing::instrument(skip_all)]
pub async fn list(ctx: Context) -> Result<Json<Vec<Project>>, Error> {
    let projects = ctx
        .service()
        .execute(query::projects::List::all())
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// Creates a new [`Project`].
///
/// # Errors
///
/// If the [`Project`] cannot be stored.
#[tracing::instrument(skip_all, fields(title = %draft.title))]
pub async fn create(
    Authorized(ctx): Authorized,
    Validated(draft): Validated<ProjectInput>,
) -> Result<Json<Project>, Error> {
    let project = ctx
        .service()
        .execute(command::CreateProject { draft })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(project.into()))
}

/// Replaces the contents of an existing [`Project`].
///
/// # Errors
///
/// With `404 Not Found` if the [`Project`] doesn't exist.
#[tracing::instrument(skip_all, fields(id = ?id))]
pub async fn update(
    Authorized(ctx): Authorized,
    id: Result<Path<project::Id>, PathRejection>,
    Validated(draft): Validated<ProjectInput>,
) -> Result<Json<Project>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    let project = ctx
        .service()
        .execute(command::UpdateProject { id, draft })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(project.into()))
}

/// Deletes a [`Project`], succeeding even if it doesn't exist.
///
/// # Errors
///
/// If the [`Project`] cannot be deleted.
#[tracing::instrument(skip_all, fields(id = ?id))]
pub async fn delete(
    Authorized(ctx): Authorized,
    id: Result<Path<project::Id>, PathRejection>,
) -> Result<Json<Success>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    ctx.service()
        .execute(command::DeleteProject { id })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Success::OK))
}

impl AsError for command::create_project::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_project::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum ProjectError {
                #[code = "PROJECT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Project not found"]
                NotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ProjectNotExists(_) => Some(ProjectError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_project::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::api::Validate as _;

    use super::ProjectInput;

    fn input() -> ProjectInput {
        ProjectInput {
            title: Some("Portfolio".to_owned()),
            description: Some("This very site.".to_owned()),
            ..ProjectInput::default()
        }
    }

    #[test]
    fn skips_blank_tags() {
        let draft = ProjectInput {
            tech_stack: vec![
                "Rust".to_owned(),
                " ".to_owned(),
                " axum ".to_owned(),
            ],
            ..input()
        }
        .validate()
        .unwrap();

        let tags: Vec<_> =
            draft.tech_stack.iter().map(ToString::to_string).collect();
        assert_eq!(tags, ["Rust", "axum"]);
    }

    #[test]
    fn rejects_invalid_fields() {
        for (input, expected) in [
            (
                ProjectInput {
                    description: Some(String::new()),
                    ..input()
                },
                "description: Required",
            ),
            (
                ProjectInput {
                    live_url: Some("example.com".to_owned()),
                    ..input()
                },
                "liveUrl: Invalid URL",
            ),
            (
                ProjectInput {
                    tech_stack: vec!["x".repeat(65)],
                    ..input()
                },
                "techStack: Technology name is too long",
            ),
        ] {
            assert_eq!(input.validate().unwrap_err().to_string(), expected);
        }
    }
}
