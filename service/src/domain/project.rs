//! [`Project`] definitions.

use common::{unit, DateTime, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::contact::Url;

/// Showcased project.
#[derive(Clone, Debug)]
pub struct Project {
    /// ID of this [`Project`].
    pub id: Id,

    /// [`Title`] of this [`Project`].
    pub title: Title,

    /// [`Description`] of this [`Project`].
    pub description: Description,

    /// [`Url`] of this [`Project`]'s cover image.
    pub image: Option<Url>,

    /// [`Url`] of this [`Project`]'s source repository.
    pub github_url: Option<Url>,

    /// [`Url`] of this [`Project`]'s live deployment.
    pub live_url: Option<Url>,

    /// [`Tag`]s of technologies this [`Project`] is built with.
    pub tech_stack: Vec<Tag>,

    /// Indicator whether this [`Project`] is highlighted.
    pub featured: bool,

    /// [`DateTime`] when this [`Project`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Project`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Project {
    /// Creates a brand new [`Project`] out of the provided [`Draft`].
    #[must_use]
    pub fn new(draft: Draft) -> Self {
        let now = DateTime::now();
        Self {
            id: Id::new(),
            title: draft.title,
            description: draft.description,
            image: draft.image,
            github_url: draft.github_url,
            live_url: draft.live_url,
            tech_stack: draft.tech_stack,
            featured: draft.featured,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }

    /// Replaces the contents of this [`Project`] with the provided [`Draft`].
    pub fn apply(&mut self, draft: Draft) {
        self.title = draft.title;
        self.description = draft.description;
        self.image = draft.image;
        self.github_url = draft.github_url;
        self.live_url = draft.live_url;
        self.tech_stack = draft.tech_stack;
        self.featured = draft.featured;
        self.updated_at = DateTime::now().coerce();
    }
}

/// Contents of a [`Project`] provided by the administrator.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Title`] of the [`Project`].
    pub title: Title,

    /// [`Description`] of the [`Project`].
    pub description: Description,

    /// [`Url`] of the [`Project`]'s cover image.
    pub image: Option<Url>,

    /// [`Url`] of the [`Project`]'s source repository.
    pub github_url: Option<Url>,

    /// [`Url`] of the [`Project`]'s live deployment.
    pub live_url: Option<Url>,

    /// [`Tag`]s of technologies the [`Project`] is built with.
    pub tech_stack: Vec<Tag>,

    /// Indicator whether the [`Project`] is highlighted.
    pub featured: bool,
}

/// ID of a [`Project`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_text! {
    #[doc = "Title of a [`Project`]."]
    Title(max = 256)
}

define_text! {
    #[doc = "Description of a [`Project`]."]
    Description(max = 10000)
}

define_text! {
    #[doc = "Technology tag of a [`Project`]."]
    Tag(max = 64)
}

/// [`DateTime`] of a [`Project`] creation.
pub type CreationDateTime = DateTimeOf<(Project, unit::Creation)>;

/// [`DateTime`] of a [`Project`] modification.
pub type ModificationDateTime = DateTimeOf<(Project, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{Description, Draft, Project, Tag, Title};

    #[test]
    fn apply_replaces_contents() {
        let mut project = Project::new(Draft {
            title: Title::new("Portfolio").unwrap(),
            description: Description::new("This very site.").unwrap(),
            image: None,
            github_url: None,
            live_url: None,
            tech_stack: vec![Tag::new("Rust").unwrap()],
            featured: false,
        });
        let id = project.id;

        project.apply(Draft {
            title: Title::new("Portfolio v2").unwrap(),
            description: Description::new("This very site.").unwrap(),
            image: None,
            github_url: None,
            live_url: None,
            tech_stack: vec![],
            featured: true,
        });

        assert_eq!(project.id, id);
        assert_eq!(project.title, Title::new("Portfolio v2").unwrap());
        assert!(project.tech_stack.is_empty());
        assert!(project.featured);
    }

    #[test]
    fn validates_tag() {
        assert!(Tag::new("Next.js").is_some());

        assert!(Tag::new("").is_none());
        assert!(Tag::new("x".repeat(65)).is_none());
    }
}
