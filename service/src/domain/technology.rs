//! [`Technology`] definitions.

use common::{unit, DateTime, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Item of the portfolio owner's tech stack.
#[derive(Clone, Debug)]
pub struct Technology {
    /// ID of this [`Technology`].
    pub id: Id,

    /// [`Name`] of this [`Technology`].
    pub name: Name,

    /// [`Category`] of this [`Technology`].
    pub category: Category,

    /// [`Icon`] of this [`Technology`].
    pub icon: Option<Icon>,

    /// [`DateTime`] when this [`Technology`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Technology`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Technology {
    /// Creates a brand new [`Technology`] out of the provided [`Draft`].
    #[must_use]
    pub fn new(draft: Draft) -> Self {
        let now = DateTime::now();
        Self {
            id: Id::new(),
            name: draft.name,
            category: draft.category,
            icon: draft.icon,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }

    /// Replaces the contents of this [`Technology`] with the provided
    /// [`Draft`].
    pub fn apply(&mut self, draft: Draft) {
        self.name = draft.name;
        self.category = draft.category;
        self.icon = draft.icon;
        self.updated_at = DateTime::now().coerce();
    }
}

/// Contents of a [`Technology`] provided by the administrator.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Name`] of the [`Technology`].
    pub name: Name,

    /// [`Category`] of the [`Technology`].
    pub category: Category,

    /// [`Icon`] of the [`Technology`].
    pub icon: Option<Icon>,
}

/// ID of a [`Technology`].
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
    #[doc = "Name of a [`Technology`]."]
    Name(max = 256)
}

define_text! {
    #[doc = "Category of a [`Technology`] (`Language`, `Database`, etc)."]
    Category(max = 256)
}

define_text! {
    #[doc = "Icon reference of a [`Technology`]."]
    Icon(max = 512)
}

/// [`DateTime`] of a [`Technology`] creation.
pub type CreationDateTime = DateTimeOf<(Technology, unit::Creation)>;

/// [`DateTime`] of a [`Technology`] modification.
pub type ModificationDateTime = DateTimeOf<(Technology, unit::Modification)>;
