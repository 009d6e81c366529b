//! [`Skill`] definitions.

use common::{unit, DateTime, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Skill of the portfolio owner.
#[derive(Clone, Debug)]
pub struct Skill {
    /// ID of this [`Skill`].
    pub id: Id,

    /// [`Name`] of this [`Skill`].
    pub name: Name,

    /// [`Category`] of this [`Skill`].
    pub category: Category,

    /// Proficiency [`Level`] of this [`Skill`].
    pub level: Level,

    /// [`Icon`] of this [`Skill`].
    pub icon: Option<Icon>,

    /// [`DateTime`] when this [`Skill`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Skill`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Skill {
    /// Creates a brand new [`Skill`] out of the provided [`Draft`].
    #[must_use]
    pub fn new(draft: Draft) -> Self {
        let now = DateTime::now();
        Self {
            id: Id::new(),
            name: draft.name,
            category: draft.category,
            level: draft.level,
            icon: draft.icon,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }

    /// Replaces the contents of this [`Skill`] with the provided [`Draft`].
    pub fn apply(&mut self, draft: Draft) {
        self.name = draft.name;
        self.category = draft.category;
        self.level = draft.level;
        self.icon = draft.icon;
        self.updated_at = DateTime::now().coerce();
    }
}

/// Contents of a [`Skill`] provided by the administrator.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Name`] of the [`Skill`].
    pub name: Name,

    /// [`Category`] of the [`Skill`].
    pub category: Category,

    /// Proficiency [`Level`] of the [`Skill`].
    pub level: Level,

    /// [`Icon`] of the [`Skill`].
    pub icon: Option<Icon>,
}

/// ID of a [`Skill`].
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
    #[doc = "Name of a [`Skill`]."]
    Name(max = 256)
}

define_text! {
    #[doc = "Category of a [`Skill`] (`Frontend`, `Backend`, etc)."]
    Category(max = 256)
}

define_text! {
    #[doc = "Icon reference of a [`Skill`]."]
    Icon(max = 512)
}

/// Proficiency level of a [`Skill`], from `1` to `5`.
#[derive(Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Level(i16);

impl Level {
    /// Lowest [`Level`].
    pub const MIN: i16 = 1;

    /// Highest [`Level`].
    pub const MAX: i16 = 5;

    /// Creates a new [`Level`] if the given `level` is in range.
    #[must_use]
    pub fn new(level: i16) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(Self(level))
    }
}

/// [`DateTime`] of a [`Skill`] creation.
pub type CreationDateTime = DateTimeOf<(Skill, unit::Creation)>;

/// [`DateTime`] of a [`Skill`] modification.
pub type ModificationDateTime = DateTimeOf<(Skill, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::Level;

    #[test]
    fn level_is_bounded() {
        for level in 1..=5 {
            assert!(Level::new(level).is_some(), "level {level}");
        }

        assert!(Level::new(0).is_none());
        assert!(Level::new(6).is_none());
        assert!(Level::new(-1).is_none());
    }
}
