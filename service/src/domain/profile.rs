//! [`Profile`] definitions.

use common::{unit, DateTime, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::contact::{Email, Phone, Url};

/// Portfolio owner profile.
///
/// There is at most one [`Profile`] at any time.
#[derive(Clone, Debug)]
pub struct Profile {
    /// ID of this [`Profile`].
    pub id: Id,

    /// [`Name`] of the portfolio owner.
    pub name: Name,

    /// [`Bio`] of the portfolio owner.
    pub bio: Bio,

    /// [`Url`] of the avatar image.
    pub avatar: Option<Url>,

    /// [`Url`] of the GitHub account.
    pub github: Option<Url>,

    /// [`Url`] of the LinkedIn account.
    pub linkedin: Option<Url>,

    /// [`Url`] of the Twitter account.
    pub twitter: Option<Url>,

    /// [`Url`] of the personal website.
    pub website: Option<Url>,

    /// Public contact [`Email`].
    pub email: Option<Email>,

    /// WhatsApp [`Phone`].
    pub whatsapp: Option<Phone>,

    /// Contact [`Phone`].
    pub phone: Option<Phone>,

    /// [`DateTime`] when this [`Profile`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Profile`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Profile {
    /// Creates a brand new [`Profile`] out of the provided [`Draft`].
    #[must_use]
    pub fn new(draft: Draft) -> Self {
        let now = DateTime::now();
        let Draft {
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
        } = draft;
        Self {
            id: Id::new(),
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
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }

    /// Replaces the contents of this [`Profile`] with the provided [`Draft`],
    /// keeping its identity and creation [`DateTime`].
    pub fn apply(&mut self, draft: Draft) {
        let Self {
            id,
            created_at,
            ..
        } = *self;
        *self = Self {
            id,
            created_at,
            ..Self::new(draft)
        };
    }
}

/// Contents of a [`Profile`] provided by the administrator.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Name`] of the portfolio owner.
    pub name: Name,

    /// [`Bio`] of the portfolio owner.
    pub bio: Bio,

    /// [`Url`] of the avatar image.
    pub avatar: Option<Url>,

    /// [`Url`] of the GitHub account.
    pub github: Option<Url>,

    /// [`Url`] of the LinkedIn account.
    pub linkedin: Option<Url>,

    /// [`Url`] of the Twitter account.
    pub twitter: Option<Url>,

    /// [`Url`] of the personal website.
    pub website: Option<Url>,

    /// Public contact [`Email`].
    pub email: Option<Email>,

    /// WhatsApp [`Phone`].
    pub whatsapp: Option<Phone>,

    /// Contact [`Phone`].
    pub phone: Option<Phone>,
}

/// ID of a [`Profile`].
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
    #[doc = "Name of the portfolio owner."]
    Name(max = 256)
}

define_text! {
    #[doc = "Biography of the portfolio owner."]
    Bio(max = 10000)
}

/// [`DateTime`] of a [`Profile`] creation.
pub type CreationDateTime = DateTimeOf<(Profile, unit::Creation)>;

/// [`DateTime`] of a [`Profile`] modification.
pub type ModificationDateTime = DateTimeOf<(Profile, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{Bio, Draft, Name, Profile};

    fn draft(name: &str) -> Draft {
        Draft {
            name: Name::new(name).unwrap(),
            bio: Bio::new("Builds things.").unwrap(),
            avatar: None,
            github: None,
            linkedin: None,
            twitter: None,
            website: None,
            email: None,
            whatsapp: None,
            phone: None,
        }
    }

    #[test]
    fn validates_text() {
        assert!(Name::new("Jane Doe").is_some());
        assert!(Name::new("x".repeat(256)).is_some());

        assert!(Name::new("").is_none());
        assert!(Name::new(" Jane").is_none());
        assert!(Name::new("x".repeat(257)).is_none());
        assert!(Bio::new("x".repeat(10_001)).is_none());
    }

    #[test]
    fn apply_keeps_identity() {
        let mut profile = Profile::new(draft("Jane"));
        let (id, created_at) = (profile.id, profile.created_at);

        profile.apply(draft("Jane Doe"));

        assert_eq!(profile.id, id);
        assert_eq!(profile.created_at, created_at);
        assert_eq!(profile.name, Name::new("Jane Doe").unwrap());
        assert!(profile.updated_at.coerce::<()>() >= created_at.coerce());
    }
}
