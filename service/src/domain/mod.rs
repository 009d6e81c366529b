//! Domain definitions.

/// Defines a trimmed, non-empty and length-bounded text value type.
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        $name:ident(max = $max:literal)
    ) => {
        #[doc = $doc]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            PartialEq,
        )]
        #[as_ref(str, String)]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent)
        )]
        pub struct $name(String);

        impl $name {
            #[doc = concat!(
                "Maximum number of characters in a [`",
                stringify!($name),
                "`].",
            )]
            pub const MAX_LEN: usize = $max;

            #[doc = concat!(
                "Creates a new [`",
                stringify!($name),
                "`] if the given `text` is valid.",
            )]
            #[must_use]
            pub fn new(text: impl Into<String>) -> Option<Self> {
                let text = text.into();
                Self::check(&text).then_some(Self(text))
            }

            #[doc = concat!(
                "Checks whether the given `text` is a valid [`",
                stringify!($name),
                "`].",
            )]
            fn check(text: &str) -> bool {
                text.trim() == text
                    && !text.is_empty()
                    && text.chars().count() <= Self::MAX_LEN
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

pub mod admin;
pub mod contact;
pub mod profile;
pub mod project;
pub mod skill;
pub mod technology;

pub use self::{
    admin::Session, profile::Profile, project::Project, skill::Skill,
    technology::Technology,
};
