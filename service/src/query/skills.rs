//! [`Query`] collection related to multiple [`Skill`]s.

use common::operations::By;

use crate::domain::Skill;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Skill`]s, newest first.
pub type List = DatabaseQuery<By<Vec<Skill>, ()>>;
