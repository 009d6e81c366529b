//! [`Query`] collection related to the [`Profile`].

use common::operations::By;

use crate::domain::Profile;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the current [`Profile`], if it was filled in already.
pub type Current = DatabaseQuery<By<Option<Profile>, ()>>;
