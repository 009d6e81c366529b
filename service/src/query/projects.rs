//! [`Query`] collection related to multiple [`Project`]s.

use common::operations::By;

use crate::domain::Project;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Project`]s, newest first.
pub type List = DatabaseQuery<By<Vec<Project>, ()>>;
