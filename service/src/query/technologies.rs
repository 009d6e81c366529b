//! [`Query`] collection related to the tech stack.

use common::operations::By;

use crate::domain::Technology;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Technology`] items, newest first.
pub type List = DatabaseQuery<By<Vec<Technology>, ()>>;
