//! [`Query`] collection related to multiple [`Room`]s.

use common::operations::By;

use crate::domain::{project, Room};
#[cfg(doc)]
use crate::{domain::Project, Query};

use super::DatabaseQuery;

/// Queries [`Room`]s of a [`Project`] in insertion order.
///
/// [`None`] queries the [`Room`]s of all the [`Project`]s.
pub type ByProject = DatabaseQuery<By<Vec<Room>, Option<project::Id>>>;
