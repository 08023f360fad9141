//! [`Query`] collection related to multiple [`Reservation`]s.

use common::operations::By;

use crate::domain::{project, room, Reservation};
#[cfg(doc)]
use crate::{
    domain::{Project, Room},
    Query,
};

use super::DatabaseQuery;

/// Queries all the [`Reservation`]s of a [`Room`], canceled ones included.
pub type ByRoom = DatabaseQuery<By<Vec<Reservation>, room::Id>>;

/// Queries all the [`Reservation`]s of a [`Project`], canceled ones
/// included.
///
/// [`None`] queries the whole ledger.
pub type ByProject = DatabaseQuery<By<Vec<Reservation>, Option<project::Id>>>;
