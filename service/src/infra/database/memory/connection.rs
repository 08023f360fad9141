//! [`Connection`] definitions.

use std::future::Future;

use tracerr::Traced;

use crate::{
    domain::{Customer, Project, Reservation, Room},
    infra::database,
};

/// Rows stored in a [`Memory`] database, in insertion order.
///
/// [`Memory`]: super::Memory
#[derive(Clone, Debug, Default)]
pub struct Tables {
    /// Stored [`Project`]s.
    pub projects: Vec<Project>,

    /// Stored [`Customer`]s.
    pub customers: Vec<Customer>,

    /// Stored [`Room`]s.
    pub rooms: Vec<Room>,

    /// Stored [`Reservation`]s.
    pub reservations: Vec<Reservation>,
}

/// Generic in-memory database connection.
pub trait Connection {
    /// Runs the provided function over the [`Tables`] visible to this
    /// [`Connection`].
    ///
    /// # Errors
    ///
    /// If the [`Tables`] are not accessible anymore.
    fn read<R>(
        &self,
        f: impl FnOnce(&Tables) -> R,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>;

    /// Runs the provided function over the [`Tables`] visible to this
    /// [`Connection`], allowing to modify them.
    ///
    /// # Errors
    ///
    /// If the [`Tables`] are not accessible anymore.
    fn write<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> R,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>;
}
