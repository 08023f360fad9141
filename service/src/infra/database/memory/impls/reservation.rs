//! [`Reservation`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{project, reservation, room, Reservation},
    infra::{
        database::{self, memory, memory::Connection, Memory},
        Database,
    },
};

impl<C> Database<Select<By<Option<Reservation>, reservation::Id>>>
    for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| t.reservations.iter().find(|r| r.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Selects all the [`Reservation`]s of the [`Room`] with the provided ID,
/// canceled ones included.
///
/// [`Room`]: crate::domain::Room
impl<C> Database<Select<By<Vec<Reservation>, room::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Reservation>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let room_id = by.into_inner();
        self.read(|t| {
            t.reservations
                .iter()
                .filter(|r| r.room_id == room_id)
                .cloned()
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Selects all the [`Reservation`]s of the [`Project`] with the provided ID,
/// or the whole ledger if [`None`], canceled ones included.
///
/// [`Project`]: crate::domain::Project
impl<C> Database<Select<By<Vec<Reservation>, Option<project::Id>>>>
    for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Reservation>, Option<project::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let project_id = by.into_inner();
        self.read(|t| {
            t.reservations
                .iter()
                .filter(|r| project_id.map_or(true, |id| r.project_id == id))
                .cloned()
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Reservation>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reservation): Insert<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| {
            if let Some(existing) =
                t.reservations.iter_mut().find(|r| r.id == reservation.id)
            {
                *existing = reservation;
            } else {
                t.reservations.push(reservation);
            }
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Reservation>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(reservation): Update<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = reservation.id;
        let found = self
            .write(|t| match t.reservations.iter_mut().find(|r| r.id == id) {
                Some(existing) => {
                    *existing = reservation;
                    true
                }
                None => false,
            })
            .await
            .map_err(tracerr::wrap!())?;
        if !found {
            return Err(tracerr::new!(database::Error::from(
                memory::Error::ReservationNotExists(id)
            )));
        }
        Ok(())
    }
}
