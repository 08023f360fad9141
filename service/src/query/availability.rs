//! [`Query`] collection answering whether [`Room`]s are free.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{period, project, room, Reservation, Room},
    infra::{database, Database},
    read::{
        availability::{self, Availability},
        Selection,
    },
    Query, Service,
};

/// [`Query`] for the [`Availability`] of a single [`Room`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoomAvailability {
    /// ID of the [`Room`] to check.
    pub room_id: room::Id,

    /// [`Selection`] of days to check the [`Room`] for.
    pub selection: Selection,
}

impl<Db> Query<RoomAvailability> for Service<Db>
where
    Db: Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Reservation>, room::Id>>,
            Ok = Vec<Reservation>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Availability;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        RoomAvailability { room_id, selection }: RoomAvailability,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let room = self
            .database()
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        let ledger = self
            .database()
            .execute(Select(By::<Vec<Reservation>, _>::new(room.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        availability::check(&room, &selection, &self.config().anchors, &ledger)
            .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// [`Query`] for the [`Room`]s free for a [`Selection`], in insertion
/// order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AvailableRooms {
    /// ID of the [`Project`] to look the [`Room`]s in.
    ///
    /// [`None`] means all the [`Project`]s.
    ///
    /// [`Project`]: crate::domain::Project
    pub project_id: Option<project::Id>,

    /// [`Selection`] of days the [`Room`]s should be free for.
    pub selection: Selection,
}

impl<Db> Query<AvailableRooms> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Room>, Option<project::Id>>>,
            Ok = Vec<Room>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Reservation>, Option<project::Id>>>,
            Ok = Vec<Reservation>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<Room>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        AvailableRooms {
            project_id,
            selection,
        }: AvailableRooms,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let rooms = self
            .database()
            .execute(Select(By::<Vec<Room>, _>::new(project_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if rooms.is_empty() || selection == Selection::Unconstrained {
            return Ok(rooms);
        }

        let ledger = self
            .database()
            .execute(Select(By::<Vec<Reservation>, _>::new(project_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let anchors = &self.config().anchors;
        let mut free = Vec::with_capacity(rooms.len());
        for room in rooms {
            let availability =
                availability::check(&room, &selection, anchors, &ledger)
                    .map_err(tracerr::from_and_wrap!(=> E))?;
            if availability.is_free() {
                free.push(room);
            }
        }
        Ok(free)
    }
}

/// Error of [`RoomAvailability`] or [`AvailableRooms`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Selection`] addresses a non-existent dönem.
    #[display("Invalid `Selection`: {_0}")]
    #[from]
    Period(period::Error),

    /// [`Room`] with the provided ID does not exist.
    #[display("`Room(id: {_0})` does not exist")]
    RoomNotExists(#[error(not(source))] room::Id),
}
