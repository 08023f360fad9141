//! [`Room`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{project, room, Room},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
};

impl<C> Database<Select<By<Option<Room>, room::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| t.rooms.iter().find(|r| r.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Selects [`Room`]s of the [`Project`] with the provided ID, or all the
/// [`Room`]s if [`None`], in insertion order.
///
/// [`Project`]: crate::domain::Project
impl<C> Database<Select<By<Vec<Room>, Option<project::Id>>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Room>, Option<project::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let project_id = by.into_inner();
        self.read(|t| {
            t.rooms
                .iter()
                .filter(|r| project_id.map_or(true, |id| r.project_id == id))
                .cloned()
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Room>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(room): Insert<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| {
            if let Some(existing) = t.rooms.iter_mut().find(|r| r.id == room.id)
            {
                *existing = room;
            } else {
                t.rooms.push(room);
            }
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
