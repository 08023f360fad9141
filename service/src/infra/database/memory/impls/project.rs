//! [`Project`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{project, Project},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
};

impl<C> Database<Select<By<Option<Project>, project::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Project>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Project>, project::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| t.projects.iter().find(|p| p.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Project>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(project): Insert<Project>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| {
            if let Some(existing) =
                t.projects.iter_mut().find(|p| p.id == project.id)
            {
                *existing = project;
            } else {
                t.projects.push(project);
            }
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
