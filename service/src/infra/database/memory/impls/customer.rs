//! [`Customer`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{customer, Customer},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
};

impl<C> Database<Select<By<Option<Customer>, customer::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Customer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Customer>, customer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| t.customers.iter().find(|c| c.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Customer>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(customer): Insert<Customer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| {
            if let Some(existing) =
                t.customers.iter_mut().find(|c| c.id == customer.id)
            {
                *existing = customer;
            } else {
                t.customers.push(customer);
            }
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
