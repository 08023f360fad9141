//! In-memory [`Database`] implementation.

pub mod client;
pub mod connection;
mod impls;

use derive_more::{Deref, Display, Error as StdError};

use crate::domain::reservation;
#[cfg(doc)]
use crate::infra::Database;

pub use self::{
    client::{NonTx, Tx},
    connection::{Connection, Tables},
};

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Default, Deref)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new empty [`Memory`] client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Memory`] client pre-populated with the provided
    /// [`Tables`].
    #[must_use]
    pub fn with_tables(tables: Tables) -> Self {
        Self(NonTx::from_tables(tables))
    }
}

/// In-memory database [`Error`].
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Transaction was used after being committed.
    #[display("Transaction is committed already")]
    TxFinished,

    /// [`Reservation`] to be updated does not exist.
    ///
    /// [`Reservation`]: crate::domain::Reservation
    #[display("`Reservation(id: {_0})` does not exist")]
    ReservationNotExists(#[error(not(source))] reservation::Id),
}
