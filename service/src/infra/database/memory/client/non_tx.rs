//! [`NonTx`] client definitions.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracerr::Traced;

use crate::infra::database::{
    self,
    memory::{Connection, Tables},
};

/// Non-transactional in-memory database client.
///
/// Every write is visible immediately.
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// Shared [`Tables`] of the database.
    pub(crate) tables: Arc<RwLock<Tables>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client owning the provided [`Tables`].
    #[must_use]
    pub(crate) fn from_tables(tables: Tables) -> Self {
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }
}

impl Connection for NonTx {
    async fn read<R>(
        &self,
        f: impl FnOnce(&Tables) -> R,
    ) -> Result<R, Traced<database::Error>> {
        Ok(f(&*self.tables.read().await))
    }

    async fn write<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> R,
    ) -> Result<R, Traced<database::Error>> {
        Ok(f(&mut *self.tables.write().await))
    }
}
