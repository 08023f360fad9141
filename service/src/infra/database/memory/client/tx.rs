//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedRwLockWriteGuard};
use tracerr::Traced;

use crate::infra::database::{
    self,
    memory::{self, Connection, Tables},
};

use super::NonTx;

/// Transactional in-memory database client.
///
/// Holds the write lock of the [`Tables`] until committed or dropped, so
/// only one [`Tx`] runs at a time and no [`NonTx`] client observes its
/// intermediate state. Dropping a [`Tx`] without committing discards its
/// changes.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Inner state of this client, [`None`] once committed.
    inner: Arc<Mutex<Option<Inner>>>,
}

/// Inner state of a [`Tx`] client.
#[derive(Debug)]
struct Inner {
    /// Write lock of the shared [`Tables`].
    guard: OwnedRwLockWriteGuard<Tables>,

    /// Copy of the [`Tables`] the changes are applied to until commit.
    staged: Tables,
}

impl Tx {
    /// Starts a new [`Tx`] over the [`Tables`] of the provided [`NonTx`]
    /// client, waiting for the running one to finish first.
    pub async fn from_non_tx(client: &NonTx) -> Self {
        let guard = Arc::clone(&client.tables).write_owned().await;
        let staged = Tables::clone(&guard);
        Self {
            inner: Arc::new(Mutex::new(Some(Inner { guard, staged }))),
        }
    }

    /// Commits this [`Tx`] client, releasing the write lock.
    ///
    /// # Errors
    ///
    /// With [`memory::Error::TxFinished`] if this [`Tx`] has been committed
    /// already.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Inner { mut guard, staged } =
            self.inner.lock().await.take().ok_or_else(|| {
                tracerr::new!(database::Error::from(memory::Error::TxFinished))
            })?;
        *guard = staged;
        Ok(())
    }
}

impl Connection for Tx {
    async fn read<R>(
        &self,
        f: impl FnOnce(&Tables) -> R,
    ) -> Result<R, Traced<database::Error>> {
        let inner = self.inner.lock().await;
        let inner = inner.as_ref().ok_or_else(|| {
            tracerr::new!(database::Error::from(memory::Error::TxFinished))
        })?;
        Ok(f(&inner.staged))
    }

    async fn write<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> R,
    ) -> Result<R, Traced<database::Error>> {
        let mut inner = self.inner.lock().await;
        let inner = inner.as_mut().ok_or_else(|| {
            tracerr::new!(database::Error::from(memory::Error::TxFinished))
        })?;
        Ok(f(&mut inner.staged))
    }
}
