//! [`Command`] for canceling a [`Reservation`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{reservation, Reservation},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for canceling a [`Reservation`].
///
/// Canceled [`Reservation`]s stay in the ledger, but never occupy their
/// [`Room`] anymore.
///
/// [`Room`]: crate::domain::Room
#[derive(Clone, Debug)]
pub struct CancelReservation {
    /// ID of the [`Reservation`] to cancel.
    pub reservation_id: reservation::Id,

    /// [`reservation::Reason`] of the cancellation.
    pub reason: reservation::Reason,
}

impl<Db> Command<CancelReservation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Reservation>, reservation::Id>>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        > + Database<Update<Reservation>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CancelReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CancelReservation {
            reservation_id,
            reason,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut reservation = tx
            .execute(Select(By::<Option<Reservation>, _>::new(reservation_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReservationNotExists(reservation_id))
            .map_err(tracerr::wrap!())?;

        reservation
            .cancel(reason, DateTime::now().coerce())
            .map_err(|reservation::AlreadyCanceled(id)| E::AlreadyCanceled(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Update(reservation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Reservation(id: {reservation_id})` canceled");

        Ok(reservation)
    }
}

/// Error of [`CancelReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Reservation`] is canceled already.
    #[display("`Reservation(id: {_0})` is canceled already")]
    AlreadyCanceled(#[error(not(source))] reservation::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Reservation`] with the provided ID does not exist.
    #[display("`Reservation(id: {_0})` does not exist")]
    ReservationNotExists(#[error(not(source))] reservation::Id),
}
