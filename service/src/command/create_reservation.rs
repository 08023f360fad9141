//! [`Command`] for confirming a sale by creating a new [`Reservation`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateRange, DateTime, Money, Percent,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        customer, reservation, room, salesperson, Customer, Reservation, Room,
    },
    infra::{database, Database},
    read::availability,
    Service,
};

use super::Command;

/// [`Command`] for confirming a sale by creating a new [`Reservation`].
#[derive(Clone, Debug)]
pub struct CreateReservation {
    /// ID of the [`Room`] to reserve.
    pub room_id: room::Id,

    /// ID of the [`Customer`] who buys the [`Reservation`].
    pub customer_id: customer::Id,

    /// ID of the salesperson who makes the sale.
    pub salesperson_id: salesperson::Id,

    /// Inclusive [`DateRange`] of the stay.
    pub stay: DateRange,

    /// Total amount of a new [`Reservation`].
    ///
    /// [`None`] means the listed price of the [`Room`].
    pub amount: Option<Money>,

    /// [`reservation::PaymentStatus`] of a new [`Reservation`].
    pub payment_status: reservation::PaymentStatus,

    /// [`reservation::PaymentMethod`] of a new [`Reservation`].
    pub payment_method: reservation::PaymentMethod,

    /// Tax rate applied to the amount, if any.
    pub tax: Option<Percent>,
}

impl<Db> Command<CreateReservation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Customer>, customer::Id>>,
            Ok = Option<Customer>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Reservation>, room::Id>>,
            Ok = Vec<Reservation>,
            Err = Traced<database::Error>,
        > + Database<Insert<Reservation>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReservation {
            room_id,
            customer_id,
            salesperson_id,
            stay,
            amount,
            payment_status,
            payment_method,
            tax,
        } = cmd;

        if !stay.is_ordered() {
            return Err(tracerr::new!(E::InvalidDateRange(stay)));
        }

        let customer = self
            .database()
            .execute(Select(By::<Option<Customer>, _>::new(customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CustomerNotExists(customer_id))
            .map_err(tracerr::wrap!())?;

        // Holding the transaction excludes concurrent sales of the same days.
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let room = tx
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        let ledger = tx
            .execute(Select(By::<Vec<Reservation>, _>::new(room.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(existing) =
            availability::overlapping(room.id, &stay, &ledger).next()
        {
            return Err(tracerr::new!(E::RoomNotAvailable(
                room.id,
                existing.id
            )));
        }

        let period = self.config().anchors.period_for_date(
            Some(room.project_id),
            &room.floor_group,
            stay.start,
        );

        let reservation = Reservation {
            id: reservation::Id::new(),
            room_id: room.id,
            project_id: room.project_id,
            house: room.house,
            customer_id: customer.id,
            salesperson_id,
            stay,
            period_id: period.map(|p| p.id),
            season: period.map(|p| p.season),
            amount: amount.unwrap_or(room.price),
            payment_status,
            payment_method,
            tax,
            is_confirmed: true,
            cancellation: None,
            created_at: DateTime::now().coerce(),
        };

        tx.execute(Insert(reservation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Reservation(id: {})` of `Room(id: {})` created for {}",
            reservation.id,
            reservation.room_id,
            reservation.stay,
        );

        Ok(reservation)
    }
}

/// Error of [`CreateReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Customer`] with the provided ID does not exist.
    #[display("`Customer(id: {_0})` does not exist")]
    CustomerNotExists(#[error(not(source))] customer::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Start of the stay is after its end.
    #[display("Invalid stay `{_0}`: start is after end")]
    InvalidDateRange(#[error(not(source))] DateRange),

    /// [`Room`] is occupied by another [`Reservation`].
    #[display("`Room(id: {_0})` is occupied by `Reservation(id: {_1})`")]
    RoomNotAvailable(room::Id, reservation::Id),

    /// [`Room`] with the provided ID does not exist.
    #[display("`Room(id: {_0})` does not exist")]
    RoomNotExists(#[error(not(source))] room::Id),
}
