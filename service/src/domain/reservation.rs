//! [`Reservation`] definitions.

use common::{define_kind, unit, DateRange, DateTimeOf, Money, Percent};
use derive_more::{AsRef, Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{customer, period, project, room, salesperson, season};
#[cfg(doc)]
use crate::domain::{Customer, Period, Room};

/// Confirmed sale of a [`Room`] for a range of days.
#[derive(Clone, Debug)]
pub struct Reservation {
    /// ID of this [`Reservation`].
    pub id: Id,

    /// ID of the reserved [`Room`].
    pub room_id: room::Id,

    /// ID of the [`Project`] the reserved [`Room`] belongs to.
    ///
    /// [`Project`]: crate::domain::Project
    pub project_id: project::Id,

    /// [`room::House`] the reserved [`Room`] is located in.
    pub house: room::House,

    /// ID of the [`Customer`] who bought this [`Reservation`].
    pub customer_id: customer::Id,

    /// ID of the salesperson who made the sale.
    pub salesperson_id: salesperson::Id,

    /// Inclusive [`DateRange`] of the stay.
    pub stay: DateRange,

    /// ID of the [`Period`] the stay starts in, if known.
    pub period_id: Option<period::Id>,

    /// [`season::Kind`] of the [`Period`] the stay starts in, if known.
    pub season: Option<season::Kind>,

    /// Total [`Money`] amount of this [`Reservation`].
    pub amount: Money,

    /// [`PaymentStatus`] of this [`Reservation`].
    pub payment_status: PaymentStatus,

    /// [`PaymentMethod`] of this [`Reservation`].
    pub payment_method: PaymentMethod,

    /// Tax rate applied to the `amount`, if any.
    pub tax: Option<Percent>,

    /// Indicator whether the sale was confirmed.
    pub is_confirmed: bool,

    /// [`Cancellation`] of this [`Reservation`], if it was canceled.
    pub cancellation: Option<Cancellation>,

    /// [`DateTime`] when this [`Reservation`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

impl Reservation {
    /// Returns the [`Status`] of this [`Reservation`].
    #[must_use]
    pub const fn status(&self) -> Status {
        if self.cancellation.is_some() {
            Status::Canceled
        } else {
            Status::Active
        }
    }

    /// Indicates whether this [`Reservation`] was canceled.
    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        self.cancellation.is_some()
    }

    /// Indicates whether this [`Reservation`] occupies at least one day of
    /// the provided [`DateRange`].
    ///
    /// Canceled [`Reservation`]s never occupy anything.
    #[must_use]
    pub fn blocks(&self, range: &DateRange) -> bool {
        !self.is_canceled() && self.stay.overlaps(range)
    }

    /// Cancels this [`Reservation`] for the provided [`Reason`].
    ///
    /// # Errors
    ///
    /// With [`AlreadyCanceled`] if this [`Reservation`] was canceled before.
    pub fn cancel(
        &mut self,
        reason: Reason,
        at: CancellationDateTime,
    ) -> Result<(), AlreadyCanceled> {
        if self.is_canceled() {
            return Err(AlreadyCanceled(self.id));
        }
        self.cancellation = Some(Cancellation {
            reason,
            canceled_at: at,
        });
        Ok(())
    }
}

/// ID of a [`Reservation`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Record of a [`Reservation`] being canceled.
#[derive(Clone, Debug)]
pub struct Cancellation {
    /// [`Reason`] of the cancellation.
    pub reason: Reason,

    /// [`DateTime`] when the [`Reservation`] was canceled.
    ///
    /// [`DateTime`]: common::DateTime
    pub canceled_at: CancellationDateTime,
}

/// Reason of a [`Reservation`] cancellation.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Reason(String);

impl Reason {
    /// Creates a new [`Reason`] if the given `reason` is valid.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Option<Self> {
        let reason = reason.into();
        Self::check(&reason).then_some(Self(reason))
    }

    /// Checks whether the given `reason` is a valid [`Reason`].
    fn check(reason: impl AsRef<str>) -> bool {
        let reason = reason.as_ref();
        reason.trim() == reason && !reason.is_empty() && reason.len() <= 1024
    }
}

impl FromStr for Reason {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Reason`")
    }
}

/// Error of canceling an already canceled [`Reservation`].
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`Reservation(id: {_0})` is canceled already")]
pub struct AlreadyCanceled(#[error(not(source))] pub Id);

/// Status of a [`Reservation`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Status {
    /// The [`Reservation`] occupies its [`Room`].
    Active = 1,

    /// The [`Reservation`] is canceled and occupies nothing.
    Canceled = 2,
}

define_kind! {
    #[doc = "Payment status of a [`Reservation`]."]
    enum PaymentStatus {
        #[doc = "Nothing is paid yet."]
        Pending = 1,

        #[doc = "The amount is paid partially."]
        Partial = 2,

        #[doc = "The amount is paid in full."]
        Paid = 3,
    }
}

define_kind! {
    #[doc = "Payment method of a [`Reservation`]."]
    enum PaymentMethod {
        #[doc = "Paid in cash."]
        Cash = 1,

        #[doc = "Paid by a credit card."]
        CreditCard = 2,

        #[doc = "Paid by a bank transfer."]
        BankTransfer = 3,

        #[doc = "Paid in installments."]
        Installment = 4,
    }
}

/// [`DateTimeOf`] when a [`Reservation`] was created.
pub type CreationDateTime = DateTimeOf<(Reservation, unit::Creation)>;

/// [`DateTimeOf`] when a [`Reservation`] was canceled.
pub type CancellationDateTime = DateTimeOf<(Reservation, unit::Cancellation)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{DateRange, DateTime, Money};

    use super::{
        AlreadyCanceled, Id, PaymentMethod, PaymentStatus, Reason,
        Reservation, Status,
    };
    use crate::domain::{customer, project, room, salesperson};

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    fn reservation(start: &str, end: &str) -> Reservation {
        Reservation {
            id: Id::new(),
            room_id: room::Id::new(),
            project_id: project::Id::new(),
            house: room::House::new("A").unwrap(),
            customer_id: customer::Id::new(),
            salesperson_id: salesperson::Id::new(),
            stay: range(start, end),
            period_id: None,
            season: None,
            amount: Money::from_str("1500EUR").unwrap(),
            payment_status: PaymentStatus::Paid,
            payment_method: PaymentMethod::BankTransfer,
            tax: None,
            is_confirmed: true,
            cancellation: None,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn blocks_overlapping_ranges() {
        let r = reservation("2024-06-29", "2024-07-05");

        assert!(r.blocks(&range("2024-07-01", "2024-07-03")));
        assert!(r.blocks(&range("2024-07-05", "2024-07-05")));
        assert!(!r.blocks(&range("2024-07-06", "2024-07-12")));
    }

    #[test]
    fn cancels_once() {
        let mut r = reservation("2024-06-29", "2024-07-05");
        assert_eq!(r.status(), Status::Active);

        let reason = Reason::new("customer request").unwrap();
        r.cancel(reason, DateTime::now().coerce()).unwrap();

        assert_eq!(r.status(), Status::Canceled);
        assert!(!r.blocks(&range("2024-07-01", "2024-07-03")));
        assert!(matches!(
            r.cancel(Reason::new("again").unwrap(), DateTime::now().coerce()),
            Err(AlreadyCanceled(id)) if id == r.id,
        ));
        assert_eq!(
            AsRef::<str>::as_ref(&r.cancellation.as_ref().unwrap().reason),
            "customer request",
        );
    }

    #[test]
    fn requires_non_empty_reason() {
        assert!(Reason::new("").is_none());
        assert!(Reason::new("  ").is_none());
        assert!(Reason::from_str("double booking").is_ok());
    }

    #[test]
    fn parses_payment_kinds() {
        assert_eq!(
            PaymentMethod::from_str("CREDIT_CARD"),
            Ok(PaymentMethod::CreditCard),
        );
        assert_eq!(PaymentStatus::Partial.to_string(), "PARTIAL");
    }
}
