//! [`Room`] availability read model and checks.
//!
//! Whether a [`Room`] is free is decided by the non-canceled
//! [`Reservation`]s overlapping the selected days only. The coarse
//! [`room::Status`] of a [`Room`] never makes a check fail.

use std::borrow::Borrow;

use common::{Date, DateRange, Year};
use tracing as log;

use crate::domain::{
    floor_group::{self, AnchorTable},
    period, project, room, Reservation, Room,
};

/// Selection of days to check a [`Room`] availability for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selection {
    /// No days are selected, so nothing constrains the check.
    Unconstrained,

    /// Explicit inclusive [`DateRange`].
    Range(DateRange),

    /// Set of dönems of a floor-group [`Calendar`].
    ///
    /// [`Calendar`]: crate::domain::Calendar
    Donems(DonemSelection),
}

impl Selection {
    /// Creates a [`Selection`] out of the provided optional bounds.
    ///
    /// Missing any of the bounds makes the [`Selection`]
    /// [`Selection::Unconstrained`]. The bounds are taken as is, even if
    /// `start` is after `end`.
    #[must_use]
    pub const fn between(start: Option<Date>, end: Option<Date>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Self::Range(DateRange { start, end }),
            _ => Self::Unconstrained,
        }
    }

    /// Resolves this [`Selection`] into the [`DateRange`]s to check the
    /// provided [`Room`] for.
    ///
    /// [`None`] is returned if this [`Selection`] doesn't constrain anything.
    ///
    /// # Errors
    ///
    /// With [`period::Error::InvalidDonemNumber`] if any of the selected
    /// dönems is out of `1..=52` range.
    pub fn windows_for(
        &self,
        room: &Room,
        anchors: &AnchorTable,
    ) -> Result<Option<Vec<DateRange>>, period::Error> {
        match self {
            Self::Unconstrained => Ok(None),
            Self::Range(range) => Ok(Some(vec![*range])),
            Self::Donems(sel) => sel.windows(
                sel.project_id.or(Some(room.project_id)),
                sel.floor_group.as_ref().unwrap_or(&room.floor_group),
                anchors,
            ),
        }
    }
}

/// Dönems selected in a floor-group [`Calendar`] of some [`Year`].
///
/// [`Calendar`]: crate::domain::Calendar
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonemSelection {
    /// Selected [`Donems`].
    pub donems: Donems,

    /// [`floor_group::Code`] to resolve the [`Donems`] with.
    ///
    /// [`None`] means the own floor-group of every checked [`Room`].
    pub floor_group: Option<floor_group::Code>,

    /// ID of the [`Project`] to resolve the [`Donems`] with.
    ///
    /// [`None`] means the own [`Project`] of every checked [`Room`].
    ///
    /// [`Project`]: crate::domain::Project
    pub project_id: Option<project::Id>,

    /// Cycle [`Year`] of the [`Donems`].
    pub year: Year,
}

impl DonemSelection {
    /// Resolves this [`DonemSelection`] into the disjoint [`DateRange`]s of
    /// the provided floor-group, ordered by their start.
    ///
    /// Duplicated dönems are ignored, and windows of adjacent dönems are
    /// merged, so `[3, 1, 2, 2]` and `[1, 2, 3]` resolve identically.
    ///
    /// [`None`] is returned if all the dönems are selected or none of them.
    ///
    /// # Errors
    ///
    /// With [`period::Error::InvalidDonemNumber`] if any of the selected
    /// dönems is out of `1..=52` range.
    pub fn windows(
        &self,
        project_id: Option<project::Id>,
        code: &floor_group::Code,
        anchors: &AnchorTable,
    ) -> Result<Option<Vec<DateRange>>, period::Error> {
        let Some(numbers) = self.donems.normalized() else {
            return Ok(None);
        };
        if numbers.is_empty() {
            return Ok(None);
        }

        let windows = numbers
            .into_iter()
            .map(|n| anchors.donem_window(n, project_id, code, self.year))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(DateRange::union(windows)))
    }
}

/// Dönems of a [`DonemSelection`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Donems {
    /// Every dönem of the cycle.
    All,

    /// Explicitly listed dönem numbers, in any order, possibly repeated.
    List(Vec<u8>),
}

impl Donems {
    /// Returns the listed dönem numbers sorted and deduplicated.
    ///
    /// [`None`] is returned for [`Donems::All`] and for a list naming every
    /// dönem of the cycle.
    #[must_use]
    pub fn normalized(&self) -> Option<Vec<u8>> {
        match self {
            Self::All => None,
            Self::List(numbers) => {
                let mut numbers = numbers.clone();
                numbers.sort_unstable();
                numbers.dedup();
                let whole_cycle = numbers.len()
                    == usize::from(period::PER_CYCLE)
                    && numbers.first() == Some(&1)
                    && numbers.last() == Some(&period::PER_CYCLE);
                (!whole_cycle).then_some(numbers)
            }
        }
    }
}

/// Availability of a [`Room`] for a [`Selection`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Availability {
    /// Nothing was selected, so the [`Room`] is considered free.
    Unconstrained,

    /// No active [`Reservation`] overlaps the selected days.
    Available,

    /// At least one active [`Reservation`] overlaps the selected days.
    Unavailable,
}

impl Availability {
    /// Indicates whether the [`Room`] can be sold for the selected days.
    #[must_use]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Unconstrained | Self::Available)
    }
}

/// Returns the non-canceled [`Reservation`]s of the provided [`Room`]
/// sharing at least one day with the provided [`DateRange`].
///
/// Every availability decision goes through this function.
pub fn overlapping<'a>(
    room_id: room::Id,
    range: &'a DateRange,
    ledger: &'a [Reservation],
) -> impl Iterator<Item = &'a Reservation> + 'a {
    ledger
        .iter()
        .filter(move |r| r.room_id == room_id && r.blocks(range))
}

/// Checks the [`Availability`] of the provided [`Room`] for the provided
/// [`Selection`] against the `ledger`.
///
/// # Errors
///
/// With [`period::Error::InvalidDonemNumber`] if the [`Selection`] contains
/// a dönem out of `1..=52` range.
pub fn check(
    room: &Room,
    selection: &Selection,
    anchors: &AnchorTable,
    ledger: &[Reservation],
) -> Result<Availability, period::Error> {
    let Some(windows) = selection.windows_for(room, anchors)? else {
        return Ok(Availability::Unconstrained);
    };

    let busy = windows
        .iter()
        .any(|w| overlapping(room.id, w, ledger).next().is_some());
    if busy {
        return Ok(Availability::Unavailable);
    }

    if room.status == room::Status::Sold {
        log::debug!(
            "`Room(id: {})` is marked as `{}`, but no `Reservation` \
             occupies {}",
            room.id,
            room.status,
            windows
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        );
    }
    Ok(Availability::Available)
}

/// Indicates whether the [`Room`] with the provided ID is free between the
/// provided `start` and `end` [`Date`]s.
///
/// Missing any of the [`Date`]s means no constraint, so `true` is returned.
#[must_use]
pub fn is_available(
    room_id: room::Id,
    start: Option<Date>,
    end: Option<Date>,
    ledger: &[Reservation],
) -> bool {
    match Selection::between(start, end) {
        Selection::Range(range) => {
            overlapping(room_id, &range, ledger).next().is_none()
        }
        Selection::Unconstrained | Selection::Donems(_) => true,
    }
}

/// Filters the provided [`Room`]s leaving only the ones free between the
/// provided `start` and `end` [`Date`]s, preserving their order.
pub fn filter_available_rooms<R: Borrow<Room>>(
    rooms: impl IntoIterator<Item = R>,
    start: Option<Date>,
    end: Option<Date>,
    ledger: &[Reservation],
) -> Vec<R> {
    rooms
        .into_iter()
        .filter(|room| is_available(room.borrow().id, start, end, ledger))
        .collect()
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Date, DateRange, DateTime, Money, Year};

    use crate::domain::{
        customer, floor_group, period, project,
        reservation::{self, PaymentMethod, PaymentStatus},
        room, salesperson, AnchorTable, Reservation, Room,
    };

    use super::{
        check, filter_available_rooms, is_available, overlapping,
        Availability, DonemSelection, Donems, Selection,
    };

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    fn room(floor_group: &str) -> Room {
        Room {
            id: room::Id::new(),
            project_id: project::Id::new(),
            house: room::House::new("A").unwrap(),
            floor: 3,
            number: room::Number::new("A-301").unwrap(),
            status: room::Status::Available,
            price: Money::from_str("1500EUR").unwrap(),
            kind: None,
            size: None,
            balcony: None,
            floor_name: None,
            floor_group: floor_group::Code::new(floor_group).unwrap(),
        }
    }

    fn reserve(room: &Room, start: &str, end: &str) -> Reservation {
        Reservation {
            id: reservation::Id::new(),
            room_id: room.id,
            project_id: room.project_id,
            house: room.house.clone(),
            customer_id: customer::Id::new(),
            salesperson_id: salesperson::Id::new(),
            stay: range(start, end),
            period_id: None,
            season: None,
            amount: room.price,
            payment_status: PaymentStatus::Paid,
            payment_method: PaymentMethod::Cash,
            tax: None,
            is_confirmed: true,
            cancellation: None,
            created_at: DateTime::now().coerce(),
        }
    }

    fn donems(list: &[u8]) -> DonemSelection {
        DonemSelection {
            donems: Donems::List(list.to_vec()),
            floor_group: None,
            project_id: None,
            year: Year::new(2024).unwrap(),
        }
    }

    #[test]
    fn contained_range_is_unavailable() {
        let r = room("A-C");
        let ledger = [reserve(&r, "2024-06-29", "2024-07-05")];

        assert!(!is_available(
            r.id,
            Some(date("2024-07-01")),
            Some(date("2024-07-03")),
            &ledger,
        ));
    }

    #[test]
    fn adjacent_range_is_available() {
        let r = room("A-C");
        let ledger = [reserve(&r, "2024-06-29", "2024-07-05")];

        assert!(is_available(
            r.id,
            Some(date("2024-07-06")),
            Some(date("2024-07-12")),
            &ledger,
        ));
        assert!(!is_available(
            r.id,
            Some(date("2024-07-05")),
            Some(date("2024-07-12")),
            &ledger,
        ));
    }

    #[test]
    fn missing_bound_is_unconstrained() {
        let r = room("A-C");
        let ledger = [reserve(&r, "2024-01-01", "2024-12-31")];

        assert!(is_available(r.id, None, Some(date("2024-07-01")), &ledger));
        assert!(is_available(r.id, Some(date("2024-07-01")), None, &ledger));
        assert!(is_available(r.id, None, None, &ledger));
        assert_eq!(
            Selection::between(Some(date("2024-07-01")), None),
            Selection::Unconstrained,
        );
    }

    #[test]
    fn ignores_canceled_and_other_rooms() {
        let r = room("A-C");
        let other = room("A-C");
        let mut canceled = reserve(&r, "2024-06-29", "2024-07-05");
        canceled
            .cancel(
                reservation::Reason::new("refund").unwrap(),
                DateTime::now().coerce(),
            )
            .unwrap();
        let ledger = [canceled, reserve(&other, "2024-06-29", "2024-07-05")];

        assert!(is_available(
            r.id,
            Some(date("2024-07-01")),
            Some(date("2024-07-03")),
            &ledger,
        ));
        assert_eq!(
            overlapping(r.id, &range("2024-01-01", "2024-12-31"), &ledger)
                .count(),
            0,
        );
    }

    #[test]
    fn uses_literal_formula_for_inverted_bounds() {
        let r = room("A-C");
        let ledger = [reserve(&r, "2024-07-01", "2024-07-03")];

        // `NOT (res.end < start OR res.start > end)` with start > end.
        assert!(!is_available(
            r.id,
            Some(date("2024-07-02")),
            Some(date("2024-07-01")),
            &ledger,
        ));
        assert!(is_available(
            r.id,
            Some(date("2024-07-10")),
            Some(date("2024-06-01")),
            &ledger,
        ));
    }

    #[test]
    fn filters_rooms_in_order() {
        let rooms = [room("A-C"), room("D-F"), room("A-C"), room("penthouse")];
        let ledger = [
            reserve(&rooms[1], "2024-07-01", "2024-07-07"),
            reserve(&rooms[3], "2024-06-25", "2024-07-02"),
        ];

        let free = filter_available_rooms(
            &rooms,
            Some(date("2024-07-01")),
            Some(date("2024-07-07")),
            &ledger,
        );
        assert_eq!(
            free.iter().map(|r| r.id).collect::<Vec<_>>(),
            [rooms[0].id, rooms[2].id],
        );

        let all = filter_available_rooms(&rooms, None, None, &ledger);
        assert_eq!(all.len(), rooms.len());
    }

    #[test]
    fn normalizes_donem_lists() {
        let anchors = AnchorTable::default();
        let code = floor_group::Code::new("A-C").unwrap();

        let messy = donems(&[3, 1, 2, 2])
            .windows(None, &code, &anchors)
            .unwrap();
        let clean = donems(&[1, 2, 3]).windows(None, &code, &anchors).unwrap();

        assert_eq!(messy, clean);
        assert_eq!(messy, Some(vec![range("2023-12-30", "2024-01-19")]));
    }

    #[test]
    fn keeps_gaps_between_donems() {
        let anchors = AnchorTable::default();
        let code = floor_group::Code::new("penthouse").unwrap();

        let windows = donems(&[27, 1]).windows(None, &code, &anchors).unwrap();

        assert_eq!(
            windows,
            Some(vec![
                range("2024-01-01", "2024-01-07"),
                range("2024-07-01", "2024-07-07"),
            ]),
        );
    }

    #[test]
    fn all_or_no_donems_are_unconstrained() {
        let anchors = AnchorTable::default();
        let code = floor_group::Code::new("A-C").unwrap();
        let all = DonemSelection {
            donems: Donems::All,
            ..donems(&[])
        };

        assert_eq!(all.windows(None, &code, &anchors), Ok(None));
        assert_eq!(donems(&[]).windows(None, &code, &anchors), Ok(None));
    }

    #[test]
    fn listing_every_donem_equals_all() {
        let anchors = AnchorTable::default();
        let r = room("A-C");
        let ledger = [reserve(&r, "2024-07-01", "2024-07-03")];
        let every = (1..=period::PER_CYCLE).rev().collect::<Vec<_>>();
        let listed = Selection::Donems(donems(&every));
        let all = Selection::Donems(DonemSelection {
            donems: Donems::All,
            ..donems(&[])
        });

        assert_eq!(Donems::List(every).normalized(), None);
        assert_eq!(
            check(&r, &listed, &anchors, &ledger),
            check(&r, &all, &anchors, &ledger),
        );
        assert_eq!(
            check(&r, &listed, &anchors, &ledger),
            Ok(Availability::Unconstrained),
        );

        let almost = (1..period::PER_CYCLE).collect::<Vec<_>>();
        assert_eq!(
            check(&r, &Selection::Donems(donems(&almost)), &anchors, &ledger),
            Ok(Availability::Unavailable),
        );
    }

    #[test]
    fn rejects_invalid_donems() {
        let anchors = AnchorTable::default();
        let code = floor_group::Code::new("A-C").unwrap();

        assert_eq!(
            donems(&[1, 53]).windows(None, &code, &anchors),
            Err(period::Error::InvalidDonemNumber(53)),
        );
        assert_eq!(
            donems(&[0]).windows(None, &code, &anchors),
            Err(period::Error::InvalidDonemNumber(0)),
        );
    }

    #[test]
    fn checks_donems_in_own_floor_group() {
        let anchors = AnchorTable::default();
        let a_c = room("A-C");
        let penthouse = room("penthouse");
        // Dönem 1 of `A-C` but not of `penthouse`.
        let ledger = [
            reserve(&a_c, "2023-12-30", "2023-12-31"),
            reserve(&penthouse, "2023-12-30", "2023-12-31"),
        ];
        let selection = Selection::Donems(donems(&[1]));

        assert_eq!(
            check(&a_c, &selection, &anchors, &ledger),
            Ok(Availability::Unavailable),
        );
        assert_eq!(
            check(&penthouse, &selection, &anchors, &ledger),
            Ok(Availability::Available),
        );
        assert_eq!(
            check(&a_c, &Selection::Unconstrained, &anchors, &ledger),
            Ok(Availability::Unconstrained),
        );
    }

    #[test]
    fn ignores_room_status() {
        let anchors = AnchorTable::default();
        let mut r = room("A-C");
        r.status = room::Status::Sold;
        let selection = Selection::Range(range("2024-07-01", "2024-07-07"));

        let availability = check(&r, &selection, &anchors, &[]).unwrap();

        assert_eq!(availability, Availability::Available);
        assert!(availability.is_free());
        assert!(Availability::Unconstrained.is_free());
        assert!(!Availability::Unavailable.is_free());
    }
}
