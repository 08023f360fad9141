//! [`Period`] (dönem) definitions.
//!
//! Every cycle year is split into [`PER_CYCLE`] contiguous week-slots of
//! [`LENGTH`] days each. The first slot starts at the anchor [`Date`] of the
//! [`Calendar`], which depends on the floor-group of a [`Room`].
//!
//! [`Room`]: crate::domain::Room

use std::fmt;

use common::{date::Days, Date, DateRange, Year};
use derive_more::{Display, Error as StdError, Into};

use crate::domain::season;

/// Number of [`Period`]s in a single cycle.
pub const PER_CYCLE: u8 = 52;

/// Length of every [`Period`].
pub const LENGTH: Days = Days(7);

/// Single week-slot (dönem) of a [`Calendar`] cycle.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Period {
    /// ID of this [`Period`].
    pub id: Id,

    /// [`Week`] number of this [`Period`] in its cycle.
    pub week: Week,

    /// Inclusive [`DateRange`] covered by this [`Period`].
    pub dates: DateRange,

    /// [`season::Kind`] this [`Period`] belongs to.
    pub season: season::Kind,
}

/// Number of a [`Period`] in its cycle, from `1` to [`PER_CYCLE`].
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Week(u8);

impl Week {
    /// First [`Week`] of a cycle.
    pub const FIRST: Self = Self(1);

    /// Last [`Week`] of a cycle.
    pub const LAST: Self = Self(PER_CYCLE);

    /// Creates a new [`Week`] if the provided `number` is within
    /// `1..=`[`PER_CYCLE`].
    #[must_use]
    pub fn new(number: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0)
            .contains(&number)
            .then_some(Self(number))
    }

    /// Returns the number of this [`Week`].
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns all the [`Week`]s of a cycle in order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (Self::FIRST.0..=Self::LAST.0).map(Self)
    }

    /// Returns the offset of this [`Week`] from the cycle anchor.
    fn offset(self) -> Days {
        Days(i64::from(self.0 - 1) * LENGTH.0)
    }
}

impl TryFrom<u8> for Week {
    type Error = Error;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or(Error::InvalidWeekNumber(number))
    }
}

/// ID of a [`Period`], stable across re-derivations of the same cycle.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    /// [`Year`] of the cycle.
    year: Year,

    /// [`Week`] in the cycle.
    week: Week,
}

impl Id {
    /// Creates a new [`Id`] of the [`Period`] at the provided [`Week`] of the
    /// provided cycle [`Year`].
    #[must_use]
    pub const fn new(year: Year, week: Week) -> Self {
        Self { year, week }
    }

    /// Returns the cycle [`Year`] of this [`Id`].
    #[must_use]
    pub const fn year(self) -> Year {
        self.year
    }

    /// Returns the [`Week`] of this [`Id`].
    #[must_use]
    pub const fn week(self) -> Week {
        self.week
    }

    /// Returns the numeric form of this [`Id`], like `202427`.
    #[must_use]
    pub fn number(self) -> u32 {
        self.year.get().unsigned_abs() * 100 + u32::from(self.week.get())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.week.get())
    }
}

/// Cycle of [`Period`]s anchored at the first day of its first [`Week`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Calendar {
    /// [`Year`] of this cycle.
    year: Year,

    /// First day of the first [`Week`] of this cycle.
    anchor: Date,
}

impl Calendar {
    /// Creates a new [`Calendar`] of the provided cycle [`Year`] whose first
    /// [`Period`] starts at the `anchor` [`Date`].
    #[must_use]
    pub const fn new(year: Year, anchor: Date) -> Self {
        Self { year, anchor }
    }

    /// Returns the cycle [`Year`] of this [`Calendar`].
    #[must_use]
    pub const fn year(&self) -> Year {
        self.year
    }

    /// Returns the anchor [`Date`] of this [`Calendar`].
    #[must_use]
    pub const fn anchor(&self) -> Date {
        self.anchor
    }

    /// Returns the [`DateRange`] covered by the provided [`Week`].
    #[must_use]
    pub fn window(&self, week: Week) -> DateRange {
        let start = self.anchor + week.offset();
        DateRange {
            start,
            end: start + Days(LENGTH.0 - 1),
        }
    }

    /// Returns the [`Period`] at the provided [`Week`].
    #[must_use]
    pub fn period(&self, week: Week) -> Period {
        Period {
            id: Id::new(self.year, week),
            week,
            dates: self.window(week),
            season: season::Kind::of_week(week),
        }
    }

    /// Returns all the [`PER_CYCLE`] [`Period`]s of this [`Calendar`] ordered
    /// by their [`Week`].
    #[must_use]
    pub fn periods(&self) -> Vec<Period> {
        Week::all().map(|w| self.period(w)).collect()
    }

    /// Returns the [`DateRange`] from the first day of the first [`Period`] to
    /// the last day of the last one.
    #[must_use]
    pub fn span(&self) -> DateRange {
        DateRange {
            start: self.window(Week::FIRST).start,
            end: self.window(Week::LAST).end,
        }
    }

    /// Returns the [`Period`] containing the provided [`Date`].
    ///
    /// [`None`] is returned if the [`Date`] lies outside of this cycle,
    /// including the days between the end of this cycle and the anchor of
    /// the next one.
    #[must_use]
    pub fn period_for_date(&self, date: Date) -> Option<Period> {
        let Days(offset) = self.anchor.days_until(date);
        if offset < 0 {
            return None;
        }
        let week = u8::try_from(offset / LENGTH.0 + 1)
            .ok()
            .and_then(Week::new)?;
        Some(self.period(week))
    }
}

/// Error of addressing a [`Period`] by its number.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Week number is out of `1..=52` range.
    #[display("week number `{_0}` is out of `1..=52` range")]
    InvalidWeekNumber(#[error(not(source))] u8),

    /// Dönem number is out of `1..=52` range.
    #[display("dönem number `{_0}` is out of `1..=52` range")]
    InvalidDonemNumber(#[error(not(source))] u8),
}
