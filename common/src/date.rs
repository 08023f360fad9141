//! Calendar date utilities.

use std::{fmt, ops, str::FromStr};

use derive_more::{Display, Error};
use time::{format_description::FormatItem, macros::format_description, Month};

/// ISO 8601 `YYYY-MM-DD` representation of a [`Date`].
const FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Calendar date without any time or time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] from the provided year, month and day.
    ///
    /// [`None`] is returned if such date doesn't exist.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Returns the year of this [`Date`].
    #[must_use]
    pub const fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the month of this [`Date`], from `1` to `12`.
    #[must_use]
    pub fn month(self) -> u8 {
        u8::from(self.0.month())
    }

    /// Returns the day of month of this [`Date`].
    #[must_use]
    pub const fn day(self) -> u8 {
        self.0.day()
    }

    /// Shifts this [`Date`] by the provided number of [`Days`].
    ///
    /// [`None`] is returned if the result is out of the supported range.
    #[must_use]
    pub fn checked_add(self, Days(days): Days) -> Option<Self> {
        self.0.checked_add(time::Duration::days(days)).map(Self)
    }

    /// Returns the number of [`Days`] from this [`Date`] to the `other` one.
    ///
    /// The result is negative if the `other` [`Date`] is earlier.
    #[must_use]
    pub fn days_until(self, other: Self) -> Days {
        Days((other.0 - self.0).whole_days())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.format(FORMAT).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Date {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, FORMAT)
            .map(Self)
            .map_err(|_| "expected existing date in `YYYY-MM-DD` format")
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

impl From<Date> for time::Date {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl ops::Add<Days> for Date {
    type Output = Self;

    fn add(self, rhs: Days) -> Self::Output {
        self.checked_add(rhs).expect("date overflow")
    }
}

impl ops::Sub<Days> for Date {
    type Output = Self;

    fn sub(self, Days(days): Days) -> Self::Output {
        self + Days(-days)
    }
}

/// Signed number of calendar days.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub struct Days(pub i64);

/// Year for which [`Date`]s of its neighbouring years are representable too.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Year(i32);

impl Year {
    /// Smallest supported [`Year`].
    pub const MIN: Self = Self(1);

    /// Largest supported [`Year`].
    pub const MAX: Self = Self(9998);

    /// Creates a new [`Year`] if the provided `year` is supported.
    #[must_use]
    pub fn new(year: i32) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&year)
            .then_some(Self(year))
    }

    /// Returns the inner value of this [`Year`].
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Returns the [`Year`] before this one.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        Self::new(self.0 - 1)
    }

    /// Returns the [`Year`] after this one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Returns the [`Date`] of the provided `month` and `day` of this
    /// [`Year`].
    #[must_use]
    pub fn date(self, month: u8, day: u8) -> Option<Date> {
        Date::from_ymd(self.0, month, day)
    }

    /// Returns the first [`Date`] of this [`Year`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn first_day(self) -> Date {
        self.date(1, 1).expect("January 1st exists in every year")
    }
}

impl FromStr for Year {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid or unsupported year")
    }
}

impl TryFrom<i32> for Year {
    type Error = i32;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Self::new(year).ok_or(year)
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        year.0
    }
}

/// Inclusive range of [`Date`]s.
///
/// Both `start` and `end` belong to the range, so a range with `start` equal
/// to `end` contains exactly one day.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateRange {
    /// First [`Date`] of this [`DateRange`].
    pub start: Date,

    /// Last [`Date`] of this [`DateRange`].
    pub end: Date,
}

impl DateRange {
    /// Creates a new [`DateRange`] if `start` is not after `end`.
    #[must_use]
    pub fn new(start: Date, end: Date) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Creates a new [`DateRange`] of the provided `length` starting at
    /// `start`.
    ///
    /// [`None`] is returned if `length` is not positive or the range doesn't
    /// fit the supported dates.
    #[must_use]
    pub fn of_length(start: Date, Days(length): Days) -> Option<Self> {
        if length < 1 {
            return None;
        }
        let end = start.checked_add(Days(length - 1))?;
        Some(Self { start, end })
    }

    /// Indicates whether `start` is not after `end`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Indicates whether the provided [`Date`] falls into this [`DateRange`].
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Indicates whether this [`DateRange`] shares at least one day with the
    /// `other` one.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(other.end < self.start || other.start > self.end)
    }

    /// Returns the number of [`Days`] in this [`DateRange`].
    #[must_use]
    pub fn days(&self) -> Days {
        Days(self.start.days_until(self.end).0 + 1)
    }

    /// Merges the provided [`DateRange`]s into the smallest set of disjoint
    /// ones covering the same days, ordered by their `start`.
    ///
    /// Ranges touching each other (one ends the day before another starts)
    /// are merged too.
    #[must_use]
    pub fn union(ranges: impl IntoIterator<Item = Self>) -> Vec<Self> {
        let mut ranges = ranges.into_iter().collect::<Vec<_>>();
        ranges.sort_by_key(|r| (r.start, r.end));

        let mut merged: Vec<Self> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last)
                    if last.end >= range.start
                        || last.end.checked_add(Days(1)) == Some(range.start) =>
                {
                    last.end = last.end.max(range.end);
                }
                _ => merged.push(range),
            }
        }
        merged
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Error of parsing a [`DateRange`] from a `{start}..={end}` string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum RangeParseError {
    /// Input doesn't have a `..=` separator.
    #[display("expected `YYYY-MM-DD..=YYYY-MM-DD` format")]
    Format,

    /// One of the bounds is not a valid [`Date`].
    #[display("invalid bound: {_0}")]
    Bound(#[error(not(source))] &'static str),

    /// `start` is after `end`.
    #[display("range start is after its end")]
    Inverted,
}

impl FromStr for DateRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use RangeParseError as E;

        let (start, end) = s.split_once("..=").ok_or(E::Format)?;
        let start = start.trim().parse().map_err(E::Bound)?;
        let end = end.trim().parse().map_err(E::Bound)?;
        Self::new(start, end).ok_or(E::Inverted)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{
        de::Error as _, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::{Date, Year};

    impl Serialize for Date {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::from_str(&raw).map_err(|e| {
                D::Error::custom(format!("invalid `Date` `{raw}`: {e}"))
            })
        }
    }

    impl Serialize for Year {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_i32(self.get())
        }
    }

    impl<'de> Deserialize<'de> for Year {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = i32::deserialize(d)?;
            Self::new(raw).ok_or_else(|| {
                D::Error::custom(format!("unsupported `Year` `{raw}`"))
            })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Date, DateRange, Days, Year};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    #[test]
    fn parses_and_formats_iso_dates() {
        assert_eq!(date("2024-02-29").to_string(), "2024-02-29");
        assert_eq!(date("0987-01-05").to_string(), "0987-01-05");

        assert!(Date::from_str("2023-02-29").is_err());
        assert!(Date::from_str("2024-2-01").is_err());
        assert!(Date::from_str("2024/02/01").is_err());
        assert!(Date::from_str("").is_err());
        assert!(Date::from_str("2024-01-+1").is_err());
        assert!(Date::from_str("+202-01-01").is_err());
        assert!(Date::from_str("2024-01-01 ").is_err());
    }

    #[test]
    fn adds_days_across_year_boundary() {
        assert_eq!(date("2023-12-30") + Days(6), date("2024-01-05"));
        assert_eq!(date("2024-01-01") + Days(26 * 7), date("2024-07-01"));
        assert_eq!(date("2024-03-01") - Days(1), date("2024-02-29"));
        assert_eq!(date("2023-12-30").days_until(date("2024-01-05")), Days(6));
        assert_eq!(date("2024-01-05").days_until(date("2023-12-30")), Days(-6));
    }

    #[test]
    fn bounds_years() {
        assert!(Year::new(0).is_none());
        assert!(Year::new(9999).is_none());
        assert_eq!(Year::new(2024).unwrap().first_day(), date("2024-01-01"));
        assert_eq!(Year::from_str("2024").unwrap().previous(), Year::new(2023));
        assert!(Year::MIN.previous().is_none());
        assert!(Year::MAX.next().is_none());
    }

    #[test]
    fn overlaps_inclusively() {
        let booked = range("2024-06-29", "2024-07-05");

        assert!(booked.overlaps(&range("2024-07-01", "2024-07-03")));
        assert!(booked.overlaps(&range("2024-07-05", "2024-07-12")));
        assert!(booked.overlaps(&range("2024-06-01", "2024-06-29")));
        assert!(booked.overlaps(&range("2024-06-01", "2024-12-31")));
        assert!(!booked.overlaps(&range("2024-07-06", "2024-07-12")));
        assert!(!booked.overlaps(&range("2024-06-22", "2024-06-28")));
    }

    #[test]
    fn measures_length() {
        assert_eq!(range("2024-06-29", "2024-07-05").days(), Days(7));
        assert_eq!(range("2024-06-29", "2024-06-29").days(), Days(1));
        assert_eq!(
            DateRange::of_length(date("2024-06-29"), Days(7)),
            Some(range("2024-06-29", "2024-07-05")),
        );
        assert_eq!(DateRange::of_length(date("2024-06-29"), Days(0)), None);
        assert!(
            DateRange::new(date("2024-07-05"), date("2024-06-29")).is_none(),
        );
    }

    #[test]
    fn unions_touching_and_overlapping_ranges() {
        let merged = DateRange::union([
            range("2024-01-13", "2024-01-19"),
            range("2024-01-01", "2024-01-05"),
            range("2024-01-06", "2024-01-12"),
            range("2024-02-01", "2024-02-07"),
            range("2024-02-03", "2024-02-04"),
        ]);

        assert_eq!(
            merged,
            [
                range("2024-01-01", "2024-01-19"),
                range("2024-02-01", "2024-02-07"),
            ],
        );
        assert!(DateRange::union([]).is_empty());
    }

    #[test]
    fn parses_ranges() {
        assert_eq!(
            "2024-07-06..=2024-07-12".parse::<DateRange>().unwrap(),
            range("2024-07-06", "2024-07-12"),
        );
        assert!("2024-07-12..=2024-07-06".parse::<DateRange>().is_err());
        assert!("2024-07-06".parse::<DateRange>().is_err());
    }
}
