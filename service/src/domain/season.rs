//! [`Season`] definitions.

use common::{define_kind, date::Days, Date, DateRange};

use crate::domain::period::{self, Calendar, Week};
#[cfg(doc)]
use crate::domain::Period;

define_kind! {
    #[doc = "Kind of a [`Season`]."]
    enum Kind {
        #[doc = "Weeks `48..=52` of the previous cycle and `1..=8`."]
        Winter = 1,

        #[doc = "Weeks `9..=22`."]
        Spring = 2,

        #[doc = "Weeks `23..=35`."]
        Summer = 3,

        #[doc = "Weeks `36..=47`."]
        Fall = 4,
    }
}

impl Kind {
    /// Returns the [`Kind`] of [`Season`] the provided [`Week`] belongs to.
    #[must_use]
    pub fn of_week(week: Week) -> Self {
        match week.get() {
            9..=22 => Self::Spring,
            23..=35 => Self::Summer,
            36..=47 => Self::Fall,
            _ => Self::Winter,
        }
    }

    /// Returns the human-readable name of this [`Kind`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }

    /// Returns the [`Week`]s of this [`Kind`] in chronological order.
    ///
    /// [`Kind::Winter`] starts with the weeks of the previous cycle.
    #[must_use]
    pub fn weeks(self) -> Vec<Week> {
        let (first, last) = self.bounds();
        if first <= last {
            (first..=last).filter_map(Week::new).collect()
        } else {
            (first..=period::PER_CYCLE)
                .chain(1..=last)
                .filter_map(Week::new)
                .collect()
        }
    }

    /// Returns the numbers of the first and the last [`Week`]s of this
    /// [`Kind`].
    const fn bounds(self) -> (u8, u8) {
        match self {
            Self::Winter => (48, 8),
            Self::Spring => (9, 22),
            Self::Summer => (23, 35),
            Self::Fall => (36, 47),
        }
    }
}

/// Returns the [`Kind`] of [`Season`] the week with the provided `number`
/// belongs to.
///
/// # Errors
///
/// With [`period::Error::InvalidWeekNumber`] if the `number` is out of
/// `1..=52` range.
pub fn for_week(number: u8) -> Result<Kind, period::Error> {
    Week::try_from(number).map(Kind::of_week)
}

/// Contiguous group of [`Period`]s sharing the same [`Kind`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Season {
    /// [`Kind`] of this [`Season`].
    pub kind: Kind,

    /// Inclusive [`DateRange`] covered by this [`Season`].
    pub dates: DateRange,
}

impl Season {
    /// Returns the human-readable name of this [`Season`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns all the [`Season`]s of the `current` cycle, given the anchor
    /// [`Date`] of the previous cycle.
    ///
    /// [`Kind::Winter`] begins in the previous cycle, so its start is
    /// measured from the `previous_anchor`.
    #[must_use]
    pub fn of_cycle(current: &Calendar, previous_anchor: Date) -> [Self; 4] {
        Kind::iter()
            .map(|kind| {
                let (first, last) = kind.bounds();
                let first = Week::new(first).unwrap_or(Week::FIRST);
                let last = Week::new(last).unwrap_or(Week::LAST);
                let start = if kind == Kind::Winter {
                    Calendar::new(current.year(), previous_anchor)
                        .window(first)
                        .start
                } else {
                    current.window(first).start
                };
                Self {
                    kind,
                    dates: DateRange {
                        start,
                        end: current.window(last).end,
                    },
                }
            })
            .collect::<Vec<_>>()
            .try_into()
            .unwrap_or_else(|_| unreachable!("exactly 4 `season::Kind`s"))
    }

    /// Returns the number of [`Days`] in this [`Season`].
    #[must_use]
    pub fn days(&self) -> Days {
        self.dates.days()
    }
}

#[cfg(test)]
mod spec {
    use std::collections::HashSet;

    use common::{date::Days, Date, Year};

    use super::{for_week, Kind, Season};
    use crate::domain::period::{self, Calendar, Week};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn every_week_has_exactly_one_season() {
        let mut seen = HashSet::new();
        for kind in Kind::iter() {
            for week in kind.weeks() {
                assert_eq!(Kind::of_week(week), kind);
                assert!(seen.insert(week), "{week} is in several seasons");
            }
        }

        assert_eq!(seen.len(), usize::from(period::PER_CYCLE));
        for n in 1..=52 {
            assert!(for_week(n).is_ok());
        }
    }

    #[test]
    fn matches_season_table() {
        assert_eq!(for_week(1), Ok(Kind::Winter));
        assert_eq!(for_week(8), Ok(Kind::Winter));
        assert_eq!(for_week(9), Ok(Kind::Spring));
        assert_eq!(for_week(22), Ok(Kind::Spring));
        assert_eq!(for_week(23), Ok(Kind::Summer));
        assert_eq!(for_week(35), Ok(Kind::Summer));
        assert_eq!(for_week(36), Ok(Kind::Fall));
        assert_eq!(for_week(47), Ok(Kind::Fall));
        assert_eq!(for_week(48), Ok(Kind::Winter));
        assert_eq!(for_week(52), Ok(Kind::Winter));
    }

    #[test]
    fn rejects_invalid_weeks() {
        assert_eq!(for_week(0), Err(period::Error::InvalidWeekNumber(0)));
        assert_eq!(for_week(53), Err(period::Error::InvalidWeekNumber(53)));
    }

    #[test]
    fn winter_wraps_previous_cycle() {
        assert_eq!(
            Kind::Winter.weeks().iter().map(|w| w.get()).collect::<Vec<_>>(),
            [48, 49, 50, 51, 52, 1, 2, 3, 4, 5, 6, 7, 8],
        );

        let current =
            Calendar::new(Year::new(2024).unwrap(), date("2024-01-01"));
        let [winter, spring, summer, fall] =
            Season::of_cycle(&current, date("2023-01-01"));

        assert_eq!(winter.kind, Kind::Winter);
        // Week 48 of the cycle anchored at 2023-01-01.
        assert_eq!(winter.dates.start, date("2023-11-26"));
        assert_eq!(winter.dates.end, date("2024-02-25"));
        assert_eq!(spring.dates.start, date("2024-02-26"));
        assert_eq!(spring.days(), Days(14 * 7));
        assert_eq!(summer.days(), Days(13 * 7));
        assert_eq!(fall.days(), Days(12 * 7));
        assert_eq!(fall.dates.end, current.window(Week::new(47).unwrap()).end);
    }

    #[test]
    fn periods_fall_into_their_season() {
        let current =
            Calendar::new(Year::new(2024).unwrap(), date("2023-12-30"));
        let seasons = Season::of_cycle(&current, date("2022-12-31"));

        for p in current.periods() {
            let owners = seasons
                .iter()
                .filter(|s| {
                    s.dates.contains(p.dates.start)
                        && s.dates.contains(p.dates.end)
                })
                .collect::<Vec<_>>();
            if p.week.get() >= 48 {
                // Belongs to the winter of the next cycle.
                assert!(owners.is_empty(), "{}", p.id);
            } else {
                assert_eq!(owners.len(), 1, "{}", p.id);
                assert_eq!(owners[0].kind, p.season);
            }
        }
    }
}
