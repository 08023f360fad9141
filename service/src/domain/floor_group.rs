//! Floor-group definitions and the [`AnchorTable`] deciding the first day of
//! every [`Calendar`] cycle.
//!
//! Sections of a [`Project`] start their cycles on slightly different days,
//! so the [`Period`]s of the same week number don't always cover the same
//! [`Date`]s.
//!
//! [`Period`]: crate::domain::Period
//! [`Project`]: crate::domain::Project

use common::{date::Days, define_kind, Date, DateRange, Year};
use derive_more::{AsRef, Display, FromStr};
use tracing as log;

use crate::domain::{
    period::{self, Calendar, Period, Week},
    project, Season,
};

/// Code of a floor-group, like `A-C` or `penthouse`.
///
/// Codes are matched exactly, so `a-c` and `A-C` are different groups.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str, String)]
pub struct Code(String);

impl Code {
    /// Creates a new [`Code`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Code`].
    fn check(code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        code.trim() == code && !code.is_empty() && code.chars().count() <= 64
    }
}

impl FromStr for Code {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid floor-group `Code`")
    }
}

define_kind! {
    #[doc = "Day a [`Calendar`] cycle starts at."]
    enum Anchor {
        #[doc = "December 30th of the previous year."]
        Dec30 = 1,

        #[doc = "December 31st of the previous year."]
        Dec31 = 2,

        #[doc = "January 1st of the cycle year."]
        Jan1 = 3,
    }
}

impl Anchor {
    /// Returns the [`Date`] this [`Anchor`] points to for the cycle of the
    /// provided `year`.
    ///
    /// [`None`] is returned if such [`Date`] is not representable.
    #[must_use]
    pub fn date_in(self, year: i32) -> Option<Date> {
        match self {
            Self::Dec30 => Date::from_ymd(year.checked_sub(1)?, 12, 30),
            Self::Dec31 => Date::from_ymd(year.checked_sub(1)?, 12, 31),
            Self::Jan1 => Date::from_ymd(year, 1, 1),
        }
    }

    /// Returns the first day of the cycle of the provided [`Year`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn first_day(self, year: Year) -> Date {
        self.date_in(year.get())
            .expect("neighbouring years of a `Year` are representable")
    }
}

/// Row of an [`AnchorTable`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    /// ID of the [`Project`] this [`Rule`] is specific to.
    ///
    /// [`None`] makes the [`Rule`] apply to every [`Project`] having no
    /// specific [`Rule`] for the same [`Code`].
    ///
    /// [`Project`]: crate::domain::Project
    pub project_id: Option<project::Id>,

    /// [`Code`] of the floor-group this [`Rule`] is for.
    pub code: Code,

    /// [`Anchor`] of the floor-group.
    pub anchor: Anchor,
}

/// Table mapping floor-groups onto their [`Anchor`]s.
#[derive(Clone, Debug)]
pub struct AnchorTable {
    /// [`Rule`]s of this [`AnchorTable`].
    rules: Vec<Rule>,
}

impl Default for AnchorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AnchorTable {
    /// [`Anchor`] used for floor-groups missing in the table.
    pub const FALLBACK: Anchor = Anchor::Jan1;

    /// Creates an [`AnchorTable`] without any [`Rule`]s.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates an [`AnchorTable`] with the project-agnostic [`Rule`]s known
    /// out of the box.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (code, anchor) in [
            ("A-C", Anchor::Dec30),
            ("D-F", Anchor::Dec31),
            ("penthouse", Anchor::Jan1),
        ] {
            table.rules.push(Rule {
                project_id: None,
                code: Code(code.into()),
                anchor,
            });
        }
        table
    }

    /// Adds the provided [`Rule`] to this [`AnchorTable`], replacing the one
    /// for the same [`Project`] and [`Code`], if any.
    ///
    /// [`Project`]: crate::domain::Project
    pub fn insert(&mut self, rule: Rule) {
        if let Some(existing) = self.rules.iter_mut().find(|r| {
            r.project_id == rule.project_id && r.code == rule.code
        }) {
            existing.anchor = rule.anchor;
        } else {
            self.rules.push(rule);
        }
    }

    /// Returns all the [`Rule`]s of this [`AnchorTable`].
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up the [`Anchor`] of the provided floor-group.
    ///
    /// A [`Rule`] specific to the provided [`Project`] wins over the
    /// project-agnostic one.
    ///
    /// [`Project`]: crate::domain::Project
    #[must_use]
    pub fn resolve(
        &self,
        project_id: Option<project::Id>,
        code: &Code,
    ) -> Option<Anchor> {
        let find = |project_id| {
            self.rules
                .iter()
                .find(|r| r.project_id == project_id && &r.code == code)
                .map(|r| r.anchor)
        };
        project_id.and_then(|id| find(Some(id))).or_else(|| find(None))
    }

    /// Returns the first day of the cycle of the provided [`Year`] for the
    /// provided floor-group.
    ///
    /// Unknown floor-groups fall back to [`AnchorTable::FALLBACK`].
    #[must_use]
    pub fn anchor_for(
        &self,
        project_id: Option<project::Id>,
        code: &Code,
        year: Year,
    ) -> Date {
        let anchor = self.resolve(project_id, code).unwrap_or_else(|| {
            log::warn!(
                "unknown floor-group `{code}` (project: {project_id:?}), \
                 falling back to `{}`",
                Self::FALLBACK,
            );
            Self::FALLBACK
        });
        anchor.first_day(year)
    }

    /// Returns the [`Calendar`] of the provided [`Year`] for the provided
    /// floor-group.
    #[must_use]
    pub fn calendar(
        &self,
        project_id: Option<project::Id>,
        code: &Code,
        year: Year,
    ) -> Calendar {
        Calendar::new(year, self.anchor_for(project_id, code, year))
    }

    /// Returns the [`DateRange`] of the dönem with the provided number.
    ///
    /// # Errors
    ///
    /// With [`period::Error::InvalidDonemNumber`] if the `donem` is out of
    /// `1..=52` range.
    pub fn donem_window(
        &self,
        donem: u8,
        project_id: Option<project::Id>,
        code: &Code,
        year: Year,
    ) -> Result<DateRange, period::Error> {
        let week =
            Week::new(donem).ok_or(period::Error::InvalidDonemNumber(donem))?;
        Ok(self.calendar(project_id, code, year).window(week))
    }

    /// Returns the [`Season`]s of the provided [`Year`] for the provided
    /// floor-group.
    #[must_use]
    pub fn seasons(
        &self,
        project_id: Option<project::Id>,
        code: &Code,
        year: Year,
    ) -> [Season; 4] {
        let current = self.calendar(project_id, code, year);
        let previous_anchor = year.previous().map_or_else(
            || {
                current.anchor()
                    - Days(i64::from(period::PER_CYCLE) * period::LENGTH.0)
            },
            |y| self.anchor_for(project_id, code, y),
        );
        Season::of_cycle(&current, previous_anchor)
    }

    /// Returns the [`Period`] containing the provided [`Date`] for the
    /// provided floor-group.
    ///
    /// A cycle may start in the year before its own one, so both the cycle
    /// of the [`Date`]'s year and the next one are considered.
    #[must_use]
    pub fn period_for_date(
        &self,
        project_id: Option<project::Id>,
        code: &Code,
        date: Date,
    ) -> Option<Period> {
        [date.year(), date.year() + 1]
            .into_iter()
            .filter_map(Year::new)
            .find_map(|y| {
                self.calendar(project_id, code, y).period_for_date(date)
            })
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Date, DateRange, Year};

    use super::{Anchor, AnchorTable, Code, Rule};
    use crate::domain::{period, project, season};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    fn code(s: &str) -> Code {
        Code::new(s).unwrap()
    }

    fn year(y: i32) -> Year {
        Year::new(y).unwrap()
    }

    #[test]
    fn validates_codes() {
        assert!(Code::new("A-C").is_some());
        assert!(Code::new("").is_none());
        assert!(Code::new(" A-C").is_none());
        assert!(Code::new("x".repeat(65)).is_none());
        assert!(Code::from_str("penthouse").is_ok());
    }

    #[test]
    fn parses_anchors() {
        assert_eq!(Anchor::from_str("DEC30"), Ok(Anchor::Dec30));
        assert_eq!(Anchor::from_str("JAN1"), Ok(Anchor::Jan1));
        assert_eq!(Anchor::Dec31.to_string(), "DEC31");
    }

    #[test]
    fn places_anchors_around_new_year() {
        assert_eq!(Anchor::Dec30.first_day(year(2024)), date("2023-12-30"));
        assert_eq!(Anchor::Dec31.first_day(year(2024)), date("2023-12-31"));
        assert_eq!(Anchor::Jan1.first_day(year(2024)), date("2024-01-01"));
    }

    #[test]
    fn resolves_builtin_groups() {
        let table = AnchorTable::builtin();

        assert_eq!(table.resolve(None, &code("A-C")), Some(Anchor::Dec30));
        assert_eq!(table.resolve(None, &code("D-F")), Some(Anchor::Dec31));
        assert_eq!(
            table.resolve(Some(project::Id::new()), &code("penthouse")),
            Some(Anchor::Jan1),
        );
        assert_eq!(table.resolve(None, &code("a-c")), None);
    }

    #[test]
    fn computes_first_donem_of_a_c() {
        let window = AnchorTable::default()
            .donem_window(1, None, &code("A-C"), year(2024))
            .unwrap();

        assert_eq!(window, range("2023-12-30", "2024-01-05"));
    }

    #[test]
    fn computes_donem_27_of_penthouse() {
        let window = AnchorTable::default()
            .donem_window(27, None, &code("penthouse"), year(2024))
            .unwrap();

        assert_eq!(window, range("2024-07-01", "2024-07-07"));
    }

    #[test]
    fn rejects_invalid_donems() {
        let table = AnchorTable::default();

        for n in [0, 53, 255] {
            assert_eq!(
                table.donem_window(n, None, &code("A-C"), year(2024)),
                Err(period::Error::InvalidDonemNumber(n)),
            );
        }
        assert!(table.donem_window(52, None, &code("A-C"), year(2024)).is_ok());
    }

    #[test]
    fn falls_back_to_january_first() {
        let table = AnchorTable::default();

        assert_eq!(
            table.anchor_for(None, &code("G-H"), year(2024)),
            date("2024-01-01"),
        );
        assert_eq!(
            table.anchor_for(None, &code("G-H"), year(2024)),
            AnchorTable::empty().anchor_for(None, &code("A-C"), year(2024)),
        );
    }

    #[test]
    fn prefers_project_specific_rules() {
        let project = project::Id::new();
        let mut table = AnchorTable::default();
        table.insert(Rule {
            project_id: Some(project),
            code: code("A-C"),
            anchor: Anchor::Jan1,
        });

        assert_eq!(
            table.resolve(Some(project), &code("A-C")),
            Some(Anchor::Jan1),
        );
        assert_eq!(
            table.resolve(Some(project::Id::new()), &code("A-C")),
            Some(Anchor::Dec30),
        );
        assert_eq!(table.resolve(None, &code("A-C")), Some(Anchor::Dec30));
    }

    #[test]
    fn replaces_rules_on_insert() {
        let mut table = AnchorTable::default();
        let before = table.rules().len();
        table.insert(Rule {
            project_id: None,
            code: code("D-F"),
            anchor: Anchor::Dec30,
        });

        assert_eq!(table.rules().len(), before);
        assert_eq!(table.resolve(None, &code("D-F")), Some(Anchor::Dec30));
    }

    #[test]
    fn finds_periods_starting_in_previous_year() {
        let table = AnchorTable::default();

        let p = table
            .period_for_date(None, &code("A-C"), date("2023-12-31"))
            .unwrap();
        assert_eq!(p.id.year(), year(2024));
        assert_eq!(p.week, period::Week::FIRST);

        let p = table
            .period_for_date(None, &code("penthouse"), date("2023-12-30"))
            .unwrap();
        assert_eq!(p.id.year(), year(2023));
        assert_eq!(p.week, period::Week::LAST);
        assert_eq!(
            table.period_for_date(None, &code("penthouse"), date("2023-12-31")),
            None,
        );

        // Gap between the 2024 and 2025 cycles of `A-C`.
        assert_eq!(
            table.period_for_date(None, &code("A-C"), date("2024-12-28")),
            None,
        );
    }

    #[test]
    fn builds_seasons_over_neighbouring_cycles() {
        let seasons =
            AnchorTable::default().seasons(None, &code("A-C"), year(2024));

        assert_eq!(seasons[0].kind, season::Kind::Winter);
        // Week 48 of the cycle anchored at 2022-12-30.
        assert_eq!(seasons[0].dates.start, date("2023-11-24"));
        assert_eq!(seasons[0].dates.end, date("2024-02-23"));
        assert_eq!(seasons[1].dates.start, date("2024-02-24"));
    }
}
