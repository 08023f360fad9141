//! [`Query`] collection over floor-group [`Calendar`]s.
//!
//! These don't touch the [`Database`], only the [`AnchorTable`] of the
//! [`Service`] [`Config`].
//!
//! [`AnchorTable`]: crate::domain::AnchorTable
//! [`Calendar`]: crate::domain::Calendar
//! [`Config`]: crate::Config
//! [`Database`]: crate::infra::Database

use std::convert::Infallible;

use common::{Date, DateRange, Year};
use tracerr::Traced;

use crate::{
    domain::{floor_group, period, project, season, Period, Season},
    Query, Service,
};

/// [`Query`] for all the [`Period`]s of a floor-group cycle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodsForYear {
    /// ID of the [`Project`] the floor-group belongs to, if any.
    ///
    /// [`Project`]: crate::domain::Project
    pub project_id: Option<project::Id>,

    /// [`floor_group::Code`] of the floor-group.
    pub floor_group: floor_group::Code,

    /// Cycle [`Year`].
    pub year: Year,
}

impl<Db> Query<PeriodsForYear> for Service<Db> {
    type Ok = Vec<Period>;
    type Err = Infallible;

    async fn execute(
        &self,
        query: PeriodsForYear,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .config()
            .anchors
            .calendar(query.project_id, &query.floor_group, query.year)
            .periods())
    }
}

/// [`Query`] for the [`DateRange`] of a single dönem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonemWindow {
    /// Number of the dönem, from `1` to `52`.
    pub donem: u8,

    /// ID of the [`Project`] the floor-group belongs to, if any.
    ///
    /// [`Project`]: crate::domain::Project
    pub project_id: Option<project::Id>,

    /// [`floor_group::Code`] of the floor-group.
    pub floor_group: floor_group::Code,

    /// Cycle [`Year`].
    pub year: Year,
}

impl<Db> Query<DonemWindow> for Service<Db> {
    type Ok = DateRange;
    type Err = Traced<period::Error>;

    async fn execute(&self, query: DonemWindow) -> Result<Self::Ok, Self::Err> {
        self.config()
            .anchors
            .donem_window(
                query.donem,
                query.project_id,
                &query.floor_group,
                query.year,
            )
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] for the [`Season`]s of a floor-group cycle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeasonsForYear {
    /// ID of the [`Project`] the floor-group belongs to, if any.
    ///
    /// [`Project`]: crate::domain::Project
    pub project_id: Option<project::Id>,

    /// [`floor_group::Code`] of the floor-group.
    pub floor_group: floor_group::Code,

    /// Cycle [`Year`].
    pub year: Year,
}

impl<Db> Query<SeasonsForYear> for Service<Db> {
    type Ok = [Season; 4];
    type Err = Infallible;

    async fn execute(
        &self,
        query: SeasonsForYear,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.config().anchors.seasons(
            query.project_id,
            &query.floor_group,
            query.year,
        ))
    }
}

/// [`Query`] for the [`season::Kind`] of a week number.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SeasonOfWeek(pub u8);

impl<Db> Query<SeasonOfWeek> for Service<Db> {
    type Ok = season::Kind;
    type Err = Traced<period::Error>;

    async fn execute(
        &self,
        SeasonOfWeek(week): SeasonOfWeek,
    ) -> Result<Self::Ok, Self::Err> {
        season::for_week(week).map_err(tracerr::wrap!())
    }
}

/// [`Query`] for the [`Period`] of a floor-group containing a [`Date`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodForDate {
    /// ID of the [`Project`] the floor-group belongs to, if any.
    ///
    /// [`Project`]: crate::domain::Project
    pub project_id: Option<project::Id>,

    /// [`floor_group::Code`] of the floor-group.
    pub floor_group: floor_group::Code,

    /// [`Date`] to find the [`Period`] of.
    pub date: Date,
}

impl<Db> Query<PeriodForDate> for Service<Db> {
    type Ok = Option<Period>;
    type Err = Infallible;

    async fn execute(
        &self,
        query: PeriodForDate,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.config().anchors.period_for_date(
            query.project_id,
            &query.floor_group,
            query.date,
        ))
    }
}
