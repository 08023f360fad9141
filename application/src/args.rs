//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use common::{Date, Year};
use service::{
    domain::{floor_group, project, room},
    read::availability::{DonemSelection, Donems, Selection},
};

/// Period calendar and room availability of a timeshare resort.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists all the periods of a floor-group cycle.
    Periods(Cycle),

    /// Lists the seasons of a floor-group cycle.
    Seasons(Cycle),

    /// Prints the season of a week number.
    Season {
        /// Week number, from 1 to 52.
        #[arg(short, long)]
        week: u8,
    },

    /// Prints the date range of a single dönem.
    Window {
        /// Dönem number, from 1 to 52.
        #[arg(short, long)]
        donem: u8,

        /// Floor-group cycle.
        #[command(flatten)]
        cycle: Cycle,
    },

    /// Prints the period containing a date.
    Period {
        /// Date to look the period up for, as `YYYY-MM-DD`.
        #[arg(short, long)]
        date: Date,

        /// Floor-group code.
        #[arg(short, long)]
        floor_group: floor_group::Code,

        /// ID of the project the floor-group belongs to.
        #[arg(short, long)]
        project: Option<project::Id>,
    },

    /// Lists the rooms free for the selected days.
    Available(Filter),

    /// Checks whether a single room is free for the selected days.
    Check {
        /// ID of the room to check.
        #[arg(short, long)]
        room: room::Id,

        /// Selected days.
        #[command(flatten)]
        filter: Filter,
    },

    /// Lists the rooms.
    Rooms {
        /// ID of the project to list the rooms of.
        #[arg(short, long)]
        project: Option<project::Id>,
    },

    /// Lists the reservations, canceled ones included.
    Reservations {
        /// ID of the project to list the reservations of.
        #[arg(short, long)]
        project: Option<project::Id>,
    },
}

/// Cycle of a floor-group.
#[derive(Clone, Debug, clap::Args)]
pub struct Cycle {
    /// Floor-group code.
    #[arg(short, long)]
    pub floor_group: floor_group::Code,

    /// Cycle year.
    #[arg(short, long)]
    pub year: Year,

    /// ID of the project the floor-group belongs to.
    #[arg(short, long)]
    pub project: Option<project::Id>,
}

/// Days selection of availability commands.
#[derive(Clone, Debug, clap::Args)]
pub struct Filter {
    /// ID of the project to restrict the rooms to.
    #[arg(short, long)]
    pub project: Option<project::Id>,

    /// First selected day, as `YYYY-MM-DD`.
    #[arg(long, conflicts_with = "donems")]
    pub from: Option<Date>,

    /// Last selected day, as `YYYY-MM-DD`.
    #[arg(long, conflicts_with = "donems")]
    pub to: Option<Date>,

    /// Selected dönems: `all` or a comma-separated list of numbers.
    #[arg(long, value_parser = parse_donems, requires = "year")]
    pub donems: Option<Donems>,

    /// Floor-group to resolve the dönems in, instead of the own one of
    /// every room.
    #[arg(long)]
    pub floor_group: Option<floor_group::Code>,

    /// Cycle year of the dönems.
    #[arg(long)]
    pub year: Option<Year>,
}

impl Filter {
    /// Converts this [`Filter`] into an availability [`Selection`].
    #[must_use]
    pub fn selection(&self) -> Selection {
        match (&self.donems, self.year) {
            (Some(donems), Some(year)) => Selection::Donems(DonemSelection {
                donems: donems.clone(),
                floor_group: self.floor_group.clone(),
                project_id: self.project,
                year,
            }),
            _ => Selection::between(self.from, self.to),
        }
    }
}

/// Parses [`Donems`] out of `all` or a comma-separated list of numbers.
fn parse_donems(s: &str) -> Result<Donems, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("all") {
        return Ok(Donems::All);
    }
    s.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| n.parse().map_err(|e| format!("invalid dönem `{n}`: {e}")))
        .collect::<Result<Vec<u8>, _>>()
        .map(Donems::List)
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;
    use service::read::availability::{Donems, Selection};

    use super::{parse_donems, Args, Command};

    #[test]
    fn parses_donem_lists() {
        assert_eq!(parse_donems("all"), Ok(Donems::All));
        assert_eq!(parse_donems("3, 1,2"), Ok(Donems::List(vec![3, 1, 2])));
        assert_eq!(parse_donems(""), Ok(Donems::List(vec![])));
        assert!(parse_donems("1,x").is_err());
        assert!(parse_donems("300").is_err());
    }

    #[test]
    fn builds_range_selection() {
        let args = Args::try_parse_from([
            "app",
            "available",
            "--from",
            "2024-07-01",
            "--to",
            "2024-07-07",
        ])
        .unwrap();

        let Command::Available(filter) = args.command else {
            panic!("expected `available` command");
        };
        assert_eq!(args.config, "config.toml");
        assert_eq!(
            filter.selection(),
            Selection::between(
                Some("2024-07-01".parse().unwrap()),
                Some("2024-07-07".parse().unwrap()),
            ),
        );
    }

    #[test]
    fn builds_donem_selection() {
        let args = Args::try_parse_from([
            "app",
            "-c",
            "resort.toml",
            "available",
            "--donems",
            "27,28",
            "--year",
            "2024",
            "--floor-group",
            "A-C",
        ])
        .unwrap();

        let Command::Available(filter) = args.command else {
            panic!("expected `available` command");
        };
        assert_eq!(args.config, "resort.toml");
        let Selection::Donems(selection) = filter.selection() else {
            panic!("expected dönem selection");
        };
        assert_eq!(selection.donems, Donems::List(vec![27, 28]));
        assert_eq!(selection.year.get(), 2024);
        assert_eq!(selection.floor_group.unwrap().to_string(), "A-C");
    }

    #[test]
    fn requires_year_for_donems() {
        assert!(Args::try_parse_from(["app", "available", "--donems", "1"])
            .is_err());
    }
}
