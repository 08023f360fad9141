//! Execution of [`Command`]s against the [`Service`].

use std::fmt::Write as _;

use itertools::Itertools as _;
use service::{
    domain::{Period, Reservation, Room, Season},
    query::{self, reservations, rooms},
    read::Availability,
    Query as _,
};

use crate::{
    args::{Command, Cycle},
    AsError, Error, Service,
};

/// Executes the provided [`Command`] and renders its output.
///
/// # Errors
///
/// If the [`Command`] fails.
pub async fn run(service: &Service, command: Command) -> Result<String, Error> {
    match command {
        Command::Periods(Cycle {
            floor_group,
            year,
            project,
        }) => service
            .execute(query::PeriodsForYear {
                project_id: project,
                floor_group,
                year,
            })
            .await
            .map_err(AsError::into_error)
            .map(|periods| periods.iter().map(render_period).join("\n")),

        Command::Seasons(Cycle {
            floor_group,
            year,
            project,
        }) => service
            .execute(query::SeasonsForYear {
                project_id: project,
                floor_group,
                year,
            })
            .await
            .map_err(AsError::into_error)
            .map(|seasons| seasons.iter().map(render_season).join("\n")),

        Command::Season { week } => service
            .execute(query::SeasonOfWeek(week))
            .await
            .map_err(AsError::into_error)
            .map(|kind| kind.name().to_owned()),

        Command::Window {
            donem,
            cycle:
                Cycle {
                    floor_group,
                    year,
                    project,
                },
        } => service
            .execute(query::DonemWindow {
                donem,
                project_id: project,
                floor_group,
                year,
            })
            .await
            .map_err(AsError::into_error)
            .map(|range| range.to_string()),

        Command::Period {
            date,
            floor_group,
            project,
        } => service
            .execute(query::PeriodForDate {
                project_id: project,
                floor_group: floor_group.clone(),
                date,
            })
            .await
            .map_err(AsError::into_error)
            .map(|period| {
                period.as_ref().map_or_else(
                    || {
                        format!(
                            "{date} falls between the cycles of \
                             `{floor_group}`",
                        )
                    },
                    render_period,
                )
            }),

        Command::Available(filter) => service
            .execute(query::AvailableRooms {
                project_id: filter.project,
                selection: filter.selection(),
            })
            .await
            .map_err(AsError::into_error)
            .map(|rooms| rooms.iter().map(render_room).join("\n")),

        Command::Check { room, filter } => service
            .execute(query::RoomAvailability {
                room_id: room,
                selection: filter.selection(),
            })
            .await
            .map_err(AsError::into_error)
            .map(|a| render_availability(a).to_owned()),

        Command::Rooms { project } => service
            .execute(rooms::ByProject::by(project))
            .await
            .map_err(AsError::into_error)
            .map(|rooms| rooms.iter().map(render_room).join("\n")),

        Command::Reservations { project } => service
            .execute(reservations::ByProject::by(project))
            .await
            .map_err(AsError::into_error)
            .map(|ledger| ledger.iter().map(render_reservation).join("\n")),
    }
}

/// Renders a single [`Period`] line.
fn render_period(period: &Period) -> String {
    format!("{}\t{}\t{}", period.id, period.dates, period.season.name())
}

/// Renders a single [`Season`] line.
fn render_season(season: &Season) -> String {
    format!("{}\t{}\t{} days", season.name(), season.dates, season.days())
}

/// Renders a single [`Room`] line.
fn render_room(room: &Room) -> String {
    let mut line = format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        room.id, room.house, room.number, room.floor_group, room.status,
        room.price,
    );
    if let Some(kind) = &room.kind {
        _ = write!(line, "\t{kind}");
    }
    line
}

/// Renders a single [`Reservation`] line.
fn render_reservation(r: &Reservation) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        r.id,
        r.room_id,
        r.stay,
        r.period_id.map_or_else(|| "-".to_owned(), |id| id.to_string()),
        r.season.map_or("-", |s| s.name()),
        r.amount,
        if r.is_canceled() { "CANCELED" } else { "ACTIVE" },
    )
}

/// Renders an [`Availability`] verdict.
const fn render_availability(availability: Availability) -> &'static str {
    match availability {
        Availability::Unconstrained => "unconstrained",
        Availability::Available => "available",
        Availability::Unavailable => "unavailable",
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use crate::{
        args::Args,
        config::{Seed, SeedProject, SeedRoom},
        seed::seed,
    };

    use super::run;

    async fn service() -> crate::Service {
        let project = service::domain::project::Id::new();
        let seed_data = Seed {
            projects: vec![SeedProject {
                id: project,
                name: "Sea Breeze Resort".into(),
            }],
            rooms: vec![SeedRoom {
                id: service::domain::room::Id::new(),
                project,
                house: "C".into(),
                floor: 5,
                number: "C-501".into(),
                status: service::domain::room::Status::Available,
                price: "3100EUR".parse().unwrap(),
                kind: None,
                floor_name: None,
                floor_group: "penthouse".into(),
                balcony: None,
            }],
            ..Seed::default()
        };
        seed(service::Config::default(), seed_data).await.unwrap()
    }

    async fn exec(args: &[&str]) -> Result<String, crate::Error> {
        let args = Args::try_parse_from(
            ["app"].into_iter().chain(args.iter().copied()),
        )
        .unwrap();
        run(&service().await, args.command).await
    }

    #[tokio::test]
    async fn renders_periods() {
        let out = exec(&["periods", "-f", "A-C", "-y", "2024"]).await.unwrap();
        let lines = out.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 52);
        assert_eq!(lines[0], "2024-01\t2023-12-30..=2024-01-05\tWinter");
        assert_eq!(lines[26], "2024-27\t2024-06-29..=2024-07-05\tSummer");
    }

    #[tokio::test]
    async fn renders_window_and_season() {
        let window =
            exec(&["window", "-d", "27", "-f", "penthouse", "-y", "2024"])
                .await
                .unwrap();
        assert_eq!(window, "2024-07-01..=2024-07-07");

        assert_eq!(exec(&["season", "-w", "50"]).await.unwrap(), "Winter");
        assert_eq!(
            exec(&["season", "-w", "53"]).await.unwrap_err().code,
            "INVALID_WEEK_NUMBER",
        );
    }

    #[tokio::test]
    async fn renders_gap_days() {
        let out = exec(&["period", "-d", "2023-12-31", "-f", "penthouse"])
            .await
            .unwrap();

        assert_eq!(out, "2023-12-31 falls between the cycles of `penthouse`");
    }

    #[tokio::test]
    async fn lists_available_rooms() {
        let out = exec(&[
            "available",
            "--from",
            "2024-07-01",
            "--to",
            "2024-07-07",
        ])
        .await
        .unwrap();

        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("C-501"));

        let err = exec(&["available", "--donems", "0", "--year", "2024"])
            .await
            .unwrap_err();
        assert_eq!(err.code, "INVALID_DONEM_NUMBER");
    }
}
