//! Seeding of the in-memory database out of the [`Seed`] configuration.

use std::{collections::HashSet, str::FromStr};

use service::{
    command::{CancelReservation, CreateReservation},
    domain::{customer, project, reservation, room, Customer, Project, Room},
    infra::{memory::Tables, Memory},
    Command as _,
};
use tracing as log;

use crate::{config::Seed, AsError, Error, Service};

/// Creates a new [`Service`] over the in-memory database filled with the
/// provided [`Seed`].
///
/// Projects, customers and rooms are stored as is, while reservations are
/// made one by one, so a reservation overlapping an earlier one fails the
/// seeding.
///
/// # Errors
///
/// If any of the seeded entities is invalid, or a reservation cannot be
/// made.
pub async fn seed(
    config: service::Config,
    seed: Seed,
) -> Result<Service, Error> {
    let Seed {
        projects,
        customers,
        rooms,
        reservations,
    } = seed;

    let projects = projects
        .into_iter()
        .map(|p| {
            Ok(Project {
                id: p.id,
                name: parse::<project::Name>(&p.name, "project name")?,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;
    let project_ids = projects.iter().map(|p| p.id).collect::<HashSet<_>>();

    let customers = customers
        .into_iter()
        .map(|c| {
            Ok(Customer {
                id: c.id,
                name: parse::<customer::Name>(&c.name, "customer name")?,
                phone: c
                    .phone
                    .as_deref()
                    .map(|p| parse(p, "customer phone"))
                    .transpose()?,
                email: c
                    .email
                    .as_deref()
                    .map(|e| parse(e, "customer email"))
                    .transpose()?,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let rooms = rooms
        .into_iter()
        .map(|r| {
            if !project_ids.contains(&r.project) {
                return Err(Error::invalid_input(&format!(
                    "`Room(id: {})` refers to unknown `Project(id: {})`",
                    r.id, r.project,
                )));
            }
            Ok(Room {
                id: r.id,
                project_id: r.project,
                house: parse::<room::House>(&r.house, "room house")?,
                floor: r.floor,
                number: parse::<room::Number>(&r.number, "room number")?,
                status: r.status,
                price: r.price,
                kind: r
                    .kind
                    .as_deref()
                    .map(|k| parse(k, "room kind"))
                    .transpose()?,
                size: None,
                balcony: r.balcony,
                floor_name: r
                    .floor_name
                    .as_deref()
                    .map(|n| parse(n, "room floor name"))
                    .transpose()?,
                floor_group: parse(&r.floor_group, "room floor-group")?,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    log::debug!(
        "seeding {} projects, {} customers and {} rooms",
        projects.len(),
        customers.len(),
        rooms.len(),
    );

    let service = Service::new(
        config,
        Memory::with_tables(Tables {
            projects,
            customers,
            rooms,
            reservations: vec![],
        }),
    );

    let total = reservations.len();
    for r in reservations {
        let stay = r.stay().map_err(|e| {
            Error::invalid_input(&format!("invalid stay `{}`: {e}", r.stay))
        })?;
        let created = service
            .execute(CreateReservation {
                room_id: r.room,
                customer_id: r.customer,
                salesperson_id: r.salesperson,
                stay,
                amount: r.amount,
                payment_status: r.payment_status,
                payment_method: r.payment_method,
                tax: r.tax,
            })
            .await
            .map_err(AsError::into_error)?;

        if let Some(reason) = r.cancellation_reason.as_deref() {
            _ = service
                .execute(CancelReservation {
                    reservation_id: created.id,
                    reason: parse::<reservation::Reason>(
                        reason,
                        "cancellation reason",
                    )?,
                })
                .await
                .map_err(AsError::into_error)?;
        }
    }
    log::debug!("seeded {total} reservations");

    Ok(service)
}

/// Parses a `value` of a seeded entity `field`.
fn parse<T>(value: &str, field: &str) -> Result<T, Error>
where
    T: FromStr<Err = &'static str>,
{
    value
        .parse()
        .map_err(|e| Error::invalid_input(&format!("{field} `{value}`: {e}")))
}
