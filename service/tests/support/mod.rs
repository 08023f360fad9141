//! Fixtures shared by the integration tests.

#![allow(dead_code, reason = "not every test uses every fixture")]

use std::str::FromStr as _;

use common::{Date, DateRange, Money};
use service::{
    domain::{customer, floor_group, project, room, Customer, Project, Room},
    infra::{memory::Tables, Memory},
    Config, Service,
};

pub fn date(s: &str) -> Date {
    s.parse().unwrap()
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).unwrap()
}

pub struct World {
    pub service: Service<Memory>,
    pub project: Project,
    pub customer: Customer,
    pub rooms: Vec<Room>,
}

impl World {
    /// Creates a [`World`] with a single project having one room per each
    /// of the provided floor-groups.
    pub fn with_rooms(floor_groups: &[&str]) -> Self {
        let project = Project {
            id: project::Id::new(),
            name: project::Name::new("Sea Breeze Resort").unwrap(),
        };
        let customer = Customer {
            id: customer::Id::new(),
            name: customer::Name::new("Ayşe Yılmaz").unwrap(),
            phone: Some(customer::Phone::new("+90 532 123 45 67").unwrap()),
            email: None,
        };
        let rooms = floor_groups
            .iter()
            .enumerate()
            .map(|(i, group)| Room {
                id: room::Id::new(),
                project_id: project.id,
                house: room::House::new("A").unwrap(),
                floor: 1,
                number: room::Number::new(format!("A-10{i}")).unwrap(),
                status: room::Status::Available,
                price: Money::from_str("1500EUR").unwrap(),
                kind: Some(room::Kind::new("1+1").unwrap()),
                size: None,
                balcony: Some(true),
                floor_name: None,
                floor_group: floor_group::Code::new(*group).unwrap(),
            })
            .collect::<Vec<_>>();

        let db = Memory::with_tables(Tables {
            projects: vec![project.clone()],
            customers: vec![customer.clone()],
            rooms: rooms.clone(),
            reservations: vec![],
        });

        Self {
            service: Service::new(Config::default(), db),
            project,
            customer,
            rooms,
        }
    }
}
