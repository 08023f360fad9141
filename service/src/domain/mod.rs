//! Domain definitions.

pub mod customer;
pub mod floor_group;
pub mod period;
pub mod project;
pub mod reservation;
pub mod room;
pub mod salesperson;
pub mod season;

pub use self::{
    customer::Customer,
    floor_group::AnchorTable,
    period::{Calendar, Period},
    project::Project,
    reservation::Reservation,
    room::Room,
    season::Season,
};
