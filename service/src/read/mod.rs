//! Read entities definitions.

pub mod availability;

pub use self::availability::{Availability, Selection};
