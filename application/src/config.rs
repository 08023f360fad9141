//! [`Config`]-related definitions.

use common::{DateRange, Money, Percent};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::domain::{
    customer,
    floor_group::{self, Anchor},
    project,
    reservation::{PaymentMethod, PaymentStatus},
    room, salesperson,
};

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Calendar configuration.
    pub calendar: Calendar,

    /// Data to seed the in-memory database with.
    pub seed: Seed,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Calendar configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Calendar {
    /// Floor-group anchors overriding or extending the built-in ones.
    pub anchors: Vec<AnchorRule>,
}

/// Anchor of a single floor-group.
#[derive(Clone, Debug, Deserialize)]
pub struct AnchorRule {
    /// ID of the project this rule is specific to.
    ///
    /// Omitting it makes the rule apply to every project.
    #[serde(default)]
    pub project: Option<project::Id>,

    /// Code of the floor-group.
    pub floor_group: String,

    /// Day the cycles of the floor-group start at.
    pub anchor: Anchor,
}

impl TryFrom<Calendar> for service::Config {
    type Error = &'static str;

    fn try_from(value: Calendar) -> Result<Self, Self::Error> {
        let mut config = Self::default();
        for AnchorRule {
            project,
            floor_group,
            anchor,
        } in value.anchors
        {
            config.anchors.insert(floor_group::Rule {
                project_id: project,
                code: floor_group.parse()?,
                anchor,
            });
        }
        Ok(config)
    }
}

/// Data to seed the in-memory database with.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    /// Projects to create.
    pub projects: Vec<SeedProject>,

    /// Customers to create.
    pub customers: Vec<SeedCustomer>,

    /// Rooms to create.
    pub rooms: Vec<SeedRoom>,

    /// Reservations to make, in order.
    pub reservations: Vec<SeedReservation>,
}

/// Project to seed.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedProject {
    /// ID of the project.
    pub id: project::Id,

    /// Name of the project.
    pub name: String,
}

/// Customer to seed.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedCustomer {
    /// ID of the customer.
    pub id: customer::Id,

    /// Full name of the customer.
    pub name: String,

    /// Phone number of the customer.
    #[serde(default)]
    pub phone: Option<String>,

    /// Email address of the customer.
    #[serde(default)]
    pub email: Option<String>,
}

/// Room to seed.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedRoom {
    /// ID of the room.
    pub id: room::Id,

    /// ID of the project the room belongs to.
    pub project: project::Id,

    /// House (block) the room is located in.
    pub house: String,

    /// Floor the room is located on.
    #[serde(default)]
    pub floor: room::Floor,

    /// Number of the room.
    pub number: String,

    /// Coarse sale status of the room.
    #[serde(default = "default_status")]
    pub status: room::Status,

    /// Listed price of the room.
    pub price: Money,

    /// Layout of the room, like `1+1`.
    #[serde(default)]
    pub kind: Option<String>,

    /// Floor name of the room.
    #[serde(default)]
    pub floor_name: Option<String>,

    /// Floor-group code of the room.
    pub floor_group: String,

    /// Indicator whether the room has a balcony.
    #[serde(default)]
    pub balcony: Option<bool>,
}

/// Default [`room::Status`] of a [`SeedRoom`].
const fn default_status() -> room::Status {
    room::Status::Available
}

/// Reservation to seed.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedReservation {
    /// ID of the reserved room.
    pub room: room::Id,

    /// ID of the customer buying the reservation.
    pub customer: customer::Id,

    /// ID of the salesperson making the sale.
    #[serde(default)]
    pub salesperson: salesperson::Id,

    /// Inclusive stay, as `YYYY-MM-DD..=YYYY-MM-DD`.
    pub stay: String,

    /// Total amount, defaulting to the room price.
    #[serde(default)]
    pub amount: Option<Money>,

    /// Payment status of the reservation.
    #[serde(default = "default_payment_status")]
    pub payment_status: PaymentStatus,

    /// Payment method of the reservation.
    #[serde(default = "default_payment_method")]
    pub payment_method: PaymentMethod,

    /// Tax rate applied to the amount.
    #[serde(default)]
    pub tax: Option<Percent>,

    /// Reason to cancel the reservation right after making it.
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

impl SeedReservation {
    /// Parses the stay of this [`SeedReservation`].
    ///
    /// # Errors
    ///
    /// If the stay is malformed.
    pub fn stay(&self) -> Result<DateRange, common::date::RangeParseError> {
        self.stay.parse()
    }
}

/// Default [`PaymentStatus`] of a [`SeedReservation`].
const fn default_payment_status() -> PaymentStatus {
    PaymentStatus::Paid
}

/// Default [`PaymentMethod`] of a [`SeedReservation`].
const fn default_payment_method() -> PaymentMethod {
    PaymentMethod::BankTransfer
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
