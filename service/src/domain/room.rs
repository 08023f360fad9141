//! [`Room`] definitions.

use common::{define_kind, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{floor_group, project};
#[cfg(doc)]
use crate::domain::{Period, Project, Reservation};

/// Sellable unit of a [`Project`].
#[derive(Clone, Debug)]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// ID of the [`Project`] this [`Room`] belongs to.
    pub project_id: project::Id,

    /// [`House`] (block) of the [`Project`] this [`Room`] is located in.
    pub house: House,

    /// [`Floor`] this [`Room`] is located on.
    pub floor: Floor,

    /// [`Number`] of this [`Room`] on its [`Floor`].
    pub number: Number,

    /// Coarse sale [`Status`] of this [`Room`].
    ///
    /// This is a hint only: whether a specific [`Period`] is free is decided
    /// by the [`Reservation`]s of this [`Room`].
    pub status: Status,

    /// Listed price of a single [`Period`] in this [`Room`].
    pub price: Money,

    /// [`Kind`] (layout) of this [`Room`], if known.
    pub kind: Option<Kind>,

    /// Size of this [`Room`] in square meters, if known.
    pub size: Option<Decimal>,

    /// Indicator whether this [`Room`] has a balcony, if known.
    pub balcony: Option<bool>,

    /// Human-readable name of the [`Floor`], if any.
    pub floor_name: Option<FloorName>,

    /// [`floor_group::Code`] deciding the [`Period`] calendar of this
    /// [`Room`].
    pub floor_group: floor_group::Code,
}

/// ID of a [`Room`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Floor of a [`Room`].
///
/// Negative values stand for underground floors.
pub type Floor = i16;

/// House (block) of a [`Project`] containing [`Room`]s.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct House(String);

impl House {
    /// Creates a new [`House`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        check_label(&name, 64).then_some(Self(name))
    }
}

impl FromStr for House {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `House`")
    }
}

/// Number of a [`Room`], like `A-101`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        check_label(&num, 32).then_some(Self(num))
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Number`")
    }
}

/// Layout of a [`Room`], like `1+1` or `studio`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Kind(String);

impl Kind {
    /// Creates a new [`Kind`] if the given `kind` is valid.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Option<Self> {
        let kind = kind.into();
        check_label(&kind, 64).then_some(Self(kind))
    }
}

impl FromStr for Kind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Kind`")
    }
}

/// Human-readable name of a [`Floor`], like `Zemin Kat`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct FloorName(String);

impl FloorName {
    /// Creates a new [`FloorName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        check_label(&name, 128).then_some(Self(name))
    }
}

impl FromStr for FloorName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FloorName`")
    }
}

/// Checks whether the given `label` is trimmed, non-empty and not longer than
/// `max` bytes.
fn check_label(label: &str, max: usize) -> bool {
    label.trim() == label && !label.is_empty() && label.len() <= max
}

define_kind! {
    #[doc = "Coarse sale status of a [`Room`]."]
    enum Status {
        #[doc = "No [`Period`] of the [`Room`] is known to be sold."]
        Available = 1,

        #[doc = "Some [`Period`]s of the [`Room`] are reserved."]
        Reserved = 2,

        #[doc = "The [`Room`] is marked as sold."]
        Sold = 3,
    }
}
