use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    Person,
    Film,
    Planet,
    Species,
    Starship,
    Vehicle,
}

impl EntityType {
    /// Order in which identifier sub-maps are minted.
    pub const ALL: [EntityType; 6] = [
        EntityType::Person,
        EntityType::Species,
        EntityType::Film,
        EntityType::Planet,
        EntityType::Starship,
        EntityType::Vehicle,
    ];

    /// Path segment of the SWAPI resource listing this type.
    pub fn resource(self) -> &'static str {
        match self {
            EntityType::Person => "people",
            EntityType::Film => "films",
            EntityType::Planet => "planets",
            EntityType::Species => "species",
            EntityType::Starship => "starships",
            EntityType::Vehicle => "vehicles",
        }
    }

    /// Type tag embedded in generated ids; doubles as the collection name.
    pub fn type_name(self) -> &'static str {
        match self {
            EntityType::Person => "Person",
            EntityType::Film => "Film",
            EntityType::Planet => "Planet",
            EntityType::Species => "Species",
            EntityType::Starship => "Starship",
            EntityType::Vehicle => "Vehicle",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

pub const EDGE_TYPE_NAME: &str = "_Edge";

/// Every collection a run writes, in load order.
pub const COLLECTION_NAMES: [&str; 7] = [
    EDGE_TYPE_NAME,
    "Film",
    "Person",
    "Planet",
    "Species",
    "Starship",
    "Vehicle",
];

/// Run-scoped global identifier. Ordering is plain string ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalId(String);

impl GlobalId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pilot's craft reference: either kind resolves against its own sub-map but both
/// share the `craft`/`pilots` relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Craft<'a> {
    Starship(&'a str),
    Vehicle(&'a str),
}

impl Craft<'_> {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Craft::Starship(_) => EntityType::Starship,
            Craft::Vehicle(_) => EntityType::Vehicle,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Craft::Starship(url) | Craft::Vehicle(url) => url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl FromStr for Period {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hour" | "hours" => Ok(Period::Hours),
            "day" | "days" => Ok(Period::Days),
            "week" | "weeks" => Ok(Period::Weeks),
            "month" | "months" => Ok(Period::Months),
            "year" | "years" => Ok(Period::Years),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub struct Duration {
    pub duration: i64,
    pub period: Period,
}

/// Species designation. Only `reptilian` is recognised; every other raw value,
/// including `unknown`, is SENTIENT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Designation {
    Sentient,
    Reptilian,
}
