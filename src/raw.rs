//! Records as SWAPI serves them. Field names follow the API's snake_case payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::EntityType;
use crate::error::EtlError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPerson {
    pub url: String,
    pub name: String,
    pub birth_year: Option<String>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    pub hair_color: Option<String>,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub skin_color: Option<String>,
    pub homeworld: Option<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawFilm {
    pub url: String,
    pub title: String,
    pub episode_id: Option<i64>,
    pub opening_crawl: Option<String>,
    pub director: Option<String>,
    pub producer: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub planets: Vec<String>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPlanet {
    pub url: String,
    pub name: String,
    pub diameter: Option<String>,
    pub rotation_period: Option<String>,
    pub orbital_period: Option<String>,
    pub gravity: Option<String>,
    pub population: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub surface_water: Option<String>,
    #[serde(default)]
    pub residents: Vec<String>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSpecies {
    pub url: String,
    pub name: String,
    pub classification: Option<String>,
    pub designation: Option<String>,
    pub average_height: Option<String>,
    pub average_lifespan: Option<String>,
    pub eye_colors: Option<String>,
    pub hair_colors: Option<String>,
    pub skin_colors: Option<String>,
    pub language: Option<String>,
    pub homeworld: Option<String>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawStarship {
    pub url: String,
    pub name: String,
    pub model: Option<String>,
    pub starship_class: Option<String>,
    pub manufacturer: Option<String>,
    pub cost_in_credits: Option<String>,
    pub length: Option<String>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
    pub max_atmosphering_speed: Option<String>,
    pub cargo_capacity: Option<String>,
    pub consumables: Option<String>,
    #[serde(rename = "MGLT")]
    pub mglt: Option<String>,
    pub hyperdrive_rating: Option<String>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawVehicle {
    pub url: String,
    pub name: String,
    pub model: Option<String>,
    pub vehicle_class: Option<String>,
    pub manufacturer: Option<String>,
    pub cost_in_credits: Option<String>,
    pub length: Option<String>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
    pub max_atmosphering_speed: Option<String>,
    pub cargo_capacity: Option<String>,
    pub consumables: Option<String>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

/// Everything extracted in one run, one vector per resource.
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    pub people: Vec<RawPerson>,
    pub films: Vec<RawFilm>,
    pub planets: Vec<RawPlanet>,
    pub species: Vec<RawSpecies>,
    pub starships: Vec<RawStarship>,
    pub vehicles: Vec<RawVehicle>,
}

impl RawDataset {
    /// Source URLs of every record of `entity`, in input order.
    pub fn urls(&self, entity: EntityType) -> Vec<&str> {
        match entity {
            EntityType::Person => self.people.iter().map(|r| r.url.as_str()).collect(),
            EntityType::Film => self.films.iter().map(|r| r.url.as_str()).collect(),
            EntityType::Planet => self.planets.iter().map(|r| r.url.as_str()).collect(),
            EntityType::Species => self.species.iter().map(|r| r.url.as_str()).collect(),
            EntityType::Starship => self.starships.iter().map(|r| r.url.as_str()).collect(),
            EntityType::Vehicle => self.vehicles.iter().map(|r| r.url.as_str()).collect(),
        }
    }

    /// Decodes a fetched page set into the typed vector for `entity`.
    pub fn insert_raw(&mut self, entity: EntityType, values: Vec<Value>) -> Result<(), EtlError> {
        match entity {
            EntityType::Person => self.people = decode(entity, values)?,
            EntityType::Film => self.films = decode(entity, values)?,
            EntityType::Planet => self.planets = decode(entity, values)?,
            EntityType::Species => self.species = decode(entity, values)?,
            EntityType::Starship => self.starships = decode(entity, values)?,
            EntityType::Vehicle => self.vehicles = decode(entity, values)?,
        }
        Ok(())
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    entity: EntityType,
    values: Vec<Value>,
) -> Result<Vec<T>, EtlError> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|err| EtlError::SwapiDecode {
                resource: entity.resource().to_string(),
                message: err.to_string(),
            })
        })
        .collect()
}
