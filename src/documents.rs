//! Normalized entity documents, one per raw record.

use serde::{Deserialize, Serialize};

use crate::coerce::{
    indefinite, none, not_applicable, to_consumables, to_designation, to_float, to_int,
    to_list, unknown,
};
use crate::domain::{Designation, Duration, EntityType, GlobalId};
use crate::error::EtlError;
use crate::ids::IdentifierMap;
use crate::raw::{RawFilm, RawPerson, RawPlanet, RawSpecies, RawStarship, RawVehicle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: GlobalId,
    pub name: String,
    pub birth_year: Option<String>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    pub hair_color: Option<String>,
    pub height: Option<i64>,
    pub mass: Option<f64>,
    pub skin_color: Option<String>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    #[serde(rename = "_id")]
    pub id: GlobalId,
    pub title: String,
    pub episode_id: Option<i64>,
    pub opening_crawl: Option<String>,
    pub director: Option<String>,
    pub producers: Option<Vec<String>>,
    pub release_date: Option<String>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    #[serde(rename = "_id")]
    pub id: GlobalId,
    pub name: String,
    pub diameter: Option<i64>,
    pub rotation_period: Option<i64>,
    pub orbital_period: Option<i64>,
    pub gravity: Option<String>,
    pub population: Option<i64>,
    pub climates: Option<Vec<String>>,
    pub terrains: Option<Vec<String>>,
    pub surface_water: Option<f64>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    #[serde(rename = "_id")]
    pub id: GlobalId,
    pub name: String,
    pub classification: Option<String>,
    pub designation: Designation,
    pub average_height: Option<f64>,
    pub average_lifespan: Option<i64>,
    pub eye_colors: Option<Vec<String>>,
    pub hair_colors: Option<Vec<String>>,
    pub skin_colors: Option<Vec<String>>,
    pub language: Option<String>,
    pub home_world: Option<GlobalId>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Starship {
    #[serde(rename = "_id")]
    pub id: GlobalId,
    pub name: String,
    pub model: Option<String>,
    pub class: Option<String>,
    pub manufacturers: Option<Vec<String>>,
    pub cost_in_credits: Option<i64>,
    pub length: Option<f64>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
    pub max_atmospheric_speed: Option<i64>,
    pub cargo_capacity: Option<i64>,
    pub consumables: Option<Duration>,
    pub mglt: Option<i64>,
    pub hyperdrive_rating: Option<f64>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: GlobalId,
    pub name: String,
    pub model: Option<String>,
    pub class: Option<String>,
    pub manufacturers: Option<Vec<String>>,
    pub cost_in_credits: Option<i64>,
    pub length: Option<f64>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
    pub max_atmospheric_speed: Option<i64>,
    pub cargo_capacity: Option<i64>,
    pub consumables: Option<Duration>,
    pub created: Option<String>,
    pub edited: Option<String>,
}

fn own_id(
    ids: &IdentifierMap,
    entity: EntityType,
    url: &str,
) -> Result<GlobalId, EtlError> {
    ids.resolve(entity, url, entity, "url").cloned()
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

pub fn person(ids: &IdentifierMap, raw: &RawPerson) -> Result<Person, EtlError> {
    Ok(Person {
        id: own_id(ids, EntityType::Person, &raw.url)?,
        name: raw.name.clone(),
        birth_year: owned(unknown(raw.birth_year.as_deref())),
        eye_color: owned(unknown(raw.eye_color.as_deref())),
        gender: owned(none(raw.gender.as_deref())),
        hair_color: owned(none(raw.hair_color.as_deref())),
        height: to_int(unknown(raw.height.as_deref())),
        mass: to_float(unknown(raw.mass.as_deref())),
        skin_color: owned(none(raw.skin_color.as_deref())),
        created: raw.created.clone(),
        edited: raw.edited.clone(),
    })
}

pub fn film(ids: &IdentifierMap, raw: &RawFilm) -> Result<Film, EtlError> {
    Ok(Film {
        id: own_id(ids, EntityType::Film, &raw.url)?,
        title: raw.title.clone(),
        episode_id: raw.episode_id,
        opening_crawl: owned(unknown(raw.opening_crawl.as_deref())),
        director: raw.director.clone(),
        producers: to_list(raw.producer.as_deref()),
        release_date: raw.release_date.clone(),
        created: raw.created.clone(),
        edited: raw.edited.clone(),
    })
}

pub fn planet(ids: &IdentifierMap, raw: &RawPlanet) -> Result<Planet, EtlError> {
    Ok(Planet {
        id: own_id(ids, EntityType::Planet, &raw.url)?,
        name: raw.name.clone(),
        diameter: to_int(unknown(raw.diameter.as_deref())),
        rotation_period: to_int(unknown(raw.rotation_period.as_deref())),
        orbital_period: to_int(unknown(raw.orbital_period.as_deref())),
        gravity: owned(unknown(raw.gravity.as_deref())),
        population: to_int(unknown(raw.population.as_deref())),
        climates: to_list(unknown(raw.climate.as_deref())),
        terrains: to_list(unknown(raw.terrain.as_deref())),
        surface_water: to_float(unknown(raw.surface_water.as_deref())),
        created: raw.created.clone(),
        edited: raw.edited.clone(),
    })
}

pub fn species(ids: &IdentifierMap, raw: &RawSpecies) -> Result<Species, EtlError> {
    let home_world = raw
        .homeworld
        .as_deref()
        .map(|url| ids.resolve(EntityType::Planet, url, EntityType::Species, "homeworld"))
        .transpose()?
        .cloned();

    Ok(Species {
        id: own_id(ids, EntityType::Species, &raw.url)?,
        name: raw.name.clone(),
        classification: owned(unknown(raw.classification.as_deref())),
        designation: to_designation(raw.designation.as_deref()),
        average_height: to_float(not_applicable(unknown(raw.average_height.as_deref()))),
        average_lifespan: to_int(indefinite(unknown(raw.average_lifespan.as_deref()))),
        eye_colors: to_list(unknown(raw.eye_colors.as_deref())),
        hair_colors: to_list(unknown(raw.hair_colors.as_deref())),
        skin_colors: to_list(unknown(raw.skin_colors.as_deref())),
        language: owned(unknown(raw.language.as_deref())),
        home_world,
        created: raw.created.clone(),
        edited: raw.edited.clone(),
    })
}

pub fn starship(ids: &IdentifierMap, raw: &RawStarship) -> Result<Starship, EtlError> {
    Ok(Starship {
        id: own_id(ids, EntityType::Starship, &raw.url)?,
        name: raw.name.clone(),
        model: raw.model.clone(),
        class: raw.starship_class.clone(),
        manufacturers: to_list(raw.manufacturer.as_deref()),
        cost_in_credits: to_int(unknown(raw.cost_in_credits.as_deref())),
        length: to_float(unknown(raw.length.as_deref())),
        crew: owned(unknown(raw.crew.as_deref())),
        passengers: owned(unknown(raw.passengers.as_deref())),
        max_atmospheric_speed: to_int(not_applicable(unknown(
            raw.max_atmosphering_speed.as_deref(),
        ))),
        cargo_capacity: to_int(not_applicable(unknown(raw.cargo_capacity.as_deref()))),
        consumables: to_consumables(raw.consumables.as_deref()),
        mglt: to_int(unknown(raw.mglt.as_deref())),
        hyperdrive_rating: to_float(unknown(raw.hyperdrive_rating.as_deref())),
        created: raw.created.clone(),
        edited: raw.edited.clone(),
    })
}

pub fn vehicle(ids: &IdentifierMap, raw: &RawVehicle) -> Result<Vehicle, EtlError> {
    Ok(Vehicle {
        id: own_id(ids, EntityType::Vehicle, &raw.url)?,
        name: raw.name.clone(),
        model: raw.model.clone(),
        class: raw.vehicle_class.clone(),
        manufacturers: to_list(raw.manufacturer.as_deref()),
        cost_in_credits: to_int(unknown(raw.cost_in_credits.as_deref())),
        length: to_float(unknown(raw.length.as_deref())),
        crew: owned(unknown(raw.crew.as_deref())),
        passengers: owned(unknown(raw.passengers.as_deref())),
        max_atmospheric_speed: to_int(not_applicable(unknown(
            raw.max_atmosphering_speed.as_deref(),
        ))),
        cargo_capacity: to_int(not_applicable(unknown(raw.cargo_capacity.as_deref()))),
        consumables: to_consumables(raw.consumables.as_deref()),
        created: raw.created.clone(),
        edited: raw.edited.clone(),
    })
}
