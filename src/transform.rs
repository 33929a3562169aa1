use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::documents::{self, Film, Person, Planet, Species, Starship, Vehicle};
use crate::domain::{EDGE_TYPE_NAME, EntityType};
use crate::edges::{Edge, EdgeBuilder};
use crate::error::EtlError;
use crate::ids::{IdGenerator, IdentifierMap};
use crate::raw::RawDataset;

/// Output of the transform stage, ready to hand to the loader.
#[derive(Debug, Clone, Default)]
pub struct Transformed {
    pub edges: Vec<Edge>,
    pub people: Vec<Person>,
    pub films: Vec<Film>,
    pub planets: Vec<Planet>,
    pub species: Vec<Species>,
    pub starships: Vec<Starship>,
    pub vehicles: Vec<Vehicle>,
}

/// A serialized collection as the store receives it.
#[derive(Debug, Clone)]
pub struct Collection {
    pub name: &'static str,
    pub documents: Vec<Value>,
}

impl Transformed {
    /// Collections in load order.
    pub fn collections(&self) -> Result<Vec<Collection>, EtlError> {
        Ok(vec![
            collection(EDGE_TYPE_NAME, &self.edges)?,
            collection(EntityType::Film.type_name(), &self.films)?,
            collection(EntityType::Person.type_name(), &self.people)?,
            collection(EntityType::Planet.type_name(), &self.planets)?,
            collection(EntityType::Species.type_name(), &self.species)?,
            collection(EntityType::Starship.type_name(), &self.starships)?,
            collection(EntityType::Vehicle.type_name(), &self.vehicles)?,
        ])
    }
}

fn collection<T: Serialize>(name: &'static str, items: &[T]) -> Result<Collection, EtlError> {
    let documents = items
        .iter()
        .map(|item| {
            serde_json::to_value(item).map_err(|err| EtlError::Serialize {
                collection: name.to_string(),
                message: err.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Collection { name, documents })
}

pub fn transform(raw: &RawDataset, generator: &dyn IdGenerator) -> Result<Transformed, EtlError> {
    let ids = IdentifierMap::build(raw, generator);
    for entity in EntityType::ALL {
        debug!(entity = %entity, count = ids.len(entity), "assigned identifiers");
    }

    let people = map_all(&raw.people, |r| documents::person(&ids, r))?;
    let species = map_all(&raw.species, |r| documents::species(&ids, r))?;
    let films = map_all(&raw.films, |r| documents::film(&ids, r))?;
    let planets = map_all(&raw.planets, |r| documents::planet(&ids, r))?;
    let starships = map_all(&raw.starships, |r| documents::starship(&ids, r))?;
    let vehicles = map_all(&raw.vehicles, |r| documents::vehicle(&ids, r))?;

    let mut builder = EdgeBuilder::new(&ids, generator);
    for person in &raw.people {
        builder.person(person)?;
    }
    for film in &raw.films {
        builder.film(film)?;
    }
    let edges = builder.finish();
    info!(edges = edges.len(), "derived relationship edges");

    Ok(Transformed {
        edges,
        people,
        films,
        planets,
        species,
        starships,
        vehicles,
    })
}

fn map_all<R, D>(
    raw: &[R],
    f: impl Fn(&R) -> Result<D, EtlError>,
) -> Result<Vec<D>, EtlError> {
    raw.iter().map(f).collect()
}
