//! Relationship edges between entities.
//!
//! Every edge is stored once, with its endpoints ordered so that `node_id < related_id`.
//! Only the owning side of each relationship is walked: people list their homeworld,
//! films, species and craft; films list their species, craft and planets. The inverse
//! lists (`characters`, `residents`, `pilots`, ...) are never read.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Craft, EDGE_TYPE_NAME, EntityType, GlobalId};
use crate::error::EtlError;
use crate::ids::{IdGenerator, IdentifierMap};
use crate::raw::{RawFilm, RawPerson};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    #[serde(rename = "_id")]
    pub id: GlobalId,
    pub node_id: GlobalId,
    pub node_field: String,
    pub related_id: GlobalId,
    pub related_field: String,
}

/// One end of an edge: the entity and the field name it sees the relationship under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub id: GlobalId,
    pub field: &'static str,
}

impl Edge {
    /// Builds an edge, swapping the endpoints as a unit when `node` does not sort first.
    pub fn canonical(id: GlobalId, node: Endpoint, related: Endpoint) -> Self {
        let (node, related) = if node.id < related.id {
            (node, related)
        } else {
            (related, node)
        };
        Self {
            id,
            node_id: node.id,
            node_field: node.field.to_string(),
            related_id: related.id,
            related_field: related.field.to_string(),
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.node_id < self.related_id
    }
}

/// Relationship categories with their fixed (owner field, target field) labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    HomeWorld,
    PersonFilm,
    PersonSpecies,
    Pilot,
    FilmSpecies,
    FilmCraft,
    FilmPlanet,
}

impl Relationship {
    pub fn fields(self) -> (&'static str, &'static str) {
        match self {
            Relationship::HomeWorld => ("homeWorlds", "residents"),
            Relationship::PersonFilm => ("films", "characters"),
            Relationship::PersonSpecies => ("species", "people"),
            Relationship::Pilot => ("craft", "pilots"),
            Relationship::FilmSpecies => ("species", "films"),
            Relationship::FilmCraft => ("craft", "films"),
            Relationship::FilmPlanet => ("planets", "films"),
        }
    }
}

/// Collects edges for one run; owns the edge id generator and the duplicate check.
pub struct EdgeBuilder<'a> {
    ids: &'a IdentifierMap,
    generator: &'a dyn IdGenerator,
    edges: Vec<Edge>,
    seen: HashSet<(GlobalId, String, GlobalId, String)>,
}

impl<'a> EdgeBuilder<'a> {
    pub fn new(ids: &'a IdentifierMap, generator: &'a dyn IdGenerator) -> Self {
        Self {
            ids,
            generator,
            edges: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn person(&mut self, raw: &RawPerson) -> Result<(), EtlError> {
        let ids = self.ids;
        let owner = EntityType::Person;
        let node = ids.resolve(owner, &raw.url, owner, "url")?.clone();

        if let Some(homeworld) = raw.homeworld.as_deref() {
            let planet = ids.resolve(EntityType::Planet, homeworld, owner, "homeworld")?;
            self.push(&node, planet.clone(), Relationship::HomeWorld)?;
        }
        for url in &raw.films {
            let film = ids.resolve(EntityType::Film, url, owner, "films")?;
            self.push(&node, film.clone(), Relationship::PersonFilm)?;
        }
        for url in &raw.species {
            let species = ids.resolve(EntityType::Species, url, owner, "species")?;
            self.push(&node, species.clone(), Relationship::PersonSpecies)?;
        }
        let craft = raw
            .starships
            .iter()
            .map(|url| Craft::Starship(url))
            .chain(raw.vehicles.iter().map(|url| Craft::Vehicle(url)));
        for craft in craft {
            let field = craft.entity_type().resource();
            let target = ids.resolve_craft(&craft, owner, field)?;
            self.push(&node, target.clone(), Relationship::Pilot)?;
        }
        Ok(())
    }

    pub fn film(&mut self, raw: &RawFilm) -> Result<(), EtlError> {
        let ids = self.ids;
        let owner = EntityType::Film;
        let node = ids.resolve(owner, &raw.url, owner, "url")?.clone();

        for url in &raw.species {
            let species = ids.resolve(EntityType::Species, url, owner, "species")?;
            self.push(&node, species.clone(), Relationship::FilmSpecies)?;
        }
        let craft = raw
            .starships
            .iter()
            .map(|url| Craft::Starship(url))
            .chain(raw.vehicles.iter().map(|url| Craft::Vehicle(url)));
        for craft in craft {
            let field = craft.entity_type().resource();
            let target = ids.resolve_craft(&craft, owner, field)?;
            self.push(&node, target.clone(), Relationship::FilmCraft)?;
        }
        for url in &raw.planets {
            let planet = ids.resolve(EntityType::Planet, url, owner, "planets")?;
            self.push(&node, planet.clone(), Relationship::FilmPlanet)?;
        }
        Ok(())
    }

    pub fn finish(self) -> Vec<Edge> {
        self.edges
    }

    fn push(
        &mut self,
        node: &GlobalId,
        related: GlobalId,
        relationship: Relationship,
    ) -> Result<(), EtlError> {
        let (node_field, related_field) = relationship.fields();
        let edge = Edge::canonical(
            self.generator.next_id(EDGE_TYPE_NAME),
            Endpoint {
                id: node.clone(),
                field: node_field,
            },
            Endpoint {
                id: related,
                field: related_field,
            },
        );

        let key = (
            edge.node_id.clone(),
            edge.node_field.clone(),
            edge.related_id.clone(),
            edge.related_field.clone(),
        );
        if !self.seen.insert(key) {
            return Err(EtlError::DuplicateEdge {
                node_id: edge.node_id.to_string(),
                node_field: edge.node_field,
                related_id: edge.related_id.to_string(),
                related_field: edge.related_field,
            });
        }
        self.edges.push(edge);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(id: &str, field: &'static str) -> Endpoint {
        Endpoint {
            id: GlobalId::new(id),
            field,
        }
    }

    #[test]
    fn ordered_endpoints_are_kept() {
        let edge = Edge::canonical(
            GlobalId::new("e1"),
            endpoint("a", "films"),
            endpoint("b", "characters"),
        );
        assert_eq!(edge.node_id.as_str(), "a");
        assert_eq!(edge.node_field, "films");
        assert_eq!(edge.related_id.as_str(), "b");
        assert_eq!(edge.related_field, "characters");
    }

    #[test]
    fn reversed_endpoints_swap_id_and_field_together() {
        let edge = Edge::canonical(
            GlobalId::new("e1"),
            endpoint("b", "homeWorlds"),
            endpoint("a", "residents"),
        );
        assert_eq!(edge.node_id.as_str(), "a");
        assert_eq!(edge.node_field, "residents");
        assert_eq!(edge.related_id.as_str(), "b");
        assert_eq!(edge.related_field, "homeWorlds");
        assert!(edge.is_canonical());
    }

    #[test]
    fn raw_order_does_not_change_the_result() {
        let forward = Edge::canonical(
            GlobalId::new("e1"),
            endpoint("x", "craft"),
            endpoint("y", "pilots"),
        );
        let backward = Edge::canonical(
            GlobalId::new("e1"),
            endpoint("y", "pilots"),
            endpoint("x", "craft"),
        );
        assert_eq!(forward, backward);
    }
}
