use std::sync::atomic::{AtomicU64, Ordering};

use assert_matches::assert_matches;
use serde_json::{Value, json};

use swapi_etl::domain::{EntityType, GlobalId};
use swapi_etl::error::EtlError;
use swapi_etl::ids::{IdGenerator, SequentialGenerator, UuidGenerator};
use swapi_etl::raw::RawDataset;
use swapi_etl::transform::transform;

/// Hands out ids that sort in the reverse of minting order.
struct CountdownGenerator {
    next: AtomicU64,
}

impl IdGenerator for CountdownGenerator {
    fn next_id(&self, type_name: &str) -> GlobalId {
        let n = self.next.fetch_sub(1, Ordering::Relaxed);
        GlobalId::new(format!("{n:08}-{type_name}"))
    }
}

fn dataset(people: Vec<Value>, films: Vec<Value>, planets: Vec<Value>) -> RawDataset {
    let mut raw = RawDataset::default();
    raw.insert_raw(EntityType::Person, people).unwrap();
    raw.insert_raw(EntityType::Film, films).unwrap();
    raw.insert_raw(EntityType::Planet, planets).unwrap();
    raw
}

fn luke() -> Value {
    json!({
        "url": "people/1",
        "name": "Luke Skywalker",
        "height": "172",
        "mass": "77",
        "hair_color": "blond",
        "skin_color": "fair",
        "eye_color": "blue",
        "birth_year": "19BBY",
        "gender": "male",
        "homeworld": "planets/1",
        "films": ["films/1"],
        "species": [],
        "vehicles": [],
        "starships": []
    })
}

fn new_hope(planets: &[&str]) -> Value {
    json!({
        "url": "films/1",
        "title": "A New Hope",
        "episode_id": 4,
        "director": "George Lucas",
        "producer": "Gary Kurtz, Rick McCallum",
        "release_date": "1977-05-25",
        "characters": ["people/1"],
        "planets": planets,
        "starships": [],
        "vehicles": [],
        "species": []
    })
}

fn tatooine() -> Value {
    json!({
        "url": "planets/1",
        "name": "Tatooine",
        "population": "200000",
        "climate": "arid",
        "terrain": "desert",
        "residents": ["people/1"]
    })
}

#[test]
fn back_references_do_not_add_edges() {
    let raw = dataset(vec![luke()], vec![new_hope(&[])], vec![tatooine()]);
    let out = transform(&raw, &SequentialGenerator::new()).unwrap();

    assert_eq!(out.edges.len(), 2);
    let home = &out.edges[0];
    assert_eq!(home.node_id.as_str(), "00000001-Person");
    assert_eq!(home.node_field, "homeWorlds");
    assert_eq!(home.related_id.as_str(), "00000003-Planet");
    assert_eq!(home.related_field, "residents");

    let film = &out.edges[1];
    assert_eq!(film.node_field, "films");
    assert_eq!(film.related_field, "characters");
}

#[test]
fn film_planet_appearance_is_its_own_relationship() {
    let raw = dataset(vec![luke()], vec![new_hope(&["planets/1"])], vec![tatooine()]);
    let out = transform(&raw, &SequentialGenerator::new()).unwrap();

    assert_eq!(out.edges.len(), 3);
    let fields = out
        .edges
        .iter()
        .map(|edge| (edge.node_field.as_str(), edge.related_field.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        fields,
        vec![
            ("homeWorlds", "residents"),
            ("films", "characters"),
            ("planets", "films")
        ]
    );
}

#[test]
fn edge_direction_follows_id_order_only() {
    let raw = dataset(vec![luke()], vec![new_hope(&[])], vec![tatooine()]);
    let generator = CountdownGenerator {
        next: AtomicU64::new(99_999_999),
    };
    let out = transform(&raw, &generator).unwrap();

    let home = &out.edges[0];
    assert!(home.node_id.as_str().ends_with("-Planet"));
    assert_eq!(home.node_field, "residents");
    assert!(home.related_id.as_str().ends_with("-Person"));
    assert_eq!(home.related_field, "homeWorlds");
    assert!(out.edges.iter().all(|edge| edge.is_canonical()));
}

#[test]
fn craft_references_resolve_against_their_own_type() {
    let mut person = luke();
    person["starships"] = json!(["starships/12"]);
    person["vehicles"] = json!(["vehicles/14"]);
    let mut raw = dataset(vec![person], vec![new_hope(&[])], vec![tatooine()]);
    raw.insert_raw(
        EntityType::Starship,
        vec![json!({"url": "starships/12", "name": "X-wing", "consumables": "1 week"})],
    )
    .unwrap();
    raw.insert_raw(
        EntityType::Vehicle,
        vec![json!({"url": "vehicles/14", "name": "Snowspeeder", "consumables": "none"})],
    )
    .unwrap();

    let out = transform(&raw, &SequentialGenerator::new()).unwrap();
    let craft = out
        .edges
        .iter()
        .filter(|edge| edge.node_field == "craft" || edge.related_field == "craft")
        .collect::<Vec<_>>();
    assert_eq!(craft.len(), 2);
    assert!(craft.iter().any(|e| e.related_id == out.starships[0].id));
    assert!(craft.iter().any(|e| e.related_id == out.vehicles[0].id));
    assert!(out.vehicles[0].consumables.is_none());
}

#[test]
fn unresolved_reference_aborts_the_run() {
    let mut person = luke();
    person["films"] = json!(["films/1", "films/7"]);
    let raw = dataset(vec![person], vec![new_hope(&[])], vec![tatooine()]);

    let err = transform(&raw, &SequentialGenerator::new()).unwrap_err();
    assert_matches!(
        err,
        EtlError::UnresolvedReference { ref entity, ref url, .. }
            if entity == "Person" && url == "films/7"
    );
}

#[test]
fn duplicate_relationship_is_rejected() {
    let mut person = luke();
    person["films"] = json!(["films/1", "films/1"]);
    let raw = dataset(vec![person], vec![new_hope(&[])], vec![tatooine()]);

    let err = transform(&raw, &SequentialGenerator::new()).unwrap_err();
    assert_matches!(err, EtlError::DuplicateEdge { .. });
}

#[test]
fn documents_preserve_input_order_and_coercions() {
    let mut leia = luke();
    leia["url"] = json!("people/5");
    leia["name"] = json!("Leia Organa");
    leia["mass"] = json!("unknown");
    leia["hair_color"] = json!("none");
    leia["films"] = json!([]);
    let raw = dataset(vec![luke(), leia], vec![new_hope(&[])], vec![tatooine()]);

    let out = transform(&raw, &UuidGenerator).unwrap();
    assert_eq!(out.people[0].name, "Luke Skywalker");
    assert_eq!(out.people[0].mass, Some(77.0));
    assert_eq!(out.people[1].mass, None);
    assert_eq!(out.people[1].hair_color, None);
    assert_eq!(
        out.films[0].producers,
        Some(vec!["Gary Kurtz".to_string(), "Rick McCallum".to_string()])
    );
    assert!(out.edges.iter().all(|edge| edge.is_canonical()));
}

#[test]
fn collections_are_emitted_in_load_order() {
    let raw = dataset(vec![luke()], vec![new_hope(&[])], vec![tatooine()]);
    let out = transform(&raw, &SequentialGenerator::new()).unwrap();
    let names = out
        .collections()
        .unwrap()
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["_Edge", "Film", "Person", "Planet", "Species", "Starship", "Vehicle"]
    );
}
