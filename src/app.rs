use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use crate::domain::EntityType;
use crate::error::EtlError;
use crate::ids::IdGenerator;
use crate::raw::RawDataset;
use crate::store::{DocumentStore, replace_all};
use crate::swapi::SwapiClient;
use crate::transform::{Transformed, transform};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after the transform stage; the store is left untouched.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub collections: Vec<CollectionSummary>,
    pub loaded: bool,
    pub finished_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionSummary {
    pub name: String,
    pub documents: usize,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

pub struct App<C: SwapiClient, S: DocumentStore, G: IdGenerator> {
    client: C,
    store: S,
    ids: G,
}

impl<C: SwapiClient, S: DocumentStore, G: IdGenerator> App<C, S, G> {
    pub fn new(client: C, store: S, ids: G) -> Self {
        Self { client, store, ids }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn run(&self, options: RunOptions, sink: &dyn ProgressSink) -> Result<RunResult, EtlError> {
        let raw = self.extract(sink)?;

        let start = Instant::now();
        sink.event(ProgressEvent {
            message: "phase=Transform; assigning identifiers and deriving edges".to_string(),
            elapsed: None,
        });
        let transformed = transform(&raw, &self.ids)?;
        sink.event(ProgressEvent {
            message: format!("phase=Transform; {} edges", transformed.edges.len()),
            elapsed: Some(start.elapsed()),
        });

        let loaded = if options.dry_run {
            sink.event(ProgressEvent {
                message: "phase=Load; skipped (dry run)".to_string(),
                elapsed: None,
            });
            false
        } else {
            self.load(&transformed, sink)?;
            true
        };

        Ok(RunResult {
            collections: summarize(&transformed),
            loaded,
            finished_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn extract(&self, sink: &dyn ProgressSink) -> Result<RawDataset, EtlError> {
        let mut raw = RawDataset::default();
        for entity in [
            EntityType::Person,
            EntityType::Film,
            EntityType::Starship,
            EntityType::Vehicle,
            EntityType::Planet,
            EntityType::Species,
        ] {
            sink.event(ProgressEvent {
                message: format!("phase=Extract; fetching {}", entity.resource()),
                elapsed: None,
            });
            let start = Instant::now();
            let values = self.client.fetch_all(entity)?;
            let count = values.len();
            raw.insert_raw(entity, values)?;
            info!(resource = entity.resource(), count, "extracted");
            sink.event(ProgressEvent {
                message: format!("swapi.response resource={} count={count}", entity.resource()),
                elapsed: Some(start.elapsed()),
            });
        }
        Ok(raw)
    }

    pub fn load(&self, transformed: &Transformed, sink: &dyn ProgressSink) -> Result<(), EtlError> {
        sink.event(ProgressEvent {
            message: "phase=Load; replacing store contents".to_string(),
            elapsed: None,
        });
        let start = Instant::now();
        let collections = transformed.collections()?;
        replace_all(&self.store, &collections)?;
        sink.event(ProgressEvent {
            message: format!("phase=Load; {} collections written", collections.len()),
            elapsed: Some(start.elapsed()),
        });
        Ok(())
    }
}

fn summarize(transformed: &Transformed) -> Vec<CollectionSummary> {
    let summary = |name: &str, documents: usize| CollectionSummary {
        name: name.to_string(),
        documents,
    };
    vec![
        summary(crate::domain::EDGE_TYPE_NAME, transformed.edges.len()),
        summary(EntityType::Film.type_name(), transformed.films.len()),
        summary(EntityType::Person.type_name(), transformed.people.len()),
        summary(EntityType::Planet.type_name(), transformed.planets.len()),
        summary(EntityType::Species.type_name(), transformed.species.len()),
        summary(EntityType::Starship.type_name(), transformed.starships.len()),
        summary(EntityType::Vehicle.type_name(), transformed.vehicles.len()),
    ]
}
