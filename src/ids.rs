use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::{Craft, EntityType, GlobalId};
use crate::error::EtlError;
use crate::raw::RawDataset;

/// Source of fresh global identifiers, tagged with the owning type name.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, type_name: &str) -> GlobalId;
}

/// Time-ordered UUIDv7 ids suffixed with the type name.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self, type_name: &str) -> GlobalId {
        GlobalId::new(format!("{}-{type_name}", Uuid::now_v7().simple()))
    }
}

/// Deterministic ids (`00000001-Person`, `00000002-Film`, ...) that sort in the order
/// they were handed out.
#[derive(Debug, Default)]
pub struct SequentialGenerator {
    next: AtomicU64,
}

impl SequentialGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&self, type_name: &str) -> GlobalId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        GlobalId::new(format!("{n:08}-{type_name}"))
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    maps: HashMap<EntityType, HashMap<String, GlobalId>>,
}

impl IdentifierMap {
    /// Mints an id for every raw record of every type. Completes before any document or
    /// edge is produced, so cross-type references always find their target.
    pub fn build(raw: &RawDataset, ids: &dyn IdGenerator) -> Self {
        let maps = EntityType::ALL
            .into_iter()
            .map(|entity| {
                let sub_map = raw
                    .urls(entity)
                    .into_iter()
                    .map(|url| (url.to_string(), ids.next_id(entity.type_name())))
                    .collect::<HashMap<_, _>>();
                (entity, sub_map)
            })
            .collect();
        Self { maps }
    }

    pub fn get(&self, entity: EntityType, url: &str) -> Option<&GlobalId> {
        self.maps.get(&entity).and_then(|map| map.get(url))
    }

    /// Looks up `url` in `entity`'s sub-map; `owner`/`field` only label the error.
    pub fn resolve(
        &self,
        entity: EntityType,
        url: &str,
        owner: EntityType,
        field: &str,
    ) -> Result<&GlobalId, EtlError> {
        self.get(entity, url)
            .ok_or_else(|| EtlError::UnresolvedReference {
                entity: owner.to_string(),
                field: field.to_string(),
                url: url.to_string(),
            })
    }

    pub fn resolve_craft(
        &self,
        craft: &Craft<'_>,
        owner: EntityType,
        field: &str,
    ) -> Result<&GlobalId, EtlError> {
        self.resolve(craft.entity_type(), craft.url(), owner, field)
    }

    pub fn len(&self, entity: EntityType) -> usize {
        self.maps.get(&entity).map(HashMap::len).unwrap_or(0)
    }

    pub fn ids(&self, entity: EntityType) -> impl Iterator<Item = &GlobalId> {
        self.maps.get(&entity).into_iter().flat_map(HashMap::values)
    }
}
