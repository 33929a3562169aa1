use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde_json::Value;
use tempfile::Builder;
use tracing::info;

use crate::domain::COLLECTION_NAMES;
use crate::error::EtlError;
use crate::transform::Collection;

/// Bulk-insert document storage.
pub trait DocumentStore {
    /// Removes every collection.
    fn drop_database(&self) -> Result<(), EtlError>;

    /// Appends `documents` to `collection`, returning how many were persisted.
    fn insert_many(&self, collection: &str, documents: &[Value]) -> Result<usize, EtlError>;
}

/// Directory-backed store: one JSON array file per collection.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: Utf8PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    /// Default database location under the platform data directory.
    pub fn default_root() -> Result<Utf8PathBuf, EtlError> {
        ProjectDirs::from("", "", "swapi-etl")
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.data_dir().join("db")).ok())
            .ok_or_else(|| EtlError::Filesystem("unable to resolve data directory".to_string()))
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn collection_path(&self, collection: &str) -> Utf8PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    pub fn read_collection(&self, collection: &str) -> Result<Vec<Value>, EtlError> {
        let path = self.owned_path(collection)?;
        if !path.as_std_path().exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path.as_std_path())
            .map_err(|err| EtlError::Filesystem(err.to_string()))?;
        serde_json::from_str(&content).map_err(|err| EtlError::Filesystem(err.to_string()))
    }

    pub fn count(&self, collection: &str) -> Result<usize, EtlError> {
        Ok(self.read_collection(collection)?.len())
    }

    /// Collections present on disk, in load order. Other files in the root are ignored.
    pub fn collections(&self) -> Result<Vec<String>, EtlError> {
        Ok(COLLECTION_NAMES
            .into_iter()
            .filter(|name| self.collection_path(name).as_std_path().exists())
            .map(str::to_string)
            .collect())
    }

    fn owned_path(&self, collection: &str) -> Result<Utf8PathBuf, EtlError> {
        if !COLLECTION_NAMES.contains(&collection) {
            return Err(EtlError::UnknownCollection(collection.to_string()));
        }
        Ok(self.collection_path(collection))
    }

    fn write_atomic(&self, path: &Utf8Path, documents: &[Value]) -> Result<(), EtlError> {
        fs::create_dir_all(self.root.as_std_path())
            .map_err(|err| EtlError::Filesystem(err.to_string()))?;
        let content = serde_json::to_vec_pretty(documents)
            .map_err(|err| EtlError::Filesystem(err.to_string()))?;
        let temp = Builder::new()
            .prefix("swapi-etl-collection")
            .tempfile_in(self.root.as_std_path())
            .map_err(|err| EtlError::Filesystem(err.to_string()))?;
        fs::write(temp.path(), &content).map_err(|err| EtlError::Filesystem(err.to_string()))?;
        temp.persist(path.as_std_path())
            .map_err(|err| EtlError::Filesystem(err.to_string()))?;
        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    /// Removes this store's collection files only; the root directory and anything
    /// else in it stay.
    fn drop_database(&self) -> Result<(), EtlError> {
        for name in COLLECTION_NAMES {
            let path = self.collection_path(name);
            if path.as_std_path().exists() {
                fs::remove_file(path.as_std_path())
                    .map_err(|err| EtlError::Filesystem(err.to_string()))?;
            }
        }
        Ok(())
    }

    fn insert_many(&self, collection: &str, documents: &[Value]) -> Result<usize, EtlError> {
        let path = self.owned_path(collection)?;
        let mut existing = self.read_collection(collection)?;
        let before = existing.len();
        existing.extend_from_slice(documents);
        self.write_atomic(&path, &existing)?;
        Ok(self.count(collection)? - before)
    }
}

/// Replaces the whole store with `collections`. Not transactional: a failure part-way
/// leaves the collections inserted so far in place.
pub fn replace_all(
    store: &dyn DocumentStore,
    collections: &[Collection],
) -> Result<(), EtlError> {
    store.drop_database()?;
    for collection in collections {
        let inserted = store.insert_many(collection.name, &collection.documents)?;
        if inserted != collection.documents.len() {
            return Err(EtlError::PartialInsert {
                collection: collection.name.to_string(),
                inserted,
                expected: collection.documents.len(),
            });
        }
        info!(collection = collection.name, inserted, "loaded collection");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn insert_appends_and_drop_clears() {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().join("db")).unwrap();
        let store = FsDocumentStore::new(root);

        assert_eq!(store.insert_many("Film", &[json!({"_id": "a"})]).unwrap(), 1);
        assert_eq!(
            store
                .insert_many("Film", &[json!({"_id": "b"}), json!({"_id": "c"})])
                .unwrap(),
            2
        );
        assert_eq!(store.count("Film").unwrap(), 3);
        assert_eq!(store.collections().unwrap(), vec!["Film".to_string()]);
        assert_matches!(
            store.insert_many("package", &[json!({})]),
            Err(EtlError::UnknownCollection(_))
        );

        store.drop_database().unwrap();
        assert_eq!(store.count("Film").unwrap(), 0);
        assert!(store.collections().unwrap().is_empty());
    }

    #[test]
    fn foreign_files_are_neither_listed_nor_removed() {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        std::fs::write(root.join("notes.txt").as_std_path(), b"keep me").unwrap();
        std::fs::write(root.join("package.json").as_std_path(), br#"{"a":1}"#).unwrap();
        std::fs::create_dir_all(root.join("src").as_std_path()).unwrap();
        std::fs::write(root.join("src/main.rs").as_std_path(), b"fn main() {}").unwrap();
        let store = FsDocumentStore::new(root.clone());

        assert!(store.collections().unwrap().is_empty());

        let films = Collection {
            name: "Film",
            documents: vec![json!({"_id": "a"})],
        };
        replace_all(&store, &[films]).unwrap();
        assert_eq!(store.collections().unwrap(), vec!["Film".to_string()]);
        assert_eq!(store.count("Film").unwrap(), 1);

        store.drop_database().unwrap();
        assert!(store.collections().unwrap().is_empty());
        assert!(root.join("notes.txt").as_std_path().exists());
        assert!(root.join("package.json").as_std_path().exists());
        assert!(root.join("src/main.rs").as_std_path().exists());
    }

    #[test]
    fn collection_path_layout() {
        let store = FsDocumentStore::new(Utf8PathBuf::from("/tmp/swapi"));
        assert!(store.collection_path("_Edge").ends_with("_Edge.json"));
    }
}
