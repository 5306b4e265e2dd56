//! Read-only embedding store.
//!
//! Maps ingredient node ids to fixed-dimension vectors. Populated once at
//! startup from a JSON file (`{"<node_id>": [f32, ...], ...}`); the usual
//! entry point is [`EmbeddingStore::find_latest`], which picks the
//! most-recently-modified file matching the embedding naming convention.

use ahash::AHashMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::vector::Vector;

/// Filename convention for embedding exports.
pub const EMBEDDING_PREFIX: &str = "flavorgraph-embedding_";
pub const EMBEDDING_SUFFIX: &str = ".json";

#[derive(Debug, Clone, Default)]
pub struct EmbeddingStore {
    vectors: AHashMap<String, Vector>,
}

impl EmbeddingStore {
    pub fn from_map(map: HashMap<String, Vec<f32>>) -> Self {
        let vectors = map
            .into_iter()
            .map(|(id, data)| (id, Vector::new(data)))
            .collect();
        Self { vectors }
    }

    /// Load a JSON object of id -> float array.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);
        let map: HashMap<String, Vec<f32>> = serde_json::from_reader(reader)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(Self::from_map(map))
    }

    /// Locate the most-recently-modified embedding export in `dir`.
    /// Fails with `InvalidConfig` when no file matches the convention.
    pub fn find_latest<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
        let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
        for entry in std::fs::read_dir(dir.as_ref())? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if !name.starts_with(EMBEDDING_PREFIX) || !name.ends_with(EMBEDDING_SUFFIX) {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            match &newest {
                Some((best, _)) if *best >= modified => {}
                _ => newest = Some((modified, entry.path())),
            }
        }
        newest.map(|(_, path)| path).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "no embedding file matching {}*{} in {}",
                EMBEDDING_PREFIX,
                EMBEDDING_SUFFIX,
                dir.as_ref().display()
            ))
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[inline]
    pub fn contains(&self, node_id: &str) -> bool {
        self.vectors.contains_key(node_id)
    }

    /// Vector for an id. An absent id is a data-integrity fault upstream,
    /// so this propagates rather than recovering.
    pub fn vector_of(&self, node_id: &str) -> Result<&Vector> {
        self.vectors
            .get(node_id)
            .ok_or_else(|| Error::EmbeddingNotFound(node_id.to_string()))
    }

    /// Dimension of the stored vectors, if any are present.
    pub fn dim(&self) -> Option<usize> {
        self.vectors.values().next().map(Vector::dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store() -> EmbeddingStore {
        let mut map = HashMap::new();
        map.insert("1".to_string(), vec![1.0, 0.0]);
        map.insert("2".to_string(), vec![0.0, 1.0]);
        EmbeddingStore::from_map(map)
    }

    #[test]
    fn test_vector_of() {
        let store = store();
        assert_eq!(store.vector_of("1").unwrap().as_slice(), &[1.0, 0.0]);
        assert!(matches!(
            store.vector_of("missing"),
            Err(Error::EmbeddingNotFound(_))
        ));
    }

    #[test]
    fn test_contains_and_dim() {
        let store = store();
        assert!(store.contains("2"));
        assert!(!store.contains("3"));
        assert_eq!(store.dim(), Some(2));
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"7": [0.5, 0.5, 0.0], "8": [1.0, 0.0, 0.0]}}"#).unwrap();
        let store = EmbeddingStore::load_json(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.vector_of("7").unwrap().dim(), 3);
    }

    #[test]
    fn test_find_latest_picks_newest() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("flavorgraph-embedding_20240101.json");
        let new = dir.path().join("flavorgraph-embedding_20250101.json");
        std::fs::write(&old, "{}").unwrap();
        std::fs::write(&new, "{}").unwrap();
        // Push the second file's mtime past the first.
        let later = std::time::SystemTime::now() + std::time::Duration::from_secs(5);
        let file = std::fs::File::options().write(true).open(&new).unwrap();
        file.set_modified(later).unwrap();

        let found = EmbeddingStore::find_latest(dir.path()).unwrap();
        assert_eq!(found, new);
    }

    #[test]
    fn test_find_latest_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        assert!(matches!(
            EmbeddingStore::find_latest(dir.path()),
            Err(Error::InvalidConfig(_))
        ));
    }
}
