//! Startup loader seeding stores from data files.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::file_name;
use crate::domain::ports::{Store, StoreError};
use crate::domain::{Entity, EntityId, EntityKind, MarketplaceStores};

/// Failures that abort loading a data directory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed data in {path}: {message}")]
    Malformed { path: PathBuf, message: String },
    #[error("failed to seed {kind} store: {source}")]
    Store {
        kind: EntityKind,
        #[source]
        source: StoreError,
    },
}

/// Outcome of seeding every kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records loaded per kind, in [`EntityKind::ALL`] order.
    pub loaded: Vec<(EntityKind, usize)>,
    /// Rows rejected by validation or a duplicate unique key.
    pub skipped: usize,
}

impl LoadSummary {
    pub fn total(&self) -> usize {
        self.loaded.iter().map(|(_, count)| count).sum()
    }
}

/// Reads `<stem>.json` files from a directory.
#[derive(Clone)]
pub struct JsonFileLoader {
    dir: Arc<Dir>,
    path: PathBuf,
}

impl JsonFileLoader {
    /// Open an existing data directory.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let dir = Dir::open_ambient_dir(&path, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw rows of `kind`: every list in the file, flattened in key order.
    ///
    /// A missing file yields no rows.
    pub async fn read_rows(&self, kind: EntityKind) -> Result<Vec<Value>, LoadError> {
        let dir = Arc::clone(&self.dir);
        let path = self.path.join(file_name(kind));
        tokio::task::spawn_blocking(move || read_rows_blocking(&dir, kind, path))
            .await
            .map_err(|error| LoadError::Io {
                path: PathBuf::from(file_name(kind)),
                source: io::Error::other(error),
            })?
    }

    /// Seed `store` with the valid rows of `E`'s data file.
    ///
    /// Rows that fail validation, or whose unique key is held by a record
    /// with another id, are skipped with a warning. Rows sharing an id
    /// collapse to the last one read and count once.
    pub async fn seed<E: Entity>(&self, store: &dyn Store<E>) -> Result<(usize, usize), LoadError> {
        let store_error = |source| LoadError::Store {
            kind: E::KIND,
            source,
        };
        let mut keys = UniqueKeys::default();
        let mut seen = HashSet::new();
        for existing in store.list().await.map_err(store_error)? {
            keys.claim(&existing);
            seen.insert(*existing.id());
        }

        let mut loaded = 0;
        let mut skipped = 0;
        for row in self.read_rows(E::KIND).await? {
            let id = row.get("id").cloned().unwrap_or(Value::Null);
            let record = match serde_json::from_value::<E>(row) {
                Ok(record) => record,
                Err(error) => {
                    warn!(entity = %E::KIND, %id, %error, "skipping invalid row");
                    skipped += 1;
                    continue;
                }
            };
            if !keys.claim(&record) {
                warn!(entity = %E::KIND, %id, "skipping row with duplicate unique key");
                skipped += 1;
                continue;
            }
            let record_id = *record.id();
            store.put(record_id, record).await.map_err(store_error)?;
            if seen.insert(record_id) {
                loaded += 1;
            }
        }
        Ok((loaded, skipped))
    }

    /// Seed every store, referenced kinds first.
    pub async fn seed_all(&self, stores: &MarketplaceStores) -> Result<LoadSummary, LoadError> {
        let mut summary = LoadSummary::default();
        let results = [
            (EntityKind::Country, self.seed(stores.countries.as_ref()).await?),
            (EntityKind::City, self.seed(stores.cities.as_ref()).await?),
            (EntityKind::User, self.seed(stores.users.as_ref()).await?),
            (EntityKind::Amenity, self.seed(stores.amenities.as_ref()).await?),
            (EntityKind::Place, self.seed(stores.places.as_ref()).await?),
            (EntityKind::Review, self.seed(stores.reviews.as_ref()).await?),
        ];
        for (kind, (loaded, skipped)) in results {
            summary.loaded.push((kind, loaded));
            summary.skipped += skipped;
        }
        info!(
            path = %self.path.display(),
            records = summary.total(),
            skipped = summary.skipped,
            "seeded stores from data files"
        );
        Ok(summary)
    }
}

/// Unique keys held while seeding one kind, and the id holding each.
#[derive(Default)]
struct UniqueKeys {
    owners: HashMap<String, EntityId>,
    by_id: HashMap<EntityId, String>,
}

impl UniqueKeys {
    /// Record `record`'s key for its id, releasing any key the id held.
    ///
    /// Returns `false` when another id already holds the key.
    fn claim<E: Entity>(&mut self, record: &E) -> bool {
        let Some(key) = record.unique_key() else {
            return true;
        };
        let id = *record.id();
        if self.owners.get(&key).is_some_and(|owner| *owner != id) {
            return false;
        }
        if let Some(previous) = self.by_id.insert(id, key.clone()) {
            self.owners.remove(&previous);
        }
        self.owners.insert(key, id);
        true
    }
}

fn read_rows_blocking(
    dir: &Dir,
    kind: EntityKind,
    path: PathBuf,
) -> Result<Vec<Value>, LoadError> {
    let text = match dir.read_to_string(file_name(kind)) {
        Ok(text) => text,
        Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(LoadError::Io { path, source }),
    };
    let malformed = |message: String| LoadError::Malformed {
        path: path.clone(),
        message,
    };
    let document = match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(document)) => document,
        Ok(_) => return Err(malformed("top level is not an object".to_owned())),
        Err(error) => return Err(malformed(error.to_string())),
    };

    let mut rows = Vec::new();
    for (key, value) in document {
        match value {
            Value::Array(items) => rows.extend(items),
            _ => return Err(malformed(format!("{key} is not a list"))),
        }
    }
    Ok(rows)
}
