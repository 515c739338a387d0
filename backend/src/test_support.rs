//! Test utilities for the hbnb crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

use crate::domain::ports::{CreateObserver, NoOpCreateObserver};
use crate::domain::{FieldMap, Marketplace};
use crate::outbound::memory::in_memory_stores;

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed instant used as the starting point of test clocks.
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).single() {
        Some(timestamp) => timestamp,
        None => panic!("fixture timestamp is valid"),
    }
}

/// Clock starting at [`fixture_timestamp`].
pub fn fixture_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(fixture_timestamp()))
}

/// Services over fresh in-memory stores.
pub fn memory_marketplace(clock: Arc<MutableClock>) -> Marketplace {
    memory_marketplace_with(clock, Arc::new(NoOpCreateObserver))
}

/// Services over fresh in-memory stores, reporting creates to `observer`.
pub fn memory_marketplace_with(
    clock: Arc<MutableClock>,
    observer: Arc<dyn CreateObserver>,
) -> Marketplace {
    Marketplace::new(in_memory_stores(), clock, observer)
}

/// Convert a JSON object literal into a [`FieldMap`].
///
/// # Examples
/// ```
/// use hbnb::test_support::fields;
/// use serde_json::json;
///
/// let map = fields(json!({ "name": "WiFi" }));
/// assert_eq!(map.len(), 1);
/// ```
pub fn fields(value: Value) -> FieldMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Fresh empty directory for data-file tests, removed on drop.
pub fn temp_data_dir() -> tempfile::TempDir {
    match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(error) => panic!("failed to create temp dir: {error}"),
    }
}

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 file inside `dir`.
    pub fn read_file_to_string(dir: &Path, name: &str) -> io::Result<String> {
        Dir::open_ambient_dir(dir, ambient_authority())?.read_to_string(name)
    }

    /// Write `contents` to a file inside `dir`.
    pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> io::Result<()> {
        Dir::open_ambient_dir(dir, ambient_authority())?.write(name, contents)
    }
}
