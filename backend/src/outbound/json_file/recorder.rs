//! Create observer appending new records to their data file.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::file_name;
use crate::domain::EntityKind;
use crate::domain::ports::{CreateObserver, CreateObserverError};

/// Appends each created record under `<TypeName>` in `<dir>/<stem>.json`.
///
/// Appends are serialised; each rewrites the whole file through a staging
/// file and a rename.
pub struct JsonFileRecorder {
    dir: Arc<Dir>,
    path: PathBuf,
    writes: Mutex<()>,
}

impl JsonFileRecorder {
    /// Open `path`, creating the directory if needed.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        Dir::create_ambient_dir_all(&path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&path, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            path,
            writes: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CreateObserver for JsonFileRecorder {
    async fn record_created(
        &self,
        kind: EntityKind,
        record: &Value,
    ) -> Result<(), CreateObserverError> {
        let _write = self.writes.lock().await;
        let dir = Arc::clone(&self.dir);
        let record = record.clone();
        tokio::task::spawn_blocking(move || append_record(&dir, kind, record))
            .await
            .map_err(|error| CreateObserverError::io(format!("append task failed: {error}")))?
    }
}

fn io_error(file: &str, error: &io::Error) -> CreateObserverError {
    CreateObserverError::io(format!("{file}: {error}"))
}

fn read_document(dir: &Dir, file: &str) -> Result<Map<String, Value>, CreateObserverError> {
    let text = match dir.read_to_string(file) {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(error) => return Err(io_error(file, &error)),
    };
    if text.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(&text) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(CreateObserverError::format(format!(
            "{file}: top level is not an object"
        ))),
        Err(error) => Err(CreateObserverError::format(format!("{file}: {error}"))),
    }
}

fn render(document: &Map<String, Value>) -> Result<Vec<u8>, CreateObserverError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    document
        .serialize(&mut serializer)
        .map_err(|error| CreateObserverError::format(error.to_string()))?;
    Ok(buffer)
}

fn append_record(dir: &Dir, kind: EntityKind, record: Value) -> Result<(), CreateObserverError> {
    let file = file_name(kind);
    let mut document = read_document(dir, &file)?;
    let rows = document
        .entry(kind.type_name())
        .or_insert_with(|| Value::Array(Vec::new()));
    let Value::Array(rows) = rows else {
        return Err(CreateObserverError::format(format!(
            "{file}: {} is not a list",
            kind.type_name()
        )));
    };
    rows.push(record);

    let staging = format!(".{file}.{}.tmp", Uuid::new_v4().simple());
    dir.write(&staging, render(&document)?)
        .map_err(|error| io_error(&staging, &error))?;
    dir.rename(&staging, dir, &file).map_err(|error| {
        let _cleanup = dir.remove_file(&staging);
        io_error(&file, &error)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    fn recorder() -> (TempDir, JsonFileRecorder) {
        let temp = TempDir::new().expect("temp dir");
        let recorder = JsonFileRecorder::open(temp.path()).expect("open recorder");
        (temp, recorder)
    }

    fn read(temp: &TempDir, file: &str) -> String {
        std::fs::read_to_string(temp.path().join(file)).expect("file written")
    }

    #[rstest]
    #[tokio::test]
    async fn creates_missing_file_under_type_name() {
        let (temp, recorder) = recorder();

        recorder
            .record_created(EntityKind::Country, &json!({ "id": "1", "code": "AU" }))
            .await
            .expect("append succeeds");

        let document: Value = serde_json::from_str(&read(&temp, "country.json")).expect("json");
        assert_eq!(document, json!({ "Country": [{ "id": "1", "code": "AU" }] }));
    }

    #[rstest]
    #[tokio::test]
    async fn appends_to_existing_rows_with_four_space_indent() {
        let (temp, recorder) = recorder();
        std::fs::write(
            temp.path().join("amenity.json"),
            r#"{ "Amenity": [ { "id": "a" } ], "Other": 1 }"#,
        )
        .expect("seed file");

        recorder
            .record_created(EntityKind::Amenity, &json!({ "id": "b" }))
            .await
            .expect("append succeeds");

        let text = read(&temp, "amenity.json");
        assert!(text.contains("\n    \"Amenity\": ["));
        let document: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(document["Amenity"], json!([{ "id": "a" }, { "id": "b" }]));
        assert_eq!(document["Other"], json!(1));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_files_are_reported_and_left_alone() {
        let (temp, recorder) = recorder();
        std::fs::write(temp.path().join("user.json"), "{ not json").expect("seed file");

        let err = recorder
            .record_created(EntityKind::User, &json!({ "id": "u" }))
            .await
            .expect_err("malformed file");

        assert!(matches!(err, CreateObserverError::Format { .. }));
        assert_eq!(read(&temp, "user.json"), "{ not json");
    }

    #[rstest]
    #[tokio::test]
    async fn non_list_entries_are_rejected() {
        let (temp, recorder) = recorder();
        std::fs::write(temp.path().join("city.json"), r#"{ "City": {} }"#).expect("seed file");

        let err = recorder
            .record_created(EntityKind::City, &json!({ "id": "c" }))
            .await
            .expect_err("city entry is not a list");
        assert!(err.to_string().contains("City is not a list"));
    }
}
