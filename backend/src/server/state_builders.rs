//! Builders for the HTTP state from server settings.

use std::io;
use std::path::Path;
use std::sync::Arc;

use hbnb::domain::Marketplace;
use hbnb::domain::ports::{CreateObserver, NoOpCreateObserver};
use hbnb::inbound::http::state::HttpState;
use hbnb::outbound::json_file::{JsonFileLoader, JsonFileRecorder};
use hbnb::outbound::memory::in_memory_stores;
use mockable::DefaultClock;
use tracing::info;

use super::ServerSettings;

fn build_observer(
    settings: &ServerSettings,
    data_dir: Option<&Path>,
) -> io::Result<Arc<dyn CreateObserver>> {
    match data_dir {
        Some(dir) if settings.record_creates => {
            let recorder = JsonFileRecorder::open(dir)?;
            info!(path = %recorder.path().display(), "recording created records");
            Ok(Arc::new(recorder))
        }
        _ => Ok(Arc::new(NoOpCreateObserver)),
    }
}

/// Build stores, seed them when configured, and wrap the services.
///
/// # Errors
/// Returns [`io::Error`] for inconsistent settings, an unreadable data
/// directory or a malformed data file.
pub async fn build_http_state(settings: &ServerSettings) -> io::Result<HttpState> {
    let data_dir = settings.required_data_dir()?;
    let stores = in_memory_stores();

    if let Some(dir) = data_dir.filter(|_| settings.seed_on_startup) {
        let loader = JsonFileLoader::open(dir)?;
        loader
            .seed_all(&stores)
            .await
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
    }

    let observer = build_observer(settings, data_dir)?;
    let marketplace = Marketplace::new(stores, Arc::new(DefaultClock), observer);
    Ok(HttpState::from(marketplace))
}
