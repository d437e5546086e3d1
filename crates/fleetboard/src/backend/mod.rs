//! Persistence backends for the aircraft store.
//!
//! A backend knows how to fetch the whole fleet and how to change one
//! aircraft's status by id. The store never talks to storage or the network
//! directly; it is handed one backend at construction time.

mod local;
mod remote;

use std::fmt;
use std::sync::Arc;

use crate::aircraft::{default_fleet, AircraftId, AircraftRecord, AircraftStatus};
use crate::config::{BackendKind, Config};
use crate::error::Result;
use crate::storage::Storage;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

/// A source of truth for the fleet.
#[async_trait::async_trait]
pub trait FleetBackend: Send + Sync + fmt::Debug {
    /// Which kind of backend this is.
    fn kind(&self) -> BackendKind;

    /// Fetch the full fleet in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error if the fleet cannot be read or decoded.
    async fn load(&self) -> Result<Vec<AircraftRecord>>;

    /// Set the status of the aircraft with the given id.
    ///
    /// Returns the record as it now exists in the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the update did not take effect.
    async fn update_status(&self, id: &AircraftId, status: AircraftStatus)
        -> Result<AircraftRecord>;
}

/// Build the backend selected by `config`.
///
/// # Errors
///
/// Returns an error if the local database cannot be opened, the seed file
/// cannot be read, or the HTTP client cannot be built.
pub fn from_config(config: &Config) -> Result<Arc<dyn FleetBackend>> {
    match config.backend.kind {
        BackendKind::Local => {
            let storage = Storage::open(config.database_path())?;
            let seed = match &config.local.seed_file {
                Some(path) => read_seed_file(path)?,
                None => default_fleet(),
            };
            Ok(Arc::new(LocalBackend::new(
                storage,
                config.local.slot_key.clone(),
                seed,
            )))
        }
        BackendKind::Remote => Ok(Arc::new(RemoteBackend::new(&config.remote.base_url)?)),
    }
}

fn read_seed_file(path: &std::path::Path) -> Result<Vec<AircraftRecord>> {
    let contents = std::fs::read_to_string(path)?;
    let seed = serde_json::from_str(&contents)?;
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_local_uses_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.json");
        let seed = vec![default_fleet().remove(2)];
        std::fs::write(&seed_path, serde_json::to_string(&seed).unwrap()).unwrap();

        let mut config = Config::default();
        config.local.database_path = Some(dir.path().join("fleet.db"));
        config.local.seed_file = Some(seed_path);

        let backend = from_config(&config).unwrap();
        assert_eq!(backend.kind(), BackendKind::Local);
        assert_eq!(backend.load().await.unwrap(), seed);
    }

    #[test]
    fn test_from_config_missing_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.local.database_path = Some(dir.path().join("fleet.db"));
        config.local.seed_file = Some(dir.path().join("absent.json"));

        assert!(from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_remote() {
        let mut config = Config::default();
        config.backend.kind = BackendKind::Remote;

        let backend = from_config(&config).unwrap();
        assert_eq!(backend.kind(), BackendKind::Remote);
    }
}
