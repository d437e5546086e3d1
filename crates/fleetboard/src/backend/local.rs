//! Local slot backend.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::aircraft::{AircraftId, AircraftRecord, AircraftStatus};
use crate::config::BackendKind;
use crate::error::{Error, Result};
use crate::storage::Storage;

use super::FleetBackend;

/// Keeps the fleet as one JSON array in a storage slot.
///
/// An empty slot is filled with the seed fleet on first load. Every status
/// change rewrites the whole array. Database work from the async trait
/// methods runs on tokio's blocking pool.
#[derive(Debug)]
pub struct LocalBackend {
    storage: Arc<Mutex<Storage>>,
    slot_key: String,
    seed: Vec<AircraftRecord>,
}

impl LocalBackend {
    /// Create a backend over `storage` using `slot_key`, seeding with `seed`.
    #[must_use]
    pub fn new(storage: Storage, slot_key: impl Into<String>, seed: Vec<AircraftRecord>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            slot_key: slot_key.into(),
            seed,
        }
    }

    /// The slot this backend reads and writes.
    #[must_use]
    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Delete the persisted fleet so the next load reseeds.
    ///
    /// Returns `true` if there was anything to delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear(&self) -> Result<bool> {
        self.with_storage(|storage| storage.remove(&self.slot_key))
    }

    fn with_storage<T>(&self, f: impl FnOnce(&Storage) -> Result<T>) -> Result<T> {
        let storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        f(&storage)
    }

    /// Run `f` against the storage on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Storage) -> Result<T> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || {
            let storage = storage.lock().unwrap_or_else(PoisonError::into_inner);
            f(&storage)
        })
        .await
        .map_err(|e| Error::internal(format!("storage task failed: {e}")))?
    }

    fn write_fleet(storage: &Storage, key: &str, fleet: &[AircraftRecord]) -> Result<()> {
        let json = serde_json::to_string(fleet)?;
        storage.put(key, &json)
    }
}

#[async_trait::async_trait]
impl FleetBackend for LocalBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    async fn load(&self) -> Result<Vec<AircraftRecord>> {
        let key = self.slot_key.clone();
        let seed = self.seed.clone();
        self.blocking(move |storage| match storage.get(&key)? {
            Some(json) => {
                let fleet: Vec<AircraftRecord> = serde_json::from_str(&json)?;
                debug!("Loaded {} aircraft from slot {}", fleet.len(), key);
                Ok(fleet)
            }
            None => {
                Self::write_fleet(storage, &key, &seed)?;
                info!("Seeded slot {} with {} aircraft", key, seed.len());
                Ok(seed)
            }
        })
        .await
    }

    async fn update_status(
        &self,
        id: &AircraftId,
        status: AircraftStatus,
    ) -> Result<AircraftRecord> {
        let key = self.slot_key.clone();
        let id = id.clone();
        self.blocking(move |storage| {
            let json = storage
                .get(&key)?
                .ok_or_else(|| Error::aircraft_not_found(&id))?;
            let mut fleet: Vec<AircraftRecord> = serde_json::from_str(&json)?;

            let record = fleet
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| Error::aircraft_not_found(&id))?;
            record.status = status;
            let updated = record.clone();

            Self::write_fleet(storage, &key, &fleet)?;
            debug!("Set {} to {} in slot {}", updated.tail_number, status, key);
            Ok(updated)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::aircraft::default_fleet;

    fn create_test_backend() -> LocalBackend {
        let storage = Storage::open_in_memory().expect("failed to create test storage");
        LocalBackend::new(storage, "aircraftData", default_fleet())
    }

    fn stored_fleet(backend: &LocalBackend) -> Option<Vec<AircraftRecord>> {
        backend
            .with_storage(|s| s.get("aircraftData"))
            .unwrap()
            .map(|json| serde_json::from_str(&json).unwrap())
    }

    #[tokio::test]
    async fn test_load_seeds_empty_slot() {
        let backend = create_test_backend();
        assert!(stored_fleet(&backend).is_none());

        let fleet = backend.load().await.unwrap();

        assert_eq!(fleet, default_fleet());
        assert_eq!(stored_fleet(&backend), Some(default_fleet()));
    }

    #[tokio::test]
    async fn test_load_prefers_saved_fleet() {
        let backend = create_test_backend();
        let saved = vec![default_fleet().remove(4)];
        backend
            .with_storage(|s| LocalBackend::write_fleet(s, "aircraftData", &saved))
            .unwrap();

        assert_eq!(backend.load().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_slot() {
        let backend = create_test_backend();
        backend
            .with_storage(|s| s.put("aircraftData", "{not json"))
            .unwrap();

        let err = backend.load().await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_update_status_rewrites_slot() {
        let backend = create_test_backend();
        backend.load().await.unwrap();

        let updated = backend
            .update_status(&AircraftId::Numeric(3), AircraftStatus::Available)
            .await
            .unwrap();

        assert_eq!(updated.tail_number, "TN3");
        assert_eq!(updated.status, AircraftStatus::Available);

        let mut expected = default_fleet();
        expected[2].status = AircraftStatus::Available;
        assert_eq!(stored_fleet(&backend), Some(expected));
    }

    #[tokio::test]
    async fn test_update_status_unknown_id() {
        let backend = create_test_backend();
        backend.load().await.unwrap();

        let err = backend
            .update_status(&AircraftId::Numeric(99), AircraftStatus::Aog)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::AircraftNotFound { .. }));
        assert_eq!(stored_fleet(&backend), Some(default_fleet()));
    }

    #[tokio::test]
    async fn test_clear_forces_reseed() {
        let backend = create_test_backend();
        backend.load().await.unwrap();
        backend
            .update_status(&AircraftId::Numeric(1), AircraftStatus::Aog)
            .await
            .unwrap();

        assert!(backend.clear().unwrap());
        assert!(!backend.clear().unwrap());
        assert_eq!(backend.load().await.unwrap(), default_fleet());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_storage_work_leaves_runtime_free() {
        let backend = Arc::new(create_test_backend());

        // Hold the storage lock from another thread so the load has to wait.
        let storage = Arc::clone(&backend.storage);
        let (locked_tx, locked_rx) = std::sync::mpsc::channel();
        let holder = std::thread::spawn(move || {
            let _guard = storage.lock().unwrap();
            locked_tx.send(()).unwrap();
            std::thread::sleep(Duration::from_millis(300));
        });
        locked_rx.recv().unwrap();

        let load = tokio::spawn({
            let backend = Arc::clone(&backend);
            async move { backend.load().await }
        });

        let start = Instant::now();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(start.elapsed() < Duration::from_millis(200));
        assert!(!load.is_finished());

        assert_eq!(load.await.unwrap().unwrap(), default_fleet());
        holder.join().unwrap();
    }
}
