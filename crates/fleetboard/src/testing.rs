//! In-memory backend used by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::aircraft::{AircraftId, AircraftRecord, AircraftStatus};
use crate::backend::FleetBackend;
use crate::config::BackendKind;
use crate::error::{Error, Result};

/// Backend that keeps its "server side" fleet in memory.
#[derive(Debug, Default)]
pub(crate) struct MockBackend {
    fleet: Mutex<Vec<AircraftRecord>>,
    fail_load: AtomicBool,
    fail_updates: AtomicBool,
    delays: Mutex<HashMap<AircraftStatus, Duration>>,
    update_calls: AtomicUsize,
}

impl MockBackend {
    pub(crate) fn new(fleet: Vec<AircraftRecord>) -> Self {
        Self {
            fleet: Mutex::new(fleet),
            ..Self::default()
        }
    }

    pub(crate) fn set_fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Delay updates that set `status` by `delay` before answering.
    pub(crate) fn delay_updates_to(&self, status: AircraftStatus, delay: Duration) {
        self.delays.lock().unwrap().insert(status, delay);
    }

    /// Replace the server-side fleet without touching any store.
    pub(crate) fn replace_fleet(&self, fleet: Vec<AircraftRecord>) {
        *self.fleet.lock().unwrap() = fleet;
    }

    pub(crate) fn server_fleet(&self) -> Vec<AircraftRecord> {
        self.fleet.lock().unwrap().clone()
    }

    pub(crate) fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FleetBackend for MockBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn load(&self) -> Result<Vec<AircraftRecord>> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(Error::RemoteStatus {
                method: "GET",
                url: "mock://aircraft".to_string(),
                status: 503,
            });
        }
        Ok(self.server_fleet())
    }

    async fn update_status(
        &self,
        id: &AircraftId,
        status: AircraftStatus,
    ) -> Result<AircraftRecord> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays.lock().unwrap().get(&status).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(Error::RemoteStatus {
                method: "PATCH",
                url: format!("mock://aircraft/{id}"),
                status: 500,
            });
        }

        let mut fleet = self.fleet.lock().unwrap();
        let record = fleet
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| Error::aircraft_not_found(id))?;
        record.status = status;
        Ok(record.clone())
    }
}
