//! The canonical in-memory fleet.
//!
//! [`AircraftStore`] owns the list of aircraft shown by the dashboard and is
//! the only thing that changes it. All persistence goes through the
//! [`FleetBackend`] it was built with.
//!
//! Status updates are reconciled against the backend: the tail number is
//! resolved to the record's id, the backend is asked to change that id, and
//! only the record the backend echoes back is written into memory. If the
//! backend fails, memory is left exactly as it was.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::aircraft::{duplicate_tail_numbers, AircraftId, AircraftRecord, AircraftStatus};
use crate::backend::FleetBackend;
use crate::error::{Error, Result};

/// What a status update did.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The backend accepted the change; this is the record now in memory.
    Updated(AircraftRecord),
    /// No aircraft has that tail number. Nothing happened.
    NoSuchAircraft,
}

impl UpdateOutcome {
    /// Whether the update took effect.
    #[must_use]
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated(_))
    }
}

/// Authoritative in-memory fleet backed by a persistence backend.
///
/// Methods take `&self`; the collection is guarded by a mutex that is never
/// held across a backend call, so overlapping updates each complete on their
/// own and the one that finishes last wins.
#[derive(Debug)]
pub struct AircraftStore {
    backend: Arc<dyn FleetBackend>,
    fleet: Mutex<Vec<AircraftRecord>>,
}

impl AircraftStore {
    /// Create an empty store over `backend`. Call [`load`](Self::load) to fill it.
    #[must_use]
    pub fn new(backend: Arc<dyn FleetBackend>) -> Self {
        Self {
            backend,
            fleet: Mutex::new(Vec::new()),
        }
    }

    fn fleet(&self) -> MutexGuard<'_, Vec<AircraftRecord>> {
        self.fleet.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the collection with whatever the backend holds.
    ///
    /// A failed load is logged and leaves the current collection in place, so
    /// the dashboard keeps showing stale (or no) data rather than erroring.
    /// Returns the collection after the attempt.
    pub async fn load(&self) -> Vec<AircraftRecord> {
        match self.try_load().await {
            Ok(fleet) => fleet,
            Err(e) => {
                warn!(
                    "Failed to load fleet from {} backend: {e}",
                    self.backend.kind()
                );
                self.list()
            }
        }
    }

    /// Like [`load`](Self::load), but hands the failure to the caller.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the collection is unchanged in that case.
    pub async fn try_load(&self) -> Result<Vec<AircraftRecord>> {
        let loaded = self.backend.load().await?;

        let dupes = duplicate_tail_numbers(&loaded);
        if !dupes.is_empty() {
            warn!(
                "Fleet contains duplicate tail numbers {:?}; lookups use the first match",
                dupes
            );
        }

        info!(
            "Loaded {} aircraft from {} backend",
            loaded.len(),
            self.backend.kind()
        );
        *self.fleet() = loaded.clone();
        Ok(loaded)
    }

    /// Snapshot of the collection in load order.
    #[must_use]
    pub fn list(&self) -> Vec<AircraftRecord> {
        self.fleet().clone()
    }

    /// Number of aircraft in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fleet().len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fleet().is_empty()
    }

    /// Look up an aircraft by tail number.
    #[must_use]
    pub fn find_by_tail(&self, tail_number: &str) -> Option<AircraftRecord> {
        self.fleet()
            .iter()
            .find(|r| r.tail_number == tail_number)
            .cloned()
    }

    /// Set the status of the aircraft with `tail_number`.
    ///
    /// An unknown tail number is a silent no-op. Otherwise the backend is
    /// asked to update the record's id and the echoed record replaces the
    /// in-memory entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UpdateRejected`] if the backend fails. The collection
    /// is untouched in that case.
    pub async fn update_status(
        &self,
        tail_number: &str,
        status: AircraftStatus,
    ) -> Result<UpdateOutcome> {
        let Some(id) = self.resolve_id(tail_number) else {
            debug!("Ignoring status update for unknown tail number {tail_number}");
            return Ok(UpdateOutcome::NoSuchAircraft);
        };

        debug!("Updating {tail_number} (id {id}) to {status}");
        let echoed = self
            .backend
            .update_status(&id, status)
            .await
            .map_err(|e| Error::update_rejected(tail_number, e))?;

        self.replace_by_id(&id, echoed.clone());
        info!("{} is now {}", echoed.tail_number, echoed.status);
        Ok(UpdateOutcome::Updated(echoed))
    }

    fn resolve_id(&self, tail_number: &str) -> Option<AircraftId> {
        self.fleet()
            .iter()
            .find(|r| r.tail_number == tail_number)
            .map(|r| r.id.clone())
    }

    fn replace_by_id(&self, id: &AircraftId, record: AircraftRecord) {
        let mut fleet = self.fleet();
        match fleet.iter_mut().find(|r| &r.id == id) {
            Some(slot) => *slot = record,
            // The fleet was reloaded while the request was in flight.
            None => warn!("Aircraft {id} left the fleet before its update completed"),
        }
    }
}
