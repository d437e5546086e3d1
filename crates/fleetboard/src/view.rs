//! Dashboard view over the aircraft store.
//!
//! [`DashboardView`] holds the operator's filter criteria and the "which card
//! is being edited" pointer, derives the visible subset of the fleet on
//! demand, and routes status edits to the [`AircraftStore`].

use tracing::{debug, error};

use crate::aircraft::{AircraftRecord, AircraftStatus};
use crate::error::Result;
use crate::map::{self, MapMarker};
use crate::store::{AircraftStore, UpdateOutcome};

/// Filter criteria entered by the operator.
///
/// Empty text filters match everything; `status: None` is "all statuses".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetFilter {
    /// Substring of the tail number, case-insensitive.
    pub tail: String,
    /// Substring of the model, case-insensitive.
    pub model: String,
    /// Exact status, or `None` for any.
    pub status: Option<AircraftStatus>,
    /// Restrict to aircraft that are available.
    pub ready_only: bool,
}

impl FleetFilter {
    /// Whether `record` passes every criterion.
    #[must_use]
    pub fn matches(&self, record: &AircraftRecord) -> bool {
        let matches_filters = contains_ignore_case(&record.tail_number, &self.tail)
            && contains_ignore_case(&record.model, &self.model)
            && self.status.map_or(true, |s| record.status == s);

        matches_filters && (!self.ready_only || record.is_ready())
    }

    /// The records passing the filter, in fleet order.
    #[must_use]
    pub fn apply<'a>(&self, fleet: &'a [AircraftRecord]) -> Vec<&'a AircraftRecord> {
        fleet.iter().filter(|r| self.matches(r)).collect()
    }

    /// Whether any criterion is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.tail.is_empty() || !self.model.is_empty() || self.status.is_some() || self.ready_only
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Ready and total counts over the whole, unfiltered fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Readiness {
    /// Aircraft with status `available`.
    pub ready: usize,
    /// All aircraft.
    pub total: usize,
}

impl Readiness {
    /// Count readiness over `fleet`.
    #[must_use]
    pub fn of(fleet: &[AircraftRecord]) -> Self {
        Self {
            ready: fleet.iter().filter(|r| r.is_ready()).count(),
            total: fleet.len(),
        }
    }
}

/// Which card, if any, has its status editor open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    /// No editor open.
    #[default]
    Idle,
    /// The editor for this tail number is open.
    Editing(String),
}

impl EditState {
    /// Tail number being edited, if any.
    #[must_use]
    pub fn tail_number(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Editing(tail) => Some(tail),
        }
    }
}

/// Filterable, editable view of a fleet.
#[derive(Debug)]
pub struct DashboardView {
    store: AircraftStore,
    filter: FleetFilter,
    editing: EditState,
}

impl DashboardView {
    /// Create a view over `store` with no filters and no editor open.
    #[must_use]
    pub fn new(store: AircraftStore) -> Self {
        Self {
            store,
            filter: FleetFilter::default(),
            editing: EditState::Idle,
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &AircraftStore {
        &self.store
    }

    /// Load the fleet. Failures are logged by the store and never surface here.
    ///
    /// An open editor is closed if its aircraft is not in the loaded fleet.
    pub async fn mount(&mut self) {
        self.store.load().await;
        if let Some(tail) = self.editing.tail_number() {
            if self.store.find_by_tail(tail).is_none() {
                debug!("Closing editor for {tail}, no longer in the fleet");
                self.editing = EditState::Idle;
            }
        }
    }

    /// Current filter criteria.
    #[must_use]
    pub fn filter(&self) -> &FleetFilter {
        &self.filter
    }

    /// Replace all filter criteria at once.
    pub fn set_filter(&mut self, filter: FleetFilter) {
        self.filter = filter;
    }

    /// Set the tail-number substring filter.
    pub fn set_tail_filter(&mut self, tail: impl Into<String>) {
        self.filter.tail = tail.into();
    }

    /// Set the model substring filter.
    pub fn set_model_filter(&mut self, model: impl Into<String>) {
        self.filter.model = model.into();
    }

    /// Set the status filter; `None` shows all statuses.
    pub fn set_status_filter(&mut self, status: Option<AircraftStatus>) {
        self.filter.status = status;
    }

    /// Flip the ready-only toggle and return its new value.
    pub fn toggle_ready_only(&mut self) -> bool {
        self.filter.ready_only = !self.filter.ready_only;
        self.filter.ready_only
    }

    /// Records passing the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<AircraftRecord> {
        let fleet = self.store.list();
        self.filter.apply(&fleet).into_iter().cloned().collect()
    }

    /// Ready/total counts over the full fleet, ignoring filters.
    #[must_use]
    pub fn readiness(&self) -> Readiness {
        Readiness::of(&self.store.list())
    }

    /// Map markers for the full fleet, ignoring filters.
    #[must_use]
    pub fn markers(&self) -> Vec<MapMarker> {
        map::markers(&self.store.list())
    }

    /// Current editing pointer.
    #[must_use]
    pub fn editing(&self) -> &EditState {
        &self.editing
    }

    /// Open the status editor on the card for `tail_number`.
    ///
    /// Selecting another card moves the editor there without committing
    /// anything. Returns `false` and changes nothing if no aircraft has that
    /// tail number.
    pub fn select(&mut self, tail_number: &str) -> bool {
        if self.store.find_by_tail(tail_number).is_none() {
            return false;
        }
        self.editing = EditState::Editing(tail_number.to_string());
        true
    }

    /// Close the editor without changing anything.
    pub fn cancel_edit(&mut self) {
        self.editing = EditState::Idle;
    }

    /// Change the status of `tail_number` through the store.
    ///
    /// A successful update closes the editor. A failed one leaves it open so
    /// the operator can retry.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the backend rejected the update.
    pub async fn update_status(
        &mut self,
        tail_number: &str,
        status: AircraftStatus,
    ) -> Result<UpdateOutcome> {
        match self.store.update_status(tail_number, status).await {
            Ok(outcome) => {
                if outcome.is_updated() {
                    self.editing = EditState::Idle;
                }
                Ok(outcome)
            }
            Err(e) => {
                error!("{e}");
                Err(e)
            }
        }
    }

    /// Commit `status` for the card whose editor is open.
    ///
    /// Returns `Ok(None)` when no editor is open.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the backend rejected the update.
    pub async fn commit_edit(&mut self, status: AircraftStatus) -> Result<Option<UpdateOutcome>> {
        let Some(tail) = self.editing.tail_number().map(str::to_string) else {
            return Ok(None);
        };
        self.update_status(&tail, status).await.map(Some)
    }
}
