//! `fleetboard` - Fleet status dashboard
//!
//! This library holds the aircraft store, its local and remote persistence
//! backends, and the filterable dashboard view built on top of it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod aircraft;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod map;
pub mod render;
pub mod storage;
pub mod store;
pub mod view;

#[cfg(test)]
mod testing;

pub use aircraft::{default_fleet, AircraftId, AircraftRecord, AircraftStatus, Location};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use store::{AircraftStore, UpdateOutcome};
pub use view::{DashboardView, EditState, FleetFilter, Readiness};
