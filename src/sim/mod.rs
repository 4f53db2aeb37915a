//! Synthetic telemetry.
//!
//! - [`rng`]: the injectable [`RandomSource`] and the seeded [`SimRng`]
//! - [`vehicle`]: occupancy random walk for the tracked bus ([`TelemetrySimulator`])
//! - [`fleet`]: background fleet drift and map marker animation

pub mod fleet;
pub mod rng;
pub mod vehicle;

pub use fleet::{Fleet, FleetBus};
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use vehicle::{
    Direction, OccupancyStatus, TelemetrySimulator, VehicleReading, VehicleState, DEFAULT_STOPS,
};
