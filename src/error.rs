//! Error types for constructing simulation components.

use thiserror::Error;

/// Rejected construction input.
///
/// Every core component validates its parameters up front so that the
/// running simulation never has to deal with out-of-range state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Vehicle capacity must be at least one passenger.
    #[error("vehicle capacity must be greater than zero")]
    ZeroCapacity,

    /// Starting passenger count is larger than the vehicle can hold.
    #[error("passenger count {passengers} exceeds capacity {capacity}")]
    PassengersExceedCapacity { passengers: u32, capacity: u32 },

    /// The route needs at least one stop.
    #[error("route has no stops")]
    EmptyRoute,

    /// Starting stop index is outside the route.
    #[error("stop index {index} out of range for a route of {len} stops")]
    StopOutOfRange { index: usize, len: usize },

    /// The alert feed must be able to show at least one alert.
    #[error("alert feed must hold at least one entry")]
    ZeroFeedCapacity,

    /// A scheduler interval of zero would fire on every poll.
    #[error("interval for '{0}' must be greater than zero")]
    ZeroInterval(String),
}
