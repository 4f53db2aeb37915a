//! Derived and static dashboard data.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of interval strings (e.g., "3s", "1m")
//! - [`history`]: Recent occupancy readings for sparklines and trends
//! - [`profile`]: Per-stop load and the daily occupancy curve
//! - [`stats`]: Header figures ([`DashboardStats`])

pub mod duration;
pub mod history;
pub mod profile;
pub mod stats;

pub use history::History;
pub use profile::{hourly_occupancy, stop_loads, StopLoad};
pub use stats::DashboardStats;
