//! Synthetic alerts for the demo feed.

use super::record::{AlertAge, AlertRecord, Severity};
use crate::sim::{OccupancyStatus, RandomSource, VehicleReading};

/// (severity, title, description) templates picked at random.
const CATALOG: [(Severity, &str, &str); 5] = [
    (
        Severity::Danger,
        "BUS-145-CMB Overcrowded",
        "48/50 passengers at Maradana",
    ),
    (
        Severity::Warning,
        "BUS-139-CMB Nearly Full",
        "35/50 passengers approaching Borella",
    ),
    (
        Severity::Info,
        "BUS-151-CMB Low Occupancy",
        "8/50 passengers - Available capacity",
    ),
    (
        Severity::Danger,
        "BUS-163-CMB Overcrowded",
        "49/50 passengers at Fort Station",
    ),
    (
        Severity::Warning,
        "BUS-171-CMB Filling Up",
        "32/50 passengers at Narahenpita",
    ),
];

/// Creates alerts from a fixed catalog and from changes in the tracked bus.
#[derive(Debug, Clone)]
pub struct AlertGenerator {
    vehicle_id: String,
}

impl Default for AlertGenerator {
    fn default() -> Self {
        Self::new("BUS-138-CMB")
    }
}

impl AlertGenerator {
    pub fn new(vehicle_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
        }
    }

    /// Pick one catalog alert uniformly at random.
    pub fn random<R: RandomSource + ?Sized>(&self, rng: &mut R, timestamp: u64) -> AlertRecord {
        let (severity, title, description) = CATALOG[rng.next_below(CATALOG.len() as u32) as usize];
        AlertRecord::new(severity, title, description, timestamp)
    }

    /// The alerts shown at start-up, oldest first, with their preset ages.
    pub fn initial(&self) -> Vec<(AlertRecord, AlertAge)> {
        vec![
            (
                AlertRecord::new(
                    Severity::Info,
                    "BUS-156-CMB Low Occupancy",
                    "12/50 passengers - Consider rerouting",
                    0,
                ),
                AlertAge::minutes(8),
            ),
            (
                AlertRecord::new(
                    Severity::Warning,
                    "BUS-142-CMB Nearly Full",
                    "38/50 passengers approaching Maradana",
                    0,
                ),
                AlertAge::minutes(5),
            ),
            (
                AlertRecord::new(
                    Severity::Danger,
                    "BUS-138-CMB Overcrowded",
                    "50/50 passengers at Maradana",
                    0,
                ),
                AlertAge::JUST_NOW,
            ),
        ]
    }

    /// Alert describing a change of occupancy band on the tracked bus.
    pub fn status_change(&self, reading: &VehicleReading, timestamp: u64) -> AlertRecord {
        let status = reading.status();
        let (severity, what) = match status {
            OccupancyStatus::Overcrowded => (Severity::Danger, "Overcrowded"),
            OccupancyStatus::NearlyFull => (Severity::Warning, "Nearly Full"),
            OccupancyStatus::Normal => (Severity::Info, "Back to Normal"),
        };
        AlertRecord::new(
            severity,
            format!("{} {}", self.vehicle_id, what),
            format!(
                "{}/{} passengers near {}",
                reading.passengers, reading.capacity, reading.current_stop
            ),
            timestamp,
        )
    }
}
