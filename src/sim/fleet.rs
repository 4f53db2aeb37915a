//! Background fleet: a handful of buses that drift slowly and move on the map.

use serde::Serialize;

use super::rng::RandomSource;
use super::vehicle::{occupancy_percent, OccupancyStatus};

/// Probability that the fleet counts change on a given telemetry tick.
const DRIFT_PROBABILITY: f64 = 0.2;
/// Largest passenger change per bus when the fleet drifts.
const DRIFT_STEP: i64 = 2;
/// Largest marker movement per animation step, in map percent.
const MARKER_STEP: f64 = 5.0;
/// Markers stay inside this band of the map.
const MAP_MIN: f64 = 10.0;
const MAP_MAX: f64 = 90.0;

/// A bus in the background fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetBus {
    pub id: String,
    pub location: String,
    pub passengers: u32,
    pub capacity: u32,
    pub status: OccupancyStatus,
    /// Marker position as (x, y) percent of the map area.
    pub position: (f64, f64),
}

impl FleetBus {
    pub fn new(id: &str, location: &str, passengers: u32, capacity: u32, position: (f64, f64)) -> Self {
        let passengers = passengers.min(capacity);
        Self {
            id: id.to_string(),
            location: location.to_string(),
            passengers,
            capacity,
            status: OccupancyStatus::from_percent(occupancy_percent(passengers, capacity.max(1))),
            position,
        }
    }

    pub fn occupancy_percent(&self) -> u32 {
        occupancy_percent(self.passengers, self.capacity.max(1))
    }
}

/// The fleet shown in the fleet table and on the map.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    buses: Vec<FleetBus>,
}

impl Fleet {
    pub fn new(buses: Vec<FleetBus>) -> Self {
        Self { buses }
    }

    /// The four buses of the reference route.
    pub fn reference() -> Self {
        Self::new(vec![
            FleetBus::new("BUS-134-CMB", "Borella", 28, 50, (55.0, 40.0)),
            FleetBus::new("BUS-142-CMB", "Maradana", 38, 50, (40.0, 30.0)),
            FleetBus::new("BUS-156-CMB", "Nugegoda", 12, 50, (70.0, 75.0)),
            FleetBus::new("BUS-138-CMB", "Maradana", 50, 50, (35.0, 55.0)),
        ])
    }

    pub fn buses(&self) -> &[FleetBus] {
        &self.buses
    }

    /// Occasionally nudge every bus's passenger count.
    ///
    /// Returns true if the fleet changed.
    pub fn drift<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !rng.chance(DRIFT_PROBABILITY) {
            return false;
        }
        for bus in &mut self.buses {
            let delta = rng.next_below((DRIFT_STEP * 2 + 1) as u32) as i64 - DRIFT_STEP;
            bus.passengers = (bus.passengers as i64 + delta).clamp(0, bus.capacity as i64) as u32;
            bus.status = OccupancyStatus::from_percent(bus.occupancy_percent());
        }
        true
    }

    /// Move every marker a small random distance, keeping it on the map.
    pub fn animate_markers<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for bus in &mut self.buses {
            let (x, y) = bus.position;
            let dy = rng.next_f64() * MARKER_STEP * 2.0 - MARKER_STEP;
            let dx = rng.next_f64() * MARKER_STEP * 2.0 - MARKER_STEP;
            bus.position = ((x + dx).clamp(MAP_MIN, MAP_MAX), (y + dy).clamp(MAP_MIN, MAP_MAX));
        }
    }

    /// Count buses per status band.
    pub fn status_counts(&self) -> (usize, usize, usize) {
        self.buses.iter().fold((0, 0, 0), |(n, w, c), bus| match bus.status {
            OccupancyStatus::Normal => (n + 1, w, c),
            OccupancyStatus::NearlyFull => (n, w + 1, c),
            OccupancyStatus::Overcrowded => (n, w, c + 1),
        })
    }
}
