//! Occupancy random walk for the tracked bus.

use serde::Serialize;

use super::rng::RandomSource;
use crate::error::ValidationError;

/// Within this many passengers of capacity the bus tends to unload.
const CROWDED_MARGIN: u32 = 2;
/// At or below this count the bus tends to fill up.
const SPARSE_THRESHOLD: u32 = 10;
/// Probability of following the bias when crowded or sparse.
const BIAS_PROBABILITY: f64 = 0.8;
/// Probability of reversing direction in the middle band.
const FLIP_PROBABILITY: f64 = 0.1;
/// Probability of reaching the next stop on any tick.
const ARRIVAL_PROBABILITY: f64 = 0.05;
/// Largest passenger change per tick.
const MAX_STEP: u32 = 2;

/// Default route, in travel order.
pub const DEFAULT_STOPS: [&str; 6] = [
    "Fort",
    "Pettah",
    "Maradana",
    "Borella",
    "Narahenpita",
    "Nugegoda",
];

/// Which way the passenger count is currently drifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    fn sign(self) -> i64 {
        match self {
            Direction::Increasing => 1,
            Direction::Decreasing => -1,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }
}

/// Occupancy band used for badges, colors and status-change alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum OccupancyStatus {
    Normal,
    NearlyFull,
    Overcrowded,
}

impl OccupancyStatus {
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 80 {
            OccupancyStatus::Overcrowded
        } else if percent >= 60 {
            OccupancyStatus::NearlyFull
        } else {
            OccupancyStatus::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OccupancyStatus::Normal => "NORMAL",
            OccupancyStatus::NearlyFull => "NEARLY FULL",
            OccupancyStatus::Overcrowded => "OVERCROWDED",
        }
    }
}

/// Round `passengers / capacity * 100` to the nearest whole percent.
pub fn occupancy_percent(passengers: u32, capacity: u32) -> u32 {
    (passengers as f64 / capacity as f64 * 100.0).round() as u32
}

/// Mutable state of the tracked vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleState {
    pub passengers: u32,
    pub capacity: u32,
    pub direction: Direction,
    pub current_stop: usize,
}

/// One sample produced by [`TelemetrySimulator::tick`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleReading {
    pub passengers: u32,
    pub capacity: u32,
    pub occupancy_percent: u32,
    pub current_stop: String,
    pub next_stop: String,
}

impl VehicleReading {
    pub fn status(&self) -> OccupancyStatus {
        OccupancyStatus::from_percent(self.occupancy_percent)
    }
}

/// Produces a new occupancy reading for one bus on every tick.
///
/// The passenger count follows a bounded random walk: a direction is chosen
/// with a bias toward unloading when the bus is nearly full and toward
/// loading when it is nearly empty, then the count moves by 0–2 passengers
/// in that direction. Occasionally the bus reaches its next stop.
#[derive(Debug, Clone)]
pub struct TelemetrySimulator {
    state: VehicleState,
    stops: Vec<String>,
}

impl TelemetrySimulator {
    /// Create a simulator, validating the starting state against the route.
    pub fn new(state: VehicleState, stops: Vec<String>) -> Result<Self, ValidationError> {
        if state.capacity == 0 {
            return Err(ValidationError::ZeroCapacity);
        }
        if state.passengers > state.capacity {
            return Err(ValidationError::PassengersExceedCapacity {
                passengers: state.passengers,
                capacity: state.capacity,
            });
        }
        if stops.is_empty() {
            return Err(ValidationError::EmptyRoute);
        }
        if state.current_stop >= stops.len() {
            return Err(ValidationError::StopOutOfRange {
                index: state.current_stop,
                len: stops.len(),
            });
        }
        Ok(Self { state, stops })
    }

    /// The reference bus: full (50/50), unloading, near Maradana.
    pub fn reference() -> Self {
        Self {
            state: VehicleState {
                passengers: 50,
                capacity: 50,
                direction: Direction::Decreasing,
                current_stop: 2,
            },
            stops: DEFAULT_STOPS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Advance the simulation by one step and return the new reading.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> VehicleReading {
        let state = &mut self.state;

        state.direction = if state.passengers >= state.capacity.saturating_sub(CROWDED_MARGIN) {
            if rng.chance(BIAS_PROBABILITY) {
                Direction::Decreasing
            } else {
                Direction::Increasing
            }
        } else if state.passengers <= SPARSE_THRESHOLD {
            if rng.chance(BIAS_PROBABILITY) {
                Direction::Increasing
            } else {
                Direction::Decreasing
            }
        } else if rng.chance(FLIP_PROBABILITY) {
            state.direction.flipped()
        } else {
            state.direction
        };

        let step = rng.next_below(MAX_STEP + 1) as i64 * state.direction.sign();
        state.passengers = (state.passengers as i64 + step).clamp(0, state.capacity as i64) as u32;

        if rng.chance(ARRIVAL_PROBABILITY) {
            state.current_stop = (state.current_stop + 1) % self.stops.len();
        }

        self.reading()
    }

    /// The reading for the current state, without advancing.
    pub fn reading(&self) -> VehicleReading {
        let next = (self.state.current_stop + 1) % self.stops.len();
        VehicleReading {
            passengers: self.state.passengers,
            capacity: self.state.capacity,
            occupancy_percent: occupancy_percent(self.state.passengers, self.state.capacity),
            current_stop: self.stops[self.state.current_stop].clone(),
            next_stop: self.stops[next].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRng, SimRng};

    fn stops() -> Vec<String> {
        DEFAULT_STOPS.iter().map(|s| s.to_string()).collect()
    }

    fn sim_at(passengers: u32, direction: Direction) -> TelemetrySimulator {
        TelemetrySimulator::new(
            VehicleState {
                passengers,
                capacity: 50,
                direction,
                current_stop: 0,
            },
            stops(),
        )
        .unwrap()
    }

    #[test]
    fn test_passengers_stay_in_bounds() {
        let mut rng = SimRng::from_seed_u64(1);
        let mut sim = TelemetrySimulator::reference();
        for _ in 0..10_000 {
            let reading = sim.tick(&mut rng);
            assert!(reading.passengers <= reading.capacity);
        }
    }

    #[test]
    fn test_occupancy_matches_rounding() {
        let mut rng = SimRng::from_seed_u64(2);
        let mut sim = TelemetrySimulator::reference();
        for _ in 0..2_000 {
            let r = sim.tick(&mut rng);
            let expected = (r.passengers as f64 / r.capacity as f64 * 100.0).round() as u32;
            assert_eq!(r.occupancy_percent, expected);
        }
    }

    #[test]
    fn test_occupancy_percent_values() {
        assert_eq!(occupancy_percent(0, 50), 0);
        assert_eq!(occupancy_percent(50, 50), 100);
        assert_eq!(occupancy_percent(1, 3), 33);
        assert_eq!(occupancy_percent(2, 3), 67);
        assert_eq!(occupancy_percent(1, 8), 13);
    }

    #[test]
    fn test_full_bus_unloads_mostly() {
        let mut rng = SimRng::from_seed_u64(99);
        let trials = 10_000;
        let mut decreasing = 0;
        for _ in 0..trials {
            let mut sim = sim_at(50, Direction::Increasing);
            sim.tick(&mut rng);
            if sim.state().direction == Direction::Decreasing {
                decreasing += 1;
            }
        }
        let ratio = decreasing as f64 / trials as f64;
        assert!((ratio - 0.8).abs() < 0.03, "ratio was {}", ratio);
    }

    #[test]
    fn test_empty_bus_loads_mostly() {
        let mut rng = SimRng::from_seed_u64(5);
        let trials = 10_000;
        let mut increasing = 0;
        for _ in 0..trials {
            let mut sim = sim_at(0, Direction::Decreasing);
            sim.tick(&mut rng);
            if sim.state().direction == Direction::Increasing {
                increasing += 1;
            }
        }
        let ratio = increasing as f64 / trials as f64;
        assert!((ratio - 0.8).abs() < 0.03, "ratio was {}", ratio);
    }

    #[test]
    fn test_middle_band_rarely_flips() {
        let mut rng = SimRng::from_seed_u64(11);
        let trials = 10_000;
        let mut flipped = 0;
        for _ in 0..trials {
            let mut sim = sim_at(25, Direction::Increasing);
            sim.tick(&mut rng);
            if sim.state().direction == Direction::Decreasing {
                flipped += 1;
            }
        }
        let ratio = flipped as f64 / trials as f64;
        assert!((ratio - 0.1).abs() < 0.02, "ratio was {}", ratio);
    }

    #[test]
    fn test_scripted_decrease_from_full() {
        // 0.7: follows the unload bias, steps by 2, never flips, never arrives.
        let mut rng = ScriptedRng::constant(0.7);
        let mut sim = sim_at(50, Direction::Decreasing);
        let mut previous = 50;
        for _ in 0..5 {
            let reading = sim.tick(&mut rng);
            assert!(reading.passengers <= previous);
            assert_eq!(sim.state().direction, Direction::Decreasing);
            previous = reading.passengers;
        }
        assert_eq!(previous, 40);
        assert_eq!(sim.state().current_stop, 0);
    }

    #[test]
    fn test_crowded_threshold_uses_capacity_margin() {
        // Draw 0.85 refuses the unload bias at 48 (crowded) ...
        let mut rng = ScriptedRng::new(vec![0.85, 0.0, 0.99]);
        let mut sim = sim_at(48, Direction::Decreasing);
        sim.tick(&mut rng);
        assert_eq!(sim.state().direction, Direction::Increasing);

        // ... but at 47 the same draw is only a flip roll, and it does not flip.
        let mut rng = ScriptedRng::new(vec![0.85, 0.0, 0.99]);
        let mut sim = sim_at(47, Direction::Decreasing);
        sim.tick(&mut rng);
        assert_eq!(sim.state().direction, Direction::Decreasing);
    }

    #[test]
    fn test_clamped_at_capacity() {
        // Refuse the unload bias (0.9), step the maximum (0.99), no arrival.
        let mut rng = ScriptedRng::new(vec![0.9, 0.99, 0.99]);
        let mut sim = sim_at(49, Direction::Increasing);
        let reading = sim.tick(&mut rng);
        assert_eq!(reading.passengers, 50);
    }

    #[test]
    fn test_clamped_at_zero() {
        // 0.9 refuses the load bias, so the bus keeps unloading.
        let mut rng = ScriptedRng::new(vec![0.9, 0.99, 0.99]);
        let mut sim = sim_at(1, Direction::Decreasing);
        let reading = sim.tick(&mut rng);
        assert_eq!(reading.passengers, 0);
    }

    #[test]
    fn test_stop_advances_and_wraps() {
        let mut rng = ScriptedRng::new(vec![0.5, 0.0, 0.01]);
        let mut sim = TelemetrySimulator::new(
            VehicleState {
                passengers: 25,
                capacity: 50,
                direction: Direction::Increasing,
                current_stop: 5,
            },
            stops(),
        )
        .unwrap();
        let reading = sim.tick(&mut rng);
        assert_eq!(sim.state().current_stop, 0);
        assert_eq!(reading.current_stop, "Fort");
        assert_eq!(reading.next_stop, "Pettah");
    }

    #[test]
    fn test_reference_reading() {
        let sim = TelemetrySimulator::reference();
        let reading = sim.reading();
        assert_eq!(reading.passengers, 50);
        assert_eq!(reading.occupancy_percent, 100);
        assert_eq!(reading.current_stop, "Maradana");
        assert_eq!(reading.next_stop, "Borella");
        assert_eq!(reading.status(), OccupancyStatus::Overcrowded);
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(OccupancyStatus::from_percent(59), OccupancyStatus::Normal);
        assert_eq!(OccupancyStatus::from_percent(60), OccupancyStatus::NearlyFull);
        assert_eq!(OccupancyStatus::from_percent(79), OccupancyStatus::NearlyFull);
        assert_eq!(OccupancyStatus::from_percent(80), OccupancyStatus::Overcrowded);
    }

    #[test]
    fn test_construction_validation() {
        let state = VehicleState {
            passengers: 0,
            capacity: 0,
            direction: Direction::Increasing,
            current_stop: 0,
        };
        assert_eq!(
            TelemetrySimulator::new(state.clone(), stops()).unwrap_err(),
            ValidationError::ZeroCapacity
        );

        let state = VehicleState {
            passengers: 51,
            capacity: 50,
            ..state
        };
        assert!(matches!(
            TelemetrySimulator::new(state.clone(), stops()),
            Err(ValidationError::PassengersExceedCapacity { .. })
        ));

        let state = VehicleState {
            passengers: 10,
            ..state
        };
        assert_eq!(
            TelemetrySimulator::new(state.clone(), Vec::new()).unwrap_err(),
            ValidationError::EmptyRoute
        );

        let state = VehicleState {
            current_stop: 6,
            ..state
        };
        assert_eq!(
            TelemetrySimulator::new(state, stops()).unwrap_err(),
            ValidationError::StopOutOfRange { index: 6, len: 6 }
        );
    }
}
