//! Static route data: per-stop load and the daily occupancy curve.

use serde::Serialize;

use crate::sim::{OccupancyStatus, RandomSource};

/// Average passengers per stop along the reference six-stop route, for a 50-seat bus.
const AVERAGE_STOP_LOAD: [u32; 6] = [42, 45, 38, 30, 25, 15];
const REFERENCE_CAPACITY: u32 = 50;

/// Average load at one stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopLoad {
    pub stop: String,
    pub average_passengers: u32,
}

impl StopLoad {
    /// Band used to color the stop bar: above 40 is overcrowded, above 30 nearly full.
    pub fn status(&self) -> OccupancyStatus {
        if self.average_passengers > 40 {
            OccupancyStatus::Overcrowded
        } else if self.average_passengers > 30 {
            OccupancyStatus::NearlyFull
        } else {
            OccupancyStatus::Normal
        }
    }
}

/// Stop loads for a configured route.
///
/// The reference load profile is laid over `stops` in order (repeating on
/// longer routes) and scaled from a 50-seat bus to `capacity`.
pub fn stop_loads<S: AsRef<str>>(stops: &[S], capacity: u32) -> Vec<StopLoad> {
    stops
        .iter()
        .zip(AVERAGE_STOP_LOAD.iter().cycle())
        .map(|(stop, &load)| StopLoad {
            stop: stop.as_ref().to_string(),
            average_passengers: load * capacity / REFERENCE_CAPACITY,
        })
        .collect()
}

/// Generate a 24-hour occupancy curve (percent per hour) with rush-hour peaks.
pub fn hourly_occupancy<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<f64> {
    (0..24)
        .map(|hour| {
            let r = rng.next_f64();
            match hour {
                7..=9 => 80.0 + r * 15.0,
                17..=19 => 75.0 + r * 20.0,
                10..=16 => 40.0 + r * 30.0,
                _ => 10.0 + r * 20.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ScriptedRng, SimRng, DEFAULT_STOPS};

    #[test]
    fn test_stop_load_bands() {
        let loads = stop_loads(&DEFAULT_STOPS, 50);
        assert_eq!(loads.len(), 6);
        assert_eq!(loads[0].average_passengers, 42);
        assert_eq!(loads[1].stop, "Pettah");
        assert_eq!(loads[1].status(), OccupancyStatus::Overcrowded);
        assert_eq!(loads[2].status(), OccupancyStatus::NearlyFull);
        assert_eq!(loads[3].status(), OccupancyStatus::Normal);
    }

    #[test]
    fn test_stop_loads_follow_configured_route() {
        let stops = vec!["A".to_string(), "B".to_string()];
        let loads = stop_loads(&stops, 100);
        let names: Vec<&str> = loads.iter().map(|l| l.stop.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(loads[0].average_passengers, 84);
        assert_eq!(loads[1].average_passengers, 90);

        let long: Vec<String> = (0..8).map(|i| format!("S{}", i)).collect();
        let loads = stop_loads(&long, 50);
        assert_eq!(loads.len(), 8);
        assert_eq!(loads[6].average_passengers, 42);
    }

    #[test]
    fn test_hourly_profile_shape() {
        let mut rng = SimRng::from_seed_u64(4);
        let curve = hourly_occupancy(&mut rng);
        assert_eq!(curve.len(), 24);
        for hour in 7..=9 {
            assert!((80.0..95.0).contains(&curve[hour]));
        }
        for hour in 0..7 {
            assert!((10.0..30.0).contains(&curve[hour]));
        }
    }

    #[test]
    fn test_hourly_profile_floor() {
        let mut rng = ScriptedRng::constant(0.0);
        let curve = hourly_occupancy(&mut rng);
        assert_eq!(curve[8], 80.0);
        assert_eq!(curve[18], 75.0);
        assert_eq!(curve[12], 40.0);
        assert_eq!(curve[23], 10.0);
    }
}
