//! Header statistics refreshed on every telemetry tick.

use serde::Serialize;

use crate::sim::RandomSource;

/// Network-wide figures shown in the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_passengers: u32,
    pub active_buses: u32,
    pub boardings: u32,
    pub alightings: u32,
    /// Minutes until the tracked bus reaches its next stop.
    pub next_stop_eta: u32,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_passengers: 847,
            active_buses: 12,
            boardings: 127,
            alightings: 84,
            next_stop_eta: 5,
        }
    }
}

impl DashboardStats {
    /// Draw a fresh set of figures around the reference baseline.
    pub fn sample<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let base = Self::default();
        Self {
            total_passengers: base.total_passengers + rng.next_below(50),
            active_buses: base.active_buses + rng.next_below(3),
            boardings: base.boardings + rng.next_below(10),
            alightings: base.alightings + rng.next_below(10),
            next_stop_eta: 1 + rng.next_below(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimRng;

    #[test]
    fn test_sample_ranges() {
        let mut rng = SimRng::from_seed_u64(8);
        for _ in 0..500 {
            let s = DashboardStats::sample(&mut rng);
            assert!((847..897).contains(&s.total_passengers));
            assert!((12..15).contains(&s.active_buses));
            assert!((127..137).contains(&s.boardings));
            assert!((84..94).contains(&s.alightings));
            assert!((1..=10).contains(&s.next_stop_eta));
        }
    }
}
