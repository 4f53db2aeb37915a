//! Occupancy history for sparklines and trend display.

use std::collections::VecDeque;

use crate::sim::VehicleReading;

/// Maximum number of readings to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks recent readings of the tracked bus.
///
/// Records one entry per telemetry tick to drive the occupancy sparkline
/// and the boarding/alighting trend in the UI.
#[derive(Debug, Clone)]
pub struct History {
    /// Occupancy percent per reading, oldest first.
    pub occupancy: VecDeque<u32>,
    /// Passenger counts per reading, oldest first.
    pub passengers: VecDeque<u32>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            occupancy: VecDeque::with_capacity(MAX_HISTORY_SIZE),
            passengers: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Record a new reading
    pub fn record(&mut self, reading: &VehicleReading) {
        self.occupancy.push_back(reading.occupancy_percent);
        if self.occupancy.len() > MAX_HISTORY_SIZE {
            self.occupancy.pop_front();
        }

        self.passengers.push_back(reading.passengers);
        if self.passengers.len() > MAX_HISTORY_SIZE {
            self.passengers.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.occupancy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }

    /// Occupancy values as u64 for ratatui's `Sparkline`.
    pub fn occupancy_series(&self) -> Vec<u64> {
        self.occupancy.iter().map(|&v| v as u64).collect()
    }

    /// Net passenger change between the last two readings.
    ///
    /// Returns None if there's not enough history.
    pub fn last_change(&self) -> Option<i64> {
        if self.passengers.len() < 2 {
            return None;
        }
        let current = *self.passengers.back()?;
        let previous = *self.passengers.get(self.passengers.len() - 2)?;
        Some(current as i64 - previous as i64)
    }

    /// Mean occupancy over the kept window.
    pub fn average_occupancy(&self) -> Option<f64> {
        if self.occupancy.is_empty() {
            return None;
        }
        let sum: u64 = self.occupancy.iter().map(|&v| v as u64).sum();
        Some(sum as f64 / self.occupancy.len() as f64)
    }
}
