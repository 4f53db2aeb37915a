//! Dashboard configuration.
//!
//! Settings are layered: built-in defaults, then an optional config file
//! (TOML, YAML or JSON, picked by extension), then environment variables
//! prefixed with `FLEETWATCH_` using `__` between nested keys, e.g.
//! `FLEETWATCH_VEHICLE__CAPACITY=60`. Command-line flags are applied last by
//! the binary.
//!
//! ```toml
//! seed = 7
//! theme = "light"
//!
//! [vehicle]
//! id = "BUS-138-CMB"
//! capacity = 50
//! stops = ["Fort", "Pettah", "Maradana"]
//!
//! [intervals]
//! telemetry = "3s"
//! alert = "15s"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::alerts::DEFAULT_MAX_VISIBLE;
use crate::data::duration::parse_duration;
use crate::sim::{Direction, VehicleState, DEFAULT_STOPS};

/// Which color theme to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    Light,
    /// Detect from the terminal background.
    #[default]
    Auto,
}

/// The tracked bus and its route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSettings {
    pub id: String,
    pub capacity: u32,
    pub initial_passengers: u32,
    /// Index into `stops` where the bus starts.
    pub initial_stop: usize,
    pub stops: Vec<String>,
}

impl Default for VehicleSettings {
    fn default() -> Self {
        Self {
            id: "BUS-138-CMB".to_string(),
            capacity: 50,
            initial_passengers: 50,
            initial_stop: 2,
            stops: DEFAULT_STOPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl VehicleSettings {
    /// Starting state for the simulator. A full bus starts out unloading.
    pub fn initial_state(&self) -> VehicleState {
        VehicleState {
            passengers: self.initial_passengers,
            capacity: self.capacity,
            direction: Direction::Decreasing,
            current_stop: self.initial_stop,
        }
    }
}

/// Alert feed behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    pub max_visible: usize,
    /// Raise an alert whenever the tracked bus changes occupancy band.
    pub status_change: bool,
    /// Seed the feed with the start-up alerts.
    pub seed_initial: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            status_change: true,
            seed_initial: true,
        }
    }
}

/// Task intervals as duration strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalSettings {
    pub telemetry: String,
    pub alert: String,
    pub aging: String,
    pub map: String,
}

impl Default for IntervalSettings {
    fn default() -> Self {
        Self {
            telemetry: "3s".to_string(),
            alert: "15s".to_string(),
            aging: "60s".to_string(),
            map: "5s".to_string(),
        }
    }
}

/// Parsed task intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub telemetry: Duration,
    pub alert: Duration,
    pub aging: Duration,
    pub map: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            telemetry: Duration::from_secs(3),
            alert: Duration::from_secs(15),
            aging: Duration::from_secs(60),
            map: Duration::from_secs(5),
        }
    }
}

impl IntervalSettings {
    pub fn parse(&self) -> Result<Intervals> {
        Ok(Intervals {
            telemetry: parse_duration(&self.telemetry).context("intervals.telemetry")?,
            alert: parse_duration(&self.alert).context("intervals.alert")?,
            aging: parse_duration(&self.aging).context("intervals.aging")?,
            map: parse_duration(&self.map).context("intervals.map")?,
        })
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a fixed seed replays the same run.
    pub seed: Option<u64>,
    pub theme: ThemePreference,
    pub vehicle: VehicleSettings,
    pub alerts: AlertSettings,
    pub intervals: IntervalSettings,
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("FLEETWATCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?;

        let settings: Settings =
            config.try_deserialize().context("invalid configuration values")?;
        Ok(settings)
    }
}
