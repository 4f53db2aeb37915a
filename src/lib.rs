//! # fleetwatch
//!
//! A terminal dashboard and library for simulated real-time bus telemetry.
//!
//! One tracked bus reports its passenger load on a fixed interval, a bounded
//! feed collects occupancy alerts newest-first, and a small background fleet
//! drifts around a map. Everything is driven by a clock-free scheduler and an
//! injectable random source, so a fixed seed replays the same run.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Application                        │
//! │  ┌───────────┐    ┌─────────┐    ┌─────────┐             │
//! │  │ scheduler │───▶│   app   │───▶│   ui    │──▶ Terminal │
//! │  │ (timers)  │    │ (state) │    │(render) │             │
//! │  └───────────┘    └────┬────┘    └─────────┘             │
//! │                        │                                 │
//! │           ┌────────────┼────────────┐                    │
//! │           ▼            ▼            ▼                    │
//! │      ┌─────────┐  ┌─────────┐  ┌─────────┐               │
//! │      │   sim   │  │ alerts  │  │ source  │◀── AlertInbox │
//! │      └─────────┘  └─────────┘  └─────────┘               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`sim`]**: the occupancy random walk ([`TelemetrySimulator`]), the
//!   background [`sim::Fleet`], and the [`RandomSource`] capability
//! - **[`alerts`]**: the bounded newest-first [`AlertFeed`] and the
//!   synthetic [`AlertGenerator`]
//! - **[`scheduler`]**: fixed-interval [`Scheduler`] polled with explicit instants
//! - **[`source`]**: externally raised alerts ([`AlertSource`] trait, [`AlertInbox`])
//! - **[`app`]**: owns every component and dispatches due tasks
//! - **[`settings`]**: layered configuration ([`Settings`])
//! - **[`ui`]**: terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive dashboard
//! fleetwatch --seed 7 --telemetry-interval 1s
//!
//! # 100 telemetry ticks without a terminal, then write the state
//! fleetwatch --headless 100 --export state.json
//! ```
//!
//! ### Driving the simulator directly
//!
//! ```
//! use fleetwatch::{SimRng, TelemetrySimulator};
//!
//! let mut rng = SimRng::from_seed_u64(7);
//! let mut sim = TelemetrySimulator::reference();
//! for _ in 0..100 {
//!     let reading = sim.tick(&mut rng);
//!     assert!(reading.passengers <= reading.capacity);
//! }
//! ```
//!
//! ### A bounded alert feed
//!
//! ```
//! use fleetwatch::{AlertFeed, AlertRecord, Severity};
//!
//! let mut feed = AlertFeed::new(2).unwrap();
//! feed.push(AlertRecord::new(Severity::Info, "A", "", 0));
//! feed.push(AlertRecord::new(Severity::Info, "B", "", 1));
//! let evicted = feed.push(AlertRecord::new(Severity::Danger, "C", "", 2));
//! assert_eq!(evicted.unwrap().title, "A");
//! assert_eq!(feed.iter().next().unwrap().record.title, "C");
//! ```
//!
//! ### Feeding external alerts into the dashboard
//!
//! ```
//! use std::time::Instant;
//! use fleetwatch::{AlertInbox, AlertRecord, App, Settings, Severity};
//! use fleetwatch::ui::Theme;
//!
//! let mut app = App::new(&Settings::default(), Theme::dark(), Instant::now()).unwrap();
//! let (tx, inbox) = AlertInbox::create("depot");
//! app.add_source(Box::new(inbox));
//!
//! tx.send(AlertRecord::new(Severity::Warning, "Depot", "Bay 3 blocked", 0)).unwrap();
//! app.update(Instant::now());
//! assert_eq!(app.feed.iter().next().unwrap().record.title, "Depot");
//! ```

pub mod alerts;
pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use alerts::{AlertAge, AlertFeed, AlertGenerator, AlertRecord, Severity};
pub use app::{App, DashboardSnapshot, Task, View};
pub use error::ValidationError;
pub use scheduler::Scheduler;
pub use settings::Settings;
pub use sim::{
    Direction, OccupancyStatus, RandomSource, SimRng, TelemetrySimulator, VehicleReading,
    VehicleState,
};
pub use source::{AlertInbox, AlertSender, AlertSource};
