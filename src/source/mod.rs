//! Sources of externally produced alerts.
//!
//! The dashboard generates its own synthetic alerts, but anything else in the
//! process (a key binding, an embedding application, a test) can raise alerts
//! through an [`AlertSource`]. Sources are polled without blocking once per
//! loop turn.

mod inbox;

pub use inbox::{AlertInbox, AlertSender};

use std::fmt::Debug;

use crate::alerts::AlertRecord;

/// Trait for receiving alerts raised outside the dashboard.
///
/// # Example
///
/// ```
/// use fleetwatch::{AlertInbox, AlertRecord, AlertSource, Severity};
///
/// let (tx, mut inbox) = AlertInbox::create("depot");
/// tx.send(AlertRecord::new(Severity::Warning, "Depot", "Bay 3 blocked", 0)).unwrap();
/// assert_eq!(inbox.poll().len(), 1);
/// ```
pub trait AlertSource: Send + Debug {
    /// Drain every alert that has arrived since the last poll.
    ///
    /// This method must not block.
    fn poll(&mut self) -> Vec<AlertRecord>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the status bar.
    fn description(&self) -> &str;

    /// Returns true once no more alerts can arrive.
    fn is_closed(&self) -> bool;
}
