//! Channel-based alert source.
//!
//! Receives alerts via a tokio unbounded mpsc channel, so producers on any
//! thread or task can hand alerts to the single-threaded dashboard.

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::AlertSource;
use crate::alerts::AlertRecord;

/// Sending half handed to alert producers.
pub type AlertSender = mpsc::UnboundedSender<AlertRecord>;

/// An alert source fed through a channel.
///
/// # Example
///
/// ```
/// use fleetwatch::AlertInbox;
///
/// let (tx, inbox) = AlertInbox::create("operator console");
/// ```
///
/// ### Raising alerts from an async task
///
/// ```
/// use fleetwatch::{AlertInbox, AlertRecord, AlertSource, Severity};
///
/// # tokio_test::block_on(async {
/// let (tx, mut inbox) = AlertInbox::create("depot feed");
/// let producer = tokio::spawn(async move {
///     tx.send(AlertRecord::new(Severity::Danger, "Depot", "Bay 3 blocked", 0)).unwrap();
/// });
/// producer.await.unwrap();
/// assert_eq!(inbox.poll().len(), 1);
/// assert!(inbox.is_closed());
/// # });
/// ```
#[derive(Debug)]
pub struct AlertInbox {
    receiver: mpsc::UnboundedReceiver<AlertRecord>,
    description: String,
    closed: bool,
}

impl AlertInbox {
    /// Create a new inbox from an existing receiver.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of an unbounded channel
    /// * `source_description` - Where alerts come from (e.g., "operator console")
    pub fn new(receiver: mpsc::UnboundedReceiver<AlertRecord>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("inbox: {}", source_description),
            closed: false,
        }
    }

    /// Create a channel pair for raising alerts into an inbox.
    pub fn create(source_description: &str) -> (AlertSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, source_description))
    }
}

impl AlertSource for AlertInbox {
    fn poll(&mut self) -> Vec<AlertRecord> {
        let mut received = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(record) => received.push(record),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        received
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
