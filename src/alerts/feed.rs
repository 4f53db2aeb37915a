//! Bounded, newest-first alert feed.

use std::collections::VecDeque;
use std::time::Duration;

use super::record::{AlertAge, AlertRecord};
use crate::error::ValidationError;

/// Default number of alerts kept on screen.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Aging moves labels forward one step per elapsed quantum.
pub const AGE_QUANTUM: Duration = Duration::from_secs(60);

/// An alert together with its displayed age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub record: AlertRecord,
    pub age: AlertAge,
}

/// Holds at most `max_visible` alerts, newest first.
///
/// Pushing onto a full feed evicts the oldest entry. Aging only changes
/// labels; entries never expire by time.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    entries: VecDeque<FeedEntry>,
    max_visible: usize,
    /// Elapsed time not yet turned into a whole quantum.
    age_carry: Duration,
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(DEFAULT_MAX_VISIBLE + 1),
            max_visible: DEFAULT_MAX_VISIBLE,
            age_carry: Duration::ZERO,
        }
    }
}

impl AlertFeed {
    pub fn new(max_visible: usize) -> Result<Self, ValidationError> {
        if max_visible == 0 {
            return Err(ValidationError::ZeroFeedCapacity);
        }
        Ok(Self {
            entries: VecDeque::with_capacity(max_visible + 1),
            max_visible,
            age_carry: Duration::ZERO,
        })
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Insert a fresh alert at the front.
    ///
    /// Returns the evicted record when the feed was already full.
    pub fn push(&mut self, record: AlertRecord) -> Option<AlertRecord> {
        self.push_aged(record, AlertAge::JUST_NOW)
    }

    /// Insert an alert that is already `age` old.
    pub fn push_aged(&mut self, record: AlertRecord, age: AlertAge) -> Option<AlertRecord> {
        self.entries.push_front(FeedEntry { record, age });
        if self.entries.len() > self.max_visible {
            self.entries.pop_back().map(|entry| entry.record)
        } else {
            None
        }
    }

    /// Remove every alert. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Remove up to `n` of the oldest alerts. Returns how many were removed.
    pub fn clear_oldest(&mut self, n: usize) -> usize {
        let removed = n.min(self.entries.len());
        self.entries.truncate(self.entries.len() - removed);
        removed
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance every label by the whole quanta contained in `elapsed`.
    ///
    /// Any remainder is carried into the next call.
    pub fn age_all(&mut self, elapsed: Duration) {
        let total = self.age_carry + elapsed;
        let steps = (total.as_secs() / AGE_QUANTUM.as_secs()) as u32;
        self.age_carry = total - AGE_QUANTUM * steps;
        if steps == 0 {
            return;
        }
        for entry in &mut self.entries {
            entry.age = entry.age.advanced(steps);
        }
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::record::Severity;

    fn alert(title: &str) -> AlertRecord {
        AlertRecord::new(Severity::Info, title, "", 0)
    }

    fn titles(feed: &AlertFeed) -> Vec<String> {
        feed.iter().map(|e| e.record.title.clone()).collect()
    }

    #[test]
    fn test_push_newest_first() {
        let mut feed = AlertFeed::default();
        feed.push(alert("A"));
        feed.push(alert("B"));
        assert_eq!(titles(&feed), vec!["B", "A"]);
        assert_eq!(feed.count(), 2);
    }

    #[test]
    fn test_push_evicts_oldest_when_full() {
        let mut feed = AlertFeed::new(5).unwrap();
        for t in ["A", "B", "C", "D", "E"] {
            assert!(feed.push(alert(t)).is_none());
        }
        let evicted = feed.push(alert("F"));
        assert_eq!(evicted.map(|r| r.title), Some("A".to_string()));
        assert_eq!(titles(&feed), vec!["F", "E", "D", "C", "B"]);
    }

    #[test]
    fn test_six_pushes_keep_five() {
        let mut feed = AlertFeed::new(5).unwrap();
        for i in 1..=6 {
            feed.push(alert(&format!("alert-{}", i)));
            assert!(feed.count() <= feed.max_visible());
        }
        let t = titles(&feed);
        assert_eq!(t.len(), 5);
        assert_eq!(t[0], "alert-6");
        assert!(!t.contains(&"alert-1".to_string()));
    }

    #[test]
    fn test_clear_all_idempotent() {
        let mut feed = AlertFeed::default();
        feed.push(alert("A"));
        feed.push(alert("B"));
        assert_eq!(feed.clear_all(), 2);
        assert_eq!(feed.count(), 0);
        assert_eq!(feed.clear_all(), 0);
        assert_eq!(feed.count(), 0);
    }

    #[test]
    fn test_clear_oldest_keeps_newest() {
        let mut feed = AlertFeed::default();
        for t in ["A", "B", "C"] {
            feed.push(alert(t));
        }
        assert_eq!(feed.clear_oldest(2), 2);
        assert_eq!(titles(&feed), vec!["C"]);
        assert_eq!(feed.clear_oldest(5), 1);
        assert!(feed.is_empty());
    }

    #[test]
    fn test_age_all_labels() {
        let mut feed = AlertFeed::default();
        feed.push(alert("A"));
        feed.age_all(AGE_QUANTUM);
        assert_eq!(feed.iter().next().unwrap().age.to_string(), "1 minute ago");
        feed.push(alert("B"));
        feed.age_all(AGE_QUANTUM);
        let ages: Vec<String> = feed.iter().map(|e| e.age.to_string()).collect();
        assert_eq!(ages, vec!["1 minute ago", "2 minutes ago"]);
    }

    #[test]
    fn test_age_all_carries_remainder() {
        let mut feed = AlertFeed::default();
        feed.push(alert("A"));
        feed.age_all(Duration::from_secs(40));
        assert_eq!(feed.iter().next().unwrap().age, AlertAge::JUST_NOW);
        feed.age_all(Duration::from_secs(40));
        assert_eq!(feed.iter().next().unwrap().age, AlertAge(1));
        feed.age_all(Duration::from_secs(150));
        assert_eq!(feed.iter().next().unwrap().age, AlertAge(3));
    }

    #[test]
    fn test_aging_never_removes() {
        let mut feed = AlertFeed::default();
        feed.push(alert("A"));
        feed.age_all(Duration::from_secs(60 * 60 * 24));
        assert_eq!(feed.count(), 1);
    }

    #[test]
    fn test_push_aged_keeps_age() {
        let mut feed = AlertFeed::default();
        feed.push_aged(alert("old"), AlertAge::minutes(8));
        assert_eq!(feed.iter().next().unwrap().age.to_string(), "8 minutes ago");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(AlertFeed::new(0).unwrap_err(), ValidationError::ZeroFeedCapacity);
    }
}
