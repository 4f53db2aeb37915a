//! Fixed-interval task scheduling.
//!
//! The scheduler never sleeps and never reads the clock itself: callers pass
//! the current [`Instant`] to [`Scheduler::poll`] and get back the tasks that
//! are due. The dashboard loop polls it every frame; tests drive it with
//! synthetic instants.

use std::time::{Duration, Instant};

use crate::error::ValidationError;

/// A recurring task registration.
#[derive(Debug, Clone)]
struct Registration<T> {
    name: &'static str,
    interval: Duration,
    task: T,
    next_due: Instant,
}

/// A list of `(interval, task)` registrations.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    registrations: Vec<Registration<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `task` to run every `interval`, first due one interval after `start`.
    pub fn register(
        &mut self,
        name: &'static str,
        interval: Duration,
        task: T,
        start: Instant,
    ) -> Result<(), ValidationError> {
        if interval.is_zero() {
            return Err(ValidationError::ZeroInterval(name.to_string()));
        }
        self.registrations.push(Registration {
            name,
            interval,
            task,
            next_due: start + interval,
        });
        Ok(())
    }

    /// Collect every task due at `now`, in registration order.
    ///
    /// A task that missed several intervals (e.g. while paused or suspended)
    /// fires once, and its next deadline is moved past `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        for reg in &mut self.registrations {
            if now >= reg.next_due {
                due.push(reg.task.clone());
                while reg.next_due <= now {
                    reg.next_due += reg.interval;
                }
            }
        }
        due
    }

    /// Push every deadline forward to one interval after `now`.
    ///
    /// Used when resuming from pause so that nothing fires immediately.
    pub fn reset(&mut self, now: Instant) {
        for reg in &mut self.registrations {
            reg.next_due = now + reg.interval;
        }
    }

    /// Registered (name, interval) pairs, for display.
    pub fn intervals(&self) -> impl Iterator<Item = (&'static str, Duration)> + '_ {
        self.registrations.iter().map(|r| (r.name, r.interval))
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Job {
        Fast,
        Slow,
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_nothing_due_before_first_interval() {
        let start = Instant::now();
        let mut s = Scheduler::new();
        s.register("fast", secs(3), Job::Fast, start).unwrap();
        assert!(s.poll(start).is_empty());
        assert!(s.poll(start + secs(2)).is_empty());
        assert_eq!(s.poll(start + secs(3)), vec![Job::Fast]);
    }

    #[test]
    fn test_multiple_tasks_in_registration_order() {
        let start = Instant::now();
        let mut s = Scheduler::new();
        s.register("slow", secs(15), Job::Slow, start).unwrap();
        s.register("fast", secs(3), Job::Fast, start).unwrap();

        let mut fast = 0;
        let mut slow = 0;
        for t in 1..=30 {
            for job in s.poll(start + secs(t)) {
                match job {
                    Job::Fast => fast += 1,
                    Job::Slow => slow += 1,
                }
            }
        }
        assert_eq!(fast, 10);
        assert_eq!(slow, 2);
        assert_eq!(s.poll(start + secs(45)), vec![Job::Slow, Job::Fast]);
    }

    #[test]
    fn test_missed_intervals_fire_once() {
        let start = Instant::now();
        let mut s = Scheduler::new();
        s.register("fast", secs(3), Job::Fast, start).unwrap();
        assert_eq!(s.poll(start + secs(31)), vec![Job::Fast]);
        assert!(s.poll(start + secs(32)).is_empty());
        assert_eq!(s.poll(start + secs(33)), vec![Job::Fast]);
    }

    #[test]
    fn test_reset_defers_deadlines() {
        let start = Instant::now();
        let mut s = Scheduler::new();
        s.register("fast", secs(3), Job::Fast, start).unwrap();
        s.reset(start + secs(10));
        assert!(s.poll(start + secs(12)).is_empty());
        assert_eq!(s.poll(start + secs(13)), vec![Job::Fast]);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut s = Scheduler::new();
        let err = s.register("fast", Duration::ZERO, Job::Fast, Instant::now()).unwrap_err();
        assert_eq!(err, ValidationError::ZeroInterval("fast".to_string()));
        assert!(s.is_empty());
    }
}
