//! Restartable single-shot idle timer.

use std::time::{Duration, Instant};

/// Idle timer driven by the owner's event loop.
///
/// The timer holds a deadline rather than a thread. Restarting replaces the
/// pending deadline, so only the most recent restart can ever fire.
#[derive(Debug, Clone, Default)]
pub struct IdleTimer {
    /// When the timer fires, if armed
    deadline: Option<Instant>,
}

impl IdleTimer {
    /// Create a disarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending fire and schedule a new one `duration` from now.
    pub fn restart(&mut self, duration: Duration) {
        self.restart_at(duration, Instant::now());
    }

    /// Cancel any pending fire and schedule a new one `duration` after `now`.
    ///
    /// A deadline beyond the range of [`Instant`] leaves the timer disarmed.
    pub fn restart_at(&mut self, duration: Duration, now: Instant) {
        self.deadline = now.checked_add(duration);
    }

    /// Cancel without rescheduling.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Check if a fire is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the timer fires, saturating at zero.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns `true` once when the deadline has passed, then disarms.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// [`poll_at`](Self::poll_at) using the current time.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let start = Instant::now();
        let mut timer = IdleTimer::new();
        timer.restart_at(Duration::from_millis(1000), start);

        assert!(!timer.poll_at(start + Duration::from_millis(999)));
        assert!(timer.poll_at(start + Duration::from_millis(1000)));
        assert!(!timer.poll_at(start + Duration::from_millis(5000)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_restart_supersedes_pending_fire() {
        let start = Instant::now();
        let mut timer = IdleTimer::new();
        timer.restart_at(Duration::from_millis(1000), start);
        timer.restart_at(Duration::from_millis(1000), start + Duration::from_millis(800));

        assert!(!timer.poll_at(start + Duration::from_millis(1200)));
        assert!(timer.poll_at(start + Duration::from_millis(1800)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = IdleTimer::new();
        timer.restart_at(Duration::from_millis(10), start);
        timer.cancel();

        assert!(!timer.poll_at(start + Duration::from_secs(1)));
        assert_eq!(timer.remaining_at(start), None);
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let mut timer = IdleTimer::new();
        timer.restart_at(Duration::from_millis(500), start);

        assert_eq!(
            timer.remaining_at(start + Duration::from_millis(200)),
            Some(Duration::from_millis(300))
        );
        assert_eq!(
            timer.remaining_at(start + Duration::from_millis(900)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_restart_from_now() {
        let mut timer = IdleTimer::new();
        assert_eq!(timer.deadline(), None);

        let before = Instant::now();
        timer.restart(Duration::from_secs(60));
        let deadline = timer.deadline().unwrap();
        assert!(deadline >= before + Duration::from_secs(60));
        assert!(!timer.poll());
        assert!(timer.is_armed());

        timer.restart(Duration::ZERO);
        assert!(timer.poll());
        assert!(!timer.poll());
    }

    #[test]
    fn test_zero_duration_fires_immediately() {
        let start = Instant::now();
        let mut timer = IdleTimer::new();
        timer.restart_at(Duration::ZERO, start);
        assert!(timer.poll_at(start));
    }
}
