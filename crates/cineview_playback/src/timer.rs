// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cooperative playback timer.
//!
//! There is no background thread: the host polls [`CineTimer::fire`] from
//! its UI loop and the timer compares instants. Starting is cheap; the
//! first deadline is armed lazily on the first poll after starting, so a
//! timer started outside the UI loop does not fire a stale interval.

use std::time::{Duration, Instant};

/// A cancellable periodic deadline polled by the UI loop
#[derive(Debug, Clone)]
pub struct CineTimer {
    interval: Duration,
    deadline: Option<Instant>,
    running: bool,
}

impl CineTimer {
    /// Create a stopped timer with the given interval
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
            running: false,
        }
    }

    /// Start the timer; the first deadline is armed on the next poll
    pub fn start(&mut self) {
        self.running = true;
        self.deadline = None;
    }

    /// Stop the timer synchronously
    pub fn stop(&mut self) {
        self.running = false;
        self.deadline = None;
    }

    /// Is the timer running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The current firing interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval; a pending deadline keeps its period start
    pub fn set_interval(&mut self, interval: Duration) {
        if let Some(deadline) = self.deadline {
            // Reschedule from the start of the current period.
            let period_start = deadline.checked_sub(self.interval).unwrap_or(deadline);
            self.deadline = period_start.checked_add(interval);
        }
        self.interval = interval;
    }

    /// Poll the timer; returns true if the interval elapsed
    ///
    /// On fire the next deadline is scheduled `interval` after `now`, so a
    /// slow host frame produces at most one fire.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        match self.deadline {
            None => {
                self.deadline = Some(now + self.interval);
                false
            }
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            Some(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arms_lazily_then_fires() {
        let mut timer = CineTimer::new(Duration::from_millis(50));
        let t0 = Instant::now();

        timer.start();
        assert!(!timer.fire(t0)); // arming poll
        assert!(!timer.fire(t0 + Duration::from_millis(20)));
        assert!(timer.fire(t0 + Duration::from_millis(60)));
    }

    #[test]
    fn test_at_most_one_fire_per_poll() {
        let mut timer = CineTimer::new(Duration::from_millis(10));
        let t0 = Instant::now();

        timer.start();
        timer.fire(t0);
        // 100ms late: fires once, next deadline is relative to now.
        assert!(timer.fire(t0 + Duration::from_millis(100)));
        assert!(!timer.fire(t0 + Duration::from_millis(105)));
        assert!(timer.fire(t0 + Duration::from_millis(111)));
    }

    #[test]
    fn test_stop_is_immediate() {
        let mut timer = CineTimer::new(Duration::from_millis(10));
        let t0 = Instant::now();

        timer.start();
        timer.fire(t0);
        timer.stop();
        assert!(!timer.fire(t0 + Duration::from_secs(1)));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = CineTimer::new(Duration::from_millis(1));
        assert!(!timer.fire(Instant::now() + Duration::from_secs(10)));
    }
}
