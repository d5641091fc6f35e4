//! Fixed-rate frame scheduling
//!
//! The render loop asks a [`FrameTicker`] whether a frame is due instead of
//! redrawing as fast as the event loop spins. The clock is injectable so the
//! schedule can be driven by hand in tests.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

pub struct FrameTicker<C: Clock = SystemClock> {
    clock: C,
    interval: Duration,
    next: Instant,
    ticks: u64,
    skipped: u64,
}

impl FrameTicker<SystemClock> {
    pub fn with_fps(fps: u32) -> Self {
        Self::new(SystemClock, fps)
    }
}

impl<C: Clock> FrameTicker<C> {
    /// Creates a ticker whose first tick is due immediately; `fps` of zero is
    /// treated as one frame per second
    pub fn new(clock: C, fps: u32) -> Self {
        let interval = Duration::from_secs(1) / fps.max(1);
        let next = clock.now();
        Self {
            clock,
            interval,
            next,
            ticks: 0,
            skipped: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant the next tick becomes due
    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whole intervals dropped because the loop fell behind
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Returns true when a frame is due and schedules the following one
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        if now < self.next {
            return false;
        }

        let late = now - self.next;
        if late > self.interval {
            let missed = late.as_nanos() / self.interval.as_nanos().max(1);
            self.skipped += missed as u64;
            log::trace!("frame ticker resync, {missed} intervals behind");
            self.next = now + self.interval;
        } else {
            self.next += self.interval;
        }

        self.ticks += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_immediate() {
        let clock = ManualClock::new();
        let mut ticker = FrameTicker::new(&clock, 60);
        assert!(ticker.poll());
        assert!(!ticker.poll());
        assert_eq!(ticker.ticks(), 1);
    }

    #[test]
    fn ticks_once_per_interval() {
        let clock = ManualClock::new();
        let mut ticker = FrameTicker::new(&clock, 50);
        assert_eq!(ticker.interval(), Duration::from_millis(20));
        assert!(ticker.poll());

        clock.advance(Duration::from_millis(10));
        assert!(!ticker.poll());
        clock.advance(Duration::from_millis(10));
        assert!(ticker.poll());
        assert!(!ticker.poll());
        assert_eq!(ticker.ticks(), 2);
    }

    #[test]
    fn falling_behind_does_not_burst() {
        let clock = ManualClock::new();
        let mut ticker = FrameTicker::new(&clock, 50);
        assert!(ticker.poll());

        clock.advance(Duration::from_millis(200));
        assert!(ticker.poll());
        assert!(!ticker.poll());
        assert!(ticker.skipped() > 0);
        assert_eq!(ticker.next_deadline(), clock.now() + Duration::from_millis(20));
    }

    #[test]
    fn zero_fps_is_clamped() {
        let ticker = FrameTicker::new(ManualClock::new(), 0);
        assert_eq!(ticker.interval(), Duration::from_secs(1));
    }
}
