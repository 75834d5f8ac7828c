//! Clock abstraction for deterministic testing.
//!
//! Decouples the countdown from the system clock. Production uses
//! [`SystemClock`] (monotonic `std::time::Instant`), tests and simulations use
//! [`ManualClock`] whose virtual time only moves when advanced explicitly.
//!
//! The bomb never reads a clock directly. The driving loop samples
//! [`Clock::now`] once per cycle and hands the delta to the state machine as a
//! tick.

use std::{
    ops::Sub,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

/// Monotonic time source.
///
/// # Invariants
///
/// - `now()` never goes backwards within one clock.
/// - Subtracting two instants of the same clock yields the elapsed duration
///   between them.
pub trait Clock: Clone + Send + Sync + 'static {
    /// Instant type produced by this clock.
    ///
    /// Production clocks use `std::time::Instant`, simulation clocks use
    /// [`VirtualInstant`].
    type Instant: Copy + Ord + Send + Sync + Sub<Output = Duration>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;
}

/// Wall clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Point in virtual time, measured from the clock's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VirtualInstant(Duration);

impl Sub for VirtualInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

/// Virtual clock advanced by hand.
///
/// Clones share the same time line, so a test can keep one handle and give
/// another to a driver.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move virtual time forward. Saturates at the end of the time line.
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        let now = self.nanos.load(Ordering::SeqCst);
        self.nanos.store(now.saturating_add(by), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    type Instant = VirtualInstant;

    fn now(&self) -> VirtualInstant {
        VirtualInstant(Duration::from_nanos(self.nanos.load(Ordering::SeqCst)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now() - start, Duration::ZERO);

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - start, Duration::from_millis(250));
    }

    #[test]
    fn advance_saturates() {
        let clock = ManualClock::new();
        clock.advance(Duration::MAX);
        let end = clock.now();
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), end);
        assert_eq!(end - VirtualInstant::default(), Duration::from_nanos(u64::MAX));
    }

    #[test]
    fn clones_share_time_line() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_secs(3));
        assert_eq!(clock.now() - VirtualInstant::default(), Duration::from_secs(3));
    }

    #[test]
    fn virtual_subtraction_saturates() {
        let early = VirtualInstant(Duration::from_secs(1));
        let late = VirtualInstant(Duration::from_secs(4));
        assert_eq!(late - early, Duration::from_secs(3));
        assert_eq!(early - late, Duration::ZERO);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
