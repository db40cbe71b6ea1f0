//! Clock implementations

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use repsense_core::Timestamp;

/// Time source for sessions
///
/// INVARIANT: `now()` MUST be monotonically non-decreasing.
pub trait Clock: Send + Sync {
    /// Current monotonic time
    fn now(&self) -> Timestamp;

    /// Current wall-clock time (only used to stamp persisted records)
    fn wall_time(&self) -> DateTime<Utc>;
}

/// Monotonic OS clock
pub struct SystemClock {
    /// Reference instant (epoch of the monotonic timeline)
    reference: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            reference: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.reference.elapsed().as_micros() as u64)
    }

    fn wall_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for deterministic tests and replays
///
/// Clones share the same timeline.
#[derive(Clone)]
pub struct ManualClock {
    elapsed: Arc<Mutex<Duration>>,
    wall_epoch: DateTime<Utc>,
}

impl ManualClock {
    /// Start at zero, with wall time anchored to the current instant
    pub fn new() -> Self {
        Self::with_wall_epoch(Utc::now())
    }

    /// Start at zero, with wall time anchored to `wall_epoch`
    pub fn with_wall_epoch(wall_epoch: DateTime<Utc>) -> Self {
        ManualClock {
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
            wall_epoch,
        }
    }

    /// Move time forward
    pub fn advance(&self, dt: Duration) {
        *self.elapsed.lock() += dt;
    }

    /// Jump to an absolute offset from the epoch. Only moves forward.
    pub fn set(&self, offset: Duration) {
        let mut elapsed = self.elapsed.lock();
        if offset > *elapsed {
            *elapsed = offset;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.elapsed.lock().as_micros() as u64)
    }

    fn wall_time(&self) -> DateTime<Utc> {
        let elapsed = *self.elapsed.lock();
        self.wall_epoch + chrono::Duration::from_std(elapsed).unwrap_or(chrono::Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();

        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = clock.now();

        assert!(t2 > t1);
    }

    #[test]
    fn test_manual_clock_shared_timeline() {
        let clock = ManualClock::new();
        let view = clock.clone();

        clock.advance(Duration::from_secs(2));
        assert_eq!(view.now(), Timestamp::from_millis(2000));

        view.advance(Duration::from_millis(500));
        assert_eq!(clock.now(), Timestamp::from_millis(2500));
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::new();

        clock.set(Duration::from_secs(10));
        clock.set(Duration::from_secs(3));

        assert_eq!(clock.now(), Timestamp::from_millis(10_000));
    }

    #[test]
    fn test_manual_clock_wall_time_follows_offset() {
        let epoch = DateTime::parse_from_rfc3339("2025-03-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let clock = ManualClock::with_wall_epoch(epoch);

        clock.advance(Duration::from_secs(90));

        assert_eq!(clock.wall_time(), epoch + chrono::Duration::seconds(90));
    }
}
