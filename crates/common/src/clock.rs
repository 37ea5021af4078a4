//! Clock abstraction.
//!
//! The dateline printed on a clipping and the timestamp embedded in a
//! download file name both read "now". Routing that through [`Clock`]
//! keeps rendering reproducible in tests.

use std::time::Instant;

use chrono::{DateTime, FixedOffset, Local, TimeZone};

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    /// Current local time with its UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Milliseconds since the Unix epoch.
    fn unix_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }

    /// Build a clock at the given local date/time in Indian Standard Time.
    ///
    /// Returns `None` for impossible calendar values.
    pub fn ist(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60)?;
        let instant = offset
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()?;
        Some(Self { instant })
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

/// Measures how long a single operation took.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Milliseconds elapsed since [`Stopwatch::start`].
    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_fixed_clock_is_frozen() {
        let clock = FixedClock::ist(2025, 1, 26, 9, 30).unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().year(), 2025);
        assert_eq!(clock.now().hour(), 9);
    }

    #[test]
    fn test_fixed_clock_unix_millis() {
        // 2025-01-26 09:30 IST is 04:00 UTC.
        let clock = FixedClock::ist(2025, 1, 26, 9, 30).unwrap();
        assert_eq!(clock.unix_millis(), 1_737_864_000_000);
    }

    #[test]
    fn test_fixed_clock_rejects_invalid_date() {
        assert!(FixedClock::ist(2025, 2, 30, 0, 0).is_none());
    }

    #[test]
    fn test_system_clock_is_after_2024() {
        assert!(SystemClock.now().year() >= 2024);
    }

    #[test]
    fn test_stopwatch_is_monotonic() {
        let watch = Stopwatch::start();
        let a = watch.elapsed_ms();
        let b = watch.elapsed_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
