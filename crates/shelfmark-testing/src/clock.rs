//! Deterministic clock for lifecycle tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use shelfmark_core::clock::Clock;

/// A clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock pinned to 09:00 UTC on the given date.
    pub fn on(date: NaiveDate) -> Self {
        let start = date.and_hms_opt(9, 0, 0).unwrap();
        Self::new(Utc.from_utc_datetime(&start))
    }

    pub fn advance_days(&self, days: i64) {
        *self.now.lock().unwrap() += Duration::days(days);
    }

    pub fn advance_hours(&self, hours: i64) {
        *self.now.lock().unwrap() += Duration::hours(hours);
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
