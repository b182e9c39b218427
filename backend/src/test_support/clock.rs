//! Deterministic clock for stores that stamp new rows.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock that returns its current instant and then moves one second on, so
/// successive inserts get strictly increasing timestamps.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.lock_clock();
        let current = *now;
        *now += TimeDelta::seconds(1);
        current
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn each_reading_is_one_second_later() {
        let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).single().expect("valid date");
        let clock = SteppingClock::new(start);
        assert_eq!(clock.utc(), start);
        assert_eq!(clock.utc(), start + TimeDelta::seconds(1));
    }
}
