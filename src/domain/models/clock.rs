#[cfg(test)]
#[path = "clock_test.rs"]
mod tests;

use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub type ClockBox = Arc<dyn Clock + Send + Sync>;

#[derive(Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        return Utc::now();
    }
}

/// Mints time-derived ids (epoch milliseconds). Ids are strictly
/// increasing, so two ids minted within the same millisecond still differ.
/// Clones share the last minted id.
#[derive(Clone)]
pub struct IdGenerator {
    clock: ClockBox,
    last: Arc<AtomicI64>,
}

impl IdGenerator {
    pub fn new(clock: ClockBox) -> IdGenerator {
        return IdGenerator {
            clock,
            last: Arc::new(AtomicI64::new(0)),
        };
    }

    pub fn now(&self) -> DateTime<Utc> {
        return self.clock.now();
    }

    pub fn next_id(&self) -> String {
        let now = self.clock.now().timestamp_millis();
        let mut prev = self.last.load(Ordering::SeqCst);
        loop {
            let next = if now > prev { now } else { prev + 1 };
            match self
                .last
                .compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return next.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}
