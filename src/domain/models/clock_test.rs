use std::sync::Arc;

use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;

use super::Clock;
use super::IdGenerator;
use super::SystemClock;

struct FrozenClock {
    at: DateTime<Utc>,
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        return self.at;
    }
}

#[test]
fn it_derives_ids_from_the_clock() {
    let at = Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap();
    let ids = IdGenerator::new(Arc::new(FrozenClock { at }));
    assert_eq!(ids.next_id(), at.timestamp_millis().to_string());
}

#[test]
fn it_never_repeats_ids_within_a_millisecond() {
    let at = Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap();
    let ids = IdGenerator::new(Arc::new(FrozenClock { at }));

    let first = ids.next_id().parse::<i64>().unwrap();
    let second = ids.next_id().parse::<i64>().unwrap();
    let third = ids.next_id().parse::<i64>().unwrap();

    assert_eq!(second, first + 1);
    assert_eq!(third, first + 2);
}

#[test]
fn it_shares_the_sequence_between_clones() {
    let at = Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap();
    let ids = IdGenerator::new(Arc::new(FrozenClock { at }));
    let other = ids.clone();

    let first = ids.next_id().parse::<i64>().unwrap();
    let second = other.next_id().parse::<i64>().unwrap();
    let third = ids.next_id().parse::<i64>().unwrap();

    assert_eq!(second, first + 1);
    assert_eq!(third, first + 2);
}

#[test]
fn it_increases_with_the_system_clock() {
    let ids = IdGenerator::new(Arc::new(SystemClock::default()));
    let first = ids.next_id().parse::<i64>().unwrap();
    let second = ids.next_id().parse::<i64>().unwrap();
    assert!(second > first);
}
