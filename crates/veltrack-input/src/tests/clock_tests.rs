use super::*;
use std::time::Duration;

#[test]
fn nanos_are_relative_to_origin() {
    let origin = Instant::now();
    let clock = EventClock::starting_at(origin);

    assert_eq!(clock.nanos_at(origin), 0);
    assert_eq!(clock.nanos_at(origin + Duration::from_millis(16)), 16_000_000);
}

#[test]
fn instants_before_the_origin_clamp_to_zero() {
    let earlier = Instant::now();
    let clock = EventClock::starting_at(earlier + Duration::from_millis(5));

    assert_eq!(clock.nanos_at(earlier), 0);
    assert_eq!(clock.origin(), earlier + Duration::from_millis(5));
}

#[test]
fn clock_is_monotonic() {
    let clock = EventClock::new();
    let first = clock.now_nanos();
    let second = clock.now_nanos();
    assert!(second >= first);
}
