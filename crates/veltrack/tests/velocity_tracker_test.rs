//! Behavior of the tracker across every strategy, driven through the public
//! API the way an input pipeline would use it.

use veltrack::prelude::*;
use veltrack::{ComputedVelocity, MAX_DEGREE};
use veltrack_input::{PointerEventKind, NANOS_PER_MS};
use veltrack_testing::{assert_approx_eq, assert_near_by_fraction, MotionStream, PlanarSample};

fn ms(value: i64) -> i64 {
    value * NANOS_PER_MS
}

fn feed_x(tracker: &mut VelocityTracker, id: PointerId, samples: &[(i64, f32)]) {
    for &(time_ms, x) in samples {
        tracker.add_movement(ms(time_ms), PointerIdBits::with_id(id), [(Axis::X, [x])]);
    }
}

fn linear(count: i64, start: f32, per_ms: f32) -> Vec<(i64, f32)> {
    (0..count)
        .map(|i| (i * 10, start + per_ms * (i * 10) as f32))
        .collect()
}

#[test]
fn end_to_end_linear_drag() {
    let mut tracker = VelocityTracker::with_strategy(VelocityTrackerStrategy::Lsq2);
    feed_x(&mut tracker, 0, &[(0, 0.0), (10, 10.0), (20, 20.0), (30, 30.0)]);

    let velocity = tracker.velocity(Axis::X, 0).expect("velocity");
    assert_near_by_fraction(velocity, 1000.0, 0.001);

    let estimator = tracker.estimator(Axis::X, 0).expect("estimator");
    assert_approx_eq(estimator.confidence, 1.0, 0.001, "confidence");
}

#[test]
fn read_queries_are_idempotent() {
    let samples = [(0, 0.0), (6, 2.5), (14, 9.0), (22, 13.0), (31, 26.0)];
    for strategy in VelocityTrackerStrategy::CONCRETE {
        let mut tracker = VelocityTracker::with_strategy(strategy);
        feed_x(&mut tracker, 0, &samples);

        let first = tracker.estimator(Axis::X, 0);
        let second = tracker.estimator(Axis::X, 0);
        assert!(first.is_some(), "{strategy}");
        assert_eq!(
            first.map(|e| e.coeff.map(f32::to_bits)),
            second.map(|e| e.coeff.map(f32::to_bits)),
            "{strategy}"
        );
        assert_eq!(first, second, "{strategy}");
    }
}

#[test]
fn degree_follows_available_samples() {
    let cases = [
        (VelocityTrackerStrategy::Lsq1, 1),
        (VelocityTrackerStrategy::Lsq2, 2),
        (VelocityTrackerStrategy::Lsq3, 3),
        (VelocityTrackerStrategy::Wlsq2Recent, 2),
    ];
    for (strategy, requested) in cases {
        let mut tracker = VelocityTracker::with_strategy(strategy);
        // One sample more than the degree needs, capped where cubic fits
        // over a 20ms window stop being numerically meaningful.
        let samples = linear((requested as i64 + 1).min(3), 4.0, 1.0);
        for (n, &sample) in samples.iter().enumerate() {
            feed_x(&mut tracker, 0, &[sample]);
            let estimator = tracker.estimator(Axis::X, 0).expect("estimator");
            assert_eq!(estimator.degree, n, "{strategy} with {} samples", n + 1);
            if n == 0 {
                assert_eq!(estimator.coeff[0], 4.0, "{strategy}");
            }
        }
    }
}

#[test]
fn stale_history_does_not_leak_into_new_motion() {
    for strategy in VelocityTrackerStrategy::CONCRETE {
        let mut tracker = VelocityTracker::with_strategy(strategy);
        feed_x(&mut tracker, 0, &[(0, 0.0), (10, 500.0)]);
        feed_x(&mut tracker, 0, &[(60, 42.0)]);

        let estimator = tracker.estimator(Axis::X, 0).expect("estimator");
        assert_eq!(estimator.coeff[0], 42.0, "{strategy}");
        match strategy {
            // Impulse always reports degree 2, with zero velocity for one sample.
            VelocityTrackerStrategy::Impulse => assert_eq!(estimator.coeff[1], 0.0),
            _ => assert_eq!(estimator.degree, 0, "{strategy}"),
        }
    }
}

#[test]
fn least_squares_recovers_linear_motion() {
    for strategy in [
        VelocityTrackerStrategy::Lsq1,
        VelocityTrackerStrategy::Lsq2,
        VelocityTrackerStrategy::Wlsq2Delta,
        VelocityTrackerStrategy::Wlsq2Central,
        VelocityTrackerStrategy::Wlsq2Recent,
    ] {
        let mut tracker = VelocityTracker::with_strategy(strategy);
        feed_x(&mut tracker, 0, &linear(8, -20.0, 0.75));

        let estimator = tracker.estimator(Axis::X, 0).expect("estimator");
        assert!(estimator.degree >= 1, "{strategy}");
        assert_near_by_fraction(estimator.coeff[1], 750.0, 0.01);
        assert_approx_eq(estimator.confidence, 1.0, 0.01, strategy.name());
    }
}

#[test]
fn impulse_two_samples_give_the_slope() {
    let mut tracker = VelocityTracker::with_strategy(VelocityTrackerStrategy::Impulse);
    feed_x(&mut tracker, 0, &[(0, 3.0), (16, 35.0)]);

    let velocity = tracker.velocity(Axis::X, 0).expect("velocity");
    assert_approx_eq(velocity, 2000.0, 0.01, "two-point slope");
}

#[test]
fn stationary_pointer_degrades_gracefully() {
    for strategy in VelocityTrackerStrategy::CONCRETE {
        let mut tracker = VelocityTracker::with_strategy(strategy);
        feed_x(&mut tracker, 0, &[(0, 9.0), (10, 9.0), (20, 9.0), (30, 9.0), (40, 9.0)]);

        let estimator = tracker.estimator(Axis::X, 0).expect("estimator");
        assert!(estimator.degree <= MAX_DEGREE, "{strategy}");
        assert_approx_eq(estimator.coeff[0], 9.0, 0.01, strategy.name());
    }
}

#[test]
fn removing_one_pointer_leaves_others_untouched() {
    let both = PointerIdBits::from_ids([2, 7]);
    for strategy in VelocityTrackerStrategy::CONCRETE {
        let mut tracker = VelocityTracker::with_strategy(strategy);
        for (time, a, b) in [(0, 0.0f32, 0.0f32), (10, 10.0, -4.0), (20, 20.0, -8.0)] {
            tracker.add_movement(ms(time), both, [(Axis::X, [a, b])]);
        }
        let before = tracker.estimator(Axis::X, 7);

        tracker.clear_pointers(PointerIdBits::with_id(2));

        assert_eq!(tracker.estimator(Axis::X, 2), None, "{strategy}");
        assert_eq!(tracker.estimator(Axis::X, 7), before, "{strategy}");
    }
}

#[test]
fn two_finger_gesture_tracks_each_finger() {
    let left: Vec<PlanarSample> = (0..5)
        .map(|i| PlanarSample::at_ms(i * 10, 100.0 - 5.0 * i as f32, 300.0))
        .collect();
    let right: Vec<PlanarSample> = (0..5)
        .map(|i| PlanarSample::at_ms(i * 10, 200.0 + 5.0 * i as f32, 300.0))
        .collect();

    let mut tracker = VelocityTracker::new();
    let mut snapshot = ComputedVelocity::new();
    for event in MotionStream::multi_touch(&[left, right]) {
        let lifting = matches!(event.action(), MotionAction::PointerUp { .. });
        if lifting {
            snapshot = tracker.computed_velocity(1000, 8000.0);
        }
        tracker.add_motion_event(&event);
    }

    assert_near_by_fraction(snapshot.velocity(Axis::X, 0).expect("left"), -500.0, 0.001);
    assert_near_by_fraction(snapshot.velocity(Axis::X, 1).expect("right"), 500.0, 0.001);
    assert_approx_eq(snapshot.velocity(Axis::Y, 0).expect("left y"), 0.0, 1.0, "y");
}

#[test]
fn fling_velocity_is_clamped() {
    let mut tracker = VelocityTracker::new();
    let stream = MotionStream::touch(&[
        PlanarSample::at_ms(0, 0.0, 0.0),
        PlanarSample::at_ms(8, 80.0, 0.0),
        PlanarSample::at_ms(16, 160.0, 0.0),
    ]);
    for event in stream {
        tracker.add_motion_event(&event);
    }

    let computed = tracker.computed_velocity(1000, 4000.0);
    assert_eq!(computed.velocity(Axis::X, 0), Some(4000.0));
}

#[test]
fn single_pointer_adapter_feeds_the_tracker() {
    let mut tracker = VelocityTracker::new();
    let events = [
        (PointerEventKind::Down, 0, 0.0),
        (PointerEventKind::Move, 10, 20.0),
        (PointerEventKind::Move, 20, 40.0),
        (PointerEventKind::Up, 20, 40.0),
    ];
    for (kind, time, x) in events {
        let event = MotionEvent::from_pointer_kind(kind, 4, ms(time), x, 0.0).expect("event");
        tracker.add_motion_event(&event);
    }

    assert_near_by_fraction(tracker.velocity(Axis::X, 4).expect("velocity"), 2000.0, 0.001);
    assert_eq!(tracker.active_pointer_id(), Some(4));
}
