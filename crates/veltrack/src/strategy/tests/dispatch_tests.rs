use super::*;
use veltrack_input::NANOS_PER_MS;

fn feed(strategy: &mut impl VelocityStrategy) {
    let both = PointerIdBits::from_ids([0, 4]);
    for (time_ms, a, b) in [
        (0i64, 0.0f32, 50.0f32),
        (8, 6.0, 47.0),
        (17, 14.0, 41.0),
        (25, 21.0, 36.0),
    ] {
        strategy.add_movement(time_ms * NANOS_PER_MS, both, &[a, b]);
    }
}

fn direct(kind: VelocityTrackerStrategy) -> Strategy {
    use VelocityTrackerStrategy as Kind;

    match kind {
        Kind::Impulse => Strategy::Impulse(ImpulseStrategy::new(false)),
        Kind::Lsq1 => Strategy::LeastSquares(LeastSquaresStrategy::new(1, Weighting::None)),
        Kind::Lsq2 => Strategy::LeastSquares(LeastSquaresStrategy::new(2, Weighting::None)),
        Kind::Lsq3 => Strategy::LeastSquares(LeastSquaresStrategy::new(3, Weighting::None)),
        Kind::Wlsq2Delta => Strategy::LeastSquares(LeastSquaresStrategy::new(2, Weighting::Delta)),
        Kind::Wlsq2Central => {
            Strategy::LeastSquares(LeastSquaresStrategy::new(2, Weighting::Central))
        }
        Kind::Wlsq2Recent => {
            Strategy::LeastSquares(LeastSquaresStrategy::new(2, Weighting::Recent))
        }
        Kind::Int1 => Strategy::Integrating(IntegratingStrategy::new(1)),
        Kind::Int2 => Strategy::Integrating(IntegratingStrategy::new(2)),
        Kind::Legacy => Strategy::Legacy(LegacyStrategy::new()),
        Kind::Default => unreachable!("not a concrete strategy"),
    }
}

#[test]
fn every_kind_builds_the_matching_variant() {
    for kind in VelocityTrackerStrategy::CONCRETE {
        let built = Strategy::new(kind, false, TraceConfig::DISABLED);
        let expected = direct(kind);
        assert_eq!(
            std::mem::discriminant(&built),
            std::mem::discriminant(&expected),
            "{kind}"
        );
        match (&built, &expected) {
            (Strategy::LeastSquares(built), Strategy::LeastSquares(expected)) => {
                assert_eq!(built.degree(), expected.degree(), "{kind}");
                assert_eq!(built.weighting(), expected.weighting(), "{kind}");
            }
            (Strategy::Integrating(built), Strategy::Integrating(expected)) => {
                assert_eq!(built.degree(), expected.degree(), "{kind}");
            }
            _ => {}
        }
    }
}

#[test]
fn forwards_every_operation_to_the_variant() {
    for kind in VelocityTrackerStrategy::CONCRETE {
        let mut dispatched = Strategy::new(kind, false, TraceConfig::DISABLED);
        let mut expected = direct(kind);
        feed(&mut dispatched);
        feed(&mut expected);

        for id in [0, 4] {
            assert!(dispatched.estimator(id).is_some(), "{kind} pointer {id}");
            assert_eq!(dispatched.estimator(id), expected.estimator(id), "{kind}");
        }

        dispatched.clear_pointers(PointerIdBits::with_id(0));
        expected.clear_pointers(PointerIdBits::with_id(0));

        assert_eq!(dispatched.estimator(0), None, "{kind}");
        assert_eq!(dispatched.estimator(4), expected.estimator(4), "{kind}");
    }
}

#[test]
fn differential_axis_reaches_the_impulse_strategy() {
    let Strategy::Impulse(impulse) = Strategy::new(
        VelocityTrackerStrategy::Impulse,
        true,
        TraceConfig::DISABLED,
    ) else {
        panic!("impulse kind built another strategy");
    };
    assert!(impulse.delta_values());
}

#[test]
#[should_panic(expected = "Cannot instantiate")]
fn default_kind_cannot_be_instantiated() {
    Strategy::new(VelocityTrackerStrategy::Default, false, TraceConfig::DISABLED);
}
