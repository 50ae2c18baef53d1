//! Approximate-equality assertions for floating point estimates.

/// Assert that a value is within an absolute tolerance of the expected value.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a value is within `fraction` of the magnitude of the expected value.
///
/// Velocities span several orders of magnitude, so a relative bound reads
/// better than an absolute one.
pub fn assert_near_by_fraction(actual: f32, expected: f32, fraction: f32) {
    let tolerance = (expected * fraction).abs();
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {}%, got {}",
        expected,
        fraction * 100.0,
        actual
    );
}
