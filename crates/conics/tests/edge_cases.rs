//! Edge cases and worked examples for the formula layer.

use std::f64::consts::{FRAC_PI_2, TAU};

use conics::{
    Branch, Clock, ConicsError, CurveKind, CurveParams, DEFAULT_DT, MotionParams, PathKind,
    Point, SampleRange, Vector, Wrap,
};

const TOLERANCE: f64 = 1e-12;

fn close(p: Point, x: f64, y: f64) -> bool {
    (p.x - x).abs() < TOLERANCE && (p.y - y).abs() < TOLERANCE
}

#[test]
fn ellipse_worked_example() {
    let ellipse = CurveParams::new(CurveKind::Ellipse).with_axes(3.0, 2.0);
    let points = ellipse.trace(&[0.0, FRAC_PI_2]);
    assert!(close(points[0], 3.0, 0.0));
    assert!(close(points[1], 0.0, 2.0));
}

#[test]
fn range_validation_examples() {
    assert_eq!(
        SampleRange::new(5.0, 2.0),
        Err(ConicsError::EmptyRange { min: 5.0, max: 2.0 })
    );

    let view = SampleRange::new(-6.0, 6.0).unwrap();
    assert_eq!((view.min(), view.max()), (-6.0, 6.0));
}

#[test]
fn range_error_message_is_readable() {
    let err = SampleRange::new(5.0, 2.0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "range min must be less than range max (got 5 to 2)"
    );
}

#[test]
fn parabola_clock_resets_to_exactly_minus_three() {
    let motion = MotionParams::new(PathKind::Parabola);
    let mut clock = Clock::new();
    clock.set_t(2.99);
    clock.start();

    let t = clock.tick(0.005, motion.wrap_rule()).unwrap();
    assert!((t - 2.995).abs() < TOLERANCE);

    let t = clock.tick(0.03, motion.wrap_rule()).unwrap();
    assert_eq!(t, -3.0);
}

#[test]
fn ellipse_clock_wraps_after_one_period() {
    let motion = MotionParams::new(PathKind::Ellipse).with_ellipse(3.0, 2.0, 1.0);
    let mut clock = Clock::new();
    clock.set_t(TAU - 0.01);
    clock.start();

    let t = clock.tick(0.03, motion.wrap_rule()).unwrap();
    assert!((t - 0.02).abs() < 1e-9, "t={t}");
}

#[test]
fn zero_omega_uses_full_turn_period() {
    let motion = MotionParams::new(PathKind::Ellipse).with_ellipse(3.0, 2.0, 0.0);
    assert_eq!(motion.wrap_rule(), Wrap::Period(TAU));

    // A motionless point still reports its position and zero derivatives.
    let k = motion.kinematics(12.0);
    assert!(close(k.position, 3.0, 0.0));
    assert_eq!(k.velocity, Vector::new(-0.0, 0.0));
    assert_eq!(k.speed(), 0.0);
}

#[test]
fn non_positive_dt_advances_by_default_step() {
    let mut clock = Clock::new();
    clock.start();
    clock.tick(0.0, Wrap::Period(TAU));
    assert!((clock.t() - DEFAULT_DT).abs() < TOLERANCE);
}

#[test]
fn degenerate_hyperbola_collapses_to_center_line() {
    let flat = CurveParams::new(CurveKind::Hyperbola)
        .with_axes(0.0, 1.0)
        .with_center(1.0, 0.0)
        .with_branch(Branch::Left);
    for p in flat.trace(&[0.0, 0.5, 1.0]) {
        assert_eq!(p.x, 1.0);
    }
}

#[test]
fn flipped_ellipse_traces_same_set() {
    let normal = CurveParams::new(CurveKind::Ellipse).with_axes(3.0, 2.0);
    let flipped = normal.with_axes(-3.0, 2.0);
    let p = normal.point_at(0.0);
    let q = flipped.point_at(std::f64::consts::PI);
    assert!(close(q, p.x, p.y));
}
