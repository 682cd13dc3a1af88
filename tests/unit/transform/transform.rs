use super::*;
use crate::foundation::core::Affine;
use crate::foundation::error::ToonError;
use crate::value::sym;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

fn locked(t: &Transform) -> Transform {
    t.resolve(&Resolver::identity(), &Clock::identity(), false)
        .unwrap()
}

#[test]
fn nest_applies_inner_first() {
    let t = locked(&Transform::translate(10.0, 0.0).nest(&Transform::scale(2.0)));
    let m = t.mappings(None, Point::ZERO).unwrap();
    assert!(close(m.absolute(Point::new(1.0, 1.0)), Point::new(12.0, 2.0)));
}

#[test]
fn nesting_is_associative() {
    let a = Transform::rotate(30.0);
    let b = Transform::translate(5.0, -2.0);
    let c = Transform::scale(3.0);
    let left = locked(&a.nest(&b).nest(&c));
    let right = locked(&a.nest(&b.nest(&c)));
    let p = Point::new(1.5, -0.5);
    let ml = left.mappings(None, Point::ZERO).unwrap();
    let mr = right.mappings(None, Point::ZERO).unwrap();
    assert!(close(ml.absolute(p), mr.absolute(p)));
    assert!((ml.linescale() - mr.linescale()).abs() < 1e-12);
}

#[test]
fn builtin_linescales() {
    let scale_of = |t: Transform| {
        locked(&t)
            .mappings(None, Point::new(3.0, 4.0))
            .unwrap()
            .linescale()
    };
    assert_eq!(scale_of(Transform::translate(1.0, 2.0)), 1.0);
    assert_eq!(scale_of(Transform::rotate(37.0)), 1.0);
    assert_eq!(scale_of(Transform::scale(2.5)), 2.5);
    assert_eq!(scale_of(Transform::zoom(2.5)), 1.0);
    assert_eq!(scale_of(Transform::stretch(2.5)), 1.0);
    assert_eq!(scale_of(Transform::scale(2.0).nest(&Transform::scale(3.0))), 6.0);
}

#[test]
fn mirrored_scale_keeps_positive_linescale() {
    let m = locked(&Transform::scale(-2.0))
        .mappings(None, Point::ZERO)
        .unwrap();
    assert_eq!(m.linescale(), 2.0);
    assert!(close(m.absolute(Point::new(1.0, 1.0)), Point::new(-2.0, -2.0)));

    let flip = Transform::uniform([("k", -3.0)], |p: &Params| {
        Ok(Kernel::affine(
            Affine::scale(p.number("k")?),
            KernelScale::Fixed(p.number("k")?),
        ))
    });
    let m = locked(&flip).mappings(None, Point::ZERO).unwrap();
    assert_eq!(m.linescale(), 3.0);
}

#[test]
fn positional_relative_preserves_displacement() {
    let t = locked(&Transform::stretch(2.0));
    let origin = Point::new(10.0, 5.0);
    let m = t.mappings(None, origin).unwrap();
    let p = Point::new(13.0, 1.0);
    assert!(close(m.absolute(origin), Point::new(20.0, 10.0)));
    let kept = (m.relative(p) - m.relative(origin)) - (p - origin);
    assert!(kept.hypot() < 1e-9);
    assert!(close(m.relative(p), Point::new(23.0, 6.0)));
}

#[test]
fn uniform_relative_equals_absolute() {
    let t = locked(&Transform::rotate(45.0).nest(&Transform::translate(1.0, 2.0)));
    let m = t.mappings(None, Point::new(7.0, 7.0)).unwrap();
    let p = Point::new(-3.0, 2.0);
    assert!(close(m.relative(p), m.absolute(p)));
}

#[test]
fn derived_scale_from_finite_differences() {
    let anisotropic = Transform::uniform([("sx", 3.0), ("sy", 4.0)], |p: &Params| {
        let (sx, sy) = (p.number("sx")?, p.number("sy")?);
        Ok(Kernel::affine(
            Affine::new([sx, 0.0, 0.0, sy, 0.0, 0.0]),
            KernelScale::Derived,
        ))
    });
    let m = locked(&anisotropic).mappings(None, Point::ZERO).unwrap();
    assert!((m.linescale() - (12.5f64).sqrt()).abs() < 1e-12);
}

#[test]
fn parametric_is_positional() {
    let t = locked(&Transform::parametric(|x| 2.0 * x, |y| y + 1.0));
    assert_eq!(t.flavor(), Flavor::Positional);
    let m = t.mappings(None, Point::new(1.0, 1.0)).unwrap();
    assert!(close(m.absolute(Point::new(3.0, 3.0)), Point::new(6.0, 4.0)));
    assert!(close(m.relative(Point::new(3.0, 3.0)), Point::new(4.0, 4.0)));
    assert_eq!(m.linescale(), 1.0);
}

#[test]
fn resolve_substitutes_and_locks() {
    let t = Transform::scale(sym("k"));
    assert!(matches!(
        locked(&t).mappings(None, Point::ZERO),
        Err(ToonError::Resolution(_))
    ));
    let first = Resolver::identity().layer(Bindings::one("k", 2.0));
    let resolved = t.resolve(&first, &Clock::identity(), false).unwrap();
    assert!(resolved.is_locked());
    assert!(!t.is_locked());

    // A locked node ignores later resolvers.
    let second = Resolver::identity().layer(Bindings::one("k", 5.0));
    let again = resolved.resolve(&second, &Clock::identity(), false).unwrap();
    assert_eq!(again.mappings(None, Point::ZERO).unwrap().linescale(), 2.0);

    let open = t.resolve(&first, &Clock::identity(), true).unwrap();
    assert!(!open.is_locked());
}

#[test]
fn locked_outer_wraps_unlocked_inner() {
    let outer = locked(&Transform::translate(1.0, 0.0));
    let inner = Transform::scale(sym("k"));
    let chain = outer.nest(&inner);
    let r = Resolver::identity().layer(Bindings::one("k", 4.0));
    let resolved = chain.resolve(&r, &Clock::identity(), false).unwrap();
    let m = resolved.mappings(None, Point::ZERO).unwrap();
    assert!(close(m.absolute(Point::new(1.0, 1.0)), Point::new(5.0, 4.0)));
}

#[test]
fn animated_parameters_follow_the_clock() {
    let spin = Transform::rotate(Animated::over_time(0.25, |t| 90.0 * t)).animated(0.5);
    let t = spin
        .resolve(&Resolver::identity(), &Clock::speed(2.0), false)
        .unwrap();
    // Global t = 0.5 is local 1.0: a quarter turn.
    let m = t.mappings(Some(0.5), Point::ZERO).unwrap();
    assert!(close(m.absolute(Point::new(1.0, 0.0)), Point::new(0.0, 1.0)));
    // Own interval 0.5 over a local span of 4 gives 8.
    assert_eq!(t.n_intervals(0.0, 2.0).unwrap(), 8);
    assert!(matches!(
        t.mappings(None, Point::ZERO),
        Err(ToonError::Animation(_))
    ));
}

#[test]
fn n_intervals_takes_finest_level() {
    let t = locked(
        &Transform::translate(0.0, 0.0)
            .animated(1.0)
            .nest(&Transform::scale(1.0).animated(0.1)),
    );
    assert_eq!(t.n_intervals(0.0, 2.0).unwrap(), 20);
    assert_eq!(locked(&Transform::identity()).n_intervals(0.0, 2.0).unwrap(), 0);
}

#[test]
fn animated_parameters_count_their_own_interval() {
    let slide = Transform::translate(Animated::over_time(0.5, |t| t * 10.0), 0.0);
    let t = slide
        .resolve(&Resolver::identity(), &Clock::speed(2.0), false)
        .unwrap();
    // Local span of 2 over 0.5.
    assert_eq!(t.n_intervals(0.0, 1.0).unwrap(), 4);
    let m = t.mappings(Some(0.5), Point::ZERO).unwrap();
    assert!(close(m.absolute(Point::ZERO), Point::new(10.0, 0.0)));

    let outer = locked(&Transform::scale(2.0).animated(0.1));
    assert_eq!(outer.nest(&t).n_intervals(0.0, 1.0).unwrap(), 10);
}

#[test]
fn absurd_sample_counts_are_refused() {
    let jitter = locked(&Transform::translate(0.0, 0.0).animated(1e-300));
    assert!(matches!(
        jitter.n_intervals(0.0, 1.0),
        Err(ToonError::Animation(_))
    ));
}
