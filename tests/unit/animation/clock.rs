use super::*;

#[test]
fn builtin_clocks_map_time() {
    assert_eq!(Clock::identity().map(3.0), 3.0);
    assert_eq!(Clock::delay(1.0).map(3.0), 2.0);
    assert_eq!(Clock::speed(2.0).map(3.0), 6.0);
    assert_eq!(Clock::from_fn(|t| t * t).map(3.0), 9.0);
}

#[test]
fn after_applies_inner_first() {
    let nested = Clock::speed(2.0).after(&Clock::delay(1.0));
    assert_eq!(nested.map(3.0), 4.0);
    let reversed = Clock::delay(1.0).after(&Clock::speed(2.0));
    assert_eq!(reversed.map(3.0), 5.0);
}

#[test]
fn sameness_is_instance_identity() {
    let a = Clock::delay(1.0);
    let b = Clock::delay(1.0);
    assert!(a.same(&a.clone()));
    assert!(!a.same(&b));
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}
