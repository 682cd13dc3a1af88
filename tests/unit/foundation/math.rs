use super::*;

#[test]
fn float_eq_is_relative() {
    assert!(float_eq(1.0, 1.0 + 1e-16));
    assert!(float_eq(1e6, 1e6 * (1.0 + 5e-15)));
    assert!(!float_eq(1.0, 1.0 + 1e-12));
    assert!(!float_eq(0.0, 1e-300));
    assert!(float_eq(0.0, 0.0));
}

#[test]
fn approx_recurses_into_containers() {
    let a = vec![PathPoint::new(1.0, 2.0), PathPoint::new(3.0, 4.0)];
    let mut b = a.clone();
    assert!(a.approx_eq(&b));
    b[1].y = 4.1;
    assert!(!a.approx_eq(&b));
    assert!(!a.approx_eq(&a[..1].to_vec()));
}

#[test]
fn approx_distinguishes_curve_presence() {
    let plain = PathPoint::new(1.0, 1.0);
    let arc = plain.with_curve(Curve::Arc {
        rx: 1.0,
        ry: 1.0,
        skew: 0.0,
    });
    assert!(!plain.approx_eq(&arc));
    assert!(arc.approx_eq(&arc));
}
