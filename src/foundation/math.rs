use crate::foundation::core::{Curve, PathPoint, Point};

/// Relative tolerance used when deciding that sampled values agree.
pub const REL_TOL: f64 = 1e-14;

/// Relative float comparison (no absolute floor, so `0.0` only matches `0.0`).
pub fn float_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= REL_TOL * a.abs().max(b.abs())
}

/// Structural equality within [`REL_TOL`], used for homogeneity collapse and key merging.
pub trait Approx {
    /// True when `self` and `other` agree within [`REL_TOL`].
    fn approx_eq(&self, other: &Self) -> bool;
}

impl Approx for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        float_eq(*self, *other)
    }
}

impl Approx for Point {
    fn approx_eq(&self, other: &Self) -> bool {
        float_eq(self.x, other.x) && float_eq(self.y, other.y)
    }
}

impl Approx for Curve {
    fn approx_eq(&self, other: &Self) -> bool {
        let (Curve::Arc { rx, ry, skew }, Curve::Arc { rx: ox, ry: oy, skew: os }) = (self, other);
        float_eq(*rx, *ox) && float_eq(*ry, *oy) && float_eq(*skew, *os)
    }
}

impl Approx for PathPoint {
    fn approx_eq(&self, other: &Self) -> bool {
        float_eq(self.x, other.x) && float_eq(self.y, other.y) && self.curve.approx_eq(&other.curve)
    }
}

impl<T: Approx> Approx for Option<T> {
    fn approx_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.approx_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Approx> Approx for Vec<T> {
    fn approx_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.approx_eq(b))
    }
}

impl<A: Approx, B: Approx> Approx for (A, B) {
    fn approx_eq(&self, other: &Self) -> bool {
        self.0.approx_eq(&other.0) && self.1.approx_eq(&other.1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
