use crate::foundation::error::{ToonError, ToonResult};

pub use kurbo::{Affine, Point, Vec2};

/// Segment kind connecting the previous point of a path to this one.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "curve", rename_all = "lowercase")]
pub enum Curve {
    /// Elliptical arc.
    Arc {
        /// Radius perpendicular to the chord; may be negative.
        rx: f64,
        /// Radius parallel to the chord.
        ry: f64,
        /// Rotation of the radii in degrees.
        skew: f64,
    },
}

impl Curve {
    /// Build a validated arc descriptor.
    pub fn arc(rx: f64, ry: f64, skew: f64) -> ToonResult<Self> {
        if !rx.is_finite() {
            return Err(ToonError::validation(format!(
                "perpendicular arc radius must be finite: {rx}"
            )));
        }
        if !(ry.is_finite() && ry >= 0.0) {
            return Err(ToonError::validation(format!(
                "parallel arc radius must be non-negative: {ry}"
            )));
        }
        if !(skew > -90.0 && skew < 90.0) {
            return Err(ToonError::validation(format!(
                "arc skew must be between -90 and 90 degrees, exclusive: {skew}"
            )));
        }
        Ok(Self::Arc { rx, ry, skew })
    }

    pub(crate) fn scaled(self, k: f64) -> Self {
        match self {
            Self::Arc { rx, ry, skew } => Self::Arc {
                rx: rx * k,
                ry: ry * k,
                skew,
            },
        }
    }
}

/// A path vertex, optionally tagged with the curve that reaches it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathPoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    #[serde(flatten)]
    /// Curve from the previous vertex; `None` for a straight segment.
    pub curve: Option<Curve>,
}

impl PathPoint {
    /// A vertex reached by a straight segment.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, curve: None }
    }

    /// Attach the curve that reaches this vertex.
    pub fn with_curve(self, curve: Curve) -> Self {
        Self {
            curve: Some(curve),
            ..self
        }
    }

    /// The position without the curve.
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub(crate) fn validate(self) -> ToonResult<Self> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(ToonError::validation(format!(
                "point components must be finite: ({}, {})",
                self.x, self.y
            )));
        }
        if let Some(Curve::Arc { rx, ry, skew }) = self.curve {
            Curve::arc(rx, ry, skew)?;
        }
        Ok(self)
    }
}

impl From<Point> for PathPoint {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for PathPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
