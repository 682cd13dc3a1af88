use crate::animation::Sampled;
use crate::foundation::math::{Approx, float_eq};
use crate::style::{Color, Dash};

/// A gradient color stop at `percent` of the gradient length.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorStop {
    /// `0..=100`.
    pub percent: f64,
    /// Color.
    pub color: Color,
}

impl Approx for ColorStop {
    fn approx_eq(&self, other: &Self) -> bool {
        float_eq(self.percent, other.percent) && self.color.approx_eq(&other.color)
    }
}

/// Canonical line style handed to renderers. Each field is sampled on its own.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineStyle {
    /// Color.
    pub color: Sampled<Color>,
    /// Scaled by the transform's line scale.
    pub weight: Sampled<f64>,
    /// Dash pattern.
    pub dash: Sampled<Dash>,
}

impl LineStyle {
    /// Black, weight 1, solid.
    pub fn solid_black() -> Self {
        Self {
            color: Sampled::Const(Color::rgb(0, 0, 0)),
            weight: Sampled::Const(1.0),
            dash: Sampled::Const(Dash::solid()),
        }
    }

    /// No visible line.
    pub fn none() -> Self {
        Self {
            weight: Sampled::Const(0.0),
            ..Self::solid_black()
        }
    }

    /// True if any field has keyframes.
    pub fn is_animated(&self) -> bool {
        self.color.is_animated() || self.weight.is_animated() || self.dash.is_animated()
    }
}

/// Canonical fill style. The variant is structural and never varies in time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "fill", rename_all = "lowercase")]
pub enum FillStyle {
    /// No fill.
    None,
    /// One color.
    Solid {
        /// Color.
        color: Sampled<Color>,
    },
    /// From `begin` at the center to `end` at `radius`.
    RadialGradient {
        /// Radius.
        radius: Sampled<f64>,
        /// Start.
        begin: Sampled<Color>,
        /// End.
        end: Sampled<Color>,
    },
    /// Color stops along `orientation`.
    LinearGradient {
        /// Stops in rising percent order.
        stops: Sampled<Vec<ColorStop>>,
        /// `horizontal` or `vertical`.
        orientation: String,
    },
}

impl FillStyle {
    /// True for the absent color.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// True if any field has keyframes.
    pub fn is_animated(&self) -> bool {
        match self {
            Self::None => false,
            Self::Solid { color } => color.is_animated(),
            Self::RadialGradient { radius, begin, end } => {
                radius.is_animated() || begin.is_animated() || end.is_animated()
            }
            Self::LinearGradient { stops, .. } => stops.is_animated(),
        }
    }
}
