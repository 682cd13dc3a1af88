use crate::foundation::error::{ToonError, ToonResult};
use crate::foundation::math::Approx;

/// Dash pattern as alternating on/off lengths; empty means solid.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dash(pub Vec<f64>);

impl Dash {
    /// No gaps.
    pub fn solid() -> Self {
        Self(Vec::new())
    }

    /// `solid`, `dotted` or `dashed`.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "solid" => Some(Self::solid()),
            "dotted" => Some(Self(vec![1.0, 1.0])),
            "dashed" => Some(Self(vec![4.0, 4.0])),
            _ => None,
        }
    }

    /// An explicit pattern: an even number of positive lengths.
    pub fn lengths(lengths: Vec<f64>) -> ToonResult<Self> {
        if let Some(bad) = lengths.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
            return Err(ToonError::validation(format!(
                "dash lengths must be positive: {bad}"
            )));
        }
        if lengths.len() % 2 != 0 {
            return Err(ToonError::validation(format!(
                "dash descriptor must have an even number of elements: {lengths:?}"
            )));
        }
        Ok(Self(lengths))
    }

    /// True for no gaps.
    pub fn is_solid(&self) -> bool {
        self.0.is_empty()
    }
}

impl Approx for Dash {
    fn approx_eq(&self, other: &Self) -> bool {
        self.0.approx_eq(&other.0)
    }
}
