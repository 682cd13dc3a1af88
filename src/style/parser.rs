use crate::foundation::error::{ToonError, ToonResult};
use crate::style::fields::{FillFields, LineFields};
use crate::style::resolved::ColorStop;
use crate::style::{Color, Dash};
use crate::value::Value;

/// Validates and promotes informal style descriptions into canonical pieces.
///
/// `line_style` and `fill_style` split a description into fields that may still be
/// animated; the remaining methods parse one concrete field value at one instant.
pub trait StyleParser {
    /// Split a line style description into fields.
    fn line_style(&self, v: &Value) -> ToonResult<LineFields> {
        LineFields::classify(v)
    }

    /// Split a fill style description into kind and fields.
    fn fill_style(&self, v: &Value) -> ToonResult<FillFields> {
        FillFields::classify(v)
    }

    /// Color.
    fn color(&self, v: &Value) -> ToonResult<Color> {
        Color::from_value(v)
    }

    /// A non-negative line weight.
    fn weight(&self, v: &Value) -> ToonResult<f64> {
        let w = v.number("line weight")?;
        if w.is_finite() && w >= 0.0 {
            Ok(w)
        } else {
            Err(ToonError::validation(format!(
                "line weight must be non-negative: {w}"
            )))
        }
    }

    /// A dash name or a list of on/off lengths.
    fn dash(&self, v: &Value) -> ToonResult<Dash> {
        match v {
            Value::Null => Ok(Dash::solid()),
            Value::Text(name) => Dash::named(name).ok_or_else(|| {
                ToonError::validation(format!("unknown dash pattern: {name:?}"))
            }),
            Value::List(items) => Dash::lengths(
                items
                    .iter()
                    .map(|d| d.number("dash length"))
                    .collect::<ToonResult<_>>()?,
            ),
            other => Err(other.not_concrete("dash", "a dash name or list of lengths")),
        }
    }

    /// A positive radius.
    fn radius(&self, v: &Value) -> ToonResult<f64> {
        let r = v.number("radius")?;
        if r.is_finite() && r > 0.0 {
            Ok(r)
        } else {
            Err(ToonError::validation(format!("radius must be positive: {r}")))
        }
    }

    /// Gradient stops as `[[percent, color], ...]` with percents rising through `0..=100`.
    fn stops(&self, v: &Value) -> ToonResult<Vec<ColorStop>> {
        let Value::List(items) = v else {
            return Err(v.not_concrete("gradient colors", "a list of [percent, color] pairs"));
        };
        let mut stops = Vec::with_capacity(items.len());
        for item in items {
            let stop = match item {
                Value::List(pair) if pair.len() == 2 => ColorStop {
                    percent: pair[0].number("gradient stop")?,
                    color: self.color(&pair[1])?,
                },
                other => {
                    return Err(ToonError::validation(format!(
                        "gradient stop must be a [percent, color] pair, got {other:?}"
                    )));
                }
            };
            if !(0.0..=100.0).contains(&stop.percent) {
                return Err(ToonError::validation(format!(
                    "gradient stop percent must be within 0..=100: {}",
                    stop.percent
                )));
            }
            if stops
                .last()
                .is_some_and(|prev: &ColorStop| prev.percent > stop.percent)
            {
                return Err(ToonError::validation("gradient stops must be in increasing order"));
            }
            stops.push(stop);
        }
        if stops.is_empty() {
            return Err(ToonError::validation("gradient needs at least one color stop"));
        }
        Ok(stops)
    }
}

/// The stock parser; optionally maps every color to its gray level.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicStyleParser {
    /// Map colors to their gray level.
    pub grayscale: bool,
}

impl BasicStyleParser {
    /// An empty value.
    pub fn new(grayscale: bool) -> Self {
        Self { grayscale }
    }
}

impl StyleParser for BasicStyleParser {
    fn color(&self, v: &Value) -> ToonResult<Color> {
        let c = Color::from_value(v)?;
        Ok(if self.grayscale { c.grayscale() } else { c })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/parser.rs"]
mod tests;
