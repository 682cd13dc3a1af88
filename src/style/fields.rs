use crate::animation::Animated;
use crate::foundation::error::{ToonError, ToonResult};
use crate::style::Dash;
use crate::style::color::NO_COLOR;
use crate::value::Value;

/// A line style split into independently animatable fields, each still unparsed.
#[derive(Clone, Debug, PartialEq)]
pub struct LineFields {
    /// Color.
    pub color: Value,
    /// Unscaled line weight.
    pub weight: Value,
    /// Dash pattern.
    pub dash: Value,
}

impl Default for LineFields {
    fn default() -> Self {
        Self {
            color: Value::from("black"),
            weight: Value::Number(1.0),
            dash: Value::from("solid"),
        }
    }
}

impl LineFields {
    /// Split an informal line style description into fields.
    ///
    /// Accepts `Null` (defaults), `false` (zero weight), a bare color, weight or dash, a
    /// list of those in any order, a `{color, weight, dash}` map, or an animated value
    /// producing any of these.
    pub fn classify(v: &Value) -> ToonResult<Self> {
        let mut fields = Self::default();
        match v {
            Value::Null => {}
            Value::Map(map) => {
                for (key, field) in map {
                    match key.as_str() {
                        "color" => fields.color = field.clone(),
                        "weight" => fields.weight = field.clone(),
                        "dash" => fields.dash = field.clone(),
                        other => {
                            return Err(ToonError::validation(format!(
                                "unknown line style field `{other}`"
                            )));
                        }
                    }
                }
            }
            Value::Animated(a) => {
                let pick = |a: &Animated, f: fn(LineFields) -> Value| {
                    Value::Animated(a.then(move |v| Ok(f(LineFields::classify(&v)?))))
                };
                fields.color = pick(a, |l| l.color);
                fields.weight = pick(a, |l| l.weight);
                fields.dash = pick(a, |l| l.dash);
            }
            Value::List(items) if !is_dash_lengths(items) => {
                for item in items {
                    fields.populate(item)?;
                }
            }
            other => fields.populate(other)?,
        }
        Ok(fields)
    }

    fn populate(&mut self, v: &Value) -> ToonResult<()> {
        match v {
            Value::Bool(false) => self.weight = Value::Number(0.0),
            Value::Number(_) => self.weight = v.clone(),
            Value::Text(s) if Dash::named(s).is_some() => self.dash = v.clone(),
            Value::Text(_) | Value::Color(_) => self.color = v.clone(),
            Value::List(items) if is_dash_lengths(items) => self.dash = v.clone(),
            other => {
                return Err(match other {
                    Value::Symbol(_) | Value::Func(_) => {
                        other.not_concrete("line style field", "a color, weight or dash")
                    }
                    _ => ToonError::validation(format!(
                        "line style parameter not recognized: {other:?}"
                    )),
                });
            }
        }
        Ok(())
    }
}

fn is_dash_lengths(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(|v| matches!(v, Value::Number(_)))
}

/// A fill style split into its structural kind and animatable fields.
#[derive(Clone, Debug, PartialEq)]
pub enum FillFields {
    /// No fill.
    None,
    /// One color.
    Solid {
        /// Color.
        color: Value,
    },
    /// From `begin` at the center to `end` at `radius`.
    RadialGradient {
        /// Radius.
        radius: Value,
        /// Start.
        begin: Value,
        /// End.
        end: Value,
    },
    /// Color stops along `orientation`.
    LinearGradient {
        /// `[[percent, color], ...]`.
        stops: Value,
        /// `horizontal` or `vertical`.
        orientation: String,
    },
}

impl FillFields {
    /// Split an informal fill description into kind and fields.
    ///
    /// The kind tag must be a literal: a fill whose kind would vary in time is rejected.
    pub fn classify(v: &Value) -> ToonResult<Self> {
        match v {
            Value::Null | Value::Bool(false) => Ok(Self::None),
            Value::Text(s) if NO_COLOR.contains(&s.as_str()) => Ok(Self::None),
            Value::Text(_) | Value::Color(_) => Ok(Self::Solid { color: v.clone() }),
            Value::Map(map) => {
                let field = |name: &str, default: Value| map.get(name).cloned().unwrap_or(default);
                match map.get("fill") {
                    Some(Value::Text(kind)) => match kind.as_str() {
                        "none" => Ok(Self::None),
                        "solid" => Ok(Self::Solid {
                            color: field("color", "black".into()),
                        }),
                        "radialgradient" => Ok(Self::RadialGradient {
                            radius: field("radius", 100.into()),
                            begin: field("begin", "black".into()),
                            end: field("end", "transparent".into()),
                        }),
                        "lineargradient" => Ok(Self::LinearGradient {
                            stops: field(
                                "colors",
                                Value::List(vec![
                                    Value::List(vec![0.into(), "black".into()]),
                                    Value::List(vec![100.into(), "transparent".into()]),
                                ]),
                            ),
                            orientation: match map.get("orientation") {
                                None => "up-down".to_owned(),
                                Some(Value::Text(o)) => o.clone(),
                                Some(other) => {
                                    return Err(ToonError::validation(format!(
                                        "gradient orientation must be a literal string: {other:?}"
                                    )));
                                }
                            },
                        }),
                        other => Err(ToonError::validation(format!(
                            "unrecognized fill kind: {other:?}"
                        ))),
                    },
                    Some(tag @ (Value::Animated(_) | Value::Func(_))) => Err(ToonError::validation(
                        format!("the fill kind cannot be animated: {tag:?}"),
                    )),
                    Some(other) => Err(other.not_concrete("fill kind", "a fill kind name")),
                    None => Err(ToonError::validation("fill style map is missing its `fill` kind")),
                }
            }
            Value::Animated(_) | Value::Func(_) => Err(ToonError::validation(
                "a fill style cannot be animated as a whole; animate its fields instead",
            )),
            other => Err(other.not_concrete("fill style", "a color or fill style map")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/fields.rs"]
mod tests;
