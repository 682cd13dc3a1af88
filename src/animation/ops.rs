use crate::animation::animated::Animated;
use crate::foundation::core::PathPoint;
use crate::foundation::error::{ToonError, ToonResult};
use crate::style::Color;
use crate::value::Value;

/// Pointwise sum of two numbers or two points.
pub fn add(a: &Animated, b: &Animated) -> ToonResult<Animated> {
    Animated::combine(add_values, a, b)
}

/// Pointwise difference of two numbers or two points.
pub fn sub(a: &Animated, b: &Animated) -> ToonResult<Animated> {
    Animated::combine(sub_values, a, b)
}

/// Weighted blend `(1 - weight) * a + weight * b` of numbers, points or colors.
pub fn blend(a: &Animated, b: &Animated, weight: f64) -> ToonResult<Animated> {
    Animated::combine(move |x, y| blend_values(x, y, weight), a, b)
}

pub(crate) fn add_values(a: &Value, b: &Value) -> ToonResult<Value> {
    arith(a, b, "add", |x, y| x + y)
}

pub(crate) fn sub_values(a: &Value, b: &Value) -> ToonResult<Value> {
    arith(a, b, "subtract", |x, y| x - y)
}

fn arith(a: &Value, b: &Value, verb: &str, f: impl Fn(f64, f64) -> f64) -> ToonResult<Value> {
    let result = match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(f(*x, *y))),
        _ => a.point("operand").and_then(|p| {
            let q = b.point("operand")?;
            Ok(Value::Point(PathPoint::new(f(p.x, q.x), f(p.y, q.y))))
        }),
    };
    result.map_err(|e| match e {
        ToonError::Validation(msg) => {
            ToonError::validation(format!("cannot {verb} {a:?} and {b:?}: {msg}"))
        }
        other => other,
    })
}

pub(crate) fn blend_values(a: &Value, b: &Value, w: f64) -> ToonResult<Value> {
    let lerp = |x: f64, y: f64| (1.0 - w) * x + w * y;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(lerp(*x, *y))),
        (Value::Point(_) | Value::List(_), Value::Point(_) | Value::List(_)) => {
            let (p, q) = (a.point("blend operand")?, b.point("blend operand")?);
            Ok(Value::Point(PathPoint::new(lerp(p.x, q.x), lerp(p.y, q.y))))
        }
        _ => Ok(Value::Color(
            Color::from_value(a)?.blend(Color::from_value(b)?, w),
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
