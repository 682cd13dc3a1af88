//! The tagged value tree every entity parameter is stored as.
//!
//! A [`Value`] is either a literal, a named placeholder ([`Value::Symbol`]), a parameterised
//! function ([`Value::Func`]), a nested resolvable node (animated value, entity, transform)
//! or a container of further values. Resolution against [`Bindings`] lives in
//! [`crate::resolve`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::animation::Animated;
use crate::entity::Entity;
use crate::foundation::core::{PathPoint, Point};
use crate::foundation::error::{ToonError, ToonResult};
use crate::style::Color;
use crate::transform::Transform;

/// Name under which the local time is bound when an animated value is evaluated.
pub const TIME: &str = "_t_";

type ParamCall = dyn Fn(&str, &Value) -> ToonResult<Value> + Send + Sync;

/// A function that consumes exactly one named argument during resolution.
///
/// It declares the argument names it accepts; the resolver calls it when exactly one of
/// them is bound.
#[derive(Clone)]
pub struct ParamFn {
    params: Arc<[String]>,
    call: Arc<ParamCall>,
}

impl ParamFn {
    /// Accept any of `params`; `f` receives the matched name and its bound value.
    pub fn new<I, S, F>(params: I, f: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str, &Value) -> ToonResult<Value> + Send + Sync + 'static,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            call: Arc::new(f),
        }
    }

    /// Accept a single named argument.
    pub fn unary<F>(param: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> ToonResult<Value> + Send + Sync + 'static,
    {
        Self::new([param.into()], move |_, v| f(v))
    }

    /// A function of local time, bound under [`TIME`].
    pub fn of_time<F, V>(f: F) -> Self
    where
        F: Fn(f64) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::unary(TIME, move |v| Ok(f(v.number(TIME)?).into()))
    }

    /// Names of the bindings the function consumes.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// True if `name` is one of the function's parameters.
    pub fn accepts(&self, name: &str) -> bool {
        self.params.iter().any(|p| p == name)
    }

    /// Invoke with the binding `name` set to `arg`.
    pub fn call(&self, name: &str, arg: &Value) -> ToonResult<Value> {
        (self.call)(name, arg)
    }

    /// Instance identity.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for ParamFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParamFn").field(&self.params).finish()
    }
}

/// Symbol name to value substitutions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings(BTreeMap<String, Value>);

impl Bindings {
    /// An empty value.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single binding.
    pub fn one(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().with(name, value)
    }

    /// Builder form of [`Bindings::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name`, replacing any earlier binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// The value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A possibly symbolic, possibly time-varying parameter value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Unset; entities substitute their defaults.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A literal string. Never substituted.
    Text(String),
    /// A named placeholder, replaced by the binding of the same name.
    Symbol(String),
    /// A concrete position.
    Point(PathPoint),
    /// A parsed color.
    Color(Color),
    /// Resolved element by element.
    List(Vec<Value>),
    /// Resolved value by value.
    Map(BTreeMap<String, Value>),
    /// Called once every argument it accepts is bound.
    Func(ParamFn),
    /// A function of time, sampled at render.
    Animated(Animated),
    /// Resolved by nesting the bindings into its own resolver.
    Entity(Entity),
    /// A transform, resolved and locked against the current layers.
    Transform(Transform),
}

/// Shorthand for [`Value::Symbol`].
pub fn sym(name: impl Into<String>) -> Value {
    Value::Symbol(name.into())
}

impl Value {
    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// A map value from `(key, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Read a concrete number; `what` names the quantity in error messages.
    pub fn number(&self, what: &str) -> ToonResult<f64> {
        match self {
            Self::Number(x) => Ok(*x),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            other => Err(other.not_concrete(what, "a number")),
        }
    }

    /// Read a concrete point from a [`Value::Point`], `[x, y]` or `[x, y, {curve...}]`.
    pub fn point(&self, what: &str) -> ToonResult<PathPoint> {
        match self {
            Self::Point(p) => p.validate(),
            Self::List(items) => match items.as_slice() {
                [x, y] => PathPoint::new(x.number(what)?, y.number(what)?).validate(),
                [x, y, curve] => {
                    let p = PathPoint::new(x.number(what)?, y.number(what)?);
                    Ok(p.with_curve(curve.curve()?).validate()?)
                }
                _ => Err(ToonError::validation(format!(
                    "invalid format for {what}: expected 2 or 3 components, got {}",
                    items.len()
                ))),
            },
            other => Err(other.not_concrete(what, "a point")),
        }
    }

    /// Read a list of concrete points.
    pub fn points(&self, what: &str) -> ToonResult<Vec<PathPoint>> {
        match self {
            Self::List(items) => items.iter().map(|p| p.point(what)).collect(),
            other => Err(other.not_concrete(what, "a list of points")),
        }
    }

    fn curve(&self) -> ToonResult<crate::foundation::core::Curve> {
        let Self::Map(fields) = self else {
            return Err(self.not_concrete("segment descriptor", "a curve map"));
        };
        let field = |name: &str| {
            fields
                .get(name)
                .ok_or_else(|| ToonError::validation(format!("arc descriptor is missing `{name}`")))
        };
        match field("curve")? {
            Self::Text(kind) if kind == "arc" => crate::foundation::core::Curve::arc(
                field("rx")?.number("arc rx")?,
                field("ry")?.number("arc ry")?,
                fields
                    .get("skew")
                    .map(|s| s.number("arc skew"))
                    .transpose()?
                    .unwrap_or(0.0),
            ),
            other => Err(ToonError::validation(format!(
                "curve type {other:?} is not supported"
            ))),
        }
    }

    /// True if evaluating this value still needs a bound local time.
    pub fn is_time_dependent(&self) -> bool {
        match self {
            Self::Func(f) => f.accepts(TIME),
            Self::Animated(_) => true,
            Self::List(items) => items.iter().any(Self::is_time_dependent),
            Self::Map(fields) => fields.values().any(Self::is_time_dependent),
            _ => false,
        }
    }

    pub(crate) fn not_concrete(&self, what: &str, expected: &str) -> ToonError {
        match self {
            Self::Symbol(name) => {
                ToonError::resolution(format!("{what}: placeholder `{name}` was never bound"))
            }
            v if v.is_time_dependent() => ToonError::animation(format!(
                "{what}: time-varying value requested without a time"
            )),
            Self::Func(f) => ToonError::resolution(format!(
                "{what}: function of {:?} was never given its argument",
                f.params()
            )),
            other => ToonError::validation(format!("{what} must be {expected}, got {other:?}")),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Point(a), Self::Point(b)) => a == b,
            (Self::Color(a), Self::Color(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Func(a), Self::Func(b)) => a.ptr_eq(b),
            (Self::Animated(a), Self::Animated(b)) => a == b,
            (Self::Entity(a), Self::Entity(b)) => a == b,
            (Self::Transform(a), Self::Transform(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Self::Number(f64::from(x))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<(f64, f64)> for Value {
    fn from(p: (f64, f64)) -> Self {
        Self::Point(p.into())
    }
}

impl From<(i32, i32)> for Value {
    fn from((x, y): (i32, i32)) -> Self {
        Self::Point(PathPoint::new(f64::from(x), f64::from(y)))
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Self::Point(p.into())
    }
}

impl From<PathPoint> for Value {
    fn from(p: PathPoint) -> Self {
        Self::Point(p)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<ParamFn> for Value {
    fn from(f: ParamFn) -> Self {
        Self::Func(f)
    }
}

impl From<Animated> for Value {
    fn from(a: Animated) -> Self {
        Self::Animated(a)
    }
}

impl From<Entity> for Value {
    fn from(e: Entity) -> Self {
        Self::Entity(e)
    }
}

impl From<Transform> for Value {
    fn from(t: Transform) -> Self {
        Self::Transform(t)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/value/value.rs"]
mod tests;
