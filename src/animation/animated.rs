use std::fmt;
use std::sync::Arc;

use crate::animation::clock::Clock;
use crate::foundation::error::{ToonError, ToonResult};
use crate::value::{Bindings, ParamFn, TIME, Value};

pub(crate) type CombineFn = dyn Fn(&Value, &Value) -> ToonResult<Value> + Send + Sync;
type PostFn = dyn Fn(Value) -> ToonResult<Value> + Send + Sync;

#[derive(Clone)]
enum Source {
    Value(Value),
    Combined {
        op: Arc<CombineFn>,
        a: Animated,
        b: Animated,
    },
}

struct Node {
    source: Source,
    dt: Value,
    clock: Option<Clock>,
    post: Option<Arc<PostFn>>,
}

/// A parameter expressed as a function of time.
///
/// The payload is resolved with the local time bound under [`TIME`]. `dt` is the native
/// sampling interval; `Null` means the value needs no sampling at all. The clock is
/// installed when the owning entity is drawn.
#[derive(Clone)]
pub struct Animated(Arc<Node>);

impl Animated {
    /// Animate `source` with native interval `dt` (a number, a placeholder or `Null`).
    pub fn new(source: impl Into<Value>, dt: impl Into<Value>) -> Self {
        Self(Arc::new(Node {
            source: Source::Value(source.into()),
            dt: dt.into(),
            clock: None,
            post: None,
        }))
    }

    /// A value that never needs sampling.
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::new(value, Value::Null)
    }

    /// Animate a closure of local time.
    pub fn over_time<F, V>(dt: f64, f: F) -> Self
    where
        F: Fn(f64) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(ParamFn::of_time(f), dt)
    }

    /// Promote any value to an animated one running on `clock`.
    ///
    /// An animated value keeps its interval and post-processing but adopts `clock`.
    pub fn wrap(value: &Value, clock: &Clock) -> Self {
        match value {
            Value::Animated(a) => Self(Arc::new(Node {
                source: a.0.source.clone(),
                dt: a.0.dt.clone(),
                clock: Some(clock.clone()),
                post: a.0.post.clone(),
            })),
            other => Self(Arc::new(Node {
                source: Source::Value(other.clone()),
                dt: Value::Null,
                clock: Some(clock.clone()),
                post: None,
            })),
        }
    }

    /// Post-process every evaluated value with `f`, after any existing post-processing.
    pub fn then<F>(&self, f: F) -> Self
    where
        F: Fn(Value) -> ToonResult<Value> + Send + Sync + 'static,
    {
        let post: Arc<PostFn> = match self.0.post.clone() {
            Some(prev) => Arc::new(move |v| f(prev(v)?)) as Arc<PostFn>,
            None => Arc::new(f) as Arc<PostFn>,
        };
        Self(Arc::new(Node {
            source: self.0.source.clone(),
            dt: self.0.dt.clone(),
            clock: self.0.clock.clone(),
            post: Some(post),
        }))
    }

    /// The clock installed by [`Animated::wrap`], if any.
    pub fn clock(&self) -> Option<&Clock> {
        self.0.clock.as_ref()
    }

    /// The native sampling interval, `None` when the value is constant in time.
    pub fn dt(&self) -> ToonResult<Option<f64>> {
        native_interval(&self.0.dt)
    }

    /// Evaluate at global time `t`; `None` requires the value to be time independent.
    pub fn at(&self, t: Option<f64>) -> ToonResult<Value> {
        let local = match (t, &self.0.clock) {
            (Some(t), Some(clock)) => Some(clock.map(t)),
            (t, _) => t,
        };
        self.at_local(local)
    }

    fn at_local(&self, local: Option<f64>) -> ToonResult<Value> {
        let value = match &self.0.source {
            Source::Value(v) => match local {
                Some(t) => v.resolve(&Bindings::one(TIME, t))?,
                None => v.clone(),
            },
            Source::Combined { op, a, b } => op(&a.at_local(local)?, &b.at_local(local)?)?,
        };
        if local.is_none() && value.is_time_dependent() {
            return Err(ToonError::animation(
                "time-varying value requested at a single untimed instant",
            ));
        }
        match &self.0.post {
            Some(post) => post(value),
            None => Ok(value),
        }
    }

    /// Sample intervals this value needs over `[ta, tz]`, at least `n_min`.
    pub fn n_intervals(&self, ta: f64, tz: f64, n_min: usize) -> ToonResult<usize> {
        let Some(dt) = self.dt()? else {
            return Ok(n_min);
        };
        let span = match &self.0.clock {
            Some(clock) => clock.map(tz) - clock.map(ta),
            None => tz - ta,
        };
        Ok(n_min.max(1).max(round_count(span / dt)?))
    }

    pub(crate) fn substitute(&self, bindings: &Bindings) -> ToonResult<Self> {
        let source = match &self.0.source {
            Source::Value(v) => Source::Value(v.resolve(bindings)?),
            Source::Combined { op, a, b } => Source::Combined {
                op: op.clone(),
                a: a.substitute(bindings)?,
                b: b.substitute(bindings)?,
            },
        };
        Ok(Self(Arc::new(Node {
            source,
            dt: self.0.dt.resolve(bindings)?,
            clock: self.0.clock.clone(),
            post: self.0.post.clone(),
        })))
    }

    /// Combine two animated values pointwise with `op`.
    ///
    /// Both operands must run on the same clock instance. The result samples at the finer
    /// of the two intervals.
    pub fn combine<F>(op: F, a: &Animated, b: &Animated) -> ToonResult<Self>
    where
        F: Fn(&Value, &Value) -> ToonResult<Value> + Send + Sync + 'static,
    {
        let clock = match (&a.0.clock, &b.0.clock) {
            (Some(x), Some(y)) if x.same(y) => Some(x.clone()),
            (None, None) => None,
            _ => {
                return Err(ToonError::clock(
                    "cannot combine animated values bound to different clocks",
                ));
            }
        };
        let dt = match (a.dt()?, b.dt()?) {
            (None, None) => Value::Null,
            (Some(x), None) | (None, Some(x)) => Value::Number(x),
            (Some(x), Some(y)) => Value::Number(x.min(y)),
        };
        Ok(Self(Arc::new(Node {
            source: Source::Combined {
                op: Arc::new(op),
                a: a.detached(),
                b: b.detached(),
            },
            dt,
            clock,
            post: None,
        })))
    }

    // Operands of a combination are evaluated in the combination's local time.
    fn detached(&self) -> Self {
        if self.0.clock.is_none() {
            return self.clone();
        }
        Self(Arc::new(Node {
            source: self.0.source.clone(),
            dt: self.0.dt.clone(),
            clock: None,
            post: self.0.post.clone(),
        }))
    }

    /// Instance identity.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Read a native sampling interval: `Null` for none, otherwise a positive number.
pub(crate) fn native_interval(dt: &Value) -> ToonResult<Option<f64>> {
    match dt {
        Value::Null => Ok(None),
        Value::Number(dt) if *dt > 0.0 && dt.is_finite() => Ok(Some(*dt)),
        Value::Number(dt) => Err(ToonError::animation(format!(
            "sampling interval must be positive and finite: {dt}"
        ))),
        other => Err(other.not_concrete("sampling interval", "a positive number")),
    }
}

/// Upper bound on the sample intervals a single quantity may request.
pub const MAX_SAMPLE_INTERVALS: usize = 100_000;

pub(crate) fn round_count(x: f64) -> ToonResult<usize> {
    if !(x.is_finite() && x > 0.0) {
        return Ok(0);
    }
    let n = x.round();
    if n > MAX_SAMPLE_INTERVALS as f64 {
        return Err(ToonError::animation(format!(
            "{n} sample intervals requested, at most {MAX_SAMPLE_INTERVALS} allowed"
        )));
    }
    Ok(n as usize)
}

impl PartialEq for Animated {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Animated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.0.source {
            Source::Value(v) => format!("{v:?}"),
            Source::Combined { .. } => "Combined".to_owned(),
        };
        f.debug_struct("Animated")
            .field("source", &source)
            .field("dt", &self.0.dt)
            .field("clock", &self.0.clock)
            .field("post", &self.0.post.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animated.rs"]
mod tests;
