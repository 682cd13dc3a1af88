use std::fmt;
use std::sync::Arc;

type ClockFn = dyn Fn(f64) -> f64 + Send + Sync;

enum Node {
    Identity,
    Delay(f64),
    Speed(f64),
    Func(Arc<ClockFn>),
    Nested { outer: Clock, inner: Clock },
}

/// Maps global time to an entity's local time.
///
/// Clocks are shared by reference; two clocks are the same clock only if they are the same
/// instance (see [`Clock::same`]).
#[derive(Clone)]
pub struct Clock(Arc<Node>);

impl Clock {
    /// Local time equals global time.
    pub fn identity() -> Self {
        Self(Arc::new(Node::Identity))
    }

    /// Local time lags global time by `by`.
    pub fn delay(by: f64) -> Self {
        Self(Arc::new(Node::Delay(by)))
    }

    /// Local time runs `factor` times as fast as global time.
    pub fn speed(factor: f64) -> Self {
        Self(Arc::new(Node::Speed(factor)))
    }

    /// An arbitrary time remapping.
    pub fn from_fn(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(Node::Func(Arc::new(f))))
    }

    /// Apply `inner` first, then `self`.
    pub fn after(&self, inner: &Clock) -> Self {
        Self(Arc::new(Node::Nested {
            outer: self.clone(),
            inner: inner.clone(),
        }))
    }

    /// Local time at global time `t`.
    pub fn map(&self, t: f64) -> f64 {
        match &*self.0 {
            Node::Identity => t,
            Node::Delay(by) => t - by,
            Node::Speed(factor) => t * factor,
            Node::Func(f) => f(t),
            Node::Nested { outer, inner } => outer.map(inner.map(t)),
        }
    }

    /// Instance identity.
    pub fn same(&self, other: &Clock) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Node::Identity => f.write_str("Clock::Identity"),
            Node::Delay(by) => write!(f, "Clock::Delay({by})"),
            Node::Speed(k) => write!(f, "Clock::Speed({k})"),
            Node::Func(_) => f.write_str("Clock::Func"),
            Node::Nested { outer, inner } => f
                .debug_struct("Clock::Nested")
                .field("outer", outer)
                .field("inner", inner)
                .finish(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
