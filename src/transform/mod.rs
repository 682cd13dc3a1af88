//! Nested coordinate transforms.
//!
//! A [`Transform`] is an immutable chain: each node owns its (optional) inner transform,
//! which is applied first. Parameters stay symbolic until [`Transform::resolve`] locks the
//! chain; [`Transform::mappings`] then produces a concrete [`Mapping`] per instant.

pub mod kernel;
pub mod mapping;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::animation::animated::{native_interval, round_count};
use crate::animation::{Animated, Clock};
use crate::foundation::core::Point;
use crate::foundation::error::ToonResult;
use crate::resolve::Resolver;
use crate::value::{Bindings, TIME, Value};

pub use kernel::{Flavor, Kernel, KernelScale, Params};
pub use mapping::Mapping;

use kernel::KernelFn;
use mapping::Level;

#[derive(Clone)]
struct Node {
    name: &'static str,
    kernel: Arc<KernelFn>,
    flavor: Flavor,
    params: BTreeMap<String, Value>,
    inner: Option<Transform>,
    clock: Option<Clock>,
    dt: Value,
    locked: bool,
}

/// A composable coordinate mapping with possibly symbolic or time-varying parameters.
#[derive(Clone)]
pub struct Transform(Arc<Node>);

impl Transform {
    fn build(
        name: &'static str,
        flavor: Flavor,
        params: BTreeMap<String, Value>,
        kernel: Arc<KernelFn>,
    ) -> Self {
        Self(Arc::new(Node {
            name,
            kernel,
            flavor,
            params,
            inner: None,
            clock: None,
            dt: Value::Null,
            locked: false,
        }))
    }

    /// Maps every point to itself.
    pub fn identity() -> Self {
        Self::build(
            "identity",
            Flavor::Uniform,
            BTreeMap::new(),
            Arc::new(kernel::identity),
        )
    }

    /// See [`Transform::translate`].
    pub fn translate(dx: impl Into<Value>, dy: impl Into<Value>) -> Self {
        Self::build(
            "translate",
            Flavor::Uniform,
            named([("dx", dx.into()), ("dy", dy.into())]),
            Arc::new(kernel::translate),
        )
    }

    /// Counter-clockwise rotation in degrees (y axis up).
    pub fn rotate(degrees: impl Into<Value>) -> Self {
        Self::build(
            "rotate",
            Flavor::Uniform,
            named([("degrees", degrees.into())]),
            Arc::new(kernel::rotate),
        )
    }

    /// Counter-clockwise rotation in radians.
    pub fn rotate_rad(radians: impl Into<Value>) -> Self {
        Self::build(
            "rotate",
            Flavor::Uniform,
            named([("radians", radians.into())]),
            Arc::new(kernel::rotate),
        )
    }

    /// Isotropic scale of everything, line widths included.
    pub fn scale(factor: impl Into<Value>) -> Self {
        Self::build(
            "scale",
            Flavor::Uniform,
            named([("factor", factor.into())]),
            Arc::new(kernel::scale),
        )
    }

    /// Isotropic scale that leaves line widths and radii alone.
    pub fn zoom(factor: impl Into<Value>) -> Self {
        Self::build(
            "zoom",
            Flavor::Uniform,
            named([("factor", factor.into()), ("scale_linewidths", false.into())]),
            Arc::new(kernel::scale),
        )
    }

    /// Positional scale: spreads entities apart without resizing them.
    pub fn stretch(factor: impl Into<Value>) -> Self {
        Self::build(
            "stretch",
            Flavor::Positional,
            named([("factor", factor.into()), ("scale_linewidths", false.into())]),
            Arc::new(kernel::scale),
        )
    }

    /// Positional per-axis remapping `(x, y) -> (fx(x), fy(y))`.
    pub fn parametric<FX, FY>(fx: FX, fy: FY) -> Self
    where
        FX: Fn(f64) -> f64 + Send + Sync + 'static,
        FY: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        let (fx, fy) = (Arc::new(fx), Arc::new(fy));
        Self::build(
            "parametric",
            Flavor::Positional,
            BTreeMap::new(),
            Arc::new(move |_: &Params| {
                let (fx, fy) = (fx.clone(), fy.clone());
                Ok(Kernel::new(
                    move |p| Point::new(fx(p.x), fy(p.y)),
                    KernelScale::Fixed(1.0),
                ))
            }),
        )
    }

    /// A custom uniform transform; `kernel` builds the mapping from resolved `params`.
    pub fn uniform<I, K, V, F>(params: I, kernel: F) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
        F: Fn(&Params) -> ToonResult<Kernel> + Send + Sync + 'static,
    {
        Self::build("uniform", Flavor::Uniform, collect(params), Arc::new(kernel))
    }

    /// A custom positional transform; `kernel` builds the mapping from resolved `params`.
    pub fn positional<I, K, V, F>(params: I, kernel: F) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
        F: Fn(&Params) -> ToonResult<Kernel> + Send + Sync + 'static,
    {
        Self::build("positional", Flavor::Positional, collect(params), Arc::new(kernel))
    }

    /// Flavor of the outermost node.
    pub fn flavor(&self) -> Flavor {
        self.0.flavor
    }

    /// True once [`Transform::resolve`] has fixed the parameters.
    pub fn is_locked(&self) -> bool {
        self.0.locked
    }

    fn with_node(&self, f: impl FnOnce(&mut Node)) -> Self {
        let mut node = (*self.0).clone();
        f(&mut node);
        Self(Arc::new(node))
    }

    /// Sample this transform every `dt` when rendering an interval.
    pub fn animated(&self, dt: impl Into<Value>) -> Self {
        let dt = dt.into();
        self.with_node(|n| n.dt = dt)
    }

    /// `self` wrapping `inner`: `inner` is applied first.
    pub fn nest(&self, inner: &Transform) -> Self {
        let nested = match &self.0.inner {
            Some(existing) => existing.nest(inner),
            None => inner.clone(),
        };
        self.with_node(|n| n.inner = Some(nested))
    }

    /// Substitute symbols through `resolver` and adopt `clock`, innermost first.
    ///
    /// Locked nodes keep their parameters and own clock. Resolved nodes are locked unless
    /// `reresolve` is set.
    pub fn resolve(&self, resolver: &Resolver, clock: &Clock, reresolve: bool) -> ToonResult<Self> {
        let inner = self
            .0
            .inner
            .as_ref()
            .map(|i| i.resolve(resolver, clock, reresolve))
            .transpose()?;
        if self.0.locked {
            return Ok(self.with_node(|n| n.inner = inner));
        }
        let mut params = BTreeMap::new();
        for (k, v) in &self.0.params {
            params.insert(k.clone(), resolver.apply(v)?);
        }
        let dt = resolver.apply(&self.0.dt)?;
        Ok(self.with_node(|n| {
            n.inner = inner;
            n.params = params;
            n.dt = dt;
            n.clock = Some(clock.clone());
            n.locked = !reresolve;
        }))
    }

    pub(crate) fn substitute(&self, bindings: &Bindings) -> ToonResult<Self> {
        if self.0.locked {
            return Ok(self.clone());
        }
        let inner = self
            .0
            .inner
            .as_ref()
            .map(|i| i.substitute(bindings))
            .transpose()?;
        let mut params = BTreeMap::new();
        for (k, v) in &self.0.params {
            params.insert(k.clone(), v.resolve(bindings)?);
        }
        let dt = self.0.dt.resolve(bindings)?;
        Ok(self.with_node(|n| {
            n.inner = inner;
            n.params = params;
            n.dt = dt;
        }))
    }

    fn clock_or_identity(&self) -> Clock {
        self.0.clock.clone().unwrap_or_default()
    }

    /// Sample intervals the chain needs over `[ta, tz]`.
    ///
    /// Every level contributes its own interval and those of its animated parameters.
    pub fn n_intervals(&self, ta: f64, tz: f64) -> ToonResult<usize> {
        let mut n = match &self.0.inner {
            Some(inner) => inner.n_intervals(ta, tz)?,
            None => 0,
        };
        let clock = self.clock_or_identity();
        if let Some(dt) = native_interval(&self.0.dt)? {
            n = n.max(1).max(round_count((clock.map(tz) - clock.map(ta)) / dt)?);
        }
        for v in self.0.params.values() {
            if let Value::Animated(_) = v {
                n = Animated::wrap(v, &clock).n_intervals(ta, tz, n)?;
            }
        }
        Ok(n)
    }

    /// The concrete mapping at global time `t` for an entity anchored at `origin`.
    pub fn mappings(&self, t: Option<f64>, origin: Point) -> ToonResult<Mapping> {
        let mut levels = Vec::new();
        self.collect_levels(t, origin, &mut levels)?;
        Ok(Mapping::new(levels))
    }

    fn collect_levels(
        &self,
        t: Option<f64>,
        origin: Point,
        out: &mut Vec<Level>,
    ) -> ToonResult<Point> {
        let origin = match &self.0.inner {
            Some(inner) => inner.collect_levels(t, origin, out)?,
            None => origin,
        };
        let params = self.concrete_params(t)?;
        let level = Level::new((self.0.kernel)(&params)?, self.0.flavor, origin);
        let next = level.mapped_origin();
        out.push(level);
        Ok(next)
    }

    fn concrete_params(&self, t: Option<f64>) -> ToonResult<Params> {
        let clock = self.clock_or_identity();
        let time = t.map(|t| Bindings::one(TIME, clock.map(t)));
        let mut params = BTreeMap::new();
        for (k, v) in &self.0.params {
            let v = match v {
                Value::Animated(_) => Animated::wrap(v, &clock).at(t)?,
                v => match &time {
                    Some(b) => v.resolve(b)?,
                    None => v.clone(),
                },
            };
            params.insert(k.clone(), v);
        }
        Ok(Params(params))
    }

    /// Instance identity.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

fn named<const N: usize>(entries: [(&str, Value); N]) -> BTreeMap<String, Value> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect()
}

fn collect<I, K, V>(params: I) -> BTreeMap<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    params
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.0.name)
            .field("flavor", &self.0.flavor)
            .field("params", &self.0.params)
            .field("dt", &self.0.dt)
            .field("locked", &self.0.locked)
            .field("inner", &self.0.inner)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/transform.rs"]
mod tests;
