use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{ToonError, ToonResult};
use crate::value::Value;

/// How a transform treats geometry measured relative to an entity's origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flavor {
    /// Everything is mapped, sizes included.
    Uniform,
    /// Only the origin is mapped; displacements from it are kept.
    Positional,
}

/// Line-width scale a kernel imposes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KernelScale {
    /// A known factor, taken as its magnitude.
    Fixed(f64),
    /// Estimated as `sqrt(trace(AᵗA)/2)` by unit finite differences at the origin.
    Derived,
}

/// A concrete point mapping produced from resolved transform parameters.
#[derive(Clone)]
pub struct Kernel {
    map: Arc<dyn Fn(Point) -> Point + Send + Sync>,
    scale: KernelScale,
}

impl Kernel {
    /// A kernel from an arbitrary point mapping.
    pub fn new(map: impl Fn(Point) -> Point + Send + Sync + 'static, scale: KernelScale) -> Self {
        Self {
            map: Arc::new(map),
            scale,
        }
    }

    /// A kernel applying the affine map `a`.
    pub fn affine(a: Affine, scale: KernelScale) -> Self {
        Self::new(move |p| a * p, scale)
    }

    /// Map one point.
    pub fn apply(&self, p: Point) -> Point {
        (self.map)(p)
    }

    /// The line-width scale.
    pub fn scale(&self) -> KernelScale {
        self.scale
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel").field("scale", &self.scale).finish()
    }
}

/// Resolved transform parameters handed to a kernel constructor.
#[derive(Clone, Debug, Default)]
pub struct Params(pub(crate) BTreeMap<String, Value>);

impl Params {
    /// The value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// A required numeric parameter.
    pub fn number(&self, name: &str) -> ToonResult<f64> {
        self.0
            .get(name)
            .ok_or_else(|| ToonError::resolution(format!("missing transform parameter `{name}`")))?
            .number(&format!("transform parameter `{name}`"))
    }

    /// An optional boolean parameter; unset or `Null` gives `default`.
    pub fn flag(&self, name: &str, default: bool) -> ToonResult<bool> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(other.not_concrete(&format!("transform flag `{name}`"), "a bool")),
        }
    }
}

pub(crate) type KernelFn = dyn Fn(&Params) -> ToonResult<Kernel> + Send + Sync;

pub(crate) fn identity(_: &Params) -> ToonResult<Kernel> {
    Ok(Kernel::new(|p| p, KernelScale::Fixed(1.0)))
}

pub(crate) fn translate(params: &Params) -> ToonResult<Kernel> {
    let (dx, dy) = (params.number("dx")?, params.number("dy")?);
    Ok(Kernel::affine(
        Affine::translate((dx, dy)),
        KernelScale::Fixed(1.0),
    ))
}

pub(crate) fn rotate(params: &Params) -> ToonResult<Kernel> {
    let rad = match params.get("degrees") {
        Some(_) => params.number("degrees")?.to_radians(),
        None => params.number("radians")?,
    };
    Ok(Kernel::affine(Affine::rotate(rad), KernelScale::Fixed(1.0)))
}

pub(crate) fn scale(params: &Params) -> ToonResult<Kernel> {
    let factor = params.number("factor")?;
    let lw = if params.flag("scale_linewidths", true)? {
        factor.abs()
    } else {
        1.0
    };
    Ok(Kernel::affine(Affine::scale(factor), KernelScale::Fixed(lw)))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/kernel.rs"]
mod tests;
