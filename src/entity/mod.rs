//! Immutable drawable entities and the copy-call protocol.
//!
//! An [`Entity`] is a template: entity-specific parameters, a transform, a clock and the
//! resolver accumulated from substitutions. [`Entity::with`] never mutates; it returns a
//! new entity whose matching parameters are replaced, whose other overrides become a fresh
//! substitution layer, and whose transform, clock and resolver are nested around the old
//! ones.

mod draw;
pub mod kind;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::animation::Clock;
use crate::resolve::Resolver;
use crate::transform::Transform;
use crate::value::{Bindings, Value};

pub use kind::Kind;

/// Named overrides for a copy-call.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    params: BTreeMap<String, Value>,
    resolver: Option<Resolver>,
    transform: Option<Transform>,
    clock: Option<Clock>,
}

impl Overrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace parameter `key`, or bind symbol `key` if the entity has no such parameter.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Wrap the entity's transform in `t`.
    pub fn transform(mut self, t: Transform) -> Self {
        self.transform = Some(t);
        self
    }

    /// Run `c` on global time before the entity's own clock.
    pub fn clock(mut self, c: Clock) -> Self {
        self.clock = Some(c);
        self
    }

    /// Offer whatever the entity leaves unresolved to `r`.
    pub fn resolver(mut self, r: Resolver) -> Self {
        self.resolver = Some(r);
        self
    }
}

impl From<&Bindings> for Overrides {
    fn from(bindings: &Bindings) -> Self {
        bindings
            .iter()
            .fold(Self::new(), |o, (k, v)| o.set(k, v.clone()))
    }
}

/// An immutable description of one shape or a group of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    kind: Arc<Kind>,
    resolver: Resolver,
    transform: Transform,
    clock: Clock,
}

impl Entity {
    fn from_kind(kind: Kind) -> Self {
        Self {
            kind: Arc::new(kind),
            resolver: Resolver::identity(),
            transform: Transform::identity(),
            clock: Clock::identity(),
        }
    }

    /// The drawable kind and its parameters.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The accumulated transform chain, outermost first.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The accumulated clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Substitution layers accumulated by copy-calls.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Copy-call: a new entity with `o` applied.
    pub fn with(&self, o: Overrides) -> Entity {
        let mut kind = (*self.kind).clone();
        let mut substitutions = Bindings::new();
        for (key, value) in o.params {
            match kind.slot(&key) {
                Some(slot) => *slot = value,
                None => substitutions.insert(key, value),
            }
        }
        let resolver = match &o.resolver {
            Some(outer) => Resolver::nest(outer, &self.resolver),
            None => self.resolver.clone(),
        }
        .layer(substitutions);
        let transform = match &o.transform {
            Some(outer) => outer.nest(&self.transform),
            None => self.transform.clone(),
        };
        let clock = match &o.clock {
            Some(inner) => self.clock.after(inner),
            None => self.clock.clone(),
        };
        Entity {
            kind: Arc::new(kind),
            resolver,
            transform,
            clock,
        }
    }

    /// Copy-call with a single override.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Entity {
        self.with(Overrides::new().set(key, value))
    }

    /// Copy-call wrapping the transform in `t`.
    pub fn transformed(&self, t: Transform) -> Entity {
        self.with(Overrides::new().transform(t))
    }

    /// See [`Transform::scale`].
    pub fn scale(&self, factor: impl Into<Value>) -> Entity {
        self.transformed(Transform::scale(factor))
    }

    /// See [`Transform::rotate`].
    pub fn rotate(&self, degrees: impl Into<Value>) -> Entity {
        self.transformed(Transform::rotate(degrees))
    }

    /// See [`Transform::translate`].
    pub fn translate(&self, dx: impl Into<Value>, dy: impl Into<Value>) -> Entity {
        self.transformed(Transform::translate(dx, dy))
    }

    /// See [`Transform::zoom`].
    pub fn zoom(&self, factor: impl Into<Value>) -> Entity {
        self.transformed(Transform::zoom(factor))
    }

    /// See [`Transform::stretch`].
    pub fn stretch(&self, factor: impl Into<Value>) -> Entity {
        self.transformed(Transform::stretch(factor))
    }
}

/// A straight segment. Any two of `begin`, `displacement` and `end` determine it.
pub fn line() -> Entity {
    Entity::from_kind(Kind::Line {
        begin: Value::Null,
        displacement: Value::Null,
        end: Value::Null,
        lstyle: Value::Null,
    })
}

/// A circle; defaults to radius 100 at the origin.
pub fn circle() -> Entity {
    Entity::from_kind(Kind::Circle {
        center: Value::Null,
        radius: Value::Null,
        lstyle: Value::Null,
        fstyle: Value::Null,
    })
}

/// A closed polygon; defaults to a placeholder triangle.
pub fn polygon() -> Entity {
    Entity::from_kind(Kind::Polygon {
        points: Value::Null,
        lstyle: Value::Null,
        fstyle: Value::Null,
    })
}

/// An open path through its points; a point may carry an arc descriptor.
pub fn path() -> Entity {
    Entity::from_kind(Kind::Path {
        points: Value::Null,
        lstyle: Value::Null,
        fstyle: Value::Null,
    })
}

/// A composite that draws each child under its own resolver, transform and clock.
pub fn group(children: impl IntoIterator<Item = Entity>) -> Entity {
    Entity::from_kind(Kind::Group {
        entities: Value::List(children.into_iter().map(Value::Entity).collect()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/entity/entity.rs"]
mod tests;
