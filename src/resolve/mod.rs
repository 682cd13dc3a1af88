//! Lazy symbolic substitution.
//!
//! [`Value::resolve`] applies one set of [`Bindings`] to a value tree with an explicit
//! per-variant dispatch. A [`Resolver`] is the immutable chain of binding layers an entity
//! accumulates through copy-calls and group nesting.

use std::fmt;
use std::sync::Arc;

use crate::entity::Overrides;
use crate::foundation::error::{ToonError, ToonResult};
use crate::value::{Bindings, Value};

impl Value {
    /// Substitute `bindings` into this value.
    ///
    /// Self-describing nodes (entities, transforms, animated values) take the bindings
    /// themselves; a function is called if exactly one of its parameters is bound; a symbol
    /// is replaced by its binding; containers are resolved element-wise. Anything else is
    /// returned unchanged.
    pub fn resolve(&self, bindings: &Bindings) -> ToonResult<Value> {
        if bindings.is_empty() {
            return Ok(self.clone());
        }
        match self {
            Self::Entity(e) => Ok(Self::Entity(e.with(Overrides::from(bindings)))),
            Self::Transform(t) => Ok(Self::Transform(t.substitute(bindings)?)),
            Self::Animated(a) => Ok(Self::Animated(a.substitute(bindings)?)),
            Self::Func(f) => {
                let mut hits = bindings.iter().filter(|(name, _)| f.accepts(name));
                match (hits.next(), hits.next()) {
                    (Some((name, arg)), None) => f.call(name, arg),
                    (Some((a, _)), Some((b, _))) => Err(ToonError::resolution(format!(
                        "ambiguous substitution: both `{a}` and `{b}` match a function of {:?}",
                        f.params()
                    ))),
                    (None, _) => Ok(self.clone()),
                }
            }
            Self::Symbol(name) => Ok(bindings.get(name).cloned().unwrap_or_else(|| self.clone())),
            Self::Map(fields) => fields
                .iter()
                .map(|(k, v)| Ok((k.clone(), v.resolve(bindings)?)))
                .collect::<ToonResult<_>>()
                .map(Self::Map),
            Self::List(items) => items
                .iter()
                .map(|v| v.resolve(bindings))
                .collect::<ToonResult<_>>()
                .map(Self::List),
            Self::Null
            | Self::Bool(_)
            | Self::Number(_)
            | Self::Text(_)
            | Self::Point(_)
            | Self::Color(_) => Ok(self.clone()),
        }
    }
}

enum Node {
    Layer { bindings: Bindings, inner: Resolver },
    Nested { outer: Resolver, inner: Resolver },
}

/// An immutable chain of substitution layers.
///
/// Inner layers (installed earlier, closer to the entity) run first; whatever they leave
/// symbolic is offered to the outer layers.
#[derive(Clone, Default)]
pub struct Resolver(Option<Arc<Node>>);

impl Resolver {
    /// The empty chain.
    pub fn identity() -> Self {
        Self(None)
    }

    /// True for the empty chain.
    pub fn is_identity(&self) -> bool {
        self.0.is_none()
    }

    /// Add `bindings` as a new layer outside this chain.
    pub fn layer(&self, bindings: Bindings) -> Self {
        if bindings.is_empty() {
            return self.clone();
        }
        Self(Some(Arc::new(Node::Layer {
            bindings,
            inner: self.clone(),
        })))
    }

    /// Run `inner` first, then `outer`.
    pub fn nest(outer: &Resolver, inner: &Resolver) -> Self {
        match (outer.is_identity(), inner.is_identity()) {
            (true, _) => inner.clone(),
            (false, true) => outer.clone(),
            (false, false) => Self(Some(Arc::new(Node::Nested {
                outer: outer.clone(),
                inner: inner.clone(),
            }))),
        }
    }

    /// Substitute through every layer, innermost first.
    pub fn apply(&self, value: &Value) -> ToonResult<Value> {
        match self.0.as_deref() {
            None => Ok(value.clone()),
            Some(Node::Layer { bindings, inner }) => inner.apply(value)?.resolve(bindings),
            Some(Node::Nested { outer, inner }) => outer.apply(&inner.apply(value)?),
        }
    }

    /// Number of binding layers in the chain.
    pub fn depth(&self) -> usize {
        match self.0.as_deref() {
            None => 0,
            Some(Node::Layer { inner, .. }) => 1 + inner.depth(),
            Some(Node::Nested { outer, inner }) => outer.depth() + inner.depth(),
        }
    }
}

impl PartialEq for Resolver {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("layers", &self.depth())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/resolver.rs"]
mod tests;
