use crate::foundation::error::{ToonError, ToonResult};
use crate::foundation::math::{Approx, float_eq};

/// One keyframe: a value at a fraction of the rendered interval.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Key<T> {
    /// Position within the interval, from 0 at the start to 1 at the end.
    pub frac: f64,
    /// The sampled value.
    pub value: T,
}

/// A rendered quantity: either one constant value or keyframes over `[0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampled<T> {
    /// The same value throughout.
    Const(T),
    /// At least two keyframes with rising fractions.
    Keys(Vec<Key<T>>),
}

impl<T> Sampled<T> {
    /// True for keyframes.
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Keys(_))
    }

    /// The value if constant.
    pub fn as_const(&self) -> Option<&T> {
        match self {
            Self::Const(v) => Some(v),
            Self::Keys(_) => None,
        }
    }

    /// The constant value, or an error if the quantity varies.
    pub fn deanimated(self) -> ToonResult<T> {
        match self {
            Self::Const(v) => Ok(v),
            Self::Keys(_) => Err(ToonError::animation(
                "value does not represent a static property",
            )),
        }
    }

    /// Apply `f` to every value, keeping the fractions.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Sampled<U> {
        match self {
            Self::Const(v) => Sampled::Const(f(v)),
            Self::Keys(keys) => Sampled::Keys(
                keys.into_iter()
                    .map(|k| Key {
                        frac: k.frac,
                        value: f(k.value),
                    })
                    .collect(),
            ),
        }
    }

    /// Fallible [`Sampled::map`].
    pub fn try_map<U>(self, mut f: impl FnMut(T) -> ToonResult<U>) -> ToonResult<Sampled<U>> {
        Ok(match self {
            Self::Const(v) => Sampled::Const(f(v)?),
            Self::Keys(keys) => Sampled::Keys(
                keys.into_iter()
                    .map(|k| {
                        Ok(Key {
                            frac: k.frac,
                            value: f(k.value)?,
                        })
                    })
                    .collect::<ToonResult<_>>()?,
            ),
        })
    }
}

impl<T: Approx> Sampled<T> {
    /// Collapse keyframes that all agree into a constant.
    pub fn collapsed(self) -> Self {
        match self {
            Self::Keys(mut keys)
                if !keys.is_empty() && keys.windows(2).all(|w| w[0].value.approx_eq(&w[1].value)) =>
            {
                let last = keys.swap_remove(keys.len() - 1);
                Self::Const(last.value)
            }
            other => other,
        }
    }
}

/// Pair two rendered quantities on a common time grid.
///
/// A constant is broadcast over the other side's keys; two keyframe sequences must share
/// their fractions exactly (within tolerance). There is no interpolation fallback.
pub fn zip<A: Clone, B: Clone>(a: Sampled<A>, b: Sampled<B>) -> ToonResult<Sampled<(A, B)>> {
    match (a, b) {
        (Sampled::Const(a), Sampled::Const(b)) => Ok(Sampled::Const((a, b))),
        (Sampled::Const(a), Sampled::Keys(keys)) => Ok(Sampled::Keys(
            keys.into_iter()
                .map(|k| Key {
                    frac: k.frac,
                    value: (a.clone(), k.value),
                })
                .collect(),
        )),
        (Sampled::Keys(keys), Sampled::Const(b)) => Ok(Sampled::Keys(
            keys.into_iter()
                .map(|k| Key {
                    frac: k.frac,
                    value: (k.value, b.clone()),
                })
                .collect(),
        )),
        (Sampled::Keys(ka), Sampled::Keys(kb)) => {
            if ka.len() != kb.len() || ka.iter().zip(&kb).any(|(x, y)| !float_eq(x.frac, y.frac)) {
                return Err(ToonError::animation(format!(
                    "mismatched sample keys: {} vs {} frames on different grids",
                    ka.len(),
                    kb.len()
                )));
            }
            Ok(Sampled::Keys(
                ka.into_iter()
                    .zip(kb)
                    .map(|(x, y)| Key {
                        frac: x.frac,
                        value: (x.value, y.value),
                    })
                    .collect(),
            ))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sampled.rs"]
mod tests;
