//! Render-time sampling.
//!
//! Turns resolved parameters into what a renderer consumes: one concrete value for an
//! instant, or keyframes over an interval. The number of keyframe intervals is the largest
//! requirement among everything a quantity depends on (its own interval, the transform's,
//! and the origin's for scale-corrected quantities). Keyframes that all agree collapse back
//! to a constant.

use crate::animation::{Animated, Clock, Key, Sampled};
use crate::foundation::core::{PathPoint, Point};
use crate::foundation::error::{ToonError, ToonResult};
use crate::foundation::math::Approx;
use crate::style::{FillFields, FillStyle, LineFields, LineStyle, StyleParser};
use crate::transform::Transform;
use crate::value::Value;

/// When to render: one instant (`None` for a drawing without time) or an interval.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSpec {
    /// One instant; `None` is a drawing without time.
    Instant(Option<f64>),
    /// A time interval; build it with [`TimeSpec::interval`].
    Interval {
        /// Start time.
        start: f64,
        /// End time, later than `start`.
        end: f64,
    },
}

impl TimeSpec {
    /// An instant without time.
    pub fn still() -> Self {
        Self::Instant(None)
    }

    /// The instant `t`.
    pub fn at(t: f64) -> Self {
        Self::Instant(Some(t))
    }

    /// An interval; `end` must be later than `start`.
    pub fn interval(start: f64, end: f64) -> ToonResult<Self> {
        if start.is_finite() && end.is_finite() && end > start {
            Ok(Self::Interval { start, end })
        } else {
            Err(ToonError::validation(format!(
                "time interval must be finite and increasing: ({start}, {end})"
            )))
        }
    }

    /// True for an interval.
    pub fn is_interval(&self) -> bool {
        matches!(self, Self::Interval { .. })
    }
}

/// Fraction of `[ta, tz]` elapsed at `t`, clamped to `[0, 1]`.
pub fn time_fraction(t: f64, ta: f64, tz: f64) -> f64 {
    ((t - ta) / (tz - ta)).clamp(0.0, 1.0)
}

/// Samples the parameters of one entity under its resolved transform and clock.
pub struct Sampler<'a> {
    transform: &'a Transform,
    clock: &'a Clock,
    time: TimeSpec,
    parser: &'a dyn StyleParser,
}

impl<'a> Sampler<'a> {
    /// An empty value.
    pub fn new(
        transform: &'a Transform,
        clock: &'a Clock,
        time: TimeSpec,
        parser: &'a dyn StyleParser,
    ) -> Self {
        Self {
            transform,
            clock,
            time,
            parser,
        }
    }

    /// Split a line style description with the canvas parser.
    pub fn line_fields(&self, v: &Value) -> ToonResult<LineFields> {
        self.parser.line_style(v)
    }

    /// Split a fill style description with the canvas parser.
    pub fn fill_fields(&self, v: &Value) -> ToonResult<FillFields> {
        self.parser.fill_style(v)
    }

    /// Promote a resolved parameter to an animated value on the entity clock.
    pub fn wrap(&self, v: &Value) -> Animated {
        Animated::wrap(v, self.clock)
    }

    /// Evaluate `f` at each sample instant.
    ///
    /// `intervals` is asked for the interval count only when rendering an interval. A count
    /// of zero means nothing varies and `f` is evaluated once without a time.
    pub fn sample<T, N, F>(&self, intervals: N, mut f: F) -> ToonResult<Sampled<T>>
    where
        T: Approx,
        N: FnOnce(f64, f64) -> ToonResult<usize>,
        F: FnMut(Option<f64>) -> ToonResult<T>,
    {
        let (ta, tz) = match self.time {
            TimeSpec::Instant(t) => return Ok(Sampled::Const(f(t)?)),
            TimeSpec::Interval { start, end } => (start, end),
        };
        let n = intervals(ta, tz)?;
        if n == 0 {
            return Ok(Sampled::Const(f(None)?));
        }
        let step = (tz - ta) / n as f64;
        let keys = (0..=n)
            .map(|i| {
                let t = ta + i as f64 * step;
                Ok(Key {
                    frac: time_fraction(t, ta, tz),
                    value: f(Some(t))?,
                })
            })
            .collect::<ToonResult<Vec<_>>>()?;
        let sampled = Sampled::Keys(keys).collapsed();
        if !sampled.is_animated() {
            tracing::debug!(intervals = n, "homogeneous samples collapsed to a constant");
        }
        Ok(sampled)
    }

    /// A quantity the transform does not touch, sampled at its own interval.
    pub fn plain<T, F>(&self, v: &Animated, mut parse: F) -> ToonResult<Sampled<T>>
    where
        T: Approx,
        F: FnMut(&Value) -> ToonResult<T>,
    {
        self.sample(
            |ta, tz| v.n_intervals(ta, tz, 0),
            |t| parse(&v.at(t)?),
        )
    }

    fn transform_intervals(&self, ta: f64, tz: f64) -> ToonResult<usize> {
        self.transform.n_intervals(ta, tz)
    }

    /// A point mapped through the absolute transform.
    pub fn point(&self, p: &Animated) -> ToonResult<Sampled<PathPoint>> {
        self.sample(
            |ta, tz| p.n_intervals(ta, tz, self.transform_intervals(ta, tz)?),
            |t| {
                let mapping = self.transform.mappings(t, Point::ZERO)?;
                Ok(mapping.absolute_vertex(p.at(t)?.point("point")?))
            },
        )
    }

    /// A point sequence mapped through the absolute transform.
    pub fn points(&self, ps: &Animated) -> ToonResult<Sampled<Vec<PathPoint>>> {
        self.sample(
            |ta, tz| ps.n_intervals(ta, tz, self.transform_intervals(ta, tz)?),
            |t| {
                let mapping = self.transform.mappings(t, Point::ZERO)?;
                Ok(ps
                    .at(t)?
                    .points("points")?
                    .into_iter()
                    .map(|p| mapping.absolute_vertex(p))
                    .collect())
            },
        )
    }

    /// A length anchored at `origin`, multiplied by the transform's line scale there.
    fn scaled<F>(&self, v: &Animated, origin: &Animated, mut parse: F) -> ToonResult<Sampled<f64>>
    where
        F: FnMut(&Value) -> ToonResult<f64>,
    {
        self.sample(
            |ta, tz| {
                let n = self.transform_intervals(ta, tz)?;
                let n = origin.n_intervals(ta, tz, n)?;
                v.n_intervals(ta, tz, n)
            },
            |t| {
                let o = origin.at(t)?.point("origin")?.point();
                let linescale = self.transform.mappings(t, o)?.linescale();
                Ok(parse(&v.at(t)?)? * linescale)
            },
        )
    }

    /// A radius scaled by the line scale at `origin`.
    pub fn radius(&self, r: &Animated, origin: &Animated) -> ToonResult<Sampled<f64>> {
        self.scaled(r, origin, |v| self.parser.radius(v))
    }

    /// Color and dash at their own intervals; weight scaled at `origin`.
    pub fn line_style(&self, fields: &LineFields, origin: &Animated) -> ToonResult<LineStyle> {
        Ok(LineStyle {
            color: self.plain(&self.wrap(&fields.color), |v| self.parser.color(v))?,
            weight: self.scaled(&self.wrap(&fields.weight), origin, |v| self.parser.weight(v))?,
            dash: self.plain(&self.wrap(&fields.dash), |v| self.parser.dash(v))?,
        })
    }

    /// Each fill field at its own interval; fills are not transformed.
    pub fn fill_style(&self, fields: &FillFields) -> ToonResult<FillStyle> {
        let color = |v: &Value| self.plain(&self.wrap(v), |c| self.parser.color(c));
        Ok(match fields {
            FillFields::None => FillStyle::None,
            FillFields::Solid { color: c } => FillStyle::Solid { color: color(c)? },
            FillFields::RadialGradient { radius, begin, end } => FillStyle::RadialGradient {
                radius: self.plain(&self.wrap(radius), |v| self.parser.radius(v))?,
                begin: color(begin)?,
                end: color(end)?,
            },
            FillFields::LinearGradient { stops, orientation } => FillStyle::LinearGradient {
                stops: self.plain(&self.wrap(stops), |v| self.parser.stops(v))?,
                orientation: orientation.clone(),
            },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/sampler.rs"]
mod tests;
