use std::path::Path;

use anyhow::Context;

use crate::animation::Sampled;
use crate::foundation::core::{Curve, PathPoint};
use crate::foundation::error::{ToonError, ToonResult};
use crate::render::Renderer;
use crate::sample::TimeSpec;
use crate::style::{BasicStyleParser, Color, FillStyle, LineStyle, StyleParser};

/// Canvas-wide settings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasOpts {
    /// Animation length in seconds; `None` renders a still.
    pub duration: Option<f64>,
    /// Background color string; renderers without backgrounds refuse it.
    pub background: Option<String>,
    /// Map every parsed color to its gray level.
    pub grayscale: bool,
}

/// Validates draw calls and forwards them to a [`Renderer`].
pub struct Canvas<R: Renderer> {
    renderer: R,
    parser: Box<dyn StyleParser>,
    animated: bool,
}

impl<R: Renderer> Canvas<R> {
    /// A canvas using [`BasicStyleParser`].
    pub fn new(renderer: R, opts: &CanvasOpts) -> ToonResult<Self> {
        Self::with_parser(renderer, opts, Box::new(BasicStyleParser::new(opts.grayscale)))
    }

    /// A canvas with a custom style parser. Sends duration and background to `renderer`.
    pub fn with_parser(
        mut renderer: R,
        opts: &CanvasOpts,
        parser: Box<dyn StyleParser>,
    ) -> ToonResult<Self> {
        if let Some(d) = opts.duration {
            if !(d.is_finite() && d > 0.0) {
                return Err(ToonError::validation(format!(
                    "animation duration must be positive: {d}"
                )));
            }
            renderer.duration(d)?;
        }
        if let Some(bg) = &opts.background {
            renderer.background(parser.color(&bg.as_str().into())?)?;
        }
        Ok(Self {
            renderer,
            parser,
            animated: opts.duration.is_some(),
        })
    }

    /// The parser entities use for their style descriptions.
    pub fn parser(&self) -> &dyn StyleParser {
        self.parser.as_ref()
    }

    /// True for an animated canvas.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// An animated canvas draws over an interval; a still one at an instant.
    pub fn check_time(&self, time: &TimeSpec) -> ToonResult<()> {
        match (*time, self.animated) {
            (TimeSpec::Instant(_), true) => Err(ToonError::validation(
                "animation duration specified but time is not an interval",
            )),
            (TimeSpec::Interval { .. }, false) => Err(ToonError::validation(
                "time interval given without an animation duration",
            )),
            (TimeSpec::Interval { start, end }, true) => {
                TimeSpec::interval(start, end).map(|_| ())
            }
            (TimeSpec::Instant(_), false) => Ok(()),
        }
    }

    fn check<T>(
        &self,
        what: &str,
        v: &Sampled<T>,
        mut valid: impl FnMut(&T) -> ToonResult<()>,
    ) -> ToonResult<()> {
        match v {
            Sampled::Const(x) => valid(x),
            Sampled::Keys(_) if !self.animated => Err(ToonError::animation(format!(
                "{what} varies in time but the canvas is not animated"
            ))),
            Sampled::Keys(keys) => keys.iter().try_for_each(|k| valid(&k.value)),
        }
    }

    fn check_point(&self, what: &str, p: &Sampled<PathPoint>) -> ToonResult<()> {
        self.check(what, p, |p| p.validate().map(|_| ()))
    }

    fn check_points(&self, p: &Sampled<Vec<PathPoint>>) -> ToonResult<()> {
        self.check("points", p, |pts| {
            pts.iter().try_for_each(|p| p.validate().map(|_| ()))
        })
    }

    fn check_radius(&self, r: &Sampled<f64>) -> ToonResult<()> {
        self.check("radius", r, |r| {
            if r.is_finite() && *r > 0.0 {
                Ok(())
            } else {
                Err(ToonError::validation(format!("radius must be positive: {r}")))
            }
        })
    }

    fn check_line(&self, l: &LineStyle) -> ToonResult<()> {
        self.check("line color", &l.color, |_| Ok(()))?;
        self.check("line weight", &l.weight, |w| {
            if w.is_finite() && *w >= 0.0 {
                Ok(())
            } else {
                Err(ToonError::validation(format!("line weight must be non-negative: {w}")))
            }
        })?;
        self.check("line dash", &l.dash, |_| Ok(()))
    }

    fn check_fill(&self, f: &FillStyle) -> ToonResult<()> {
        let color = |c: &Sampled<Color>| self.check("fill color", c, |_| Ok(()));
        match f {
            FillStyle::None => Ok(()),
            FillStyle::Solid { color: c } => color(c),
            FillStyle::RadialGradient { radius, begin, end } => {
                self.check_radius(radius)?;
                color(begin)?;
                color(end)
            }
            FillStyle::LinearGradient { stops, .. } => {
                self.check("gradient stops", stops, |_| Ok(()))
            }
        }
    }

    /// Line style.
    pub fn line(
        &mut self,
        line: LineStyle,
        begin: Sampled<PathPoint>,
        end: Sampled<PathPoint>,
    ) -> ToonResult<()> {
        self.check_line(&line)?;
        self.check_point("line begin", &begin)?;
        self.check_point("line end", &end)?;
        self.renderer.line(line, begin, end)
    }

    /// An open path.
    pub fn path(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        points: Sampled<Vec<PathPoint>>,
    ) -> ToonResult<()> {
        self.check_line(&line)?;
        self.check_fill(&fill)?;
        self.check_points(&points)?;
        self.renderer.path(line, fill, points)
    }

    /// A closed path.
    pub fn polygon(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        points: Sampled<Vec<PathPoint>>,
    ) -> ToonResult<()> {
        self.check_line(&line)?;
        self.check_fill(&fill)?;
        self.check_points(&points)?;
        self.renderer.polygon(line, fill, points)
    }

    /// An elliptical arc; `radii` and `skew` must form a valid [`Curve::Arc`].
    pub fn arc(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        begin: Sampled<PathPoint>,
        end: Sampled<PathPoint>,
        radii: Sampled<(f64, f64)>,
        skew: f64,
    ) -> ToonResult<()> {
        self.check_line(&line)?;
        self.check_fill(&fill)?;
        self.check_point("arc begin", &begin)?;
        self.check_point("arc end", &end)?;
        self.check("arc radii", &radii, |&(rx, ry)| {
            Curve::arc(rx, ry, skew).map(|_| ())
        })?;
        self.renderer.arc(line, fill, begin, end, radii, skew)
    }

    /// A circle.
    pub fn circle(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        center: Sampled<PathPoint>,
        radius: Sampled<f64>,
    ) -> ToonResult<()> {
        self.check_line(&line)?;
        self.check_fill(&fill)?;
        self.check_point("circle center", &center)?;
        self.check_radius(&radius)?;
        self.renderer.circle(line, fill, center, radius)
    }

    /// Place an image file of `(width, height)` at `position`, rotated by `rotation` degrees.
    pub fn image(
        &mut self,
        file: &Path,
        size: (f64, f64),
        position: PathPoint,
        rotation: f64,
    ) -> ToonResult<()> {
        std::fs::metadata(file).with_context(|| format!("image file {}", file.display()))?;
        let (w, h) = size;
        if !(w.is_finite() && w > 0.0 && h.is_finite() && h > 0.0) {
            return Err(ToonError::validation(format!(
                "image size must be positive: ({w}, {h})"
            )));
        }
        if !rotation.is_finite() {
            return Err(ToonError::validation(format!("image rotation must be finite: {rotation}")));
        }
        self.renderer.image(file, size, position.validate()?, rotation)
    }

    /// Consume the canvas and produce the renderer output.
    pub fn finish(mut self) -> ToonResult<R::Output> {
        self.renderer.finish()
    }
}
