use std::path::Path;

use crate::animation::Sampled;
use crate::animation::sampled::zip;
use crate::foundation::core::{Curve, PathPoint};
use crate::foundation::error::{ToonError, ToonResult};
use crate::style::{Color, FillStyle, LineStyle};

/// A format-specific drawing target.
///
/// Only `path`, `image` and `finish` are required; lines, polygons, arcs and circles default
/// to paths. Every positional or numeric argument is either a constant or keyframes. The
/// defaults that combine two keyframed arguments need both on the same time grid.
pub trait Renderer {
    /// What [`Renderer::finish`] produces.
    type Output;

    /// Draw an open path, filled with `fill`.
    fn path(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        points: Sampled<Vec<PathPoint>>,
    ) -> ToonResult<()>;

    /// Place an image file of `(width, height)` at `position`, rotated by `rotation` degrees.
    fn image(
        &mut self,
        file: &Path,
        size: (f64, f64),
        position: PathPoint,
        rotation: f64,
    ) -> ToonResult<()>;

    /// Complete the drawing. No calls may follow.
    fn finish(&mut self) -> ToonResult<Self::Output>;

    /// A straight line; defaults to a two-point path.
    fn line(
        &mut self,
        line: LineStyle,
        begin: Sampled<PathPoint>,
        end: Sampled<PathPoint>,
    ) -> ToonResult<()> {
        let points = zip(begin, end)?.map(|(b, e)| vec![b, e]);
        self.path(line, FillStyle::None, points)
    }

    /// Closed path: the first point is repeated at the end.
    fn polygon(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        points: Sampled<Vec<PathPoint>>,
    ) -> ToonResult<()> {
        let points = points.map(|mut pts| {
            if let Some(first) = pts.first().copied() {
                pts.push(first);
            }
            pts
        });
        self.path(line, fill, points)
    }

    /// Elliptical arc from `begin` to `end`.
    ///
    /// `radii` is `(rx, ry)` as in [`Curve::Arc`], rotated by `skew` degrees.
    fn arc(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        begin: Sampled<PathPoint>,
        end: Sampled<PathPoint>,
        radii: Sampled<(f64, f64)>,
        skew: f64,
    ) -> ToonResult<()> {
        let points = zip(zip(begin, end)?, radii)?.try_map(|((b, e), (rx, ry))| {
            Ok(vec![
                PathPoint::new(b.x, b.y),
                PathPoint::new(e.x, e.y).with_curve(Curve::arc(rx, ry, skew)?),
            ])
        })?;
        self.path(line, fill, points)
    }

    /// Two half-circle arcs through the leftmost and back to the rightmost point.
    fn circle(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        center: Sampled<PathPoint>,
        radius: Sampled<f64>,
    ) -> ToonResult<()> {
        let points = zip(center, radius)?.try_map(|(c, r)| {
            let half = Curve::arc(r, r, 0.0)?;
            Ok(vec![
                PathPoint::new(c.x + r, c.y),
                PathPoint::new(c.x - r, c.y).with_curve(half),
                PathPoint::new(c.x + r, c.y).with_curve(half),
            ])
        })?;
        self.path(line, fill, points)
    }

    /// Declare an animation of `seconds`; still formats refuse.
    fn duration(&mut self, seconds: f64) -> ToonResult<()> {
        Err(ToonError::renderer(format!(
            "renderer does not support animation (duration {seconds} requested)"
        )))
    }

    /// Set the background; still formats without one refuse.
    fn background(&mut self, color: Color) -> ToonResult<()> {
        Err(ToonError::renderer(format!(
            "renderer does not support setting a background ({:?} requested)",
            color.hex()
        )))
    }
}
