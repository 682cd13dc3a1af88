//! Raster images drawn as grids of small filled polygons.
//!
//! Two staggered layers of square pixels are laid down: a lower `(nx+1) x (ny+1)` layer on
//! the grid corners and an upper `nx x ny` layer on the cell centers. Alphas are split
//! between the layers so a pixel over its lower neighbour composites back to the requested
//! alpha.

use crate::animation::Animated;
use crate::entity::{Entity, group, polygon};
use crate::foundation::error::{ToonError, ToonResult};
use crate::style::Color;
use crate::value::{ParamFn, TIME, Value};

// Overlap neighbouring pixels slightly so no seams show.
const OVERLAP: f64 = 1.001;

/// One sampling axis: `n` cells spanning `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Axis {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Number of cells.
    pub n: usize,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
            n: 20,
        }
    }
}

impl Axis {
    fn step(&self, what: &str) -> ToonResult<f64> {
        if self.n == 0 || !(self.min.is_finite() && self.max.is_finite() && self.max > self.min) {
            return Err(ToonError::validation(format!(
                "{what} axis must span an increasing range with at least one cell: {self:?}"
            )));
        }
        Ok((self.max - self.min) / self.n as f64)
    }
}

/// Layout of a rasterized image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RasterGrid {
    /// Horizontal sampling axis.
    pub x: Axis,
    /// Vertical sampling axis.
    pub y: Axis,
    /// Pixel height over width; pixel area is always 1 before scaling.
    pub pixel_aspect_ratio: f64,
    /// Width of the drawn image.
    pub width: f64,
}

impl Default for RasterGrid {
    fn default() -> Self {
        Self {
            x: Axis::default(),
            y: Axis::default(),
            pixel_aspect_ratio: 1.0,
            width: 100.0,
        }
    }
}

#[derive(Clone, Copy)]
enum Layer {
    Lower,
    Upper,
}

impl Layer {
    fn alpha(self, a: f64) -> f64 {
        match self {
            Self::Upper => a / 2.0,
            Self::Lower => a / (2.0 - a),
        }
    }
}

fn layered(c: Color, layer: Layer) -> ToonResult<Color> {
    if c.is_none() {
        return Ok(c);
    }
    c.with_alpha(layer.alpha(c.alpha.unwrap_or(1.0)))
}

/// Build a group of pixels whose colors follow `shade`.
///
/// `shade(x, y)` returns the color at that point as a function of local time, plus the
/// native sampling interval there. With `None` the color is taken once at time 0 and the
/// pixel is static; otherwise it is called with the local time of every sample, so still
/// renders of animated pixels need an explicit instant.
pub fn rasterize<F, G>(grid: &RasterGrid, shade: F) -> ToonResult<Entity>
where
    F: Fn(f64, f64) -> (G, Option<f64>),
    G: Fn(f64) -> Color + Send + Sync + 'static,
{
    let (dx, dy) = (grid.x.step("x")?, grid.y.step("y")?);
    if !(grid.pixel_aspect_ratio.is_finite() && grid.pixel_aspect_ratio > 0.0) {
        return Err(ToonError::validation(format!(
            "pixel aspect ratio must be positive: {}",
            grid.pixel_aspect_ratio
        )));
    }
    if !(grid.width.is_finite() && grid.width > 0.0) {
        return Err(ToonError::validation(format!(
            "raster width must be positive: {}",
            grid.width
        )));
    }
    let py_size = grid.pixel_aspect_ratio;
    let px_size = 1.0 / py_size;
    let (hx, hy) = (OVERLAP * px_size / 2.0, OVERLAP * py_size / 2.0);
    let pixel = polygon()
        .set(
            "points",
            Value::List(vec![
                (-hx, -hy).into(),
                (hx, -hy).into(),
                (hx, hy).into(),
                (-hx, hy).into(),
            ]),
        )
        .set("lstyle", false);

    let fill = |x: f64, y: f64, layer: Layer| -> ToonResult<Value> {
        let (color, dt) = shade(x, y);
        let color = match dt {
            None => Value::Color(layered(color(0.0), layer)?),
            Some(dt) => Animated::new(
                ParamFn::unary(TIME, move |t| {
                    Ok(Value::Color(layered(color(t.number(TIME)?), layer)?))
                }),
                dt,
            )
            .into(),
        };
        Ok(Value::map([("fill", Value::from("solid")), ("color", color)]))
    };

    let mut pixels = Vec::with_capacity((grid.x.n + 1) * (grid.y.n + 1) + grid.x.n * grid.y.n);
    for i in 0..=grid.x.n {
        let x = grid.x.min + i as f64 * dx;
        for j in 0..=grid.y.n {
            let y = grid.y.min + j as f64 * dy;
            pixels.push(
                pixel
                    .set("fstyle", fill(x, y, Layer::Lower)?)
                    .translate(i as f64 * px_size, j as f64 * py_size),
            );
        }
    }
    for i in 0..grid.x.n {
        let (fi, x) = (i as f64 + 0.5, grid.x.min + (i as f64 + 0.5) * dx);
        for j in 0..grid.y.n {
            let (fj, y) = (j as f64 + 0.5, grid.y.min + (j as f64 + 0.5) * dy);
            pixels.push(
                pixel
                    .set("fstyle", fill(x, y, Layer::Upper)?)
                    .translate(fi * px_size, fj * py_size),
            );
        }
    }
    tracing::debug!(pixels = pixels.len(), "rasterized grid");
    Ok(group(pixels).scale(grid.width / (px_size * grid.x.n as f64)))
}

#[cfg(test)]
#[path = "../../tests/unit/library/raster.rs"]
mod tests;
