use crate::foundation::core::{PathPoint, Point, Vec2};
use crate::transform::kernel::{Flavor, Kernel, KernelScale};

/// One concrete level of a transform chain at a single instant.
#[derive(Clone, Debug)]
pub(crate) struct Level {
    kernel: Kernel,
    flavor: Flavor,
    origin: Point,
    scale: f64,
}

impl Level {
    /// `origin` is the entity origin already mapped through every level inside this one.
    pub(crate) fn new(kernel: Kernel, flavor: Flavor, origin: Point) -> Self {
        let mut level = Self {
            kernel,
            flavor,
            origin,
            scale: 1.0,
        };
        level.scale = match level.kernel.scale() {
            KernelScale::Fixed(k) => k.abs(),
            KernelScale::Derived => level.derived_scale(),
        };
        level
    }

    fn relative(&self, p: Point) -> Point {
        match self.flavor {
            Flavor::Uniform => self.kernel.apply(p),
            Flavor::Positional => self.kernel.apply(self.origin) + (p - self.origin),
        }
    }

    fn derived_scale(&self) -> f64 {
        let o = self.origin;
        let r0 = self.relative(o);
        let r1 = self.relative(o + Vec2::new(1.0, 0.0));
        let r2 = self.relative(o + Vec2::new(0.0, 1.0));
        (((r1 - r0).hypot2() + (r2 - r0).hypot2()) / 2.0).sqrt()
    }

    pub(crate) fn mapped_origin(&self) -> Point {
        self.kernel.apply(self.origin)
    }
}

/// The `(absolute, relative, linescale)` triplet of a transform chain at one instant and
/// one origin. Levels are applied inner first.
#[derive(Clone, Debug)]
pub struct Mapping {
    levels: Vec<Level>,
}

impl Mapping {
    pub(crate) fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Map a point through every level.
    pub fn absolute(&self, p: Point) -> Point {
        self.levels.iter().fold(p, |p, l| l.kernel.apply(p))
    }

    /// Map a point, keeping its displacement from the origin under positional levels.
    pub fn relative(&self, p: Point) -> Point {
        self.levels.iter().fold(p, |p, l| l.relative(p))
    }

    /// Product of the levels' line-width scales.
    pub fn linescale(&self) -> f64 {
        self.levels.iter().map(|l| l.scale).product()
    }

    /// Map a path vertex; arc radii scale with the line scale.
    pub fn absolute_vertex(&self, p: PathPoint) -> PathPoint {
        let mapped = self.absolute(p.point());
        PathPoint {
            x: mapped.x,
            y: mapped.y,
            curve: p.curve.map(|c| c.scaled(self.linescale())),
        }
    }
}
