//! Toon resolves declarative vector-graphics descriptions into concrete draw calls.
//!
//! Users build an immutable tree of entities (lines, circles, polygons, paths, groups)
//! whose parameters may be literals, named placeholders bound later, or functions of time.
//! Rendering resolves the tree against an instant or an interval and hands a [`Renderer`]
//! either single values or keyframe sequences.
//!
//! # Pipeline overview
//!
//! 1. **Copy-call**: [`Entity::with`] layers overrides, substitutions, transforms and clocks
//!    without mutating anything.
//! 2. **Resolve**: each entity substitutes its parameters through its [`Resolver`] chain and
//!    locks its [`Transform`] chain to a clock.
//! 3. **Sample**: the [`Sampler`] walks the time axis at the finest interval any contributor
//!    needs, scales radii and line weights by the transform's line scale, and collapses
//!    samples that all agree.
//! 4. **Render**: a [`Canvas`] validates the result and forwards it to the [`Renderer`].
//!
//! Everything is single-threaded and pure: no entity, transform or animated value changes
//! after construction.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod entity;
mod foundation;
mod library;
mod render;
mod resolve;
mod sample;
mod style;
mod transform;
mod value;

pub use animation::ops::{add, blend, sub};
pub use animation::sampled::zip;
pub use animation::{Animated, Clock, Key, MAX_SAMPLE_INTERVALS, Sampled};
pub use entity::{Entity, Kind, Overrides, circle, group, line, path, polygon};
pub use foundation::core::{Affine, Curve, PathPoint, Point, Vec2};
pub use foundation::error::{ToonError, ToonResult};
pub use foundation::math::{Approx, REL_TOL, float_eq};
pub use library::{Axis, RasterGrid, rasterize};
pub use render::{Canvas, CanvasOpts, DrawCall, Recorder, Recording, Renderer};
pub use resolve::Resolver;
pub use sample::{Sampler, TimeSpec, time_fraction};
pub use style::{
    BasicStyleParser, Color, ColorStop, Dash, FillFields, FillStyle, LineFields, LineStyle,
    StyleParser,
};
pub use transform::{Flavor, Kernel, KernelScale, Mapping, Params, Transform};
pub use value::{Bindings, ParamFn, TIME, Value, sym};
