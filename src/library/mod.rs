//! Higher-level drawings assembled from entities.

pub mod raster;

pub use raster::{Axis, RasterGrid, rasterize};
