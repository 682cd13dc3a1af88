//! Line and fill styles: informal descriptions, their parser, and the canonical sampled
//! structures renderers receive.

pub mod color;
pub mod dash;
pub mod fields;
pub mod parser;
pub mod resolved;

pub use color::Color;
pub use dash::Dash;
pub use fields::{FillFields, LineFields};
pub use parser::{BasicStyleParser, StyleParser};
pub use resolved::{ColorStop, FillStyle, LineStyle};
