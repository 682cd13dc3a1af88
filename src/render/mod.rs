//! The renderer capability, the validating canvas in front of it, and a recording renderer.

pub mod canvas;
pub mod recorder;
pub mod renderer;

pub use canvas::{Canvas, CanvasOpts};
pub use recorder::{DrawCall, Recorder, Recording};
pub use renderer::Renderer;

use crate::entity::Entity;
use crate::foundation::error::ToonResult;
use crate::sample::TimeSpec;

impl Entity {
    /// Render into a fresh [`Recorder`].
    pub fn record(&self, opts: &CanvasOpts, time: TimeSpec) -> ToonResult<Recording> {
        self.render(Canvas::new(Recorder::new(), opts)?, time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/render.rs"]
mod tests;
