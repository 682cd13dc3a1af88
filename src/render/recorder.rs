use std::path::{Path, PathBuf};

use crate::animation::Sampled;
use crate::foundation::core::PathPoint;
use crate::foundation::error::{ToonError, ToonResult};
use crate::render::Renderer;
use crate::style::{Color, FillStyle, LineStyle};

/// One recorded renderer call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    /// A straight line.
    Line {
        /// Line style.
        line: LineStyle,
        /// Start.
        begin: Sampled<PathPoint>,
        /// End.
        end: Sampled<PathPoint>,
    },
    /// An open path.
    Path {
        /// Line style.
        line: LineStyle,
        /// Fill style.
        fill: FillStyle,
        /// Vertices.
        points: Sampled<Vec<PathPoint>>,
    },
    /// A closed path.
    Polygon {
        /// Line style.
        line: LineStyle,
        /// Fill style.
        fill: FillStyle,
        /// Vertices without the closing repeat.
        points: Sampled<Vec<PathPoint>>,
    },
    /// An elliptical arc.
    Arc {
        /// Line style.
        line: LineStyle,
        /// Fill style.
        fill: FillStyle,
        /// Start.
        begin: Sampled<PathPoint>,
        /// End.
        end: Sampled<PathPoint>,
        /// `(rx, ry)` as in [`crate::Curve::Arc`].
        radii: Sampled<(f64, f64)>,
        /// Degrees.
        skew: f64,
    },
    /// A circle.
    Circle {
        /// Line style.
        line: LineStyle,
        /// Fill style.
        fill: FillStyle,
        /// Center point.
        center: Sampled<PathPoint>,
        /// Radius.
        radius: Sampled<f64>,
    },
    /// A placed image file.
    Image {
        /// Image file path.
        file: PathBuf,
        /// `(width, height)`.
        size: (f64, f64),
        /// Placement.
        position: PathPoint,
        /// Degrees.
        rotation: f64,
    },
}

/// Everything a [`Recorder`] saw, in call order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Recording {
    /// Animation length, if any was declared.
    pub duration: Option<f64>,
    /// Background color, if one was set.
    pub background: Option<Color>,
    /// Draw calls in order.
    pub calls: Vec<DrawCall>,
}

impl Recording {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> ToonResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ToonError::Other(anyhow::Error::new(e).context("serialize recording")))
    }
}

/// A renderer that keeps every primitive as data. Supports animation and backgrounds.
#[derive(Debug, Default)]
pub struct Recorder {
    recording: Recording,
    finished: bool,
}

impl Recorder {
    /// An empty value.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, call: DrawCall) -> ToonResult<()> {
        if self.finished {
            return Err(ToonError::renderer("recorder already finished"));
        }
        self.recording.calls.push(call);
        Ok(())
    }
}

impl Renderer for Recorder {
    type Output = Recording;

    fn path(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        points: Sampled<Vec<PathPoint>>,
    ) -> ToonResult<()> {
        self.push(DrawCall::Path { line, fill, points })
    }

    fn image(
        &mut self,
        file: &Path,
        size: (f64, f64),
        position: PathPoint,
        rotation: f64,
    ) -> ToonResult<()> {
        self.push(DrawCall::Image {
            file: file.to_path_buf(),
            size,
            position,
            rotation,
        })
    }

    fn finish(&mut self) -> ToonResult<Recording> {
        self.finished = true;
        Ok(std::mem::take(&mut self.recording))
    }

    fn line(
        &mut self,
        line: LineStyle,
        begin: Sampled<PathPoint>,
        end: Sampled<PathPoint>,
    ) -> ToonResult<()> {
        self.push(DrawCall::Line { line, begin, end })
    }

    fn polygon(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        points: Sampled<Vec<PathPoint>>,
    ) -> ToonResult<()> {
        self.push(DrawCall::Polygon { line, fill, points })
    }

    fn arc(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        begin: Sampled<PathPoint>,
        end: Sampled<PathPoint>,
        radii: Sampled<(f64, f64)>,
        skew: f64,
    ) -> ToonResult<()> {
        self.push(DrawCall::Arc {
            line,
            fill,
            begin,
            end,
            radii,
            skew,
        })
    }

    fn circle(
        &mut self,
        line: LineStyle,
        fill: FillStyle,
        center: Sampled<PathPoint>,
        radius: Sampled<f64>,
    ) -> ToonResult<()> {
        self.push(DrawCall::Circle {
            line,
            fill,
            center,
            radius,
        })
    }

    fn duration(&mut self, seconds: f64) -> ToonResult<()> {
        self.recording.duration = Some(seconds);
        Ok(())
    }

    fn background(&mut self, color: Color) -> ToonResult<()> {
        self.recording.background = Some(color);
        Ok(())
    }
}
