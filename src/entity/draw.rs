use crate::animation::{Animated, ops};
use crate::entity::{Entity, Kind, Overrides};
use crate::foundation::error::{ToonError, ToonResult};
use crate::render::{Canvas, Renderer};
use crate::sample::{Sampler, TimeSpec};
use crate::transform::Transform;
use crate::value::Value;

const DEFAULT_RADIUS: f64 = 100.0;
const DEFAULT_DISPLACEMENT: (f64, f64) = (100.0, 100.0);

fn default_points() -> Value {
    Value::List(vec![
        (0.0, 0.0).into(),
        (50.0, 100.0).into(),
        (100.0, 0.0).into(),
    ])
}

fn or_default(v: Value, default: impl FnOnce() -> Value) -> Value {
    if v.is_null() { default() } else { v }
}

impl Entity {
    /// Draw into `canvas` at `time`, then finish it.
    ///
    /// An animated canvas needs an interval and a still canvas needs an instant.
    #[tracing::instrument(skip(self, canvas), fields(kind = self.kind.name()))]
    pub fn render<R: Renderer>(
        &self,
        mut canvas: Canvas<R>,
        time: TimeSpec,
    ) -> ToonResult<R::Output> {
        canvas.check_time(&time)?;
        self.draw(time, &mut canvas)?;
        canvas.finish()
    }

    /// Resolve this entity's parameters and transform through its own resolver and clock.
    pub fn resolve_parameters(&self) -> ToonResult<(Kind, Transform)> {
        let kind = self.kind.resolved(&self.resolver)?;
        let transform = self.transform.resolve(&self.resolver, &self.clock, false)?;
        Ok((kind, transform))
    }

    pub(crate) fn draw<R: Renderer>(
        &self,
        time: TimeSpec,
        canvas: &mut Canvas<R>,
    ) -> ToonResult<()> {
        tracing::trace!(kind = self.kind.name(), "draw");
        let (kind, transform) = self.resolve_parameters()?;
        if let Kind::Group { entities } = self.kind.as_ref() {
            return self.draw_children(entities, &transform, time, canvas);
        }
        let s = Sampler::new(&transform, &self.clock, time, canvas.parser());
        match kind {
            Kind::Line {
                begin,
                displacement,
                end,
                lstyle,
            } => {
                let lstyle = s.line_fields(&lstyle)?;
                let (begin, end) = segment(&s, begin, displacement, end)?;
                let line = s.line_style(&lstyle, &begin)?;
                let (begin, end) = (s.point(&begin)?, s.point(&end)?);
                canvas.line(line, begin, end)
            }
            Kind::Circle {
                center,
                radius,
                lstyle,
                fstyle,
            } => {
                let (lstyle, fstyle) = (s.line_fields(&lstyle)?, s.fill_fields(&fstyle)?);
                let center = s.wrap(&or_default(center, || (0.0, 0.0).into()));
                let radius = s.wrap(&or_default(radius, || DEFAULT_RADIUS.into()));
                let line = s.line_style(&lstyle, &center)?;
                let fill = s.fill_style(&fstyle)?;
                let radius = s.radius(&radius, &center)?;
                let center = s.point(&center)?;
                canvas.circle(line, fill, center, radius)
            }
            Kind::Polygon {
                points,
                lstyle,
                fstyle,
            }
            | Kind::Path {
                points,
                lstyle,
                fstyle,
            } => {
                let closed = matches!(self.kind.as_ref(), Kind::Polygon { .. });
                let (lstyle, fstyle) = (s.line_fields(&lstyle)?, s.fill_fields(&fstyle)?);
                let points = s.wrap(&or_default(points, default_points));
                let origin = points.then(first_point);
                let line = s.line_style(&lstyle, &origin)?;
                let fill = s.fill_style(&fstyle)?;
                let points = s.points(&points)?;
                if closed {
                    canvas.polygon(line, fill, points)
                } else {
                    canvas.path(line, fill, points)
                }
            }
            Kind::Group { .. } => Ok(()),
        }
    }

    fn draw_children<R: Renderer>(
        &self,
        entities: &Value,
        transform: &Transform,
        time: TimeSpec,
        canvas: &mut Canvas<R>,
    ) -> ToonResult<()> {
        let entities = match entities {
            Value::List(_) => entities.clone(),
            other => self.resolver.apply(other)?,
        };
        let children = match entities {
            Value::List(children) => children,
            other => return Err(other.not_concrete("group entities", "a list of entities")),
        };
        for child in &children {
            let child = match child {
                Value::Entity(e) => e.clone(),
                other => match self.resolver.apply(other)? {
                    Value::Entity(e) => e,
                    other => return Err(other.not_concrete("group child", "an entity")),
                },
            };
            child
                .with(
                    Overrides::new()
                        .resolver(self.resolver.clone())
                        .transform(transform.clone())
                        .clock(self.clock.clone()),
                )
                .draw(time, canvas)?;
        }
        Ok(())
    }
}

fn first_point(points: Value) -> ToonResult<Value> {
    match points {
        Value::List(mut items) if !items.is_empty() => Ok(items.swap_remove(0)),
        Value::List(_) => Err(ToonError::geometry("point sequence is empty")),
        other => Err(other.not_concrete("points", "a list of points")),
    }
}

/// Endpoints of a segment from whichever two of begin, displacement and end are set.
///
/// Missing quantities default to a begin at the origin and a displacement of (100, 100);
/// when both ends are given a displacement is not needed.
fn segment(
    s: &Sampler<'_>,
    begin: Value,
    displacement: Value,
    end: Value,
) -> ToonResult<(Animated, Animated)> {
    let displacement_or_default = |d: Value| s.wrap(&or_default(d, || DEFAULT_DISPLACEMENT.into()));
    match (begin.is_null(), displacement.is_null(), end.is_null()) {
        (false, false, false) => Err(ToonError::geometry(
            "specifying begin, displacement, and end for a line is redundant",
        )),
        (_, _, true) => {
            let begin = s.wrap(&or_default(begin, || (0.0, 0.0).into()));
            let end = ops::add(&begin, &displacement_or_default(displacement))?;
            Ok((begin, end))
        }
        (true, _, false) => {
            let end = s.wrap(&end);
            let begin = ops::sub(&end, &displacement_or_default(displacement))?;
            Ok((begin, end))
        }
        (false, true, false) => Ok((s.wrap(&begin), s.wrap(&end))),
    }
}
