use crate::foundation::error::ToonResult;
use crate::resolve::Resolver;
use crate::value::Value;

/// The drawable kinds and their entity-specific parameters. `Null` means "use the default".
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    /// A segment; any two of the three positions determine it.
    Line {
        /// Start point.
        begin: Value,
        /// End minus begin.
        displacement: Value,
        /// End point.
        end: Value,
        /// Line style description.
        lstyle: Value,
    },
    /// A circle around `center`.
    Circle {
        /// Center point.
        center: Value,
        /// Scaled with the transform's line scale.
        radius: Value,
        /// Line style description.
        lstyle: Value,
        /// Fill style description.
        fstyle: Value,
    },
    /// A closed outline.
    Polygon {
        /// Vertices in drawing order.
        points: Value,
        /// Line style description.
        lstyle: Value,
        /// Fill style description.
        fstyle: Value,
    },
    /// An open outline whose vertices may carry arc descriptors.
    Path {
        /// Vertices in drawing order.
        points: Value,
        /// Line style description.
        lstyle: Value,
        /// Fill style description.
        fstyle: Value,
    },
    /// Child entities drawn under the group's transform, clock and bindings.
    Group {
        /// A list of entities, or a placeholder for one.
        entities: Value,
    },
}

impl Kind {
    /// Lower-case kind name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Circle { .. } => "circle",
            Self::Polygon { .. } => "polygon",
            Self::Path { .. } => "path",
            Self::Group { .. } => "group",
        }
    }

    /// The parameter stored under `key`, if this kind has one.
    pub(crate) fn slot(&mut self, key: &str) -> Option<&mut Value> {
        match (self, key) {
            (Self::Line { begin, .. }, "begin") => Some(begin),
            (Self::Line { displacement, .. }, "displacement") => Some(displacement),
            (Self::Line { end, .. }, "end") => Some(end),
            (Self::Circle { center, .. }, "center") => Some(center),
            (Self::Circle { radius, .. }, "radius") => Some(radius),
            (
                Self::Polygon { points, .. } | Self::Path { points, .. },
                "points",
            ) => Some(points),
            (
                Self::Line { lstyle, .. }
                | Self::Circle { lstyle, .. }
                | Self::Polygon { lstyle, .. }
                | Self::Path { lstyle, .. },
                "lstyle",
            ) => Some(lstyle),
            (
                Self::Circle { fstyle, .. }
                | Self::Polygon { fstyle, .. }
                | Self::Path { fstyle, .. },
                "fstyle",
            ) => Some(fstyle),
            (Self::Group { entities }, "entities") => Some(entities),
            _ => None,
        }
    }

    fn slots(&mut self) -> Vec<&mut Value> {
        match self {
            Self::Line {
                begin,
                displacement,
                end,
                lstyle,
            } => vec![begin, displacement, end, lstyle],
            Self::Circle {
                center,
                radius,
                lstyle,
                fstyle,
            } => vec![center, radius, lstyle, fstyle],
            Self::Polygon {
                points,
                lstyle,
                fstyle,
            }
            | Self::Path {
                points,
                lstyle,
                fstyle,
            } => vec![points, lstyle, fstyle],
            // Children carry the resolver down themselves.
            Self::Group { .. } => Vec::new(),
        }
    }

    /// Every parameter passed through `resolver`.
    pub(crate) fn resolved(&self, resolver: &Resolver) -> ToonResult<Self> {
        let mut kind = self.clone();
        for slot in kind.slots() {
            *slot = resolver.apply(slot)?;
        }
        Ok(kind)
    }
}
