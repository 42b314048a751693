use crate::geo_traits::Coord;

/// One component of a compound curve.
///
/// Consecutive components share their boundary point: the last coordinate of one component
/// is the first coordinate of the next.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    /// A run of straight segments, at least two points.
    Line(Vec<Coord>),
    /// A run of circular arcs, an odd number of points of at least three.
    Arc(Vec<Coord>),
}

impl CurveSegment {
    pub fn coords(&self) -> &[Coord] {
        match self {
            CurveSegment::Line(coords) | CurveSegment::Arc(coords) => coords,
        }
    }
}

/// A ring of a curve polygon.
#[derive(Debug, Clone, PartialEq)]
pub enum Ring {
    /// A closed linestring.
    Linear(Vec<Coord>),
    /// A closed circular string.
    Circular(Vec<Coord>),
    /// A closed compound curve.
    Compound(Vec<CurveSegment>),
}

impl Ring {
    pub fn is_empty(&self) -> bool {
        match self {
            Ring::Linear(coords) | Ring::Circular(coords) => coords.is_empty(),
            Ring::Compound(segments) => segments.iter().all(|s| s.coords().is_empty()),
        }
    }
}

impl Default for Ring {
    fn default() -> Self {
        Ring::Linear(vec![])
    }
}
