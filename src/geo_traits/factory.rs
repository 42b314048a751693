use crate::datatypes::Dimension;
use crate::error::Result;
use crate::geo_traits::{Coord, CurveSegment, Ring};

/// Properties shared by every geometry built from one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryMeta {
    /// Spatial reference identifier.
    pub srid: i32,
    /// The ordinates populated on every coordinate handed to the factory.
    pub dim: Dimension,
}

/// Constructs geometry values from decoded coordinate and structure data.
///
/// The reader holds a factory by reference and never inspects the values it produces.
/// Container methods receive children that were built by the same factory, already checked
/// against the container kind (e.g. [`multi_point`](Self::multi_point) only receives values
/// built by [`point`](Self::point)).
///
/// Implementations are shared across decode calls and should be safe to use concurrently.
pub trait GeometryFactory {
    type Geometry;

    /// A point, or an empty point when `coord` is `None`.
    fn point(&self, coord: Option<Coord>, meta: GeometryMeta) -> Result<Self::Geometry>;

    fn line_string(&self, coords: Vec<Coord>, meta: GeometryMeta) -> Result<Self::Geometry>;

    /// A polygon from its shell and holes. An empty polygon has an empty shell and no holes.
    fn polygon(
        &self,
        shell: Vec<Coord>,
        holes: Vec<Vec<Coord>>,
        meta: GeometryMeta,
    ) -> Result<Self::Geometry>;

    fn multi_point(
        &self,
        points: Vec<Self::Geometry>,
        meta: GeometryMeta,
    ) -> Result<Self::Geometry>;

    fn multi_line_string(
        &self,
        line_strings: Vec<Self::Geometry>,
        meta: GeometryMeta,
    ) -> Result<Self::Geometry>;

    fn multi_polygon(
        &self,
        polygons: Vec<Self::Geometry>,
        meta: GeometryMeta,
    ) -> Result<Self::Geometry>;

    fn geometry_collection(
        &self,
        geometries: Vec<Self::Geometry>,
        meta: GeometryMeta,
    ) -> Result<Self::Geometry>;

    fn circular_string(&self, coords: Vec<Coord>, meta: GeometryMeta)
        -> Result<Self::Geometry>;

    fn compound_curve(
        &self,
        segments: Vec<CurveSegment>,
        meta: GeometryMeta,
    ) -> Result<Self::Geometry>;

    /// A curve polygon. An empty curve polygon has an empty linear shell and no holes.
    fn curve_polygon(
        &self,
        shell: Ring,
        holes: Vec<Ring>,
        meta: GeometryMeta,
    ) -> Result<Self::Geometry>;
}
