use std::borrow::Cow;

use crate::datatypes::Dimension;
use crate::error::Result;
use crate::geo_traits::{
    Coord, CurveSegment, GeometryFactory, GeometryMeta, GeometryTrait, GeometryType, Ring,
};

/// An owned geometry value covering every kind the serialized format can carry.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    srid: i32,
    dim: Dimension,
    kind: GeometryKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryKind {
    /// A point, `None` when empty.
    Point(Option<Coord>),
    LineString(Vec<Coord>),
    /// Shell first, then holes. No rings when empty.
    Polygon(Vec<Vec<Coord>>),
    MultiPoint(Vec<Geometry>),
    MultiLineString(Vec<Geometry>),
    MultiPolygon(Vec<Geometry>),
    GeometryCollection(Vec<Geometry>),
    CircularString(Vec<Coord>),
    CompoundCurve(Vec<CurveSegment>),
    /// Shell first, then holes. No rings when empty.
    CurvePolygon(Vec<Ring>),
}

impl Geometry {
    /// Create a geometry with SRID 0, taking its dimension from the first coordinate found.
    pub fn new(kind: GeometryKind) -> Self {
        let dim = kind.first_coord().map(|c| c.dim()).unwrap_or_default();
        Self { srid: 0, dim, kind }
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    /// Override the dimension, e.g. for empty geometries that have no coordinate to infer it
    /// from.
    pub fn with_dim(mut self, dim: Dimension) -> Self {
        self.dim = dim;
        self
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    pub fn kind(&self) -> &GeometryKind {
        &self.kind
    }

    pub fn into_kind(self) -> GeometryKind {
        self.kind
    }

    /// Whether this geometry has no coordinates at all.
    pub fn is_empty(&self) -> bool {
        self.kind.first_coord().is_none()
    }
}

impl GeometryKind {
    fn first_coord(&self) -> Option<&Coord> {
        use GeometryKind::*;
        match self {
            Point(coord) => coord.as_ref(),
            LineString(coords) | CircularString(coords) => coords.first(),
            Polygon(rings) => rings.iter().flatten().next(),
            MultiPoint(geoms)
            | MultiLineString(geoms)
            | MultiPolygon(geoms)
            | GeometryCollection(geoms) => geoms.iter().find_map(|g| g.kind.first_coord()),
            CompoundCurve(segments) => segments.iter().flat_map(|s| s.coords()).next(),
            CurvePolygon(rings) => rings.iter().find_map(|ring| match ring {
                Ring::Linear(coords) | Ring::Circular(coords) => coords.first(),
                Ring::Compound(segments) => segments.iter().flat_map(|s| s.coords()).next(),
            }),
        }
    }
}

impl GeometryTrait for Geometry {
    fn srid(&self) -> Option<i32> {
        Some(self.srid)
    }

    fn dim(&self) -> Dimension {
        self.dim
    }

    fn as_type(&self) -> GeometryType<'_, Self> {
        use GeometryKind::*;

        match &self.kind {
            Point(coord) => GeometryType::Point(*coord),
            LineString(coords) => GeometryType::LineString(Cow::Borrowed(coords.as_slice())),
            Polygon(rings) => GeometryType::Polygon(
                rings.iter().map(|ring| Cow::Borrowed(ring.as_slice())).collect(),
            ),
            MultiPoint(geoms) => GeometryType::MultiPoint(children(geoms)),
            MultiLineString(geoms) => GeometryType::MultiLineString(children(geoms)),
            MultiPolygon(geoms) => GeometryType::MultiPolygon(children(geoms)),
            GeometryCollection(geoms) => GeometryType::GeometryCollection(children(geoms)),
            CircularString(coords) => {
                GeometryType::CircularString(Cow::Borrowed(coords.as_slice()))
            }
            CompoundCurve(segments) => {
                GeometryType::CompoundCurve(Cow::Borrowed(segments.as_slice()))
            }
            CurvePolygon(rings) => GeometryType::CurvePolygon(Cow::Borrowed(rings.as_slice())),
        }
    }
}

fn children(geoms: &[Geometry]) -> Vec<Cow<'_, Geometry>> {
    geoms.iter().map(Cow::Borrowed).collect()
}

/// Builds [`Geometry`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl DefaultFactory {
    fn make(kind: GeometryKind, meta: GeometryMeta) -> Result<Geometry> {
        Ok(Geometry {
            srid: meta.srid,
            dim: meta.dim,
            kind,
        })
    }
}

impl GeometryFactory for DefaultFactory {
    type Geometry = Geometry;

    fn point(&self, coord: Option<Coord>, meta: GeometryMeta) -> Result<Geometry> {
        Self::make(GeometryKind::Point(coord), meta)
    }

    fn line_string(&self, coords: Vec<Coord>, meta: GeometryMeta) -> Result<Geometry> {
        Self::make(GeometryKind::LineString(coords), meta)
    }

    fn polygon(
        &self,
        shell: Vec<Coord>,
        holes: Vec<Vec<Coord>>,
        meta: GeometryMeta,
    ) -> Result<Geometry> {
        let rings = if shell.is_empty() && holes.is_empty() {
            vec![]
        } else {
            std::iter::once(shell).chain(holes).collect()
        };
        Self::make(GeometryKind::Polygon(rings), meta)
    }

    fn multi_point(&self, points: Vec<Geometry>, meta: GeometryMeta) -> Result<Geometry> {
        Self::make(GeometryKind::MultiPoint(points), meta)
    }

    fn multi_line_string(
        &self,
        line_strings: Vec<Geometry>,
        meta: GeometryMeta,
    ) -> Result<Geometry> {
        Self::make(GeometryKind::MultiLineString(line_strings), meta)
    }

    fn multi_polygon(&self, polygons: Vec<Geometry>, meta: GeometryMeta) -> Result<Geometry> {
        Self::make(GeometryKind::MultiPolygon(polygons), meta)
    }

    fn geometry_collection(
        &self,
        geometries: Vec<Geometry>,
        meta: GeometryMeta,
    ) -> Result<Geometry> {
        Self::make(GeometryKind::GeometryCollection(geometries), meta)
    }

    fn circular_string(&self, coords: Vec<Coord>, meta: GeometryMeta) -> Result<Geometry> {
        Self::make(GeometryKind::CircularString(coords), meta)
    }

    fn compound_curve(
        &self,
        segments: Vec<CurveSegment>,
        meta: GeometryMeta,
    ) -> Result<Geometry> {
        Self::make(GeometryKind::CompoundCurve(segments), meta)
    }

    fn curve_polygon(
        &self,
        shell: Ring,
        holes: Vec<Ring>,
        meta: GeometryMeta,
    ) -> Result<Geometry> {
        let rings = if shell.is_empty() && holes.is_empty() {
            vec![]
        } else {
            std::iter::once(shell).chain(holes).collect()
        };
        Self::make(GeometryKind::CurvePolygon(rings), meta)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::point::p0;
    use crate::test::polygon::poly0;

    #[test]
    fn dimension_is_inferred() {
        let geom = Geometry::new(GeometryKind::Point(Some(Coord::xyzm(1., 2., 3., 4.))));
        assert_eq!(geom.dim(), Dimension::XYZM);
        assert_eq!(Geometry::new(GeometryKind::Point(None)).dim(), Dimension::XY);
    }

    #[test]
    fn factory_normalizes_empty_polygon() {
        let meta = GeometryMeta {
            srid: 0,
            dim: Dimension::XY,
        };
        let geom = DefaultFactory.polygon(vec![], vec![], meta).unwrap();
        assert_eq!(geom.kind(), &GeometryKind::Polygon(vec![]));
        assert!(geom.is_empty());
    }

    #[test]
    fn accessor_borrows_rings() {
        let geom = poly0();
        match geom.as_type() {
            GeometryType::Polygon(rings) => {
                assert_eq!(rings.len(), 2);
                assert!(matches!(rings[0], Cow::Borrowed(_)));
            }
            other => panic!("unexpected {}", other.name()),
        }
    }

    #[test]
    fn srid_is_reported() {
        assert_eq!(GeometryTrait::srid(&p0().with_srid(4326)), Some(4326));
    }
}
