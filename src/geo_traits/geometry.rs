use std::borrow::Cow;

use crate::datatypes::Dimension;
use crate::geo_traits::{Coord, CurveSegment, Ring};

/// Read access to a geometry value, used by the writer to decompose it.
pub trait GeometryTrait: Clone {
    /// The spatial reference identifier carried by this value, if any.
    fn srid(&self) -> Option<i32>;

    /// The ordinates carried by the coordinates of this value.
    fn dim(&self) -> Dimension;

    /// The kind of this geometry together with its coordinates or children.
    fn as_type(&self) -> GeometryType<'_, Self>;
}

/// An enumeration of all geometry kinds the serialized format can carry.
///
/// Leaf kinds expose their coordinates, containers expose their children. Data is borrowed
/// when the implementing type stores it in this shape and owned otherwise.
#[derive(Debug)]
pub enum GeometryType<'a, G: Clone> {
    /// A point, `None` when empty.
    Point(Option<Coord>),
    LineString(Cow<'a, [Coord]>),
    /// Shell first, then holes. Empty when the polygon is empty.
    Polygon(Vec<Cow<'a, [Coord]>>),
    MultiPoint(Vec<Cow<'a, G>>),
    MultiLineString(Vec<Cow<'a, G>>),
    MultiPolygon(Vec<Cow<'a, G>>),
    GeometryCollection(Vec<Cow<'a, G>>),
    CircularString(Cow<'a, [Coord]>),
    CompoundCurve(Cow<'a, [CurveSegment]>),
    /// Shell first, then holes. Empty when the curve polygon is empty.
    CurvePolygon(Cow<'a, [Ring]>),
}

impl<G: Clone> GeometryType<'_, G> {
    /// The name of this geometry kind.
    pub fn name(&self) -> &'static str {
        use GeometryType::*;
        match self {
            Point(_) => "Point",
            LineString(_) => "LineString",
            Polygon(_) => "Polygon",
            MultiPoint(_) => "MultiPoint",
            MultiLineString(_) => "MultiLineString",
            MultiPolygon(_) => "MultiPolygon",
            GeometryCollection(_) => "GeometryCollection",
            CircularString(_) => "CircularString",
            CompoundCurve(_) => "CompoundCurve",
            CurvePolygon(_) => "CurvePolygon",
        }
    }

    /// Whether this kind can only be stored in a version 2 payload.
    pub fn is_curve(&self) -> bool {
        matches!(
            self,
            GeometryType::CircularString(_)
                | GeometryType::CompoundCurve(_)
                | GeometryType::CurvePolygon(_)
        )
    }
}
