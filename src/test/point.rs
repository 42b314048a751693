use crate::geo_traits::Coord;
use crate::geometry::{Geometry, GeometryKind};

pub(crate) fn p0() -> Geometry {
    Geometry::new(GeometryKind::Point(Some(Coord::xy(0., 1.))))
}

pub(crate) fn p1() -> Geometry {
    Geometry::new(GeometryKind::Point(Some(Coord::xy(1., 2.))))
}

pub(crate) fn p_zm() -> Geometry {
    Geometry::new(GeometryKind::Point(Some(Coord::xyzm(1., 2., 3., 4.))))
}
