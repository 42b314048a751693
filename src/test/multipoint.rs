use crate::geometry::{Geometry, GeometryKind};
use crate::test::point::{p0, p1};

pub(crate) fn mp0() -> Geometry {
    Geometry::new(GeometryKind::MultiPoint(vec![p0(), p1()]))
}
