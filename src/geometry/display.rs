//! Well-known text formatting for [`Geometry`].

use std::fmt::{self, Write};

use crate::datatypes::Dimension;
use crate::geo_traits::{Coord, CurveSegment, Ring};
use crate::geometry::{Geometry, GeometryKind};

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GeometryKind::*;

        let name = match self.kind() {
            Point(_) => "POINT",
            LineString(_) => "LINESTRING",
            Polygon(_) => "POLYGON",
            MultiPoint(_) => "MULTIPOINT",
            MultiLineString(_) => "MULTILINESTRING",
            MultiPolygon(_) => "MULTIPOLYGON",
            GeometryCollection(_) => "GEOMETRYCOLLECTION",
            CircularString(_) => "CIRCULARSTRING",
            CompoundCurve(_) => "COMPOUNDCURVE",
            CurvePolygon(_) => "CURVEPOLYGON",
        };
        f.write_str(name)?;
        match self.dim() {
            Dimension::XY => {}
            Dimension::XYZ => f.write_str(" Z")?,
            Dimension::XYM => f.write_str(" M")?,
            Dimension::XYZM => f.write_str(" ZM")?,
        }
        f.write_char(' ')?;
        write_body(f, self)
    }
}

fn write_body(f: &mut fmt::Formatter<'_>, geom: &Geometry) -> fmt::Result {
    use GeometryKind::*;

    let dim = geom.dim();
    match geom.kind() {
        Point(None) => f.write_str("EMPTY"),
        Point(Some(coord)) => {
            f.write_char('(')?;
            write_coord(f, coord, dim)?;
            f.write_char(')')
        }
        LineString(coords) | CircularString(coords) => write_coords(f, coords, dim),
        Polygon(rings) => write_list(f, rings, |f, ring| write_coords(f, ring, dim)),
        MultiPoint(points) => write_list(f, points, |f, point| match point.kind() {
            Point(Some(coord)) => {
                f.write_char('(')?;
                write_coord(f, coord, dim)?;
                f.write_char(')')
            }
            _ => f.write_str("EMPTY"),
        }),
        MultiLineString(geoms) | MultiPolygon(geoms) => {
            write_list(f, geoms, |f, geom| write_body(f, geom))
        }
        GeometryCollection(geoms) => write_list(f, geoms, |f, geom| write!(f, "{geom}")),
        CompoundCurve(segments) => write_segments(f, segments, dim),
        CurvePolygon(rings) => write_list(f, rings, |f, ring| match ring {
            Ring::Linear(coords) => write_coords(f, coords, dim),
            Ring::Circular(coords) => {
                f.write_str("CIRCULARSTRING ")?;
                write_coords(f, coords, dim)
            }
            Ring::Compound(segments) => {
                f.write_str("COMPOUNDCURVE ")?;
                write_segments(f, segments, dim)
            }
        }),
    }
}

fn write_segments(
    f: &mut fmt::Formatter<'_>,
    segments: &[CurveSegment],
    dim: Dimension,
) -> fmt::Result {
    write_list(f, segments, |f, segment| match segment {
        CurveSegment::Line(coords) => write_coords(f, coords, dim),
        CurveSegment::Arc(coords) => {
            f.write_str("CIRCULARSTRING ")?;
            write_coords(f, coords, dim)
        }
    })
}

/// Writes `EMPTY` or a parenthesized, comma separated list.
fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    if items.is_empty() {
        return f.write_str("EMPTY");
    }
    f.write_char('(')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_char(')')
}

fn write_coords(f: &mut fmt::Formatter<'_>, coords: &[Coord], dim: Dimension) -> fmt::Result {
    write_list(f, coords, |f, coord| write_coord(f, coord, dim))
}

fn write_coord(f: &mut fmt::Formatter<'_>, coord: &Coord, dim: Dimension) -> fmt::Result {
    write!(f, "{} {}", coord.x, coord.y)?;
    if dim.has_z() {
        f.write_char(' ')?;
        write_ordinate(f, coord.z)?;
    }
    if dim.has_m() {
        f.write_char(' ')?;
        write_ordinate(f, coord.m)?;
    }
    Ok(())
}

// unset ordinates print as NULL
fn write_ordinate(f: &mut fmt::Formatter<'_>, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) if !v.is_nan() => write!(f, "{v}"),
        _ => f.write_str("NULL"),
    }
}
