use std::fmt::Display;

use geo::{LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::error::{GeoCodecError, Result};
use crate::geo_traits::{Coord, CurveSegment, GeometryFactory, GeometryMeta, Ring};

/// Builds [`geo::Geometry`] values.
///
/// Only the first two dimensions are kept, and SRIDs are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoFactory;

fn line_string_to_geo(coords: Vec<Coord>) -> LineString<f64> {
    LineString::new(coords.into_iter().map(geo::Coord::from).collect())
}

/// Unwrap children built by this factory into the member type of a multi geometry.
fn members<T>(geoms: Vec<geo::Geometry<f64>>) -> Result<Vec<T>>
where
    T: TryFrom<geo::Geometry<f64>>,
    T::Error: Display,
{
    geoms
        .into_iter()
        .map(|geom| T::try_from(geom).map_err(|err| GeoCodecError::Factory(err.to_string())))
        .collect()
}

fn unsupported(kind: &str) -> Result<geo::Geometry<f64>> {
    Err(GeoCodecError::Factory(format!("geo cannot represent a {kind}")))
}

impl GeometryFactory for GeoFactory {
    type Geometry = geo::Geometry<f64>;

    fn point(&self, coord: Option<Coord>, _meta: GeometryMeta) -> Result<Self::Geometry> {
        match coord {
            Some(coord) => Ok(Point::from(geo::Coord::from(coord)).into()),
            None => unsupported("empty point"),
        }
    }

    fn line_string(&self, coords: Vec<Coord>, _meta: GeometryMeta) -> Result<Self::Geometry> {
        Ok(line_string_to_geo(coords).into())
    }

    fn polygon(
        &self,
        shell: Vec<Coord>,
        holes: Vec<Vec<Coord>>,
        _meta: GeometryMeta,
    ) -> Result<Self::Geometry> {
        let interiors = holes.into_iter().map(line_string_to_geo).collect();
        Ok(Polygon::new(line_string_to_geo(shell), interiors).into())
    }

    fn multi_point(
        &self,
        points: Vec<Self::Geometry>,
        _meta: GeometryMeta,
    ) -> Result<Self::Geometry> {
        Ok(MultiPoint::new(members(points)?).into())
    }

    fn multi_line_string(
        &self,
        line_strings: Vec<Self::Geometry>,
        _meta: GeometryMeta,
    ) -> Result<Self::Geometry> {
        Ok(MultiLineString::new(members(line_strings)?).into())
    }

    fn multi_polygon(
        &self,
        polygons: Vec<Self::Geometry>,
        _meta: GeometryMeta,
    ) -> Result<Self::Geometry> {
        Ok(MultiPolygon::new(members(polygons)?).into())
    }

    fn geometry_collection(
        &self,
        geometries: Vec<Self::Geometry>,
        _meta: GeometryMeta,
    ) -> Result<Self::Geometry> {
        Ok(geo::Geometry::GeometryCollection(
            geo::GeometryCollection::new_from(geometries),
        ))
    }

    fn circular_string(&self, _coords: Vec<Coord>, _meta: GeometryMeta) -> Result<Self::Geometry> {
        unsupported("circular string")
    }

    fn compound_curve(
        &self,
        _segments: Vec<CurveSegment>,
        _meta: GeometryMeta,
    ) -> Result<Self::Geometry> {
        unsupported("compound curve")
    }

    fn curve_polygon(
        &self,
        _shell: Ring,
        _holes: Vec<Ring>,
        _meta: GeometryMeta,
    ) -> Result<Self::Geometry> {
        unsupported("curve polygon")
    }
}
