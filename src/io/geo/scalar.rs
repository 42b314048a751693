use std::borrow::Cow;

use geo::{Geometry, LineString, Polygon};

use crate::datatypes::Dimension;
use crate::geo_traits::{Coord, GeometryTrait, GeometryType};

fn coords_from_geo(line_string: &LineString<f64>) -> Cow<'static, [Coord]> {
    Cow::Owned(line_string.coords().map(|&c| Coord::from(c)).collect())
}

fn rings_from_geo(polygon: &Polygon<f64>) -> Vec<Cow<'static, [Coord]>> {
    if polygon.exterior().0.is_empty() && polygon.interiors().is_empty() {
        return vec![];
    }
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(coords_from_geo)
        .collect()
}

/// Wrap the members of a multi geometry as [`geo::Geometry`] children.
fn members<'a, T>(members: &[T]) -> Vec<Cow<'a, Geometry<f64>>>
where
    T: Clone + Into<Geometry<f64>>,
{
    members
        .iter()
        .map(|member| Cow::Owned(member.clone().into()))
        .collect()
}

/// `geo` values carry no SRID and only X and Y.
impl GeometryTrait for Geometry<f64> {
    fn srid(&self) -> Option<i32> {
        None
    }

    fn dim(&self) -> Dimension {
        Dimension::XY
    }

    fn as_type(&self) -> GeometryType<'_, Self> {
        match self {
            Geometry::Point(point) => GeometryType::Point(Some(point.0.into())),
            Geometry::Line(line) => GeometryType::LineString(Cow::Owned(vec![
                line.start.into(),
                line.end.into(),
            ])),
            Geometry::LineString(line_string) => {
                GeometryType::LineString(coords_from_geo(line_string))
            }
            Geometry::Polygon(polygon) => GeometryType::Polygon(rings_from_geo(polygon)),
            Geometry::MultiPoint(multi_point) => GeometryType::MultiPoint(members(&multi_point.0)),
            Geometry::MultiLineString(multi_line_string) => {
                GeometryType::MultiLineString(members(&multi_line_string.0))
            }
            Geometry::MultiPolygon(multi_polygon) => {
                GeometryType::MultiPolygon(members(&multi_polygon.0))
            }
            Geometry::GeometryCollection(collection) => GeometryType::GeometryCollection(
                collection.0.iter().map(Cow::Borrowed).collect(),
            ),
            Geometry::Rect(rect) => GeometryType::Polygon(rings_from_geo(&rect.to_polygon())),
            Geometry::Triangle(triangle) => {
                GeometryType::Polygon(rings_from_geo(&triangle.to_polygon()))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use geo::{line_string, point, polygon, Area, Rect};

    use crate::geo_traits::GeometryFactory;
    use crate::io::geo::GeoFactory;
    use crate::io::sqlserver::{from_sqlserver, to_sqlserver, SqlServerOptions};

    use super::*;

    fn round_trip(geom: &Geometry<f64>) -> Geometry<f64> {
        let options = SqlServerOptions::default();
        let buf = to_sqlserver(geom, &options).unwrap();
        from_sqlserver(&buf, &GeoFactory, &options).unwrap().unwrap()
    }

    #[test]
    fn round_trip_geo() {
        let geoms: Vec<Geometry<f64>> = vec![
            point!(x: 1., y: 2.).into(),
            line_string![(x: 0., y: 1.), (x: 1., y: 2.), (x: 2., y: 3.)].into(),
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 0.)].into(),
            geo::MultiPoint::new(vec![point!(x: 0., y: 1.), point!(x: 1., y: 2.)]).into(),
            Geometry::GeometryCollection(geo::GeometryCollection::new_from(vec![
                point!(x: 0., y: 1.).into(),
                line_string![(x: 0., y: 1.), (x: 1., y: 2.)].into(),
            ])),
        ];
        for geom in geoms {
            assert_eq!(round_trip(&geom), geom);
        }
    }

    #[test]
    fn rect_is_written_as_polygon() {
        let rect: Geometry<f64> = Rect::new((0., 0.), (2., 1.)).into();
        let decoded = round_trip(&rect);
        let Geometry::Polygon(polygon) = decoded else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_relative_eq!(polygon.unsigned_area(), 2.);
    }

    #[test]
    fn line_is_written_as_line_string() {
        let line: Geometry<f64> = geo::Line::new((0., 0.), (3., 4.)).into();
        match round_trip(&line) {
            Geometry::LineString(line_string) => {
                assert_eq!(line_string, line_string![(x: 0., y: 0.), (x: 3., y: 4.)]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn decoded_z_is_dropped() {
        let geom = crate::geometry::Geometry::new(crate::geometry::GeometryKind::Point(Some(
            Coord::xyz(1., 2., 3.),
        )));
        let buf = to_sqlserver(&geom, &SqlServerOptions::default()).unwrap();
        let decoded = from_sqlserver(&buf, &GeoFactory, &SqlServerOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(decoded, Geometry::Point(point!(x: 1., y: 2.)));
    }

    #[test]
    fn curve_into_geo_fails() {
        let geom = crate::test::compound::cc0();
        let buf = to_sqlserver(&geom, &SqlServerOptions::default()).unwrap();
        assert!(from_sqlserver(&buf, &GeoFactory, &SqlServerOptions::default()).is_err());
    }

    #[test]
    fn factory_output_is_encodable() {
        let meta = crate::geo_traits::GeometryMeta {
            srid: 0,
            dim: Dimension::XY,
        };
        let geom = GeoFactory
            .polygon(
                vec![Coord::xy(0., 0.), Coord::xy(1., 0.), Coord::xy(0., 0.)],
                vec![],
                meta,
            )
            .unwrap();
        assert!(to_sqlserver(&geom, &SqlServerOptions::default()).is_ok());
    }
}
