//! Decomposes geometry values into payload tables.

use tracing::trace;

use crate::datatypes::Dimension;
use crate::error::{GeoCodecError, Result};
use crate::geo_traits::{Coord, CurveSegment, GeometryTrait, GeometryType, Ring};
use crate::io::sqlserver::common::{FigureAttribute, ShapeType, Version, EMPTY_SHELL};
use crate::io::sqlserver::coord::CoordinateArray;
use crate::io::sqlserver::figure::Figure;
use crate::io::sqlserver::options::SqlServerOptions;
use crate::io::sqlserver::payload::{Payload, Serialized, Tables};
use crate::io::sqlserver::segment::flatten_curve;
use crate::io::sqlserver::shape::{validate_tree, Shape};

/// Lay out `geom` as a payload, using a compact layout when one applies.
pub(crate) fn decompose<G: GeometryTrait>(
    geom: &G,
    options: &SqlServerOptions,
) -> Result<Serialized> {
    let srid = options.srid_or_default(geom.srid());
    let dim = geom.dim().intersection(options.dimension);

    if options.compact {
        if let Some(mut payload) = compact_payload(geom, dim) {
            if options.geography {
                payload.swap_axes();
            }
            return Ok(Serialized::new(srid, Version::V1, dim, payload));
        }
    }

    let version = if requires_v2(geom) {
        Version::V2
    } else {
        Version::V1
    };
    let mut decomposer = Decomposer {
        version,
        geography: options.geography,
        tables: Tables {
            coords: CoordinateArray::new(dim),
            ..Default::default()
        },
    };
    decomposer.visit(geom, None)?;
    validate_tree(&decomposer.tables.shapes, version)?;

    let mut payload = Payload::Tables(decomposer.tables);
    if options.geography {
        payload.swap_axes();
    }
    Ok(Serialized::new(srid, version, dim, payload))
}

fn compact_payload<G: GeometryTrait>(geom: &G, dim: Dimension) -> Option<Payload> {
    match geom.as_type() {
        GeometryType::Point(Some(coord)) => {
            let mut coords = CoordinateArray::new(dim);
            coords.push(&coord);
            Some(Payload::SinglePoint(coords))
        }
        GeometryType::LineString(line) if line.len() == 2 => {
            let mut coords = CoordinateArray::new(dim);
            coords.extend(line.iter());
            Some(Payload::SingleLineSegment(coords))
        }
        _ => None,
    }
}

/// Whether any shape in the tree needs a version 2 payload.
fn requires_v2<G: GeometryTrait>(geom: &G) -> bool {
    match geom.as_type() {
        GeometryType::MultiPoint(children)
        | GeometryType::MultiLineString(children)
        | GeometryType::MultiPolygon(children)
        | GeometryType::GeometryCollection(children) => {
            children.iter().any(|child| requires_v2(&**child))
        }
        other => other.is_curve(),
    }
}

struct Decomposer {
    version: Version,
    geography: bool,
    tables: Tables,
}

impl Decomposer {
    /// Append the shape for `geom` and, depth first, the shapes of its children.
    fn visit<G: GeometryTrait>(&mut self, geom: &G, parent: Option<usize>) -> Result<()> {
        let index = self.tables.shapes.len();
        let first_figure = self.tables.figures.len();
        let geom_type = geom.as_type();
        trace!(shape = geom_type.name(), index, "decomposing shape");
        self.tables.shapes.push(Shape {
            parent,
            figure: None,
            shape_type: shape_type(&geom_type),
        });

        match geom_type {
            GeometryType::Point(coord) => {
                if let Some(coord) = coord {
                    let stroke = self.stroke();
                    self.push_figure(stroke, std::iter::once(&coord));
                }
            }
            GeometryType::LineString(coords) => {
                if !coords.is_empty() {
                    let stroke = self.stroke();
                    self.push_figure(stroke, coords.iter());
                }
            }
            GeometryType::Polygon(rings) => {
                self.check_shell(rings.iter().map(|ring| ring.is_empty()))?;
                for (i, ring) in self.stored_order(&rings).into_iter().enumerate() {
                    let attribute = match (self.version, i) {
                        (Version::V2, _) => FigureAttribute::Line,
                        (Version::V1, 0) => FigureAttribute::ExteriorRing,
                        (Version::V1, _) => FigureAttribute::InteriorRing,
                    };
                    self.push_figure(attribute, ring.iter());
                }
            }
            GeometryType::CircularString(coords) => {
                if !coords.is_empty() {
                    self.push_figure(FigureAttribute::Arc, coords.iter());
                }
            }
            GeometryType::CompoundCurve(segments) => {
                if !segments.is_empty() {
                    self.push_curve(&segments)?;
                }
            }
            GeometryType::CurvePolygon(rings) => {
                self.check_shell(rings.iter().map(Ring::is_empty))?;
                for ring in self.stored_order(&rings) {
                    match ring {
                        Ring::Linear(coords) => self.push_figure(FigureAttribute::Line, coords),
                        Ring::Circular(coords) => self.push_figure(FigureAttribute::Arc, coords),
                        Ring::Compound(segments) => self.push_curve(segments)?,
                    }
                }
            }
            GeometryType::MultiPoint(children)
            | GeometryType::MultiLineString(children)
            | GeometryType::MultiPolygon(children)
            | GeometryType::GeometryCollection(children) => {
                for child in children.iter() {
                    self.visit(&**child, Some(index))?;
                }
            }
        }

        // containers point at the first figure of their descendants
        if self.tables.figures.len() > first_figure {
            self.tables.shapes[index].figure = Some(first_figure);
        }
        Ok(())
    }

    /// Geography payloads store the shell after the holes.
    fn stored_order<'r, T>(&self, rings: &'r [T]) -> Vec<&'r T> {
        match rings.split_first() {
            Some((shell, holes)) if self.geography => holes.iter().chain([shell]).collect(),
            _ => rings.iter().collect(),
        }
    }

    fn stroke(&self) -> FigureAttribute {
        match self.version {
            Version::V1 => FigureAttribute::Stroke,
            Version::V2 => FigureAttribute::Line,
        }
    }

    fn push_figure<'a>(
        &mut self,
        attribute: FigureAttribute,
        coords: impl IntoIterator<Item = &'a Coord>,
    ) {
        self.tables.figures.push(Figure {
            attribute,
            point_offset: self.tables.coords.len(),
        });
        self.tables.coords.extend(coords);
    }

    fn push_curve(&mut self, runs: &[CurveSegment]) -> Result<()> {
        let points = flatten_curve(runs, &mut self.tables.segments)?;
        self.push_figure(FigureAttribute::CompositeCurve, points);
        Ok(())
    }

    /// `rings` yields whether each ring is empty, shell first.
    fn check_shell(&self, mut rings: impl Iterator<Item = bool>) -> Result<()> {
        if !self.geography {
            return Ok(());
        }
        if rings.next() == Some(true) && rings.any(|empty| !empty) {
            return Err(GeoCodecError::Topology(EMPTY_SHELL.to_string()));
        }
        Ok(())
    }
}

fn shape_type<G: GeometryTrait>(geom_type: &GeometryType<'_, G>) -> ShapeType {
    match geom_type {
        GeometryType::Point(_) => ShapeType::Point,
        GeometryType::LineString(_) => ShapeType::LineString,
        GeometryType::Polygon(_) => ShapeType::Polygon,
        GeometryType::MultiPoint(_) => ShapeType::MultiPoint,
        GeometryType::MultiLineString(_) => ShapeType::MultiLineString,
        GeometryType::MultiPolygon(_) => ShapeType::MultiPolygon,
        GeometryType::GeometryCollection(_) => ShapeType::GeometryCollection,
        GeometryType::CircularString(_) => ShapeType::CircularString,
        GeometryType::CompoundCurve(_) => ShapeType::CompoundCurve,
        GeometryType::CurvePolygon(_) => ShapeType::CurvePolygon,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{Geometry, GeometryKind};
    use crate::io::sqlserver::common::SegmentType;
    use crate::io::sqlserver::header::Layout;
    use crate::test::compound::cc0;
    use crate::test::linestring::ls0;
    use crate::test::point::p0;
    use crate::test::polygon::poly0;

    fn tables(raw: &Serialized) -> &Tables {
        match &raw.payload {
            Payload::Tables(tables) => tables,
            other => panic!("expected tables, got {other:?}"),
        }
    }

    #[test]
    fn compact_point() {
        let raw = decompose(&p0(), &SqlServerOptions::default()).unwrap();
        assert_eq!(raw.header.layout, Layout::SinglePoint);
        assert_eq!(raw.header.version, Version::V1);
    }

    #[test]
    fn compact_disabled() {
        let raw = decompose(&p0(), &SqlServerOptions::default().with_compact(false)).unwrap();
        let t = tables(&raw);
        assert_eq!(t.coords.len(), 1);
        assert_eq!(
            t.figures,
            vec![Figure {
                attribute: FigureAttribute::Stroke,
                point_offset: 0
            }]
        );
        assert_eq!(
            t.shapes,
            vec![Shape {
                parent: None,
                figure: Some(0),
                shape_type: ShapeType::Point
            }]
        );
    }

    #[test]
    fn polygon_ring_attributes() {
        let raw = decompose(&poly0(), &SqlServerOptions::default()).unwrap();
        assert_eq!(raw.header.version, Version::V1);
        let attributes: Vec<_> = tables(&raw).figures.iter().map(|f| f.attribute).collect();
        assert_eq!(
            attributes,
            vec![FigureAttribute::ExteriorRing, FigureAttribute::InteriorRing]
        );
        assert_eq!(tables(&raw).figures[1].point_offset, 5);
    }

    #[test]
    fn compound_curve_uses_version_2() {
        let raw = decompose(&cc0(), &SqlServerOptions::default()).unwrap();
        assert_eq!(raw.header.version, Version::V2);
        let t = tables(&raw);
        // shared boundary points are stored once
        assert_eq!(t.coords.len(), 6);
        assert_eq!(
            t.segments,
            vec![
                SegmentType::FirstLine,
                SegmentType::FirstArc,
                SegmentType::FirstLine,
                SegmentType::Line,
            ]
        );
    }

    #[test]
    fn container_figure_offsets() {
        let geom = Geometry::new(GeometryKind::GeometryCollection(vec![
            Geometry::new(GeometryKind::Point(None)),
            Geometry::new(GeometryKind::GeometryCollection(vec![])),
            ls0(),
        ]));
        let raw = decompose(&geom, &SqlServerOptions::default()).unwrap();
        let figures: Vec<_> = tables(&raw).shapes.iter().map(|s| s.figure).collect();
        assert_eq!(figures, vec![Some(0), None, None, Some(0)]);
    }

    #[test]
    fn nested_curve_needs_version_2() {
        let geom = Geometry::new(GeometryKind::GeometryCollection(vec![p0(), cc0()]));
        let raw = decompose(&geom, &SqlServerOptions::default()).unwrap();
        assert_eq!(raw.header.version, Version::V2);
        assert_eq!(tables(&raw).figures[0].attribute, FigureAttribute::Line);
    }

    #[test]
    fn geography_empty_shell() {
        let hole = vec![
            Coord::xy(0., 0.),
            Coord::xy(1., 0.),
            Coord::xy(1., 1.),
            Coord::xy(0., 0.),
        ];
        let geom = Geometry::new(GeometryKind::Polygon(vec![vec![], hole]));
        let err = decompose(&geom, &SqlServerOptions::default().with_geography(true)).unwrap_err();
        assert_eq!(err.to_string(), "shell is empty but holes are not");
        assert!(decompose(&geom, &SqlServerOptions::default()).is_ok());
    }

    #[test]
    fn geography_rings_shell_last() {
        let options = SqlServerOptions::default().with_geography(true);
        let raw = decompose(&poly0(), &options).unwrap();
        let t = tables(&raw);
        // attributes follow stored position
        let attributes: Vec<_> = t.figures.iter().map(|f| f.attribute).collect();
        assert_eq!(
            attributes,
            vec![FigureAttribute::ExteriorRing, FigureAttribute::InteriorRing]
        );
        // the triangular hole comes first, latitude first
        assert_eq!(t.figures[1].point_offset, 4);
        assert_eq!(t.coords.coord(1, Dimension::XY), Coord::xy(2., 4.));
        assert_eq!(t.coords.coord(5, Dimension::XY), Coord::xy(0., 10.));
    }

    #[test]
    fn geography_compact_point_is_latitude_first() {
        let options = SqlServerOptions::default().with_geography(true);
        let geom = Geometry::new(GeometryKind::Point(Some(Coord::xy(1., 2.))));
        let raw = decompose(&geom, &options).unwrap();
        let Payload::SinglePoint(coords) = &raw.payload else {
            panic!("expected a compact point");
        };
        assert_eq!(coords.coord(0, Dimension::XY), Coord::xy(2., 1.));
    }

    #[test]
    fn mismatched_container_child() {
        let geom = Geometry::new(GeometryKind::MultiPoint(vec![ls0()]));
        assert!(decompose(&geom, &SqlServerOptions::default()).is_err());
    }

    #[test]
    fn ordinates_are_restricted() {
        let geom = Geometry::new(GeometryKind::Point(Some(Coord::xyzm(1., 2., 3., 4.))));
        let options = SqlServerOptions::default().with_dimension(Dimension::XYM);
        let raw = decompose(&geom, &options).unwrap();
        assert_eq!(raw.header.dim, Dimension::XYM);
    }
}
