//! Assembles geometry values from parsed payloads.

use std::iter::zip;

use crate::datatypes::Dimension;
use crate::error::{GeoCodecError, Result};
use crate::geo_traits::{Coord, CurveSegment, GeometryFactory, GeometryMeta, Ring};
use crate::io::sqlserver::common::{FigureAttribute, ShapeType, EMPTY_SHELL};
use crate::io::sqlserver::figure::point_ranges;
use crate::io::sqlserver::options::SqlServerOptions;
use crate::io::sqlserver::payload::{Payload, Serialized, Tables};
use crate::io::sqlserver::segment::SegmentCursor;
use crate::io::sqlserver::shape::{figure_ranges, validate_tree};

/// Build the geometry described by a parsed payload.
pub(crate) fn build<F: GeometryFactory>(
    raw: Serialized,
    factory: &F,
    options: &SqlServerOptions,
) -> Result<F::Geometry> {
    let Serialized {
        header,
        mut payload,
    } = raw;
    if options.geography {
        payload.swap_axes();
    }
    let meta = GeometryMeta {
        srid: header.srid,
        dim: header.dim.intersection(options.dimension),
    };

    match payload {
        Payload::SinglePoint(coords) => factory.point(Some(coords.coord(0, meta.dim)), meta),
        Payload::SingleLineSegment(coords) => {
            factory.line_string(coords.slice(0, 2, meta.dim), meta)
        }
        Payload::Tables(tables) => {
            validate_tree(&tables.shapes, header.version)?;
            let builder = ShapeBuilder {
                factory,
                meta,
                geography: options.geography,
                larger_than_hemisphere: header.larger_than_hemisphere,
                figures: resolve_figures(&tables, meta.dim)?,
            };
            builder.build(&tables)
        }
    }
}

/// The points of one figure, grouped according to its attribute.
#[derive(Debug)]
enum FigureData {
    Line(Vec<Coord>),
    Arc(Vec<Coord>),
    Composite(Vec<CurveSegment>),
}

impl FigureData {
    fn into_line(self, shape_type: ShapeType) -> Result<Vec<Coord>> {
        match self {
            FigureData::Line(coords) => Ok(coords),
            other => Err(GeoCodecError::Format(format!(
                "{shape_type} cannot hold a {} figure",
                other.kind()
            ))),
        }
    }

    fn into_ring(self) -> Ring {
        match self {
            FigureData::Line(coords) => Ring::Linear(coords),
            FigureData::Arc(coords) => Ring::Circular(coords),
            FigureData::Composite(segments) => Ring::Compound(segments),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            FigureData::Line(_) => "line",
            FigureData::Arc(_) => "arc",
            FigureData::Composite(_) => "composite curve",
        }
    }
}

/// Slice the point table into figures, consuming segment tags for composite figures in
/// figure order.
fn resolve_figures(tables: &Tables, dim: Dimension) -> Result<Vec<Option<FigureData>>> {
    let ranges = point_ranges(&tables.figures, tables.coords.len())?;
    let mut cursor = SegmentCursor::new(&tables.segments);

    let mut figures = Vec::with_capacity(ranges.len());
    for (figure, (start, end)) in zip(&tables.figures, ranges) {
        let coords = tables.coords.slice(start, end, dim);
        let data = match figure.attribute {
            FigureAttribute::CompositeCurve => FigureData::Composite(cursor.take_curve(&coords)?),
            FigureAttribute::Arc => FigureData::Arc(coords),
            _ => FigureData::Line(coords),
        };
        figures.push(Some(data));
    }
    cursor.finish()?;
    Ok(figures)
}

struct ShapeBuilder<'a, F: GeometryFactory> {
    factory: &'a F,
    meta: GeometryMeta,
    geography: bool,
    larger_than_hemisphere: bool,
    /// Taken by the shape that owns them.
    figures: Vec<Option<FigureData>>,
}

impl<F: GeometryFactory> ShapeBuilder<'_, F> {
    /// Build every shape in one reverse pass over the pre-ordered shape list, so that each
    /// shape's children are complete before the shape itself.
    fn build(mut self, tables: &Tables) -> Result<F::Geometry> {
        let shapes = &tables.shapes;
        let ranges = figure_ranges(shapes, tables.figures.len())?;

        // children are collected last to first
        let mut pending: Vec<Vec<F::Geometry>> = shapes.iter().map(|_| vec![]).collect();
        let mut root = None;
        for (i, shape) in shapes.iter().enumerate().rev() {
            let mut children = std::mem::take(&mut pending[i]);
            children.reverse();

            let geom = self.build_shape(shape.shape_type, ranges[i], children)?;
            match shape.parent {
                Some(parent) => pending[parent].push(geom),
                None => root = Some(geom),
            }
        }
        root.ok_or_else(|| GeoCodecError::Format("payload has no root shape".to_string()))
    }

    fn build_shape(
        &mut self,
        shape_type: ShapeType,
        range: Option<(usize, usize)>,
        children: Vec<F::Geometry>,
    ) -> Result<F::Geometry> {
        let factory = self.factory;
        let meta = self.meta;
        let figures = self.take_figures(range)?;

        match shape_type {
            ShapeType::Point => {
                let coord = match single_figure(figures, shape_type)? {
                    None => None,
                    Some(figure) => {
                        let coords = figure.into_line(shape_type)?;
                        match coords.as_slice() {
                            [] => None,
                            [coord] => Some(*coord),
                            _ => {
                                return Err(GeoCodecError::Format(format!(
                                    "point figure with {} points",
                                    coords.len()
                                )))
                            }
                        }
                    }
                };
                factory.point(coord, meta)
            }
            ShapeType::LineString => {
                let coords = match single_figure(figures, shape_type)? {
                    None => vec![],
                    Some(figure) => figure.into_line(shape_type)?,
                };
                factory.line_string(coords, meta)
            }
            ShapeType::Polygon => {
                let rings = figures
                    .into_iter()
                    .map(|figure| figure.into_line(shape_type))
                    .collect::<Result<Vec<_>>>()?;
                let (shell, holes) = self.split_rings(rings);
                self.check_shell(shell.is_empty(), holes.iter().any(|h| !h.is_empty()))?;
                factory.polygon(shell, holes, meta)
            }
            ShapeType::CircularString => {
                let coords = match single_figure(figures, shape_type)? {
                    None => vec![],
                    Some(FigureData::Arc(coords) | FigureData::Line(coords)) => coords,
                    Some(other) => {
                        return Err(GeoCodecError::Format(format!(
                            "{shape_type} cannot hold a {} figure",
                            other.kind()
                        )))
                    }
                };
                factory.circular_string(coords, meta)
            }
            ShapeType::CompoundCurve => {
                let segments = match single_figure(figures, shape_type)? {
                    None => vec![],
                    Some(FigureData::Composite(segments)) => segments,
                    Some(FigureData::Line(coords)) if coords.is_empty() => vec![],
                    Some(FigureData::Line(coords)) => vec![CurveSegment::Line(coords)],
                    Some(FigureData::Arc(coords)) => vec![CurveSegment::Arc(coords)],
                };
                factory.compound_curve(segments, meta)
            }
            ShapeType::CurvePolygon => {
                let rings = figures.into_iter().map(FigureData::into_ring).collect();
                let (shell, holes) = self.split_rings(rings);
                self.check_shell(shell.is_empty(), holes.iter().any(|h| !h.is_empty()))?;
                factory.curve_polygon(shell, holes, meta)
            }
            ShapeType::MultiPoint => factory.multi_point(children, meta),
            ShapeType::MultiLineString => factory.multi_line_string(children, meta),
            ShapeType::MultiPolygon => factory.multi_polygon(children, meta),
            ShapeType::GeometryCollection => factory.geometry_collection(children, meta),
            ShapeType::FullGlobe => Err(GeoCodecError::UnsupportedType(shape_type.to_string())),
        }
    }

    fn take_figures(&mut self, range: Option<(usize, usize)>) -> Result<Vec<FigureData>> {
        let Some((start, end)) = range else {
            return Ok(vec![]);
        };
        (start..end)
            .map(|i| {
                self.figures[i].take().ok_or_else(|| {
                    GeoCodecError::Format(format!("figure {i} is shared by two shapes"))
                })
            })
            .collect()
    }

    /// Separate the shell from the holes.
    ///
    /// Geography payloads store the shell after the holes. When such a payload is flagged
    /// as larger than a hemisphere, every ring is a hole and the shell is empty.
    fn split_rings<T: Default>(&self, mut rings: Vec<T>) -> (T, Vec<T>) {
        if !self.geography {
            let mut rings = rings.into_iter();
            let shell = rings.next().unwrap_or_default();
            return (shell, rings.collect());
        }
        if self.larger_than_hemisphere {
            return (T::default(), rings);
        }
        let shell = rings.pop().unwrap_or_default();
        (shell, rings)
    }

    fn check_shell(&self, shell_is_empty: bool, has_holes: bool) -> Result<()> {
        if self.geography && shell_is_empty && has_holes {
            return Err(GeoCodecError::Topology(EMPTY_SHELL.to_string()));
        }
        Ok(())
    }
}

fn single_figure(figures: Vec<FigureData>, shape_type: ShapeType) -> Result<Option<FigureData>> {
    if figures.len() > 1 {
        return Err(GeoCodecError::Format(format!(
            "{shape_type} owns {} figures",
            figures.len()
        )));
    }
    Ok(figures.into_iter().next())
}
