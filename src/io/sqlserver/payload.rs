use std::io::{Cursor, Write};

use tracing::trace;

use crate::datatypes::Dimension;
use crate::error::{GeoCodecError, Result};
use crate::io::sqlserver::common::{remaining, SegmentType, Version};
use crate::io::sqlserver::coord::CoordinateArray;
use crate::io::sqlserver::figure::{figures_size, read_figures, write_figures, Figure};
use crate::io::sqlserver::header::{Header, Layout};
use crate::io::sqlserver::segment::{read_segments, segments_size, write_segments};
use crate::io::sqlserver::shape::{read_shapes, shapes_size, write_shapes, Shape};

/// The body following the header, one variant per layout.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Payload {
    /// One point, stored without a count prefix.
    SinglePoint(CoordinateArray),
    /// Two points forming one line, stored without a count prefix.
    SingleLineSegment(CoordinateArray),
    Tables(Tables),
}

impl Payload {
    /// Exchange X and Y in the point table, see [`CoordinateArray::swap_axes`].
    pub(crate) fn swap_axes(&mut self) {
        match self {
            Payload::SinglePoint(coords) | Payload::SingleLineSegment(coords) => coords.swap_axes(),
            Payload::Tables(tables) => tables.coords.swap_axes(),
        }
    }
}

/// The general layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Tables {
    pub(crate) coords: CoordinateArray,
    pub(crate) figures: Vec<Figure>,
    pub(crate) shapes: Vec<Shape>,
    /// Empty unless the payload holds a compound curve.
    pub(crate) segments: Vec<SegmentType>,
}

/// A parsed payload: a header and the body it announces.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Serialized {
    pub(crate) header: Header,
    pub(crate) payload: Payload,
}

impl Serialized {
    /// Pair a body with a header whose layout flags match it.
    pub(crate) fn new(srid: i32, version: Version, dim: Dimension, payload: Payload) -> Self {
        let layout = match &payload {
            Payload::SinglePoint(_) => Layout::SinglePoint,
            Payload::SingleLineSegment(_) => Layout::SingleLineSegment,
            Payload::Tables(_) => Layout::Tables,
        };
        let header = Header {
            srid,
            version,
            dim,
            is_valid: true,
            layout,
            larger_than_hemisphere: false,
        };
        Self { header, payload }
    }

    /// Parse a payload, returning `None` for the null sentinel.
    pub(crate) fn read(buf: &[u8]) -> Result<Option<Self>> {
        let mut reader = Cursor::new(buf);
        let Some(header) = Header::read(&mut reader)? else {
            return Ok(None);
        };

        trace!(layout = ?header.layout, "dispatching payload");
        let payload = match header.layout {
            Layout::SinglePoint => {
                Payload::SinglePoint(CoordinateArray::read_points(&mut reader, 1, header.dim)?)
            }
            Layout::SingleLineSegment => Payload::SingleLineSegment(
                CoordinateArray::read_points(&mut reader, 2, header.dim)?,
            ),
            Layout::Tables => {
                let coords = CoordinateArray::read(&mut reader, header.dim)?;
                let figures = read_figures(&mut reader, header.version)?;
                let shapes = read_shapes(&mut reader)?;
                let segments = if header.version == Version::V2 && remaining(&reader) > 0 {
                    read_segments(&mut reader)?
                } else {
                    vec![]
                };
                Payload::Tables(Tables {
                    coords,
                    figures,
                    shapes,
                    segments,
                })
            }
        };

        let trailing = remaining(&reader);
        if trailing > 0 {
            return Err(GeoCodecError::Format(format!(
                "{trailing} trailing bytes after geometry"
            )));
        }
        Ok(Some(Self { header, payload }))
    }

    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.header.write(writer)?;
        match &self.payload {
            Payload::SinglePoint(coords) | Payload::SingleLineSegment(coords) => {
                coords.write_points(writer)?;
            }
            Payload::Tables(tables) => {
                tables.coords.write(writer)?;
                write_figures(writer, &tables.figures)?;
                write_shapes(writer, &tables.shapes)?;
                if !tables.segments.is_empty() {
                    write_segments(writer, &tables.segments)?;
                }
            }
        }
        Ok(())
    }

    /// The number of bytes [`write`](Self::write) produces.
    pub(crate) fn size(&self) -> usize {
        let body = match &self.payload {
            Payload::SinglePoint(coords) | Payload::SingleLineSegment(coords) => {
                coords.points_size()
            }
            Payload::Tables(tables) => {
                let segments = if tables.segments.is_empty() {
                    0
                } else {
                    segments_size(&tables.segments)
                };
                4 + tables.coords.points_size()
                    + figures_size(&tables.figures)
                    + shapes_size(&tables.shapes)
                    + segments
            }
        };
        Header::SIZE + body
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geo_traits::Coord;
    use crate::io::sqlserver::common::{FigureAttribute, ShapeType};

    #[test]
    fn single_point_layout() {
        let mut coords = CoordinateArray::new(Dimension::XYZ);
        coords.push(&Coord::xyz(1., 2., 3.));
        let raw = Serialized::new(4326, Version::V1, Dimension::XYZ, Payload::SinglePoint(coords));

        let mut buf = vec![];
        raw.write(&mut buf).unwrap();
        assert_eq!(buf[..6], [0xE6, 0x10, 0, 0, 1, 0x0D]);
        assert_eq!(buf.len(), 6 + 24);
        assert_eq!(raw.size(), buf.len());
        assert_eq!(Serialized::read(&buf).unwrap(), Some(raw));
    }

    #[test]
    fn tables_with_segments() {
        let mut coords = CoordinateArray::new(Dimension::XY);
        coords.extend(&[Coord::xy(0., 0.), Coord::xy(1., 1.), Coord::xy(2., 0.)]);
        let tables = Tables {
            coords,
            figures: vec![Figure {
                attribute: FigureAttribute::CompositeCurve,
                point_offset: 0,
            }],
            shapes: vec![Shape {
                parent: None,
                figure: Some(0),
                shape_type: ShapeType::CompoundCurve,
            }],
            segments: vec![SegmentType::FirstLine, SegmentType::Line],
        };
        let raw = Serialized::new(0, Version::V2, Dimension::XY, Payload::Tables(tables));

        let mut buf = vec![];
        raw.write(&mut buf).unwrap();
        assert_eq!(raw.size(), buf.len());
        // segments follow the shape table
        assert_eq!(buf[buf.len() - 6..], [2, 0, 0, 0, 2, 0]);
        assert_eq!(Serialized::read(&buf).unwrap(), Some(raw));
    }

    #[test]
    fn null() {
        assert_eq!(Serialized::read(&[0xFF; 4]).unwrap(), None);
    }

    #[test]
    fn trailing_bytes() {
        let mut buf = vec![0, 0, 0, 0, 1, 0x0C];
        buf.extend_from_slice(&[0; 16]);
        assert!(Serialized::read(&buf).is_ok());
        buf.push(0);
        assert!(Serialized::read(&buf).is_err());
    }
}
