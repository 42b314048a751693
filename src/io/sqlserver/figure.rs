use std::io::{Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{GeoCodecError, Result};
use crate::io::sqlserver::common::{
    check_count, from_index, to_count, to_index, FigureAttribute, Version,
};

/// One entry of the figure table: a contiguous run of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Figure {
    pub(crate) attribute: FigureAttribute,
    /// Index of the first point of this figure.
    pub(crate) point_offset: usize,
}

const FIGURE_SIZE: usize = 1 + 4;

pub(crate) fn read_figures(reader: &mut Cursor<&[u8]>, version: Version) -> Result<Vec<Figure>> {
    let num_figures = reader.read_u32::<LittleEndian>()? as usize;
    check_count(reader, num_figures, FIGURE_SIZE, "figures")?;

    let mut figures = Vec::with_capacity(num_figures);
    for _ in 0..num_figures {
        let attribute = FigureAttribute::from_byte(reader.read_u8()?, version)?;
        let point_offset = from_index(reader.read_i32::<LittleEndian>()?, "point")?
            .ok_or_else(|| GeoCodecError::Format("figure without a point offset".to_string()))?;
        figures.push(Figure {
            attribute,
            point_offset,
        });
    }
    Ok(figures)
}

pub(crate) fn write_figures<W: Write>(writer: &mut W, figures: &[Figure]) -> Result<()> {
    writer.write_u32::<LittleEndian>(to_count(figures.len(), "figures")?)?;
    for figure in figures {
        writer.write_u8(figure.attribute.to_byte())?;
        writer.write_i32::<LittleEndian>(to_index(Some(figure.point_offset), "point")?)?;
    }
    Ok(())
}

pub(crate) fn figures_size(figures: &[Figure]) -> usize {
    4 + figures.len() * FIGURE_SIZE
}

/// The point range `[start, end)` of every figure.
///
/// Offsets must be non-decreasing and within the point table.
pub(crate) fn point_ranges(figures: &[Figure], num_points: usize) -> Result<Vec<(usize, usize)>> {
    let mut ranges = Vec::with_capacity(figures.len());
    for (i, figure) in figures.iter().enumerate() {
        let end = figures
            .get(i + 1)
            .map_or(num_points, |next| next.point_offset);
        if figure.point_offset > end || end > num_points {
            return Err(GeoCodecError::Format(format!(
                "figure {i} point offset {} out of order or beyond {num_points} points",
                figure.point_offset
            )));
        }
        ranges.push((figure.point_offset, end));
    }
    Ok(ranges)
}

#[cfg(test)]
mod test {
    use super::*;

    fn figure(attribute: FigureAttribute, point_offset: usize) -> Figure {
        Figure {
            attribute,
            point_offset,
        }
    }

    #[test]
    fn round_trip() {
        let figures = vec![
            figure(FigureAttribute::ExteriorRing, 0),
            figure(FigureAttribute::InteriorRing, 5),
        ];
        let mut buf = vec![];
        write_figures(&mut buf, &figures).unwrap();
        assert_eq!(buf.len(), figures_size(&figures));
        assert_eq!(buf[..6], [2, 0, 0, 0, 2, 0]);

        let decoded = read_figures(&mut Cursor::new(&buf[..]), Version::V1).unwrap();
        assert_eq!(decoded, figures);
    }

    #[test]
    fn ranges() {
        let figures = vec![
            figure(FigureAttribute::Line, 0),
            figure(FigureAttribute::Arc, 2),
            figure(FigureAttribute::Line, 5),
        ];
        assert_eq!(
            point_ranges(&figures, 6).unwrap(),
            vec![(0, 2), (2, 5), (5, 6)]
        );
    }

    #[test]
    fn decreasing_offsets() {
        let figures = vec![figure(FigureAttribute::Line, 3), figure(FigureAttribute::Line, 1)];
        assert!(point_ranges(&figures, 4).is_err());
    }

    #[test]
    fn offset_past_points() {
        let figures = vec![figure(FigureAttribute::Line, 5)];
        assert!(point_ranges(&figures, 4).is_err());
    }

    #[test]
    fn negative_offset() {
        let buf = [1u8, 0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(read_figures(&mut Cursor::new(&buf[..]), Version::V1).is_err());
    }
}
