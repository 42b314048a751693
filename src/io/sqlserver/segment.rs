use std::io::{Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{GeoCodecError, Result};
use crate::geo_traits::{Coord, CurveSegment};
use crate::io::sqlserver::common::{check_count, to_count, SegmentType};

pub(crate) fn read_segments(reader: &mut Cursor<&[u8]>) -> Result<Vec<SegmentType>> {
    let num_segments = reader.read_u32::<LittleEndian>()? as usize;
    check_count(reader, num_segments, 1, "segments")?;

    let mut segments = Vec::with_capacity(num_segments);
    for _ in 0..num_segments {
        let value = reader.read_u8()?;
        let segment = SegmentType::try_from(value)
            .map_err(|_| GeoCodecError::Format(format!("unknown segment type {value}")))?;
        segments.push(segment);
    }
    Ok(segments)
}

pub(crate) fn write_segments<W: Write>(writer: &mut W, segments: &[SegmentType]) -> Result<()> {
    writer.write_u32::<LittleEndian>(to_count(segments.len(), "segments")?)?;
    for segment in segments {
        writer.write_u8((*segment).into())?;
    }
    Ok(())
}

pub(crate) fn segments_size(segments: &[SegmentType]) -> usize {
    4 + segments.len()
}

/// Walks the segment table in figure order, grouping the points of each compound curve
/// figure into line and arc runs.
///
/// Runs are chained: every tag is anchored on the last point consumed so far, so the end
/// point of one run is the start point of the next.
pub(crate) struct SegmentCursor<'a> {
    segments: &'a [SegmentType],
    position: usize,
}

impl<'a> SegmentCursor<'a> {
    pub(crate) fn new(segments: &'a [SegmentType]) -> Self {
        Self {
            segments,
            position: 0,
        }
    }

    fn next_segment(&mut self) -> Result<SegmentType> {
        let segment = self.segments.get(self.position).copied().ok_or_else(|| {
            GeoCodecError::Format("segment table exhausted before figure points".to_string())
        })?;
        self.position += 1;
        Ok(segment)
    }

    /// Consume the tags covering `points` and return the runs they describe.
    pub(crate) fn take_curve(&mut self, points: &[Coord]) -> Result<Vec<CurveSegment>> {
        if points.len() == 1 {
            return Err(GeoCodecError::Format(
                "compound curve figure with a single point".to_string(),
            ));
        }

        let mut runs: Vec<CurveSegment> = vec![];
        let mut anchor = 0;
        while anchor + 1 < points.len() {
            let segment = self.next_segment()?;
            let step = match segment {
                SegmentType::Line | SegmentType::FirstLine => 1,
                SegmentType::Arc | SegmentType::FirstArc => 2,
            };
            let end = anchor + step;
            if end >= points.len() {
                return Err(GeoCodecError::Format(format!(
                    "{segment:?} segment runs past the {} points of its figure",
                    points.len()
                )));
            }
            let new_points = &points[anchor + 1..=end];

            match (segment, runs.last_mut()) {
                (SegmentType::Line, Some(CurveSegment::Line(coords)))
                | (SegmentType::Arc, Some(CurveSegment::Arc(coords))) => {
                    coords.extend_from_slice(new_points);
                }
                // a continuation tag without a matching run starts one
                (SegmentType::Line | SegmentType::FirstLine, _) => {
                    runs.push(CurveSegment::Line(points[anchor..=end].to_vec()));
                }
                (SegmentType::Arc | SegmentType::FirstArc, _) => {
                    runs.push(CurveSegment::Arc(points[anchor..=end].to_vec()));
                }
            }
            anchor = end;
        }
        Ok(runs)
    }

    /// Fail if any tag was not claimed by a figure.
    pub(crate) fn finish(self) -> Result<()> {
        if self.position != self.segments.len() {
            return Err(GeoCodecError::Format(format!(
                "{} segments left after the last compound curve figure",
                self.segments.len() - self.position
            )));
        }
        Ok(())
    }
}

/// Flatten compound curve runs into the points of one figure and the tags describing them.
///
/// The shared boundary point between consecutive runs is stored once.
pub(crate) fn flatten_curve<'a>(
    runs: &'a [CurveSegment],
    segments: &mut Vec<SegmentType>,
) -> Result<Vec<&'a Coord>> {
    let mut points: Vec<&Coord> = vec![];
    for run in runs {
        let coords = run.coords();
        let (first, continuation, step) = match run {
            CurveSegment::Line(_) => {
                if coords.len() < 2 {
                    return Err(GeoCodecError::Format(format!(
                        "line run with {} points",
                        coords.len()
                    )));
                }
                (SegmentType::FirstLine, SegmentType::Line, 1)
            }
            CurveSegment::Arc(_) => {
                if coords.len() < 3 || coords.len() % 2 == 0 {
                    return Err(GeoCodecError::Format(format!(
                        "arc run with {} points",
                        coords.len()
                    )));
                }
                (SegmentType::FirstArc, SegmentType::Arc, 2)
            }
        };

        match points.last() {
            None => points.push(&coords[0]),
            Some(last) if last.x_y() == coords[0].x_y() => {}
            Some(_) => {
                return Err(GeoCodecError::Format(
                    "compound curve runs are not connected".to_string(),
                ))
            }
        }
        points.extend(&coords[1..]);

        let count = (coords.len() - 1) / step;
        segments.push(first);
        segments.extend(std::iter::repeat(continuation).take(count - 1));
    }
    Ok(points)
}
