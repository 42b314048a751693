use std::fmt::Display;
use std::io::Cursor;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{GeoCodecError, Result};

/// The SRID value that marks a null geometry.
pub const NULL_SRID: i32 = -1;

/// Reported when a geography polygon has holes but no shell.
pub(crate) const EMPTY_SHELL: &str = "shell is empty but holes are not";

/// Index value meaning "no parent" or "no figure".
pub(crate) const NO_INDEX: i32 = -1;

pub(crate) const HAS_Z: u8 = 0x01;
pub(crate) const HAS_M: u8 = 0x02;
pub(crate) const IS_VALID: u8 = 0x04;
pub(crate) const IS_SINGLE_POINT: u8 = 0x08;
pub(crate) const IS_SINGLE_LINE_SEGMENT: u8 = 0x10;
pub(crate) const IS_LARGER_THAN_HEMISPHERE: u8 = 0x20;

/// The serialization format version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Version {
    /// Linear geometries only.
    V1 = 1,
    /// Adds circular strings, compound curves and curve polygons.
    V2 = 2,
}

/// The geometry type tag stored with each shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ShapeType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
    CircularString = 8,
    CompoundCurve = 9,
    CurvePolygon = 10,
    /// The whole-earth geography shape. Never accepted by this crate.
    FullGlobe = 11,
}

impl ShapeType {
    pub fn name(&self) -> &'static str {
        use ShapeType::*;
        match self {
            Point => "Point",
            LineString => "LineString",
            Polygon => "Polygon",
            MultiPoint => "MultiPoint",
            MultiLineString => "MultiLineString",
            MultiPolygon => "MultiPolygon",
            GeometryCollection => "GeometryCollection",
            CircularString => "CircularString",
            CompoundCurve => "CompoundCurve",
            CurvePolygon => "CurvePolygon",
            FullGlobe => "FullGlobe",
        }
    }

    /// Whether shapes of this type own child shapes rather than figures.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ShapeType::MultiPoint
                | ShapeType::MultiLineString
                | ShapeType::MultiPolygon
                | ShapeType::GeometryCollection
        )
    }

    /// Whether this type only exists in version 2 payloads.
    pub fn is_curve(&self) -> bool {
        matches!(
            self,
            ShapeType::CircularString | ShapeType::CompoundCurve | ShapeType::CurvePolygon
        )
    }

    /// Whether a shape of this type may be a direct child of a shape of `self`.
    pub(crate) fn accepts_child(&self, child: ShapeType) -> bool {
        match self {
            ShapeType::MultiPoint => child == ShapeType::Point,
            ShapeType::MultiLineString => child == ShapeType::LineString,
            ShapeType::MultiPolygon => child == ShapeType::Polygon,
            ShapeType::GeometryCollection => true,
            _ => false,
        }
    }
}

impl Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How the points of a compound curve figure are grouped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum SegmentType {
    /// Continue the current line run with one more point.
    Line = 0,
    /// Continue the current arc run with two more points.
    Arc = 1,
    /// Start a line run at the current point.
    FirstLine = 2,
    /// Start an arc run at the current point.
    FirstArc = 3,
}

/// The attribute byte of a figure.
///
/// The same byte value means different things in the two versions, so the variant is chosen
/// from the payload version when reading and writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FigureAttribute {
    /// Version 1: a hole of a polygon.
    InteriorRing,
    /// Version 1: a point or line.
    Stroke,
    /// Version 1: the shell of a polygon.
    ExteriorRing,
    /// Version 2: straight segments.
    Line,
    /// Version 2: a run of circular arcs.
    Arc,
    /// Version 2: a mix of lines and arcs described by the segment table.
    CompositeCurve,
}

impl FigureAttribute {
    pub(crate) fn from_byte(value: u8, version: Version) -> Result<Self> {
        use FigureAttribute::*;
        let attribute = match (version, value) {
            (Version::V1, 0) => InteriorRing,
            (Version::V1, 1) => Stroke,
            (Version::V1, 2) => ExteriorRing,
            // 0 is written by older version 2 producers for plain figures
            (Version::V2, 0 | 1) => Line,
            (Version::V2, 2) => Arc,
            (Version::V2, 3) => CompositeCurve,
            _ => {
                return Err(GeoCodecError::Format(format!(
                    "unknown figure attribute {value} for version {}",
                    u8::from(version)
                )))
            }
        };
        Ok(attribute)
    }

    pub(crate) fn to_byte(self) -> u8 {
        use FigureAttribute::*;
        match self {
            InteriorRing => 0,
            Stroke | Line => 1,
            ExteriorRing | Arc => 2,
            CompositeCurve => 3,
        }
    }
}

pub(crate) fn remaining(reader: &Cursor<&[u8]>) -> usize {
    let len = reader.get_ref().len() as u64;
    len.saturating_sub(reader.position()) as usize
}

/// Ensure `count` items of `item_size` bytes can still be read before allocating for them.
pub(crate) fn check_count(
    reader: &Cursor<&[u8]>,
    count: usize,
    item_size: usize,
    what: &str,
) -> Result<()> {
    let needed = count.checked_mul(item_size);
    let available = remaining(reader);
    match needed {
        Some(needed) if needed <= available => Ok(()),
        _ => Err(GeoCodecError::Format(format!(
            "{count} {what} declared but only {available} bytes remain"
        ))),
    }
}

/// Convert a table length into the u32 count stored on the wire.
pub(crate) fn to_count(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| GeoCodecError::Format(format!("too many {what} to serialize: {len}")))
}

/// Convert a table index into the i32 index stored on the wire.
pub(crate) fn to_index(index: Option<usize>, what: &str) -> Result<i32> {
    match index {
        None => Ok(NO_INDEX),
        Some(index) => i32::try_from(index)
            .map_err(|_| GeoCodecError::Format(format!("{what} index {index} out of range"))),
    }
}

/// Convert a wire index into a table index, `None` for the sentinel.
pub(crate) fn from_index(value: i32, what: &str) -> Result<Option<usize>> {
    match value {
        NO_INDEX => Ok(None),
        v if v < 0 => Err(GeoCodecError::Format(format!("negative {what} index {v}"))),
        v => Ok(Some(v as usize)),
    }
}
