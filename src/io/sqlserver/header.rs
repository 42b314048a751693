use std::io::{Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::datatypes::Dimension;
use crate::error::{GeoCodecError, Result};
use crate::io::sqlserver::common::{
    Version, HAS_M, HAS_Z, IS_LARGER_THAN_HEMISPHERE, IS_SINGLE_LINE_SEGMENT, IS_SINGLE_POINT,
    IS_VALID, NULL_SRID,
};

/// Which layout follows the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Coordinate, figure, shape and (version 2) segment tables.
    Tables,
    /// Exactly one point, no tables.
    SinglePoint,
    /// Exactly one two-point line, no tables.
    SingleLineSegment,
}

/// The fixed six byte prefix of every non-null payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub srid: i32,
    pub version: Version,
    /// The ordinates stored for every point.
    pub dim: Dimension,
    /// Informational; never re-validated.
    pub is_valid: bool,
    pub layout: Layout,
    /// Only meaningful for geography payloads.
    pub larger_than_hemisphere: bool,
}

impl Header {
    /// The number of bytes in a header.
    pub const SIZE: usize = 4 + 1 + 1;

    /// Read a header, returning `None` when the SRID field holds the null sentinel.
    ///
    /// The sentinel is checked on the first four bytes alone, before the version byte.
    pub(crate) fn read(reader: &mut Cursor<&[u8]>) -> Result<Option<Self>> {
        let srid = reader.read_i32::<LittleEndian>()?;
        if srid == NULL_SRID {
            return Ok(None);
        }

        let version_byte = reader.read_u8()?;
        let version = Version::try_from(version_byte).map_err(|_| {
            GeoCodecError::Format(format!("unsupported version {version_byte}"))
        })?;

        let properties = reader.read_u8()?;
        let layout = match (
            properties & IS_SINGLE_POINT != 0,
            properties & IS_SINGLE_LINE_SEGMENT != 0,
        ) {
            (false, false) => Layout::Tables,
            (true, false) => Layout::SinglePoint,
            (false, true) => Layout::SingleLineSegment,
            (true, true) => {
                return Err(GeoCodecError::Format(
                    "both single point and single line segment flags are set".to_string(),
                ))
            }
        };

        Ok(Some(Self {
            srid,
            version,
            dim: Dimension::from_flags(properties & HAS_Z != 0, properties & HAS_M != 0),
            is_valid: properties & IS_VALID != 0,
            layout,
            larger_than_hemisphere: properties & IS_LARGER_THAN_HEMISPHERE != 0,
        }))
    }

    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i32::<LittleEndian>(self.srid)?;
        writer.write_u8(self.version.into())?;
        writer.write_u8(self.properties())?;
        Ok(())
    }

    /// The property flag byte.
    pub fn properties(&self) -> u8 {
        let mut flags = 0;
        if self.dim.has_z() {
            flags |= HAS_Z;
        }
        if self.dim.has_m() {
            flags |= HAS_M;
        }
        if self.is_valid {
            flags |= IS_VALID;
        }
        match self.layout {
            Layout::Tables => {}
            Layout::SinglePoint => flags |= IS_SINGLE_POINT,
            Layout::SingleLineSegment => flags |= IS_SINGLE_LINE_SEGMENT,
        }
        if self.larger_than_hemisphere {
            flags |= IS_LARGER_THAN_HEMISPHERE;
        }
        flags
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn read(buf: &[u8]) -> Result<Option<Header>> {
        Header::read(&mut Cursor::new(buf))
    }

    #[test]
    fn null_sentinel_needs_only_srid() {
        assert_eq!(read(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap(), None);
    }

    #[test]
    fn srid_and_flags() {
        let header = read(&[0xE6, 0x10, 0x00, 0x00, 0x01, 0x0F]).unwrap().unwrap();
        assert_eq!(header.srid, 4326);
        assert_eq!(header.version, Version::V1);
        assert_eq!(header.dim, Dimension::XYZM);
        assert!(header.is_valid);
        assert_eq!(header.layout, Layout::SinglePoint);
        assert!(!header.larger_than_hemisphere);
    }

    #[test]
    fn unsupported_version() {
        let err = read(&[0, 0, 0, 0, 3, 0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid serialized geometry: unsupported version 3"
        );
    }

    #[test]
    fn conflicting_compact_flags() {
        assert!(matches!(
            read(&[0, 0, 0, 0, 1, 0x18]),
            Err(GeoCodecError::Format(_))
        ));
    }

    #[test]
    fn truncated() {
        assert!(matches!(read(&[0, 0, 0]), Err(GeoCodecError::Format(_))));
        assert!(matches!(read(&[0, 0, 0, 0, 1]), Err(GeoCodecError::Format(_))));
    }

    #[test]
    fn write_round_trip() {
        let header = Header {
            srid: 4326,
            version: Version::V2,
            dim: Dimension::XYM,
            is_valid: true,
            layout: Layout::SingleLineSegment,
            larger_than_hemisphere: true,
        };
        let mut buf = vec![];
        header.write(&mut buf).unwrap();
        assert_eq!(buf, [0xE6, 0x10, 0x00, 0x00, 0x02, 0x36]);
        assert_eq!(read(&buf).unwrap(), Some(header));
    }
}
