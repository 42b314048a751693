use std::io::{Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::datatypes::Dimension;
use crate::error::Result;
use crate::geo_traits::Coord;
use crate::io::sqlserver::common::{check_count, to_count};

/// The point table: X/Y pairs followed by the optional Z and M arrays.
///
/// Z and M are stored out of line from the X/Y pairs and always in that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct CoordinateArray {
    xy: Vec<(f64, f64)>,
    z: Option<Vec<f64>>,
    m: Option<Vec<f64>>,
}

impl CoordinateArray {
    pub(crate) fn new(dim: Dimension) -> Self {
        Self {
            xy: vec![],
            z: dim.has_z().then(Vec::new),
            m: dim.has_m().then(Vec::new),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.xy.len()
    }

    /// Append a coordinate. Ordinates the array stores but the coordinate lacks are written
    /// as NaN; ordinates the array does not store are dropped.
    pub(crate) fn push(&mut self, coord: &Coord) {
        self.xy.push((coord.x, coord.y));
        if let Some(z) = self.z.as_mut() {
            z.push(coord.z.unwrap_or(f64::NAN));
        }
        if let Some(m) = self.m.as_mut() {
            m.push(coord.m.unwrap_or(f64::NAN));
        }
    }

    pub(crate) fn extend<'a>(&mut self, coords: impl IntoIterator<Item = &'a Coord>) {
        for coord in coords {
            self.push(coord);
        }
    }

    /// The coordinate at `i`, keeping only the ordinates in `dim`.
    ///
    /// Callers must pass an index below [`len`](Self::len) and a `dim` no wider than the
    /// stored one.
    pub(crate) fn coord(&self, i: usize, dim: Dimension) -> Coord {
        let (x, y) = self.xy[i];
        Coord {
            x,
            y,
            z: self.z.as_ref().filter(|_| dim.has_z()).map(|z| z[i]),
            m: self.m.as_ref().filter(|_| dim.has_m()).map(|m| m[i]),
        }
    }

    /// The coordinates in `start..end`, keeping only the ordinates in `dim`.
    pub(crate) fn slice(&self, start: usize, end: usize, dim: Dimension) -> Vec<Coord> {
        (start..end).map(|i| self.coord(i, dim)).collect()
    }

    /// Exchange the two stored horizontal values of every point.
    ///
    /// Geography payloads store latitude before longitude, that is Y before X.
    pub(crate) fn swap_axes(&mut self) {
        for (a, b) in self.xy.iter_mut() {
            std::mem::swap(a, b);
        }
    }

    /// Read a point count followed by that many points.
    pub(crate) fn read(reader: &mut Cursor<&[u8]>, dim: Dimension) -> Result<Self> {
        let num_points = reader.read_u32::<LittleEndian>()? as usize;
        Self::read_points(reader, num_points, dim)
    }

    /// Read `num_points` points without a count prefix, as in the compact layouts.
    pub(crate) fn read_points(
        reader: &mut Cursor<&[u8]>,
        num_points: usize,
        dim: Dimension,
    ) -> Result<Self> {
        check_count(reader, num_points, dim.size() * 8, "points")?;

        let mut xy = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            let x = reader.read_f64::<LittleEndian>()?;
            let y = reader.read_f64::<LittleEndian>()?;
            xy.push((x, y));
        }
        let z = if dim.has_z() {
            Some(read_ordinates(reader, num_points)?)
        } else {
            None
        };
        let m = if dim.has_m() {
            Some(read_ordinates(reader, num_points)?)
        } else {
            None
        };
        Ok(Self { xy, z, m })
    }

    /// Write the point count followed by the points.
    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(to_count(self.len(), "points")?)?;
        self.write_points(writer)
    }

    /// Write the points without a count prefix.
    pub(crate) fn write_points<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (x, y) in &self.xy {
            writer.write_f64::<LittleEndian>(*x)?;
            writer.write_f64::<LittleEndian>(*y)?;
        }
        for ordinates in [&self.z, &self.m].into_iter().flatten() {
            for value in ordinates {
                writer.write_f64::<LittleEndian>(*value)?;
            }
        }
        Ok(())
    }

    /// The byte length of the points, without a count prefix.
    pub(crate) fn points_size(&self) -> usize {
        let per_point = 16 + self.z.as_ref().map_or(0, |_| 8) + self.m.as_ref().map_or(0, |_| 8);
        self.len() * per_point
    }
}

fn read_ordinates(reader: &mut Cursor<&[u8]>, num_points: usize) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(num_points);
    for _ in 0..num_points {
        values.push(reader.read_f64::<LittleEndian>()?);
    }
    Ok(values)
}
