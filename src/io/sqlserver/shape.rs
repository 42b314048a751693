use std::io::{Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{GeoCodecError, Result};
use crate::io::sqlserver::common::{
    check_count, from_index, to_count, to_index, ShapeType, Version,
};

/// One node of the shape forest, stored in pre-order with a parent reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shape {
    pub(crate) parent: Option<usize>,
    /// Index of the first figure owned by this shape or its descendants.
    pub(crate) figure: Option<usize>,
    pub(crate) shape_type: ShapeType,
}

const SHAPE_SIZE: usize = 4 + 4 + 1;

pub(crate) fn read_shapes(reader: &mut Cursor<&[u8]>) -> Result<Vec<Shape>> {
    let num_shapes = reader.read_u32::<LittleEndian>()? as usize;
    check_count(reader, num_shapes, SHAPE_SIZE, "shapes")?;

    let mut shapes = Vec::with_capacity(num_shapes);
    for _ in 0..num_shapes {
        let parent = from_index(reader.read_i32::<LittleEndian>()?, "parent")?;
        let figure = from_index(reader.read_i32::<LittleEndian>()?, "figure")?;
        let tag = reader.read_u8()?;
        let shape_type = ShapeType::try_from(tag)
            .map_err(|_| GeoCodecError::Format(format!("unknown shape type {tag}")))?;
        if shape_type == ShapeType::FullGlobe {
            return Err(GeoCodecError::UnsupportedType(shape_type.to_string()));
        }
        shapes.push(Shape {
            parent,
            figure,
            shape_type,
        });
    }
    Ok(shapes)
}

pub(crate) fn write_shapes<W: Write>(writer: &mut W, shapes: &[Shape]) -> Result<()> {
    writer.write_u32::<LittleEndian>(to_count(shapes.len(), "shapes")?)?;
    for shape in shapes {
        writer.write_i32::<LittleEndian>(to_index(shape.parent, "parent")?)?;
        writer.write_i32::<LittleEndian>(to_index(shape.figure, "figure")?)?;
        writer.write_u8(shape.shape_type.into())?;
    }
    Ok(())
}

pub(crate) fn shapes_size(shapes: &[Shape]) -> usize {
    4 + shapes.len() * SHAPE_SIZE
}

/// Check that the shapes form a single tree in pre-order whose containment matches the
/// shape types.
pub(crate) fn validate_tree(shapes: &[Shape], version: Version) -> Result<()> {
    let Some(root) = shapes.first() else {
        return Err(GeoCodecError::Format("payload has no shapes".to_string()));
    };
    if root.parent.is_some() {
        return Err(GeoCodecError::Format("first shape has a parent".to_string()));
    }

    for (i, shape) in shapes.iter().enumerate() {
        if version == Version::V1 && shape.shape_type.is_curve() {
            return Err(GeoCodecError::Format(format!(
                "{} shape in a version 1 payload",
                shape.shape_type
            )));
        }
        if i == 0 {
            continue;
        }

        let parent = shape.parent.ok_or_else(|| {
            GeoCodecError::Format(format!("shape {i} is a second root"))
        })?;
        if parent >= i {
            return Err(GeoCodecError::Format(format!(
                "shape {i} refers to parent {parent} which does not precede it"
            )));
        }
        let parent_type = shapes[parent].shape_type;
        if !parent_type.accepts_child(shape.shape_type) {
            return Err(GeoCodecError::Format(format!(
                "{parent_type} cannot contain {}",
                shape.shape_type
            )));
        }
    }
    Ok(())
}

/// The figure range `[start, end)` owned by each leaf shape, `None` for containers and shapes
/// without figures.
///
/// A shape's figures run up to the first figure index of the next shape that has one.
pub(crate) fn figure_ranges(
    shapes: &[Shape],
    num_figures: usize,
) -> Result<Vec<Option<(usize, usize)>>> {
    let mut ranges = vec![None; shapes.len()];
    let mut next_start = num_figures;
    for (i, shape) in shapes.iter().enumerate().rev() {
        if let Some(start) = shape.figure {
            if start >= num_figures || start > next_start {
                return Err(GeoCodecError::Format(format!(
                    "shape {i} figure index {start} out of order or beyond {num_figures} figures"
                )));
            }
            // containers point at the first figure of their descendants
            if !shape.shape_type.is_container() {
                ranges[i] = Some((start, next_start));
                next_start = start;
            }
        }
    }
    Ok(ranges)
}
