//! Interfaces between the codec and the geometry values it reads and writes.

pub use coord::Coord;
pub use curve::{CurveSegment, Ring};
pub use factory::{GeometryFactory, GeometryMeta};
pub use geometry::{GeometryTrait, GeometryType};

mod coord;
mod curve;
mod factory;
mod geometry;
