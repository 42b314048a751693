//! An owned geometry value model implementing both [`GeometryFactory`] and
//! [`GeometryTrait`].
//!
//! [`GeometryFactory`]: crate::geo_traits::GeometryFactory
//! [`GeometryTrait`]: crate::geo_traits::GeometryTrait

pub use scalar::{DefaultFactory, Geometry, GeometryKind};

mod display;
mod scalar;
