//! Convert between [`geo`] scalars and the serialized format.
//!
//! [`GeoFactory`] decodes straight into [`geo::Geometry`], and every [`geo::Geometry`] can be
//! encoded through its [`GeometryTrait`](crate::geo_traits::GeometryTrait) implementation.
//! `geo` is two dimensional and has no curves, so Z and M are dropped on decode and curve
//! shapes are refused.

mod factory;
mod scalar;

pub use factory::GeoFactory;
