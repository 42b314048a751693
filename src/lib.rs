//! A codec for the binary geometry and geography serialization used by Microsoft SQL Server,
//! including the version 2 curve types.
//!
//! Decoding builds values through a caller supplied
//! [`GeometryFactory`](geo_traits::GeometryFactory); encoding walks any value implementing
//! [`GeometryTrait`](geo_traits::GeometryTrait). Two implementations ship with the crate: the
//! owned [`geometry::Geometry`] model, which covers every shape the format can carry, and
//! [`geo::Geometry`] via [`io::geo::GeoFactory`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod datatypes;
pub mod error;
pub mod geo_traits;
pub mod geometry;
pub mod io;
#[cfg(test)]
pub(crate) mod test;
