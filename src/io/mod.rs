//! Readers and writers for serialized geometries, and interoperability with the `geo` crate.

pub mod geo;
pub mod sqlserver;
