//! Reading and writing the binary format SQL Server uses for its `geometry` and `geography`
//! column types.
//!
//! A payload is a six byte header followed either by a single point, a single two-point line,
//! or four tables: points, figures (point ranges), shapes (a pre-ordered tree of geometry
//! nodes) and, for compound curves, segments.
//!
//! ```
//! use mssql_geometry::geometry::DefaultFactory;
//! use mssql_geometry::io::sqlserver::{from_sqlserver, to_sqlserver, SqlServerOptions};
//!
//! let buf = [
//!     0xE6, 0x10, 0x00, 0x00, 0x01, 0x0C, // SRID 4326, version 1, valid single point
//!     0, 0, 0, 0, 0, 0, 0xF0, 0x3F, // x = 1
//!     0, 0, 0, 0, 0, 0, 0x00, 0x40, // y = 2
//! ];
//! let options = SqlServerOptions::default();
//! let geom = from_sqlserver(&buf, &DefaultFactory, &options).unwrap().unwrap();
//! assert_eq!(geom.to_string(), "POINT (1 2)");
//! assert_eq!(geom.srid(), 4326);
//! assert_eq!(to_sqlserver(&geom, &options).unwrap(), buf);
//! ```

mod api;
mod common;
mod coord;
mod figure;
mod header;
mod options;
mod payload;
mod reader;
mod segment;
mod shape;
mod writer;

pub use api::{from_sqlserver, read_header, to_sqlserver, write_sqlserver, SqlServerCodec};
pub use common::{SegmentType, ShapeType, Version, NULL_SRID};
pub use header::{Header, Layout};
pub use options::{SqlServerOptions, DEFAULT_GEOGRAPHY_SRID};
