use serde::{Deserialize, Serialize};

use crate::datatypes::Dimension;

/// The SRID written for geography values that do not carry one.
pub const DEFAULT_GEOGRAPHY_SRID: i32 = 4326;

/// Options controlling how payloads are read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlServerOptions {
    /// The ordinates to keep when reading. Ordinates present in a payload but not requested
    /// here are dropped.
    pub dimension: Dimension,

    /// Read and write geography rather than geometry values.
    ///
    /// Geography payloads store latitude before longitude and a polygon's shell after its
    /// holes. Also enables the empty shell check and gives the larger-than-hemisphere flag
    /// its meaning.
    pub geography: bool,

    /// SRID written for values that do not carry one. Defaults to 4326 for geography and 0
    /// for geometry.
    pub default_srid: Option<i32>,

    /// Write single points and single two-point lines with the compact layouts.
    pub compact: bool,
}

impl Default for SqlServerOptions {
    fn default() -> Self {
        Self {
            dimension: Dimension::XYZM,
            geography: false,
            default_srid: None,
            compact: true,
        }
    }
}

impl SqlServerOptions {
    pub fn with_dimension(self, dimension: Dimension) -> Self {
        Self { dimension, ..self }
    }

    pub fn with_geography(self, geography: bool) -> Self {
        Self { geography, ..self }
    }

    pub fn with_default_srid(self, default_srid: i32) -> Self {
        Self {
            default_srid: Some(default_srid),
            ..self
        }
    }

    pub fn with_compact(self, compact: bool) -> Self {
        Self { compact, ..self }
    }

    /// The SRID to write when a value carries none.
    pub fn srid_or_default(&self, srid: Option<i32>) -> i32 {
        srid.or(self.default_srid).unwrap_or(if self.geography {
            DEFAULT_GEOGRAPHY_SRID
        } else {
            0
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_srid_policy() {
        let options = SqlServerOptions::default();
        assert_eq!(options.srid_or_default(None), 0);
        assert_eq!(options.srid_or_default(Some(3857)), 3857);
        assert_eq!(options.with_geography(true).srid_or_default(None), 4326);
        assert_eq!(
            options.with_default_srid(2193).with_geography(true).srid_or_default(None),
            2193
        );
    }

    #[test]
    fn from_json() {
        let options: SqlServerOptions =
            serde_json::from_str(r#"{"dimension": "XY", "geography": true}"#).unwrap();
        assert_eq!(
            options,
            SqlServerOptions::default()
                .with_dimension(Dimension::XY)
                .with_geography(true)
        );
    }

    #[test]
    fn empty_json_is_default() {
        let options: SqlServerOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SqlServerOptions::default());
    }
}
