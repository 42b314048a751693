use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The ordinates carried by each coordinate of a geometry.
///
/// X and Y are always present; Z and M are optional and independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dimension {
    /// Two-dimensional.
    #[default]
    XY,

    /// Three-dimensional.
    XYZ,

    /// XYM (2D with measure).
    XYM,

    /// XYZM (3D with measure).
    XYZM,
}

impl Dimension {
    /// Build a dimension from the presence of the Z and M ordinates.
    pub fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Dimension::XY,
            (true, false) => Dimension::XYZ,
            (false, true) => Dimension::XYM,
            (true, true) => Dimension::XYZM,
        }
    }

    /// Whether the Z ordinate is present.
    pub fn has_z(&self) -> bool {
        matches!(self, Dimension::XYZ | Dimension::XYZM)
    }

    /// Whether the M ordinate is present.
    pub fn has_m(&self) -> bool {
        matches!(self, Dimension::XYM | Dimension::XYZM)
    }

    /// The ordinates present in both `self` and `other`.
    pub fn intersection(&self, other: Dimension) -> Dimension {
        Dimension::from_flags(self.has_z() && other.has_z(), self.has_m() && other.has_m())
    }

    /// Returns the number of dimensions.
    pub fn size(&self) -> usize {
        match self {
            Dimension::XY => 2,
            Dimension::XYZ => 3,
            Dimension::XYM => 3,
            Dimension::XYZM => 4,
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::XY => write!(f, "XY"),
            Dimension::XYZ => write!(f, "XYZ"),
            Dimension::XYM => write!(f, "XYM"),
            Dimension::XYZM => write!(f, "XYZM"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flags_round_trip() {
        for dim in [
            Dimension::XY,
            Dimension::XYZ,
            Dimension::XYM,
            Dimension::XYZM,
        ] {
            assert_eq!(Dimension::from_flags(dim.has_z(), dim.has_m()), dim);
        }
    }

    #[test]
    fn intersection() {
        assert_eq!(Dimension::XYZM.intersection(Dimension::XY), Dimension::XY);
        assert_eq!(Dimension::XYZ.intersection(Dimension::XYM), Dimension::XY);
        assert_eq!(Dimension::XYZM.intersection(Dimension::XYM), Dimension::XYM);
        assert_eq!(Dimension::XYZ.intersection(Dimension::XYZM), Dimension::XYZ);
    }

    #[test]
    fn size() {
        assert_eq!(Dimension::XY.size(), 2);
        assert_eq!(Dimension::XYM.size(), 3);
        assert_eq!(Dimension::XYZM.size(), 4);
    }
}
