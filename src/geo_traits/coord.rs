use crate::datatypes::Dimension;

/// A single position with optional Z and M ordinates.
///
/// A `None` ordinate is absent. A `Some(f64::NAN)` ordinate is present but unset, which is
/// how the serialized format marks a missing Z or M value inside a populated array.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    /// x component of this coord
    pub x: f64,
    /// y component of this coord
    pub y: f64,
    /// z component of this coord
    pub z: Option<f64>,
    /// m component of this coord
    pub m: Option<f64>,
}

impl Coord {
    /// A two-dimensional coordinate.
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: Some(m),
        }
    }

    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: Some(m),
        }
    }

    /// Returns a tuple that contains the x/horizontal & y/vertical component of the coord.
    pub fn x_y(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// The ordinates present on this coordinate.
    pub fn dim(&self) -> Dimension {
        Dimension::from_flags(self.z.is_some(), self.m.is_some())
    }

    /// Drop every ordinate that `dim` does not carry.
    pub fn project(&self, dim: Dimension) -> Self {
        Self {
            x: self.x,
            y: self.y,
            z: self.z.filter(|_| dim.has_z()),
            m: self.m.filter(|_| dim.has_m()),
        }
    }
}

impl From<geo::Coord<f64>> for Coord {
    fn from(value: geo::Coord<f64>) -> Self {
        Coord::xy(value.x, value.y)
    }
}

impl From<Coord> for geo::Coord<f64> {
    /// Only the first two dimensions will be kept.
    fn from(value: Coord) -> Self {
        geo::Coord {
            x: value.x,
            y: value.y,
        }
    }
}

impl From<(f64, f64)> for Coord {
    fn from(value: (f64, f64)) -> Self {
        Coord::xy(value.0, value.1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn project_drops_ordinates() {
        let c = Coord::xyzm(1., 2., 3., 4.);
        assert_eq!(c.project(Dimension::XY), Coord::xy(1., 2.));
        assert_eq!(c.project(Dimension::XYM), Coord::xym(1., 2., 4.));
        assert_eq!(c.project(Dimension::XYZ).dim(), Dimension::XYZ);
    }

    #[test]
    fn project_never_adds_ordinates() {
        let c = Coord::xy(1., 2.);
        assert_eq!(c.project(Dimension::XYZM), c);
    }
}
