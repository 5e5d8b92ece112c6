use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

/// Point in a 3d cartesian space.
///
/// Projections write their planar coordinates into `x` and `y` and usually carry the height in `z`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Cartesian3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Cartesian3 {
    /// Point at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Point with all coordinates set to `NaN`. Returned for inputs outside of a projection's domain.
    pub const NAN: Self = Self::new(f64::NAN, f64::NAN, f64::NAN);

    /// Creates a new point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Largest of the three coordinates.
    pub fn maximum_component(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }

    /// Smallest of the three coordinates.
    pub fn minimum_component(&self) -> f64 {
        self.x.min(self.y).min(self.z)
    }

    /// Returns true if all coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl AbsDiffEq for Cartesian3 {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Cartesian3 {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
