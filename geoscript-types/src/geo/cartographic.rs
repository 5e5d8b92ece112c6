use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

/// Position relative to an ellipsoid: longitude and latitude in radians and height above the surface in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Cartographic {
    /// Longitude in radians.
    pub longitude: f64,
    /// Latitude in radians.
    pub latitude: f64,
    /// Height above the ellipsoid in meters.
    pub height: f64,
}

impl Cartographic {
    /// Position with all values set to `NaN`. Returned for inputs outside of a projection's domain.
    pub const NAN: Self = Self::new(f64::NAN, f64::NAN, f64::NAN);

    /// Creates a new position from longitude and latitude in radians.
    pub const fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
        }
    }

    /// Creates a new position from longitude and latitude in degrees.
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Self::new(longitude.to_radians(), latitude.to_radians(), height)
    }

    /// Longitude in degrees.
    pub fn longitude_deg(&self) -> f64 {
        self.longitude.to_degrees()
    }

    /// Latitude in degrees.
    pub fn latitude_deg(&self) -> f64 {
        self.latitude.to_degrees()
    }
}

impl AbsDiffEq for Cartographic {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.longitude.abs_diff_eq(&other.longitude, epsilon)
            && self.latitude.abs_diff_eq(&other.latitude, epsilon)
            && self.height.abs_diff_eq(&other.height, epsilon)
    }
}

impl RelativeEq for Cartographic {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.longitude
            .relative_eq(&other.longitude, epsilon, max_relative)
            && self.latitude.relative_eq(&other.latitude, epsilon, max_relative)
            && self.height.relative_eq(&other.height, epsilon, max_relative)
    }
}
