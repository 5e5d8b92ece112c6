use serde::{Deserialize, Serialize};

use crate::cartesian::Cartesian3;

/// Reference ellipsoid given by its radii along the x, y and z axes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Ellipsoid {
    radii: Cartesian3,
}

impl Ellipsoid {
    /// WGS84 ellipsoid.
    pub const WGS84: Self = Self::new(6_378_137.0, 6_378_137.0, 6_356_752.314_245_179);

    /// Sphere with radius 1.
    pub const UNIT_SPHERE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a new ellipsoid with the given radii.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            radii: Cartesian3::new(x, y, z),
        }
    }

    /// Creates a sphere with the given radius.
    pub const fn sphere(radius: f64) -> Self {
        Self::new(radius, radius, radius)
    }

    /// Radii of the ellipsoid.
    pub fn radii(&self) -> Cartesian3 {
        self.radii
    }

    /// Equatorial (semimajor) radius.
    pub fn equatorial_radius(&self) -> f64 {
        self.radii.x
    }

    /// Largest of the radii.
    pub fn maximum_radius(&self) -> f64 {
        self.radii.maximum_component()
    }

    /// Smallest of the radii.
    pub fn minimum_radius(&self) -> f64 {
        self.radii.minimum_component()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
