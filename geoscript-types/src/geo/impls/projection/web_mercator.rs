use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::cartesian::Cartesian3;
use crate::geo::cartographic::Cartographic;
use crate::geo::ellipsoid::Ellipsoid;
use crate::geo::traits::projection::Projection;

/// Spherical mercator projection using the equatorial radius of the ellipsoid.
///
/// Latitudes beyond [`WebMercator::MAX_LATITUDE`] are clamped to it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct WebMercator {
    ellipsoid: Ellipsoid,
}

impl WebMercator {
    /// Maximum latitude (in radians) that the projection represents, 85.0511287798 degrees.
    pub const MAX_LATITUDE: f64 = 1.484_422_229_745_332_4;

    /// Creates a new projection for the given ellipsoid.
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }
}

impl Projection for WebMercator {
    type InPoint = Cartographic;
    type OutPoint = Cartesian3;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let radius = self.ellipsoid.equatorial_radius();
        let latitude = input
            .latitude
            .clamp(-Self::MAX_LATITUDE, Self::MAX_LATITUDE);

        let x = radius * input.longitude;
        let y = radius * (FRAC_PI_4 + latitude / 2.0).tan().ln();

        if x.is_finite() && y.is_finite() {
            Some(Cartesian3::new(x, y, input.height))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let radius = self.ellipsoid.equatorial_radius();
        let latitude = FRAC_PI_2 - 2.0 * (-input.y / radius).exp().atan();
        let longitude = input.x / radius;

        if latitude.is_finite() && longitude.is_finite() {
            Some(Cartographic::new(longitude, latitude, input.z))
        } else {
            None
        }
    }
}
