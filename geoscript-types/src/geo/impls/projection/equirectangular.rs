use crate::cartesian::Cartesian3;
use crate::geo::cartographic::Cartographic;
use crate::geo::ellipsoid::Ellipsoid;
use crate::geo::traits::projection::Projection;

/// Equirectangular (plate carrée) projection.
///
/// Longitude and latitude are multiplied by the equatorial radius of the ellipsoid, height is passed through
/// unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Equirectangular {
    ellipsoid: Ellipsoid,
}

impl Equirectangular {
    /// Creates a new projection for the given ellipsoid.
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    /// Ellipsoid of the projection.
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}

impl Projection for Equirectangular {
    type InPoint = Cartographic;
    type OutPoint = Cartesian3;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let radius = self.ellipsoid.equatorial_radius();
        Some(Cartesian3::new(
            input.longitude * radius,
            input.latitude * radius,
            input.height,
        ))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let radius = self.ellipsoid.equatorial_radius();
        if radius == 0.0 {
            return None;
        }

        Some(Cartographic::new(input.x / radius, input.y / radius, input.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn project_scales_by_equatorial_radius() {
        let projection = Equirectangular::new(Ellipsoid::WGS84);
        let radius = Ellipsoid::WGS84.equatorial_radius();

        assert_eq!(
            projection.project(&Cartographic::new(PI, FRAC_PI_2, 0.0)),
            Some(Cartesian3::new(PI * radius, FRAC_PI_2 * radius, 0.0))
        );
        assert_eq!(
            projection.project(&Cartographic::new(0.0, 0.0, 10.0)),
            Some(Cartesian3::new(0.0, 0.0, 10.0))
        );
    }

    #[test]
    fn unproject_is_inverse() {
        let projection = Equirectangular::new(Ellipsoid::WGS84);
        let position = Cartographic::new(FRAC_PI_2, FRAC_PI_4, 12.0);
        let projected = projection.project(&position).expect("projects");

        assert_abs_diff_eq!(
            projection.unproject(&projected).expect("unprojects"),
            position,
            epsilon = 1e-10
        );
    }

    #[test]
    fn degenerate_ellipsoid() {
        let projection = Equirectangular::new(Ellipsoid::sphere(0.0));
        assert_eq!(projection.unproject(&Cartesian3::new(1.0, 1.0, 0.0)), None);
    }
}
