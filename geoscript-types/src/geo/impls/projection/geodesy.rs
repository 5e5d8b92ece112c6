use geodesy::prelude::*;

use crate::cartesian::Cartesian3;
use crate::error::GeoscriptTypesError;
use crate::geo::cartographic::Cartographic;
use crate::geo::traits::projection::Projection;

/// Projection defined by a [`geodesy`] operator pipeline, e.g. `utm zone=32` or `laea lon_0=10 lat_0=52`.
///
/// The ellipsoid is part of the definition, so the height is passed through as is.
pub struct GeodesyProjection {
    context: Minimal,
    op: OpHandle,
}

impl GeodesyProjection {
    /// Creates a new projection from the operator definition.
    pub fn new(definition: &str) -> Result<Self, GeoscriptTypesError> {
        let mut context = Minimal::new();
        let op = context
            .op(definition)
            .map_err(|err| GeoscriptTypesError::InvalidProjection(format!("{definition}: {err}")))?;
        Ok(Self { context, op })
    }
}

impl std::fmt::Debug for GeodesyProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeodesyProjection").finish_non_exhaustive()
    }
}

impl Projection for GeodesyProjection {
    type InPoint = Cartographic;
    type OutPoint = Cartesian3;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let mut data = [Coor2D::geo(input.latitude_deg(), input.longitude_deg())];
        self.context.apply(self.op, Fwd, &mut data).ok()?;

        if !data[0].0[0].is_finite() || !data[0].0[1].is_finite() {
            return None;
        }

        Some(Cartesian3::new(data[0].0[0], data[0].0[1], input.height))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let mut data = [Coor2D([input.x, input.y])];
        self.context.apply(self.op, Inv, &mut data).ok()?;

        if !data[0].0[0].is_finite() || !data[0].0[1].is_finite() {
            return None;
        }

        Some(Cartographic::new(data[0].0[0], data[0].0[1], input.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn utm_round_trip() {
        let projection = GeodesyProjection::new("utm zone=32").expect("valid definition");
        let position = Cartographic::from_degrees(9.0, 55.0, 30.0);

        let projected = projection.project(&position).expect("projects");
        assert_abs_diff_eq!(projected.x, 500_000.0, epsilon = 1e-3);
        assert_eq!(projected.z, 30.0);

        let unprojected = projection.unproject(&projected).expect("unprojects");
        assert_abs_diff_eq!(unprojected, position, epsilon = 1e-9);
    }

    #[test]
    fn invalid_definition() {
        assert!(GeodesyProjection::new("no_such_operator").is_err());
    }
}
