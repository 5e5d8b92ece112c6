#[cfg(feature = "geodesy")]
use std::sync::Arc;

#[cfg(feature = "geodesy")]
use geoscript_types::geo::impls::projection::GeodesyProjection;
use geoscript_types::geo::impls::projection::{Equirectangular, WebMercator};
#[cfg(feature = "geodesy")]
use geoscript_types::{Cartesian3, Cartographic, Projection};
use geoscript_types::Ellipsoid;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::loader::ProjectionFunctions;

/// Content of a projection script.
///
/// Scripts are JSON documents naming the projection in the `projection` field:
///
/// ```json
/// {"projection": "equirectangular"}
/// {"projection": "web_mercator"}
/// {"projection": "geodesy", "definition": "utm zone=32"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "projection", rename_all = "snake_case")]
pub enum ProjectionScript {
    /// [`Equirectangular`] projection on the ellipsoid of the calling projection.
    Equirectangular,
    /// [`WebMercator`] projection on the ellipsoid of the calling projection.
    WebMercator,
    /// Any projection expressible as a `geodesy` operator.
    #[cfg(feature = "geodesy")]
    Geodesy {
        /// Operator definition, e.g. `utm zone=32`.
        definition: String,
    },
}

impl ProjectionScript {
    /// Parses the script from its source bytes.
    pub fn parse(source: &[u8]) -> Result<Self, LoadError> {
        serde_json::from_slice(source).map_err(|err| LoadError::Script(err.to_string()))
    }

    /// Creates the projection functions described by the script.
    pub fn instantiate(&self) -> Result<ProjectionFunctions, LoadError> {
        let functions = match self {
            Self::Equirectangular => {
                ProjectionFunctions::from_projection(|ellipsoid: &Ellipsoid| {
                    Equirectangular::new(*ellipsoid)
                })
            }
            Self::WebMercator => ProjectionFunctions::from_projection(|ellipsoid: &Ellipsoid| {
                WebMercator::new(*ellipsoid)
            }),
            #[cfg(feature = "geodesy")]
            Self::Geodesy { definition } => {
                let projection = Arc::new(GeodesyProjection::new(definition)?);
                let inverse = projection.clone();
                ProjectionFunctions::new(
                    move |cartographic, _| {
                        projection.project(cartographic).unwrap_or(Cartesian3::NAN)
                    },
                    move |cartesian, _| inverse.unproject(cartesian).unwrap_or(Cartographic::NAN),
                )
            }
        };

        Ok(functions)
    }
}
