//! Loading of projection functions from their sources.
//!
//! A source is identified by a url. The [`ProjectionLoader`] trait turns a url into a pair of
//! [`ProjectionFunctions`]. Two loaders are provided:
//!
//! * [`ScriptLoader`] reads a projection script from a `data:` uri, an http(s) url or a file;
//! * [`RegistryLoader`] returns the functions registered in the application under the url.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use async_trait::async_trait;
use geoscript_types::{Cartesian3, Cartographic, Ellipsoid, Projection};

use crate::error::LoadError;

pub(crate) mod data_uri;
pub mod file_cache;
mod registry;
mod script;
mod script_loader;

pub use registry::RegistryLoader;
pub use script::ProjectionScript;
pub use script_loader::{ScriptLoader, ScriptLoaderBuilder};

/// Forward projection function: converts a geographic position into projected coordinates.
pub type ProjectFn = dyn Fn(&Cartographic, &Ellipsoid) -> Cartesian3 + Send + Sync;

/// Inverse projection function: converts projected coordinates back into a geographic position.
pub type UnprojectFn = dyn Fn(&Cartesian3, &Ellipsoid) -> Cartographic + Send + Sync;

/// Pair of user defined projection functions.
///
/// Both functions get the ellipsoid of the projection that calls them. Scaling the output by the ellipsoid is
/// the job of the functions.
#[derive(Clone)]
pub struct ProjectionFunctions {
    project: Arc<ProjectFn>,
    unproject: Arc<UnprojectFn>,
}

impl ProjectionFunctions {
    /// Creates a new pair from forward and inverse functions.
    pub fn new(
        project: impl Fn(&Cartographic, &Ellipsoid) -> Cartesian3 + Send + Sync + 'static,
        unproject: impl Fn(&Cartesian3, &Ellipsoid) -> Cartographic + Send + Sync + 'static,
    ) -> Self {
        Self {
            project: Arc::new(project),
            unproject: Arc::new(unproject),
        }
    }

    /// Creates a pair from a [`Projection`] that is constructed for the ellipsoid of every call.
    ///
    /// Points the projection cannot convert come back with `NaN` coordinates.
    pub fn from_projection<P, F>(build: F) -> Self
    where
        F: Fn(&Ellipsoid) -> P + Send + Sync + 'static,
        P: Projection<InPoint = Cartographic, OutPoint = Cartesian3>,
    {
        let build = Arc::new(build);
        let build_inverse = build.clone();

        Self::new(
            move |cartographic, ellipsoid| {
                build(ellipsoid)
                    .project(cartographic)
                    .unwrap_or(Cartesian3::NAN)
            },
            move |cartesian, ellipsoid| {
                build_inverse(ellipsoid)
                    .unproject(cartesian)
                    .unwrap_or(Cartographic::NAN)
            },
        )
    }

    /// Runs the forward function.
    pub fn project(&self, cartographic: &Cartographic, ellipsoid: &Ellipsoid) -> Cartesian3 {
        (self.project)(cartographic, ellipsoid)
    }

    /// Runs the inverse function.
    pub fn unproject(&self, cartesian: &Cartesian3, ellipsoid: &Ellipsoid) -> Cartographic {
        (self.unproject)(cartesian, ellipsoid)
    }
}

impl Debug for ProjectionFunctions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectionFunctions").finish_non_exhaustive()
    }
}

/// Loads projection functions from a source url.
#[async_trait]
pub trait ProjectionLoader: Send + Sync {
    /// Loads the pair of projection functions from `url`.
    async fn load(&self, url: &str) -> Result<ProjectionFunctions, LoadError>;
}
