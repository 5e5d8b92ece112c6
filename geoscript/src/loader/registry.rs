use std::collections::HashMap;

use async_trait::async_trait;
use geoscript_types::{Cartesian3, Cartographic, Ellipsoid};
use parking_lot::RwLock;

use crate::cache::normalize_url;
use crate::error::LoadError;
use crate::loader::{ProjectionFunctions, ProjectionLoader};

/// Loader returning projection functions registered by the application under a url.
///
/// This is the in-process counterpart of a script: instead of being downloaded, a source calls
/// [`RegistryLoader::register`] with its forward and inverse functions.
#[derive(Default)]
pub struct RegistryLoader {
    functions: RwLock<HashMap<String, ProjectionFunctions, ahash::RandomState>>,
}

impl RegistryLoader {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the pair of functions under the url, replacing the previous registration.
    pub fn register(
        &self,
        url: &str,
        project: impl Fn(&Cartographic, &Ellipsoid) -> Cartesian3 + Send + Sync + 'static,
        unproject: impl Fn(&Cartesian3, &Ellipsoid) -> Cartographic + Send + Sync + 'static,
    ) {
        self.register_functions(url, ProjectionFunctions::new(project, unproject));
    }

    /// Registers already constructed functions under the url.
    pub fn register_functions(&self, url: &str, functions: ProjectionFunctions) {
        let key = normalize_url(url);
        log::debug!("Registering projection functions for {key}");
        self.functions.write().insert(key, functions);
    }

    /// Removes the registration. Projections that are already loaded keep their functions.
    pub fn unregister(&self, url: &str) -> bool {
        self.functions.write().remove(&normalize_url(url)).is_some()
    }
}

#[async_trait]
impl ProjectionLoader for RegistryLoader {
    async fn load(&self, url: &str) -> Result<ProjectionFunctions, LoadError> {
        self.functions
            .read()
            .get(&normalize_url(url))
            .cloned()
            .ok_or_else(|| LoadError::NotFound(url.to_owned()))
    }
}
