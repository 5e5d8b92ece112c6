//! Projection backed by functions loaded from a url.

use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

use geoscript_types::{Cartesian3, Cartographic, Ellipsoid, Projection};

use crate::async_runtime;
use crate::cache::{ProjectionCache, SharedLoad};
use crate::error::{LoadError, PreconditionError};
use crate::loader::{data_uri, ProjectionFunctions};

/// Projection whose forward and inverse functions are loaded from a url.
///
/// Creating a projection starts loading its functions (or joins a load of the same url already in progress) and
/// returns immediately. Until the functions are loaded, the projection is not [`ready`](Self::ready) and
/// [`project`](Self::project) and [`unproject`](Self::unproject) fail with [`PreconditionError::NotReady`].
/// Use [`when_ready`](Self::when_ready) to wait for the load.
///
/// ```no_run
/// use geoscript::CustomProjection;
/// use geoscript::geoscript_types::{Cartographic, Ellipsoid};
///
/// # tokio_test::block_on(async {
/// let projection = CustomProjection::new("https://example.com/user_geographic.json", Ellipsoid::WGS84)?;
/// projection.when_ready().await?;
///
/// let projected = projection.project(&Cartographic::new(0.0, 0.0, 10.0))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # });
/// ```
pub struct CustomProjection {
    url: String,
    ellipsoid: Ellipsoid,
    functions: Arc<OnceLock<Arc<ProjectionFunctions>>>,
    load: SharedLoad,
}

impl CustomProjection {
    /// Creates a projection loading its functions through the [global cache](ProjectionCache::global).
    ///
    /// If `ellipsoid` is `None`, [`Ellipsoid::WGS84`] is used.
    pub fn new(
        url: impl Into<String>,
        ellipsoid: impl Into<Option<Ellipsoid>>,
    ) -> Result<Self, PreconditionError> {
        Self::with_cache(url, ellipsoid, ProjectionCache::global())
    }

    /// Creates a projection loading its functions through the given cache.
    pub fn with_cache(
        url: impl Into<String>,
        ellipsoid: impl Into<Option<Ellipsoid>>,
        cache: &ProjectionCache,
    ) -> Result<Self, PreconditionError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(PreconditionError::MissingArgument("url"));
        }

        let ellipsoid = ellipsoid.into().unwrap_or_default();
        let load = cache.acquire(&url);
        let functions = Arc::new(OnceLock::new());

        let cell = functions.clone();
        let driver = load.clone();
        let source = data_uri::display(&url);
        async_runtime::spawn(async move {
            match driver.await {
                Ok(loaded) => {
                    cell.get_or_init(|| loaded);
                    log::trace!("Projection {source} is ready");
                }
                Err(err) => log::debug!("Projection {source} will not become ready: {err}"),
            }
        });

        Ok(Self {
            url,
            ellipsoid,
            functions,
            load,
        })
    }

    /// Url of the projection functions.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ellipsoid of the projection.
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Returns true once the projection functions are loaded.
    pub fn ready(&self) -> bool {
        self.functions.get().is_some()
    }

    /// Waits until the projection functions are loaded.
    ///
    /// When this returns `Ok`, the projection is [`ready`](Self::ready). If the load failed, its error is
    /// returned and the projection never becomes ready.
    pub async fn when_ready(&self) -> Result<(), LoadError> {
        let loaded = self.load.clone().await?;
        self.functions.get_or_init(|| loaded);
        Ok(())
    }

    /// Loaded projection functions, if the projection is ready.
    ///
    /// All projections created with the same cacheable url get the same functions.
    pub fn functions(&self) -> Option<Arc<ProjectionFunctions>> {
        self.functions.get().cloned()
    }

    /// Projects the position into a new point.
    pub fn project<'a>(
        &self,
        cartographic: impl Into<Option<&'a Cartographic>>,
    ) -> Result<Cartesian3, PreconditionError> {
        let mut result = Cartesian3::default();
        self.project_into(cartographic, &mut result)?;
        Ok(result)
    }

    /// Projects the position, writing the coordinates into `result`. Returns `result`.
    pub fn project_into<'a, 'r>(
        &self,
        cartographic: impl Into<Option<&'a Cartographic>>,
        result: &'r mut Cartesian3,
    ) -> Result<&'r mut Cartesian3, PreconditionError> {
        let functions = self.loaded()?;
        let cartographic = cartographic
            .into()
            .ok_or(PreconditionError::MissingArgument("cartographic"))?;

        *result = functions.project(cartographic, &self.ellipsoid);
        Ok(result)
    }

    /// Unprojects the point into a new position.
    pub fn unproject<'a>(
        &self,
        cartesian: impl Into<Option<&'a Cartesian3>>,
    ) -> Result<Cartographic, PreconditionError> {
        let mut result = Cartographic::default();
        self.unproject_into(cartesian, &mut result)?;
        Ok(result)
    }

    /// Unprojects the point, writing the position into `result`. Returns `result`.
    pub fn unproject_into<'a, 'r>(
        &self,
        cartesian: impl Into<Option<&'a Cartesian3>>,
        result: &'r mut Cartographic,
    ) -> Result<&'r mut Cartographic, PreconditionError> {
        let functions = self.loaded()?;
        let cartesian = cartesian
            .into()
            .ok_or(PreconditionError::MissingArgument("cartesian"))?;

        *result = functions.unproject(cartesian, &self.ellipsoid);
        Ok(result)
    }

    fn loaded(&self) -> Result<&ProjectionFunctions, PreconditionError> {
        self.functions
            .get()
            .map(AsRef::as_ref)
            .ok_or(PreconditionError::NotReady)
    }
}

impl Projection for CustomProjection {
    type InPoint = Cartographic;
    type OutPoint = Cartesian3;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        CustomProjection::project(self, input).ok()
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        CustomProjection::unproject(self, input).ok()
    }
}

impl Debug for CustomProjection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomProjection")
            .field("url", &data_uri::display(&self.url))
            .field("ellipsoid", &self.ellipsoid)
            .field("ready", &self.ready())
            .finish()
    }
}
