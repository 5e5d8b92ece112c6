use std::sync::atomic::{AtomicUsize, Ordering};

use geoscript_types::geo::impls::projection::Equirectangular;
use geoscript_types::Ellipsoid;

use crate::error::LoadError;
use crate::loader::{ProjectionFunctions, ProjectionLoader};

/// Loader counting its calls. Returns equirectangular functions after failing the requested number of times.
pub(crate) struct TestLoader {
    loads: AtomicUsize,
    failures_left: AtomicUsize,
}

impl TestLoader {
    pub fn new() -> Self {
        Self::failing(0)
    }

    pub fn failing(failures: usize) -> Self {
        Self {
            loads: AtomicUsize::new(0),
            failures_left: AtomicUsize::new(failures),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProjectionLoader for TestLoader {
    async fn load(&self, url: &str) -> Result<ProjectionFunctions, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            return Err(LoadError::NotFound(url.to_owned()));
        }

        Ok(ProjectionFunctions::from_projection(|ellipsoid: &Ellipsoid| {
            Equirectangular::new(*ellipsoid)
        }))
    }
}
