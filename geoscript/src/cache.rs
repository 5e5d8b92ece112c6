//! Process wide cache of the loaded projection functions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Weak};

use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, info, trace, warn};
use parking_lot::Mutex;
use reqwest::Url;

use crate::error::LoadError;
use crate::loader::data_uri;
use crate::loader::{ProjectionFunctions, ProjectionLoader, ScriptLoader};

/// Load of projection functions that can be awaited by any number of projections.
///
/// All clones resolve to the same `Arc<ProjectionFunctions>` or to the same error.
pub type SharedLoad = Shared<BoxFuture<'static, Result<Arc<ProjectionFunctions>, LoadError>>>;

type Entries = HashMap<String, CacheEntry, ahash::RandomState>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct EntryId(u64);

impl EntryId {
    fn next_id() -> Self {
        static ID: AtomicU64 = AtomicU64::new(0);
        Self(ID.fetch_add(1, Ordering::Relaxed))
    }
}

struct CacheEntry {
    id: EntryId,
    load: SharedLoad,
}

static GLOBAL_CACHE: LazyLock<ProjectionCache> =
    LazyLock::new(|| ProjectionCache::new(Arc::new(ScriptLoader::default())));

/// Cache of projection function loads, keyed by the normalized source url.
///
/// There is at most one load for each cacheable url: a load is put into the cache before it starts, so every
/// request for the same url that comes later, even before the load is finished, gets the same load.
///
/// Inline `data:` uris are not cached. Each request for them starts a new load.
///
/// Successful loads are never evicted. A failed load is removed from the cache, so the next request for the same
/// url tries again. All requests that got the failed load before it was removed get the same error.
pub struct ProjectionCache {
    loader: Arc<dyn ProjectionLoader>,
    entries: Arc<Mutex<Entries>>,
}

impl ProjectionCache {
    /// Creates an empty cache that uses `loader` to load the functions.
    pub fn new(loader: Arc<dyn ProjectionLoader>) -> Self {
        Self {
            loader,
            entries: Arc::default(),
        }
    }

    /// Process wide cache, loading the functions with the default [`ScriptLoader`].
    pub fn global() -> &'static ProjectionCache {
        &GLOBAL_CACHE
    }

    /// Returns the load of the projection functions from `url`, starting it if necessary.
    ///
    /// The load is lazy: it progresses only while some of its clones are polled.
    pub fn acquire(&self, url: &str) -> SharedLoad {
        let Some(key) = cache_key(url) else {
            debug!(
                "Source {} is not cacheable, loading it directly",
                data_uri::display(url)
            );
            return self.start_load(url.trim().to_owned(), None);
        };

        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(&key) {
            trace!("Cache hit for projection source {key}");
            return entry.load.clone();
        }

        let id = EntryId::next_id();
        let load = self.start_load(key.clone(), Some(id));
        entries.insert(
            key,
            CacheEntry {
                id,
                load: load.clone(),
            },
        );

        load
    }

    /// Returns true if there is a pending or successful load for the url.
    pub fn contains(&self, url: &str) -> bool {
        cache_key(url).is_some_and(|key| self.entries.lock().contains_key(&key))
    }

    /// Number of cached sources.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Removes all entries. Loads in progress are not cancelled, and projections that already got them are not
    /// affected.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn start_load(&self, url: String, cached_as: Option<EntryId>) -> SharedLoad {
        let loader = self.loader.clone();
        let entries = Arc::downgrade(&self.entries);

        async move {
            debug!("Loading projection functions from {}", data_uri::display(&url));
            match loader.load(&url).await {
                Ok(functions) => {
                    info!("Projection functions from {} loaded", data_uri::display(&url));
                    Ok(Arc::new(functions))
                }
                Err(err) => {
                    warn!(
                        "Failed to load projection functions from {}: {err}",
                        data_uri::display(&url)
                    );
                    if let Some(id) = cached_as {
                        evict_failed(&entries, &url, id);
                    }
                    Err(err)
                }
            }
        }
        .boxed()
        .shared()
    }
}

impl std::fmt::Debug for ProjectionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectionCache")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

fn evict_failed(entries: &Weak<Mutex<Entries>>, key: &str, id: EntryId) {
    let Some(entries) = entries.upgrade() else {
        return;
    };

    let mut entries = entries.lock();
    if entries.get(key).is_some_and(|entry| entry.id == id) {
        entries.remove(key);
        debug!("Removed failed projection source {key} from the cache");
    }
}

/// Normalized form of the url used to identify a source.
///
/// Absolute urls are parsed and serialized back, so that different spellings of the same url (e.g. case of the
/// host, `..` segments) give the same key. Anything else is only trimmed.
pub(crate) fn normalize_url(url: &str) -> String {
    let url = url.trim();
    match Url::parse(url) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => url.to_owned(),
    }
}

fn cache_key(url: &str) -> Option<String> {
    if data_uri::is_data_uri(url) {
        None
    } else {
        Some(normalize_url(url))
    }
}
