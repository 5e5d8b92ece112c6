//! Persistent cache for the script sources loaded over http.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::debug;

use crate::error::LoadError;

/// Persistent storage of loaded data, e.g. on the file system.
pub trait PersistentCacheController<Key: ?Sized, Data> {
    /// Returns the stored data, if any.
    fn get(&self, key: &Key) -> Option<Data>;
    /// Stores the data.
    fn insert(&self, key: &Key, data: &Data) -> Result<(), LoadError>;
}

/// Maps the url of a source (without its scheme) to the path of its file inside the cache folder.
pub type CachePathModifier = dyn Fn(&str) -> String + Send + Sync;

/// [`CachePathModifier`] dropping the query string, so that e.g. urls differing only in an access token share one
/// cache file.
pub fn strip_query(url: &str) -> String {
    match url.split_once('?') {
        Some((path, _)) => path.to_owned(),
        None => url.to_owned(),
    }
}

/// Stores each projection script as a file under a cache folder.
///
/// The file of `https://host/dir/script.json` is `<folder>/host/dir/script.json`. There is no eviction: a stored
/// script is reused until its file is deleted.
pub struct FileCacheController {
    folder: PathBuf,
    path_modifier: Option<Box<CachePathModifier>>,
}

impl FileCacheController {
    /// Opens the cache in `folder`, creating the folder if it is missing.
    pub fn new(
        folder: impl Into<PathBuf>,
        path_modifier: Option<Box<CachePathModifier>>,
    ) -> Result<Self, LoadError> {
        let folder = folder.into();
        std::fs::create_dir_all(&folder).map_err(|err| {
            LoadError::Io(format!("cannot create script cache folder {folder:?}: {err}"))
        })?;

        Ok(Self {
            folder,
            path_modifier,
        })
    }

    /// Folder the scripts are stored in.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let location = url.split_once("://").map_or(url, |(_, location)| location);
        match &self.path_modifier {
            Some(modify) => self.folder.join(modify(location)),
            None => self.folder.join(location),
        }
    }
}

impl PersistentCacheController<str, Bytes> for FileCacheController {
    fn get(&self, url: &str) -> Option<Bytes> {
        let path = self.entry_path(url);
        let data = std::fs::read(&path).ok()?;
        debug!("Script {url} found in cache file {path:?}");
        Some(data.into())
    }

    fn insert(&self, url: &str, data: &Bytes) -> Result<(), LoadError> {
        let path = self.entry_path(url);
        let write = |path: &Path| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, data)
        };

        write(&path).map_err(|err| LoadError::Io(format!("cannot write cache file {path:?}: {err}")))?;
        debug!("Script {url} stored in cache file {path:?}");

        Ok(())
    }
}
