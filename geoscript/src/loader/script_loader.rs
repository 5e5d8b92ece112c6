use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;

use crate::error::LoadError;
use crate::loader::file_cache::PersistentCacheController;
use crate::loader::{data_uri, ProjectionFunctions, ProjectionLoader, ProjectionScript};
use crate::platform::{PlatformService, PlatformServiceImpl};

type SharedPersistentCache = Arc<dyn PersistentCacheController<str, Bytes> + Send + Sync>;

/// Loads [`ProjectionScript`]s and instantiates the functions they describe.
///
/// The source of a script is resolved by its url:
/// * `data:` uris are decoded in place;
/// * `http://` and `https://` urls are downloaded, optionally through a persistent cache;
/// * `file://` urls and plain paths are read from disk. Relative paths are resolved against the base directory
///   if one is configured.
pub struct ScriptLoader {
    platform_service: PlatformServiceImpl,
    base_dir: Option<PathBuf>,
    persistent_cache: Option<SharedPersistentCache>,
    offline_mode: bool,
}

impl ScriptLoader {
    /// Creates a loader with the default configuration.
    pub fn new() -> Self {
        Self {
            platform_service: PlatformServiceImpl::new(),
            base_dir: None,
            persistent_cache: None,
            offline_mode: false,
        }
    }

    /// Returns a builder to configure a loader.
    pub fn builder() -> ScriptLoaderBuilder {
        ScriptLoaderBuilder::default()
    }

    async fn load_raw(&self, url: &str) -> Result<Bytes, LoadError> {
        if data_uri::is_data_uri(url) {
            return data_uri::decode(url);
        }

        if is_http(url) {
            return self.load_remote(url).await;
        }

        let path = self.resolve_path(url)?;
        self.load_file(&path).await
    }

    async fn load_remote(&self, url: &str) -> Result<Bytes, LoadError> {
        if let Some(cache) = &self.persistent_cache {
            if let Some(data) = cache.get(url) {
                log::trace!("Persistent cache hit for url {url}");
                return Ok(data);
            }
        }

        if self.offline_mode {
            return Err(LoadError::Offline(url.to_owned()));
        }

        log::info!("Loading projection script {url}");
        let data = self.platform_service.load_bytes_from_url(url).await?;

        if let Some(cache) = &self.persistent_cache {
            if let Err(error) = cache.insert(url, &data) {
                log::warn!("Failed to write persistent cache entry: {:?}", error);
            }
        }

        Ok(data)
    }

    async fn load_file(&self, path: &Path) -> Result<Bytes, LoadError> {
        log::info!("Loading projection script {path:?}");
        tokio::fs::read(path)
            .await
            .map(Bytes::from)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => LoadError::NotFound(format!("{path:?}")),
                _ => LoadError::Io(format!("{path:?}: {err}")),
            })
    }

    fn resolve_path(&self, url: &str) -> Result<PathBuf, LoadError> {
        if has_scheme(url, "file://") {
            return Url::parse(url)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .ok_or_else(|| LoadError::Io(format!("invalid file url {url}")));
        }

        let path = Path::new(url);
        Ok(match &self.base_dir {
            Some(base_dir) if path.is_relative() => base_dir.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl Default for ScriptLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectionLoader for ScriptLoader {
    async fn load(&self, url: &str) -> Result<ProjectionFunctions, LoadError> {
        let source = self.load_raw(url).await?;
        log::trace!(
            "Projection script {} loaded. Byte size: {}",
            data_uri::display(url),
            source.len()
        );

        let script = ProjectionScript::parse(&source)?;
        log::debug!("Instantiating {script:?} from {}", data_uri::display(url));

        script.instantiate()
    }
}

/// Configuration of a [`ScriptLoader`].
#[derive(Default)]
pub struct ScriptLoaderBuilder {
    base_dir: Option<PathBuf>,
    user_agent: Option<String>,
    persistent_cache: Option<SharedPersistentCache>,
    offline_mode: bool,
}

impl ScriptLoaderBuilder {
    /// Directory relative paths are resolved against.
    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// User agent for http requests.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Cache to store the scripts downloaded over http, e.g. a
    /// [`FileCacheController`](crate::loader::file_cache::FileCacheController).
    pub fn persistent_cache(
        mut self,
        cache: impl PersistentCacheController<str, Bytes> + Send + Sync + 'static,
    ) -> Self {
        self.persistent_cache = Some(Arc::new(cache));
        self
    }

    /// If offline mode is enabled, the loader will not attempt to download scripts from Internet, and will only use
    /// its persistent cache as the source of remote scripts.
    pub fn offline_mode(mut self, enabled: bool) -> Self {
        self.offline_mode = enabled;
        self
    }

    /// Creates the loader.
    pub fn build(self) -> Result<ScriptLoader, LoadError> {
        if self.offline_mode && self.persistent_cache.is_none() {
            log::warn!("Offline mode for script loader is enabled, but no persistent cache is configured.\
            No remote scripts will be available for this loader.")
        }

        let platform_service = match &self.user_agent {
            Some(user_agent) => PlatformServiceImpl::with_user_agent(user_agent)?,
            None => PlatformServiceImpl::new(),
        };

        Ok(ScriptLoader {
            platform_service,
            base_dir: self.base_dir,
            persistent_cache: self.persistent_cache,
            offline_mode: self.offline_mode,
        })
    }
}

fn has_scheme(url: &str, scheme: &str) -> bool {
    url.get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}

fn is_http(url: &str) -> bool {
    has_scheme(url, "http://") || has_scheme(url, "https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::file_cache::FileCacheController;
    use assert_matches::assert_matches;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use geoscript_types::{Cartesian3, Cartographic, Ellipsoid};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const MERCATOR_SCRIPT: &str = r#"{"projection":"web_mercator"}"#;

    fn temp_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("geoscript-script-loader-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir is created");
        dir
    }

    #[tokio::test]
    async fn loads_data_uri() {
        let uri = format!(
            "data:application/json;base64,{}",
            STANDARD.encode(r#"{"projection":"equirectangular"}"#)
        );
        let functions = ScriptLoader::new().load(&uri).await.expect("loads");

        assert_eq!(
            functions.project(&Cartographic::new(1.0, 1.0, 0.0), &Ellipsoid::UNIT_SPHERE),
            Cartesian3::new(1.0, 1.0, 0.0)
        );
    }

    #[tokio::test]
    async fn loads_relative_path_from_base_dir() {
        let dir = temp_dir("relative");
        std::fs::write(dir.join("mercator.json"), r#"{"projection":"web_mercator"}"#)
            .expect("script is written");

        let loader = ScriptLoader::builder()
            .base_dir(&dir)
            .build()
            .expect("loader is built");
        assert!(loader.load("mercator.json").await.is_ok());

        let file_url = Url::from_file_path(dir.join("mercator.json")).expect("absolute path");
        assert!(ScriptLoader::new().load(file_url.as_str()).await.is_ok());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn missing_file() {
        let dir = temp_dir("missing");
        let loader = ScriptLoader::builder()
            .base_dir(&dir)
            .build()
            .expect("loader is built");

        assert_matches!(
            loader.load("does_not_exist.json").await,
            Err(LoadError::NotFound(_))
        );

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn invalid_script() {
        assert_matches!(
            ScriptLoader::new().load("data:,not%20a%20script").await,
            Err(LoadError::Script(_))
        );
    }

    #[tokio::test]
    async fn offline_mode_uses_persistent_cache() {
        let dir = temp_dir("offline");
        let cache = FileCacheController::new(&dir, None).expect("cache is created");
        cache
            .insert(
                "https://example.com/cached.json",
                &Bytes::from_static(br#"{"projection":"equirectangular"}"#),
            )
            .expect("entry is written");

        let loader = ScriptLoader::builder()
            .persistent_cache(cache)
            .offline_mode(true)
            .build()
            .expect("loader is built");

        assert!(loader.load("https://example.com/cached.json").await.is_ok());
        assert_matches!(
            loader.load("https://example.com/other.json").await,
            Err(LoadError::Offline(_))
        );

        let _ = std::fs::remove_dir_all(dir);
    }

    /// Serves `/mercator.json`, fails `/broken.json` with 500 and answers 404 to anything else. Returns the base url.
    async fn serve_scripts() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener is bound");
        let address = listener.local_addr().expect("listener has an address");

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => request.extend_from_slice(&buf[..read]),
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let (status, body) = match request.split_whitespace().nth(1) {
                    Some("/mercator.json") => ("200 OK", MERCATOR_SCRIPT),
                    Some("/broken.json") => ("500 Internal Server Error", ""),
                    _ => ("404 Not Found", ""),
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        format!("http://{address}")
    }

    #[tokio::test]
    async fn http_status_is_mapped() {
        let base = serve_scripts().await;
        let loader = ScriptLoader::new();

        assert_matches!(
            loader.load(&format!("{base}/missing.json")).await,
            Err(LoadError::NotFound(_))
        );
        assert_matches!(
            loader.load(&format!("{base}/broken.json")).await,
            Err(LoadError::Io(_))
        );
        assert!(loader.load(&format!("{base}/mercator.json")).await.is_ok());
    }

    #[tokio::test]
    async fn downloaded_script_is_stored_in_persistent_cache() {
        let base = serve_scripts().await;
        let dir = temp_dir("http");
        let url = format!("{base}/mercator.json");

        let cache = FileCacheController::new(&dir, None).expect("cache is created");
        let folder = cache.folder().to_path_buf();
        let loader = ScriptLoader::builder()
            .persistent_cache(cache)
            .build()
            .expect("loader is built");
        assert!(loader.load(&url).await.is_ok());

        let stored = FileCacheController::new(&folder, None).expect("cache is opened");
        assert_eq!(
            stored.get(url.as_str()),
            Some(Bytes::from_static(MERCATOR_SCRIPT.as_bytes()))
        );

        let offline = ScriptLoader::builder()
            .persistent_cache(stored)
            .offline_mode(true)
            .build()
            .expect("loader is built");
        assert!(offline.load(&url).await.is_ok());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn schemes() {
        assert!(is_http("HTTPS://example.com"));
        assert!(is_http("http://example.com"));
        assert!(!is_http("file:///tmp/a.json"));
        assert!(!is_http("Data/UserGeographic.json"));
    }
}
