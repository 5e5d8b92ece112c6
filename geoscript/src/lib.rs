//! Geoscript lets an application use a custom map projection by pointing at a url with the projection functions
//! instead of using a built-in projection.
//!
//! # Quick start
//!
//! ```no_run
//! use geoscript::CustomProjection;
//! use geoscript::geoscript_types::{Cartographic, Ellipsoid};
//!
//! # tokio_test::block_on(async {
//! let projection = CustomProjection::new("https://example.com/user_geographic.json", None)?;
//! assert!(!projection.ready());
//!
//! projection.when_ready().await?;
//! let projected = projection.project(&Cartographic::new(0.0, 0.0, 10.0))?;
//! let unprojected = projection.unproject(&projected)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```
//!
//! # Main components
//!
//! * [`CustomProjection`] is the projection itself. It is created synchronously and becomes
//!   [ready](CustomProjection::ready) when its functions are loaded. Projecting before that fails with a
//!   [`PreconditionError`](error::PreconditionError).
//! * [`ProjectionCache`] makes sure that the functions from one url are loaded only once, no matter how many
//!   projections use them. The [global](ProjectionCache::global) cache is used by default.
//! * [`ProjectionLoader`](loader::ProjectionLoader) does the actual loading. The default
//!   [`ScriptLoader`](loader::ScriptLoader) reads [projection scripts](loader::ProjectionScript) from `data:` uris,
//!   http(s) urls and files; [`RegistryLoader`](loader::RegistryLoader) returns functions registered by the
//!   application.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub(crate) mod async_runtime;
pub mod cache;
pub mod error;
pub mod loader;
pub mod platform;
mod projection;

#[cfg(test)]
pub(crate) mod tests;

pub use cache::ProjectionCache;
pub use loader::{ProjectionFunctions, ProjectionLoader};
pub use projection::CustomProjection;

// Reexport geoscript_types
pub use geoscript_types;
