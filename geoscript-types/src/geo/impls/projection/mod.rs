//! Implementations for some of the common projections.
mod equirectangular;
mod web_mercator;

pub use equirectangular::Equirectangular;
pub use web_mercator::WebMercator;

#[cfg(feature = "geodesy")]
mod geodesy;
#[cfg(feature = "geodesy")]
pub use geodesy::GeodesyProjection;
