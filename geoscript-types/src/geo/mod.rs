//! Positions in geographic coordinates (see [`Cartographic`]), the reference [`Ellipsoid`] and conversion into
//! cartesian coordinates (see [`Projection`]).

mod cartographic;
mod ellipsoid;
pub mod impls;
mod traits;

pub use cartographic::Cartographic;
pub use ellipsoid::Ellipsoid;
pub use traits::projection::Projection;
