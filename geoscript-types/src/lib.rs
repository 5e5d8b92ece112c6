//! Value types and projection math used by `geoscript`.
//!
//! * [`Cartographic`](geo::Cartographic) is a position on (or above) an ellipsoid given by longitude, latitude
//!   and height.
//! * [`Cartesian3`](cartesian::Cartesian3) is a point in a 3d cartesian space, usually the output of a projection.
//! * [`Ellipsoid`](geo::Ellipsoid) is the reference shape the projections scale their output by.
//! * [`Projection`](geo::Projection) converts between the two point types. A few common projections are
//!   implemented in [`geo::impls::projection`].

pub mod cartesian;
pub mod error;
pub mod geo;

pub use cartesian::Cartesian3;
pub use geo::{Cartographic, Ellipsoid, Projection};
