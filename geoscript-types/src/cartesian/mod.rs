//! Types in cartesian coordinates.

mod cartesian3;

pub use cartesian3::Cartesian3;
