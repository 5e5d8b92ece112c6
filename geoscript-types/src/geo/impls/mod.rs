//! Implementations of the geo traits.

pub mod projection;
