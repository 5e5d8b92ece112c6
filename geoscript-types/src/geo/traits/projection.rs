/// Converts points between two coordinate systems.
///
/// Both directions return `None` if the input point cannot be represented in the target system.
pub trait Projection {
    /// Source point type.
    type InPoint;
    /// Target point type.
    type OutPoint;

    /// Converts a source point into the target system.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Converts a target point back into the source system.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
