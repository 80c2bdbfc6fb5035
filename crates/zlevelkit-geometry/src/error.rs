//! Error types for the geometry kernel.

use thiserror::Error;

/// Errors raised when an input does not uniquely determine the requested
/// geometric object.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The three points given for plane construction are collinear.
    #[error("degenerate plane: the three points are collinear")]
    DegeneratePoints,

    /// The two planes are parallel or coincident; no unique intersection
    /// line exists.
    #[error("planes are parallel or coincident, no unique intersection line")]
    ParallelPlanes,

    /// The two lines are parallel; no unique intersection point exists.
    #[error("lines are parallel, no unique intersection point")]
    ParallelLines,

    /// The two lines pass each other without meeting within tolerance.
    #[error("lines do not meet: closest approach {distance:.6} mm exceeds tolerance {tolerance:.6} mm")]
    SkewLines {
        /// Closest-approach distance between the lines, in mm.
        distance: f64,
        /// The intersection tolerance that was exceeded, in mm.
        tolerance: f64,
    },
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
