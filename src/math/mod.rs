pub mod line_3d;

pub use line_3d::{midpoint, normalize, point_line_distance, points_equal};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Segments shorter than this have no direction.
pub const DIRECTION_EPSILON: f64 = 1e-9;

/// Per-axis tolerance used when matching a cached endpoint against a model point.
pub const POINT_TOLERANCE: f64 = 0.001;

/// Two unit directions are parallel when `|a · b| >= 1 - PARALLEL_TOLERANCE`.
pub const PARALLEL_TOLERANCE: f64 = 0.001;
