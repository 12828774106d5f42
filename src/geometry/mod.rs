pub mod aabb;
pub mod bar;
pub mod segment;

pub use aabb::Aabb;
pub use bar::{BarGeometry, Polygon};
pub use segment::Segment;
