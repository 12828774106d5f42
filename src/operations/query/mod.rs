mod closest_endpoints;
mod collinear;
mod containment;
mod farthest_pair;

pub use closest_endpoints::{ClosestEndpoint, ClosestEndpoints};
pub use collinear::IsCollinear;
pub use containment::{PointInBox, PointInPart};
pub use farthest_pair::{farthest_pair, FarthestPair};
