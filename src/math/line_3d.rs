use super::{Point3, Vector3, DIRECTION_EPSILON};

/// Returns the unit vector along `v`, or `None` when `v` is shorter than
/// [`DIRECTION_EPSILON`].
#[must_use]
pub fn normalize(v: &Vector3) -> Option<Vector3> {
    let len = v.norm();
    if len < DIRECTION_EPSILON || !len.is_finite() {
        None
    } else {
        Some(v / len)
    }
}

/// Returns `true` when every coordinate of `a` and `b` differs by less than `tol`.
#[must_use]
pub fn points_equal(a: &Point3, b: &Point3, tol: f64) -> bool {
    (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol && (a.z - b.z).abs() < tol
}

/// Midpoint of the segment `a`-`b`.
#[must_use]
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    nalgebra::center(a, b)
}

/// Perpendicular distance from `point` to the infinite line through
/// `line_point` along the unit vector `direction`.
#[must_use]
pub fn point_line_distance(point: &Point3, line_point: &Point3, direction: &Vector3) -> f64 {
    direction.cross(&(point - line_point)).norm()
}
