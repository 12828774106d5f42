use crate::index::{EndpointIndex, ObjectId};
use crate::math::Point3;

/// The endpoint of one object nearest to a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestEndpoint {
    /// The object owning the endpoint.
    pub id: ObjectId,
    /// The nearest endpoint.
    pub point: Point3,
    /// Euclidean distance from the endpoint to the target.
    pub distance: f64,
}

/// Ranks every indexed object by the distance of its nearest endpoint to a
/// target point.
pub struct ClosestEndpoints {
    target: Point3,
}

impl ClosestEndpoints {
    /// Creates a new `ClosestEndpoints` query.
    #[must_use]
    pub fn new(target: Point3) -> Self {
        Self { target }
    }

    /// Executes the query, returning one entry per record sorted by distance.
    ///
    /// Within a record the first endpoint wins a tie; between records the
    /// sort is stable, so equal distances keep index order.
    #[must_use]
    pub fn execute(&self, index: &EndpointIndex) -> Vec<ClosestEndpoint> {
        let mut ranked: Vec<ClosestEndpoint> = index
            .iter()
            .filter_map(|record| {
                let mut best: Option<ClosestEndpoint> = None;
                for point in &record.endpoints {
                    let distance = (point - self.target).norm();
                    if best.is_none_or(|b| distance < b.distance) {
                        best = Some(ClosestEndpoint {
                            id: record.id,
                            point: *point,
                            distance,
                        });
                    }
                }
                best
            })
            .collect();

        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn sample_index() -> EndpointIndex {
        let mut index = EndpointIndex::new();
        index.insert(ObjectId(1), p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0));
        index.insert(ObjectId(2), p(30.0, 0.0, 0.0), p(12.0, 0.0, 0.0));
        index.insert(ObjectId(3), p(100.0, 0.0, 0.0), p(200.0, 0.0, 0.0));
        index
    }

    #[test]
    fn ranks_by_nearest_endpoint() {
        let ranked = ClosestEndpoints::new(p(11.5, 0.0, 0.0)).execute(&sample_index());

        let ids: Vec<_> = ranked.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ObjectId(2), ObjectId(1), ObjectId(3)]);
        assert_eq!(ranked[0].point, p(12.0, 0.0, 0.0));
        assert!((ranked[0].distance - 0.5).abs() < 1e-12);
        assert!((ranked[1].distance - 1.5).abs() < 1e-12);
    }

    #[test]
    fn first_endpoint_wins_a_tie() {
        let mut index = EndpointIndex::new();
        index.insert(ObjectId(5), p(-1.0, 0.0, 0.0), p(1.0, 0.0, 0.0));

        let ranked = ClosestEndpoints::new(Point3::origin()).execute(&index);
        assert_eq!(ranked[0].point, p(-1.0, 0.0, 0.0));
    }

    #[test]
    fn repeated_queries_are_identical() {
        let index = sample_index();
        let query = ClosestEndpoints::new(p(50.0, 5.0, 0.0));
        assert_eq!(query.execute(&index), query.execute(&index));
    }

    #[test]
    fn empty_index_yields_nothing() {
        assert!(ClosestEndpoints::new(Point3::origin())
            .execute(&EndpointIndex::new())
            .is_empty());
    }
}
