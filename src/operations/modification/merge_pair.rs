use tracing::{info, instrument};

use crate::error::{HostError, OperationError, Result};
use crate::geometry::Segment;
use crate::host::ModelStore;
use crate::index::{EndpointIndex, ObjectId};
use crate::operations::query::FarthestPair;

/// Outcome of [`MergePair`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeReport {
    /// The object that now carries the merged span.
    pub kept: ObjectId,
    /// The object deleted from the model.
    pub removed: ObjectId,
    /// The merged span.
    pub span: Segment,
}

/// Collapses two bars into one spanning their two most distant endpoints.
///
/// The retained bar takes the merged span, the other bar is deleted from
/// the model and purged from the index.
pub struct MergePair {
    keep: ObjectId,
    remove: ObjectId,
}

impl MergePair {
    /// Creates a new `MergePair` operation.
    #[must_use]
    pub fn new(keep: ObjectId, remove: ObjectId) -> Self {
        Self { keep, remove }
    }

    /// Executes the merge and commits the model.
    ///
    /// # Errors
    ///
    /// Returns an error if both identifiers are equal, either bar is not
    /// indexed, or the model rejects the edit or the deletion. If the
    /// deletion fails, the retained bar keeps its new span.
    #[instrument(skip(self, index, store), fields(keep = %self.keep, remove = %self.remove))]
    pub fn execute<S: ModelStore + ?Sized>(
        &self,
        index: &mut EndpointIndex,
        store: &mut S,
    ) -> Result<MergeReport> {
        if self.keep == self.remove {
            return Err(OperationError::InvalidInput(format!(
                "cannot merge object {} with itself",
                self.keep
            ))
            .into());
        }

        let span = FarthestPair::new(self.remove, self.keep)
            .execute(index)?
            .ok_or(OperationError::NoEligibleObjects("no endpoints to merge"))?;

        let mut geometry = store
            .geometry(self.keep)
            .cloned()
            .ok_or(HostError::ObjectNotFound(self.keep))?;
        geometry.set_span(span.start, span.end);
        store.replace_geometry(self.keep, geometry)?;
        index.set_endpoints(self.keep, span.start, span.end)?;

        store.delete(self.remove)?;
        index.remove(self.remove);
        store.commit()?;

        info!(length = span.length(), "bars merged");
        Ok(MergeReport {
            kept: self.keep,
            removed: self.remove,
            span,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RebarError;
    use crate::geometry::{BarGeometry, Polygon};
    use crate::host::MemoryModel;
    use crate::math::{Point3, Vector3};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn merges_into_retained_bar() {
        let mut model = MemoryModel::new();
        let a = model.add_bar(BarGeometry::straight(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)));
        let b = model.add_bar(BarGeometry::straight(p(30.0, 0.0, 0.0), p(20.0, 0.0, 0.0)));
        let mut index = EndpointIndex::new();
        index.extract(&model, &[a, b]);
        index.compute_directions();

        let report = MergePair::new(b, a).execute(&mut index, &mut model).unwrap();

        assert_eq!(report.span, Segment::new(p(0.0, 0.0, 0.0), p(30.0, 0.0, 0.0)));
        assert!(model.geometry(a).is_none());
        assert!(!index.contains(a));
        assert_eq!(model.geometry(b).unwrap().endpoints().unwrap(), report.span);

        let dir = index.record(b).unwrap().direction.unwrap();
        assert_relative_eq!(dir, Vector3::x(), epsilon = 1e-12);
        assert_eq!(model.commits(), 1);
    }

    #[test]
    fn group_members_all_take_the_span() {
        let mut model = MemoryModel::new();
        let a = model.add_bar(BarGeometry::straight(p(0.0, 0.0, 0.0), p(5.0, 0.0, 0.0)));
        let b = model.add_bar(BarGeometry::Group(vec![
            Polygon::new(vec![p(6.0, 0.0, 0.0), p(9.0, 0.0, 0.0)]),
            Polygon::new(vec![p(6.0, 1.0, 0.0), p(9.0, 1.0, 0.0)]),
        ]));
        let mut index = EndpointIndex::new();
        index.extract(&model, &[a, b]);

        MergePair::new(b, a).execute(&mut index, &mut model).unwrap();

        let Some(BarGeometry::Group(polys)) = model.geometry(b) else {
            panic!("expected group");
        };
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[1].points, vec![p(0.0, 0.0, 0.0), p(9.0, 0.0, 0.0)]);
    }

    #[test]
    fn refuses_self_merge_and_unknown_bars() {
        let mut model = MemoryModel::new();
        let a = model.add_bar(BarGeometry::straight(p(0.0, 0.0, 0.0), p(5.0, 0.0, 0.0)));
        let mut index = EndpointIndex::new();
        index.extract(&model, &[a]);

        assert!(matches!(
            MergePair::new(a, a).execute(&mut index, &mut model),
            Err(RebarError::Operation(OperationError::InvalidInput(_)))
        ));
        assert!(matches!(
            MergePair::new(a, ObjectId(42)).execute(&mut index, &mut model),
            Err(RebarError::Index(_))
        ));
        assert_eq!(model.bar_count(), 1);
    }
}
