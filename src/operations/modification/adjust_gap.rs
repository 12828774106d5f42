use tracing::{debug, info, instrument, warn};

use crate::error::{HostError, IndexError, InputError, OperationError, RebarError, Result};
use crate::host::ModelStore;
use crate::index::{EndpointIndex, ObjectId};
use crate::math::{Point3, Vector3};
use crate::operations::query::{ClosestEndpoint, ClosestEndpoints};

/// One endpoint relocation applied to the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointMove {
    /// The object whose endpoint moved.
    pub id: ObjectId,
    /// Endpoint position before the adjustment.
    pub from: Point3,
    /// Endpoint position after the adjustment.
    pub to: Point3,
}

/// An object the adjustment could not finish.
#[derive(Debug)]
pub struct ObjectFailure {
    /// The object concerned.
    pub id: ObjectId,
    /// What went wrong.
    pub error: RebarError,
}

/// Outcome of [`AdjustGap`].
#[derive(Debug)]
pub struct GapReport {
    /// Completed endpoint moves, in processing order.
    pub moves: Vec<EndpointMove>,
    /// Objects that failed; moves of other objects remain applied.
    pub failures: Vec<ObjectFailure>,
    /// Centre of the gap (the target point).
    pub center: Point3,
    /// Bar axis at the gap, when at least one adjusted bar has a direction.
    pub axis: Option<Vector3>,
}

/// Opens (or closes) a symmetric gap at a target point between the one or
/// two bars whose endpoints are nearest to it.
///
/// With two bars, both nearest endpoints first snap onto the target, then
/// each is pushed `gap / 2` along its stored axis, oriented away from the
/// target towards the bar's body. Stored directions are not refreshed, so
/// an off-axis pick still yields a gap of exactly `gap`. With a single bar its nearest endpoint
/// goes straight to `target - gap / 2 * direction`.
pub struct AdjustGap {
    target: Point3,
    gap: f64,
}

impl AdjustGap {
    /// Creates a new `AdjustGap` operation.
    #[must_use]
    pub fn new(target: Point3, gap: f64) -> Self {
        Self { target, gap }
    }

    /// Executes the adjustment, writing each move to `store` and `index`.
    ///
    /// Each object is relocated independently; a failure on one object is
    /// recorded in the report and does not undo moves already applied.
    /// The model is committed once at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the gap is negative or not finite, if the index
    /// holds no bars, or if the final commit is refused.
    #[instrument(skip(self, index, store), fields(gap = self.gap))]
    pub fn execute<S: ModelStore + ?Sized>(
        &self,
        index: &mut EndpointIndex,
        store: &mut S,
    ) -> Result<GapReport> {
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(InputError::OutOfRange {
                parameter: "gap",
                value: self.gap,
                requirement: "finite and >= 0",
            }
            .into());
        }

        let ranked = ClosestEndpoints::new(self.target).execute(index);
        let mut report = GapReport {
            moves: Vec::new(),
            failures: Vec::new(),
            center: self.target,
            axis: None,
        };

        match ranked.as_slice() {
            [] => {
                return Err(OperationError::NoEligibleObjects("no indexed bars to adjust").into());
            }
            [single] => self.adjust_single(single, index, store, &mut report),
            [first, second, ..] => {
                for nearest in [first, second] {
                    self.adjust_split(nearest, index, store, &mut report);
                }
            }
        }

        store.commit()?;
        info!(
            moved = report.moves.len(),
            failed = report.failures.len(),
            "gap adjustment complete"
        );
        Ok(report)
    }

    fn half_gap(&self) -> f64 {
        self.gap / 2.0
    }

    fn adjust_single<S: ModelStore + ?Sized>(
        &self,
        nearest: &ClosestEndpoint,
        index: &mut EndpointIndex,
        store: &mut S,
        report: &mut GapReport,
    ) {
        let direction = index.record(nearest.id).ok().and_then(|r| r.direction);
        let destination = match direction {
            Some(dir) => self.target - dir * self.half_gap(),
            None => {
                warn!(id = %nearest.id, "bar has no direction, moving endpoint onto target");
                self.target
            }
        };

        match relocate(index, store, nearest.id, &nearest.point, destination) {
            Ok(()) => {
                report.axis = report.axis.or(direction);
                report.moves.push(EndpointMove {
                    id: nearest.id,
                    from: nearest.point,
                    to: destination,
                });
            }
            Err(error) => record_failure(report, nearest.id, error),
        }
    }

    fn adjust_split<S: ModelStore + ?Sized>(
        &self,
        nearest: &ClosestEndpoint,
        index: &mut EndpointIndex,
        store: &mut S,
        report: &mut GapReport,
    ) {
        let id = nearest.id;
        let axis = index.record(id).ok().and_then(|record| record.direction);

        // Snap onto the target so both bars share one anchor.
        if let Err(error) = relocate(index, store, id, &nearest.point, self.target) {
            record_failure(report, id, error);
            return;
        }

        let outward = axis.zip(index.record(id).ok()).map(|(dir, record)| {
            if dir.dot(&(record.midpoint() - self.target)) < 0.0 {
                -dir
            } else {
                dir
            }
        });

        let Some(outward) = outward else {
            warn!(%id, "bar has no direction, leaving endpoint on target");
            report.moves.push(EndpointMove {
                id,
                from: nearest.point,
                to: self.target,
            });
            return;
        };

        let destination = self.target + outward * self.half_gap();
        if self.half_gap() > 0.0 {
            if let Err(error) = relocate(index, store, id, &self.target, destination) {
                // The snap is already applied; report where the endpoint is left.
                report.moves.push(EndpointMove {
                    id,
                    from: nearest.point,
                    to: self.target,
                });
                record_failure(report, id, error);
                return;
            }
        }

        report.axis = report.axis.or(Some(outward));
        report.moves.push(EndpointMove {
            id,
            from: nearest.point,
            to: destination,
        });
    }
}

/// Moves one endpoint in the model and mirrors the move into the index.
fn relocate<S: ModelStore + ?Sized>(
    index: &mut EndpointIndex,
    store: &mut S,
    id: ObjectId,
    from: &Point3,
    to: Point3,
) -> Result<()> {
    let mut geometry = store
        .geometry(id)
        .cloned()
        .ok_or(HostError::ObjectNotFound(id))?;
    if !geometry.move_endpoint(from, &to) {
        return Err(IndexError::EndpointNotFound {
            id,
            x: from.x,
            y: from.y,
            z: from.z,
        }
        .into());
    }
    store.replace_geometry(id, geometry)?;
    index.update(id, from, to)?;
    debug!(%id, from = ?from, to = ?to, "endpoint relocated");
    Ok(())
}

fn record_failure(report: &mut GapReport, id: ObjectId, error: RebarError) {
    warn!(%id, %error, "endpoint adjustment failed");
    report.failures.push(ObjectFailure { id, error });
}
