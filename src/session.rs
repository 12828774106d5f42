//! Operator workflow over the endpoint index.
//!
//! The session serializes engine calls: bars are selected and indexed,
//! a target is picked, then exactly one adjustment or merge runs against
//! the host model.

use tracing::{debug, info, instrument, warn};

use crate::config::GapParameters;
use crate::error::{InputError, OperationError, Result};
use crate::host::{AssemblyStore, ModelStore, SolidGeometry};
use crate::index::{EndpointIndex, ExtractReport, ObjectId};
use crate::math::Point3;
use crate::operations::attach::{
    AttachByProfile, AttachCollinear, Candidate, CollinearReport, ProfileReport,
};
use crate::operations::creation::WeldingStubs;
use crate::operations::modification::{AdjustGap, GapReport, MergePair, MergeReport};
use crate::operations::query::{ClosestEndpoint, ClosestEndpoints};

/// Result of [`AdjustSession::adjust`].
#[derive(Debug)]
pub struct AdjustOutcome {
    /// Endpoint moves and per-object failures.
    pub gap: GapReport,
    /// Welding stubs created at the gap, when requested.
    pub stubs: Option<Result<[ObjectId; 2]>>,
}

/// Selection state and parameters for one operator session.
#[derive(Debug, Default)]
pub struct AdjustSession {
    index: EndpointIndex,
    selected: Vec<ObjectId>,
    target: Option<Point3>,
    params: GapParameters,
}

impl AdjustSession {
    /// Creates a session with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range.
    pub fn new(params: GapParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            ..Self::default()
        })
    }

    /// Replaces the parameters after validating them.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range; the previous
    /// parameters stay in effect.
    pub fn set_parameters(&mut self, params: GapParameters) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Selects bars, indexes their endpoints and computes directions.
    ///
    /// Any previous selection and target are discarded.
    #[instrument(skip(self, store))]
    pub fn select_bars<S: ModelStore + ?Sized>(&mut self, store: &S, ids: &[ObjectId]) -> ExtractReport {
        self.reset();
        let report = self.index.extract(store, ids);
        self.index.compute_directions();
        self.selected.clone_from(&report.indexed);
        self.log_endpoints();
        report
    }

    /// Stores `target` and ranks the selected bars by endpoint distance to it.
    pub fn pick_target(&mut self, target: Point3) -> Vec<ClosestEndpoint> {
        self.target = Some(target);
        let ranked = ClosestEndpoints::new(target).execute(&self.index);
        for entry in &ranked {
            debug!(id = %entry.id, distance = entry.distance, "closest endpoint");
        }
        ranked
    }

    /// Opens the configured gap at the picked target and, when welding
    /// parameters are set, lays two stubs across it.
    ///
    /// # Errors
    ///
    /// Returns an error if no target has been picked, the parameters are
    /// invalid, or the adjustment itself fails.
    pub fn adjust<S: ModelStore + ?Sized>(&mut self, store: &mut S) -> Result<AdjustOutcome> {
        self.params.validate()?;
        let target = self.target.ok_or(InputError::MissingTarget)?;
        let gap = AdjustGap::new(target, self.params.gap).execute(&mut self.index, store)?;

        let stubs = self.params.welding.map(|welding| -> Result<[ObjectId; 2]> {
            let axis = gap.axis.ok_or_else(|| {
                OperationError::InvalidInput("no bar direction available for welding stubs".into())
            })?;
            let ids = WeldingStubs::new(gap.center, axis, welding).persist(store)?;
            store.commit()?;
            Ok(ids)
        });
        if let Some(Err(error)) = &stubs {
            warn!(%error, "welding stubs not created");
        }

        Ok(AdjustOutcome { gap, stubs })
    }

    /// Merges the two selected bars into the second one.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly two bars are selected, or if the
    /// merge fails.
    pub fn merge<S: ModelStore + ?Sized>(&mut self, store: &mut S) -> Result<MergeReport> {
        let &[remove, keep] = self.selected.as_slice() else {
            return Err(OperationError::InvalidInput(format!(
                "merge needs exactly two bars, {} selected",
                self.selected.len()
            ))
            .into());
        };
        let report = MergePair::new(keep, remove).execute(&mut self.index, store)?;
        self.selected.retain(|&id| id != remove);
        self.log_endpoints();
        Ok(report)
    }

    /// Attaches beam segments collinear with the selected `reference` bar to
    /// `assembly`, gated on the `main_part` boundary. Both the lateral offset
    /// and the boundary growth use the configured lateral tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, `reference` is not
    /// indexed or has no length, or the host refuses the assembly update.
    pub fn attach_collinear<H>(
        &self,
        reference: ObjectId,
        main_part: ObjectId,
        assembly: ObjectId,
        candidates: &[Candidate],
        host: &mut H,
    ) -> Result<CollinearReport>
    where
        H: ModelStore + SolidGeometry + AssemblyStore + ?Sized,
    {
        self.params.validate()?;
        let span = self.index.record(reference)?.segment();
        let report = AttachCollinear::new(
            reference,
            span,
            main_part,
            assembly,
            self.params.lateral_tolerance,
        )
        .execute(candidates, host)?;
        info!(%reference, "{report}");
        Ok(report)
    }

    /// Attaches beam segments whose profile matches `filter` to `assembly`,
    /// gated on the `main_part` boundary grown by the lateral tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, `candidates` is
    /// empty, or the host refuses the assembly update.
    pub fn attach_by_profile<H>(
        &self,
        filter: &str,
        main_part: ObjectId,
        assembly: ObjectId,
        candidates: &[Candidate],
        host: &mut H,
    ) -> Result<ProfileReport>
    where
        H: ModelStore + SolidGeometry + AssemblyStore + ?Sized,
    {
        self.params.validate()?;
        AttachByProfile::new(filter, main_part, assembly, self.params.lateral_tolerance)
            .execute(candidates, host)
    }

    /// Clears the selection, the target and the index.
    pub fn reset(&mut self) {
        self.index.clear();
        self.selected.clear();
        self.target = None;
    }

    /// The endpoint index.
    #[must_use]
    pub fn index(&self) -> &EndpointIndex {
        &self.index
    }

    /// Selected bars that were indexed, in selection order.
    #[must_use]
    pub fn selected(&self) -> &[ObjectId] {
        &self.selected
    }

    /// The picked target, if any.
    #[must_use]
    pub fn target(&self) -> Option<Point3> {
        self.target
    }

    /// The active parameters.
    #[must_use]
    pub fn parameters(&self) -> &GapParameters {
        &self.params
    }

    fn log_endpoints(&self) {
        for record in self.index.iter() {
            let [a, b] = &record.endpoints;
            info!(
                id = %record.id,
                start = ?(a.x, a.y, a.z),
                end = ?(b.x, b.y, b.z),
                direction = ?record.direction.map(|d| (d.x, d.y, d.z)),
                "indexed bar"
            );
        }
    }
}
