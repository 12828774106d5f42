use std::collections::BTreeMap;
use std::fmt;

use tracing::{info, instrument};

use crate::error::{InputError, OperationError, Result};
use crate::host::{AssemblyStore, ModelStore, SolidGeometry};
use crate::index::ObjectId;

use super::{log_boundary, place, Candidate, CandidateKind, Placement};

/// Outcome of [`AttachByProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileReport {
    /// Number of candidates examined.
    pub total: usize,
    /// Candidates that are not beam segments.
    pub non_beam: usize,
    /// Beam segments added to the assembly.
    pub attached: Vec<ObjectId>,
    /// Matching beam segments whose origin lies outside the main part.
    pub outside_boundary: usize,
    /// Beam segments whose profile differs from the filter.
    pub wrong_profile: usize,
    /// Matching beam segments without a placement origin.
    pub missing_anchor: usize,
    /// Beam segments the model refused to attach.
    pub rejected: Vec<ObjectId>,
    /// Beam segment count per profile, most frequent first.
    pub profiles: Vec<(String, usize)>,
    /// The profile filter that was applied.
    pub filter: String,
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "objects examined: {}", self.total)?;
        writeln!(f, "beam segments: {}", self.total - self.non_beam)?;
        writeln!(f, "other objects: {}", self.non_beam)?;
        writeln!(f, "attached: {}", self.attached.len())?;
        writeln!(f, "outside boundary: {}", self.outside_boundary)?;
        writeln!(f, "profile mismatch: {}", self.wrong_profile)?;
        if !self.profiles.is_empty() {
            writeln!(f, "profiles seen:")?;
            for (profile, count) in &self.profiles {
                writeln!(f, "- {profile}: {count}")?;
            }
        }
        write!(f, "filter: {}", self.filter)
    }
}

/// Attaches beam segments with a given profile whose origin sits on the
/// main part.
pub struct AttachByProfile {
    filter: String,
    main_part: ObjectId,
    assembly: ObjectId,
    tolerance: f64,
}

impl AttachByProfile {
    /// Creates a new `AttachByProfile` operation.
    ///
    /// The filter is trimmed and compared case-insensitively.
    #[must_use]
    pub fn new(filter: &str, main_part: ObjectId, assembly: ObjectId, tolerance: f64) -> Self {
        Self {
            filter: filter.trim().to_owned(),
            main_part,
            assembly,
            tolerance,
        }
    }

    /// Executes the filter over `candidates`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no candidates, the tolerance is
    /// invalid, or the final assembly write or commit fails.
    #[instrument(skip(self, candidates, host), fields(filter = %self.filter))]
    pub fn execute<H>(&self, candidates: &[Candidate], host: &mut H) -> Result<ProfileReport>
    where
        H: ModelStore + SolidGeometry + AssemblyStore + ?Sized,
    {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(InputError::OutOfRange {
                parameter: "lateral tolerance",
                value: self.tolerance,
                requirement: "finite and >= 0",
            }
            .into());
        }
        if candidates.is_empty() {
            return Err(OperationError::NoEligibleObjects("no objects selected").into());
        }

        log_boundary(&*host, self.main_part, self.tolerance);

        let mut report = ProfileReport {
            total: candidates.len(),
            filter: self.filter.clone(),
            ..ProfileReport::default()
        };
        let mut histogram: BTreeMap<String, usize> = BTreeMap::new();

        for candidate in candidates {
            let CandidateKind::BeamSegment { profile, anchor } = &candidate.kind else {
                report.non_beam += 1;
                continue;
            };
            let profile = profile.trim();
            *histogram.entry(profile.to_owned()).or_default() += 1;

            if !profile.eq_ignore_ascii_case(&self.filter) {
                report.wrong_profile += 1;
                continue;
            }
            match place(
                host,
                self.assembly,
                self.main_part,
                candidate.id,
                *anchor,
                self.tolerance,
            ) {
                Placement::Attached => report.attached.push(candidate.id),
                Placement::OutsideBoundary => report.outside_boundary += 1,
                Placement::MissingAnchor => report.missing_anchor += 1,
                Placement::Rejected => report.rejected.push(candidate.id),
            }
        }

        report.profiles = histogram.into_iter().collect();
        report.profiles.sort_by(|a, b| b.1.cmp(&a.1));

        if !report.attached.is_empty() {
            host.modify_assembly(self.assembly)?;
            host.commit()?;
        }
        info!(
            total = report.total,
            attached = report.attached.len(),
            wrong_profile = report.wrong_profile,
            "profile attachment complete"
        );
        Ok(report)
    }
}
