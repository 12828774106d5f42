use std::fmt;

use tracing::{info, instrument};

use crate::error::{InputError, Result};
use crate::geometry::Segment;
use crate::host::{AssemblyStore, ModelStore, SolidGeometry};
use crate::index::ObjectId;
use crate::operations::query::IsCollinear;

use super::{log_boundary, place, Candidate, CandidateKind, Placement};

/// Outcome of [`AttachCollinear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollinearReport {
    /// Every candidate collinear with the reference, bars included.
    pub collinear: Vec<ObjectId>,
    /// Beam segments added to the assembly.
    pub attached: Vec<ObjectId>,
    /// Collinear beam segments whose origin lies outside the main part.
    pub outside_boundary: usize,
    /// Collinear beam segments without a placement origin.
    pub missing_anchor: usize,
    /// Beam segments the model refused to attach.
    pub rejected: Vec<ObjectId>,
}

impl fmt::Display for CollinearReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "collinear objects: {}", self.collinear.len())?;
        writeln!(f, "attached beam segments: {}", self.attached.len())?;
        writeln!(f, "outside boundary: {}", self.outside_boundary)?;
        write!(f, "without placement origin: {}", self.missing_anchor)?;
        if !self.rejected.is_empty() {
            write!(f, "\nrejected by model: {}", self.rejected.len())?;
        }
        Ok(())
    }
}

/// Finds objects collinear with a reference bar and attaches the beam
/// segments among them that sit on the main part.
pub struct AttachCollinear {
    reference: ObjectId,
    span: Segment,
    main_part: ObjectId,
    assembly: ObjectId,
    tolerance: f64,
}

impl AttachCollinear {
    /// Creates a new `AttachCollinear` operation.
    ///
    /// `tolerance` is used both as the lateral collinearity tolerance and
    /// as the expansion of the main part's bounding box.
    #[must_use]
    pub fn new(
        reference: ObjectId,
        span: Segment,
        main_part: ObjectId,
        assembly: ObjectId,
        tolerance: f64,
    ) -> Self {
        Self {
            reference,
            span,
            main_part,
            assembly,
            tolerance,
        }
    }

    /// Executes the scan over `candidates`.
    ///
    /// The assembly is written back and the model committed only when at
    /// least one segment was attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is invalid, the reference bar has
    /// zero length, or the final assembly write or commit fails.
    #[instrument(skip(self, candidates, host), fields(reference = %self.reference))]
    pub fn execute<H>(&self, candidates: &[Candidate], host: &mut H) -> Result<CollinearReport>
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
        let classifier = IsCollinear::from_reference(&self.span, self.tolerance)?;
        log_boundary(&*host, self.main_part, self.tolerance);

        let mut report = CollinearReport::default();
        for candidate in candidates {
            if candidate.id == self.reference || !classifier.execute(&candidate.span) {
                continue;
            }
            report.collinear.push(candidate.id);

            let CandidateKind::BeamSegment { anchor, .. } = &candidate.kind else {
                continue;
            };
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

        if !report.attached.is_empty() {
            host.modify_assembly(self.assembly)?;
            host.commit()?;
        }
        info!(
            collinear = report.collinear.len(),
            attached = report.attached.len(),
            outside = report.outside_boundary,
            "collinear scan complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Aabb;
    use crate::host::MemoryModel;
    use crate::math::Point3;

    fn seg(a: [f64; 3], b: [f64; 3]) -> Segment {
        Segment::new(Point3::from(a), Point3::from(b))
    }

    struct Scene {
        model: MemoryModel,
        part: ObjectId,
        assembly: ObjectId,
    }

    fn scene() -> Scene {
        let mut model = MemoryModel::new();
        let part = model.add_part(Aabb::new(
            Point3::new(0.0, -100.0, -100.0),
            Point3::new(1000.0, 100.0, 100.0),
        ));
        let assembly = model.add_assembly();
        Scene {
            model,
            part,
            assembly,
        }
    }

    #[test]
    fn attaches_collinear_segments_on_the_part() {
        let Scene {
            mut model,
            part,
            assembly,
        } = scene();
        let reference = ObjectId(100);
        let candidates = vec![
            Candidate::bar(reference, seg([0.0, 0.0, 0.0], [500.0, 0.0, 0.0])),
            Candidate::bar(ObjectId(101), seg([600.0, 10.0, 0.0], [900.0, 10.0, 0.0])),
            Candidate::beam_segment(
                ObjectId(102),
                seg([200.0, 20.0, 0.0], [400.0, 20.0, 0.0]),
                "PL10*100",
                Some(Point3::new(200.0, 20.0, 0.0)),
            ),
            Candidate::beam_segment(
                ObjectId(103),
                seg([1200.0, 0.0, 0.0], [1400.0, 0.0, 0.0]),
                "PL10*100",
                Some(Point3::new(1200.0, 0.0, 0.0)),
            ),
            Candidate::beam_segment(
                ObjectId(104),
                seg([0.0, 0.0, 0.0], [0.0, 300.0, 0.0]),
                "PL10*100",
                Some(Point3::origin()),
            ),
            Candidate::beam_segment(
                ObjectId(105),
                seg([100.0, 0.0, 0.0], [300.0, 0.0, 0.0]),
                "PL10*100",
                None,
            ),
        ];

        let report = AttachCollinear::new(
            reference,
            seg([0.0, 0.0, 0.0], [500.0, 0.0, 0.0]),
            part,
            assembly,
            50.0,
        )
        .execute(&candidates, &mut model)
        .unwrap();

        assert_eq!(
            report.collinear,
            vec![ObjectId(101), ObjectId(102), ObjectId(103), ObjectId(105)]
        );
        assert_eq!(report.attached, vec![ObjectId(102)]);
        assert_eq!(report.outside_boundary, 1);
        assert_eq!(report.missing_anchor, 1);
        assert!(model.members(assembly).unwrap().contains(&ObjectId(102)));
        assert_eq!(model.assembly_writes(), 1);
        assert_eq!(model.commits(), 1);
    }

    #[test]
    fn nothing_attached_means_no_commit() {
        let Scene {
            mut model,
            part,
            assembly,
        } = scene();
        let candidates = vec![Candidate::bar(
            ObjectId(7),
            seg([0.0, 5.0, 0.0], [10.0, 5.0, 0.0]),
        )];

        let report = AttachCollinear::new(
            ObjectId(1),
            seg([0.0, 0.0, 0.0], [10.0, 0.0, 0.0]),
            part,
            assembly,
            10.0,
        )
        .execute(&candidates, &mut model)
        .unwrap();

        assert_eq!(report.collinear, vec![ObjectId(7)]);
        assert!(report.attached.is_empty());
        assert_eq!(model.commits(), 0);
    }

    #[test]
    fn missing_part_box_counts_as_outside() {
        let Scene {
            mut model, assembly, ..
        } = scene();
        let candidates = vec![Candidate::beam_segment(
            ObjectId(9),
            seg([0.0, 0.0, 0.0], [10.0, 0.0, 0.0]),
            "HEA200",
            Some(Point3::origin()),
        )];

        let report = AttachCollinear::new(
            ObjectId(1),
            seg([0.0, 0.0, 0.0], [10.0, 0.0, 0.0]),
            ObjectId(999),
            assembly,
            10.0,
        )
        .execute(&candidates, &mut model)
        .unwrap();

        assert_eq!(report.outside_boundary, 1);
        assert!(report.attached.is_empty());
    }

    #[test]
    fn zero_length_reference_is_an_error() {
        let Scene {
            mut model,
            part,
            assembly,
        } = scene();
        let result = AttachCollinear::new(
            ObjectId(1),
            seg([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]),
            part,
            assembly,
            10.0,
        )
        .execute(&[], &mut model);
        assert!(result.is_err());
    }
}
