//! Attaching beam segments to an assembly.
//!
//! Both operations gate each candidate on its placement origin lying
//! inside the main part's bounding box grown by the lateral tolerance.

mod by_profile;
mod collinear;

pub use by_profile::{AttachByProfile, ProfileReport};
pub use collinear::{AttachCollinear, CollinearReport};

use tracing::{debug, info, warn};

use crate::geometry::Segment;
use crate::host::{AssemblyStore, SolidGeometry};
use crate::index::ObjectId;
use crate::math::Point3;
use crate::operations::query::PointInPart;

/// What kind of model object a candidate is.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateKind {
    /// A reinforcement bar. Bars are classified but never attached.
    Bar,
    /// A beam segment that may join the assembly.
    BeamSegment {
        /// Profile name as reported by the model.
        profile: String,
        /// Placement origin, or `None` if the model has no coordinate system for it.
        anchor: Option<Point3>,
    },
}

/// A model object considered for attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Object identifier.
    pub id: ObjectId,
    /// Straight-line extent of the object.
    pub span: Segment,
    /// Object kind.
    pub kind: CandidateKind,
}

impl Candidate {
    /// A reinforcement bar candidate.
    #[must_use]
    pub fn bar(id: ObjectId, span: Segment) -> Self {
        Self {
            id,
            span,
            kind: CandidateKind::Bar,
        }
    }

    /// A beam segment candidate.
    #[must_use]
    pub fn beam_segment(id: ObjectId, span: Segment, profile: impl Into<String>, anchor: Option<Point3>) -> Self {
        Self {
            id,
            span,
            kind: CandidateKind::BeamSegment {
                profile: profile.into(),
                anchor,
            },
        }
    }
}

/// Result of trying to place one beam segment into the assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Attached,
    OutsideBoundary,
    MissingAnchor,
    Rejected,
}

/// Logs the main part boundary once before candidates are placed.
fn log_boundary<G: SolidGeometry + ?Sized>(solids: &G, part: ObjectId, tolerance: f64) {
    match solids.bounding_box(part) {
        Some(extent) => {
            let c = extent.center();
            debug!(%part, center = ?(c.x, c.y, c.z), tolerance, "main part boundary");
        }
        None => warn!(%part, "main part has no bounding box, nothing can be attached"),
    }
}

/// Attaches `id` when `anchor` lies inside the expanded main-part box.
fn place<H: SolidGeometry + AssemblyStore + ?Sized>(
    host: &mut H,
    assembly: ObjectId,
    main_part: ObjectId,
    id: ObjectId,
    anchor: Option<Point3>,
    tolerance: f64,
) -> Placement {
    let Some(anchor) = anchor else {
        warn!(%id, "beam segment has no placement origin");
        return Placement::MissingAnchor;
    };
    if !PointInPart::new(anchor, main_part, tolerance).execute(&*host) {
        info!(%id, "beam segment origin is outside the main part boundary");
        return Placement::OutsideBoundary;
    }
    match host.attach(assembly, id) {
        Ok(()) => {
            info!(%id, %assembly, "beam segment attached");
            Placement::Attached
        }
        Err(error) => {
            warn!(%id, %error, "attachment rejected");
            Placement::Rejected
        }
    }
}
