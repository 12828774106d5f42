use tracing::{debug, instrument};

use crate::config::WeldingParameters;
use crate::error::{GeometryError, Result};
use crate::geometry::{BarGeometry, Segment};
use crate::host::ModelStore;
use crate::index::ObjectId;
use crate::math::{normalize, Point3, Vector3};

/// Synthesizes two short stubs parallel to a bar, one on each side of its
/// axis, centred on a gap.
pub struct WeldingStubs {
    center: Point3,
    direction: Vector3,
    params: WeldingParameters,
}

impl WeldingStubs {
    /// Creates a new `WeldingStubs` operation.
    #[must_use]
    pub fn new(center: Point3, direction: Vector3, params: WeldingParameters) -> Self {
        Self {
            center,
            direction,
            params,
        }
    }

    /// Computes the two stub spans.
    ///
    /// The offset axis starts from the coordinate axis least aligned with
    /// the bar direction and is made orthogonal to it. Stub `k` is centred
    /// at `center ± offset * perp` and runs `stub_length` along the bar.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the direction is
    /// zero-length, or no perpendicular axis can be constructed.
    pub fn execute(&self) -> Result<[Segment; 2]> {
        self.params.validate()?;
        let dir = normalize(&self.direction).ok_or(GeometryError::ZeroVector)?;
        let perp = perpendicular(&dir).ok_or_else(|| {
            GeometryError::Degenerate("no axis perpendicular to the bar direction".into())
        })?;

        let half = dir * (self.params.stub_length / 2.0);
        let offset = perp * self.params.perpendicular_offset;
        let stub = |c: Point3| Segment::new(c - half, c + half);

        Ok([stub(self.center + offset), stub(self.center - offset)])
    }

    /// Computes the stubs and creates them in the model as single bars.
    ///
    /// # Errors
    ///
    /// Returns an error if the stubs cannot be computed or the model
    /// rejects either bar.
    #[instrument(skip(self, store))]
    pub fn persist<S: ModelStore + ?Sized>(&self, store: &mut S) -> Result<[ObjectId; 2]> {
        let [a, b] = self.execute()?;
        let first = store.create_bar(BarGeometry::straight(a.start, a.end))?;
        let second = store.create_bar(BarGeometry::straight(b.start, b.end))?;
        debug!(%first, %second, "welding stubs created");
        Ok([first, second])
    }
}

/// Unit vector perpendicular to the unit vector `dir`, seeded from the
/// coordinate axis with the smallest component in `dir`.
fn perpendicular(dir: &Vector3) -> Option<Vector3> {
    let seed = if dir.x.abs() <= dir.y.abs() && dir.x.abs() <= dir.z.abs() {
        Vector3::x()
    } else if dir.y.abs() <= dir.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    normalize(&(seed - dir * seed.dot(dir)))
}
