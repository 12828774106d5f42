mod record;

pub use record::{EndpointRecord, ObjectId, RecordId};

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::{debug, info, instrument, warn};

use crate::error::IndexError;
use crate::host::ModelStore;
use crate::math::{points_equal, Point3, POINT_TOLERANCE};

/// Why an object was left out of the index during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The host model has no object with this identifier.
    NotInModel,
    /// The object's geometry exposes fewer than two points.
    TooFewPoints,
}

/// An object that extraction skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedObject {
    /// The skipped object.
    pub id: ObjectId,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of [`EndpointIndex::extract`].
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// Objects that now have a record, in extraction order.
    pub indexed: Vec<ObjectId>,
    /// Objects that were skipped.
    pub skipped: Vec<SkippedObject>,
}

/// Owned cache of two endpoints and a unit direction per tracked object.
///
/// Records live in an arena keyed by [`RecordId`]; external identifiers are
/// mapped into the arena so lookups never depend on the host's object
/// identity. Iteration follows arena order, which is stable between calls.
#[derive(Debug, Default)]
pub struct EndpointIndex {
    records: SlotMap<RecordId, EndpointRecord>,
    lookup: HashMap<ObjectId, RecordId>,
}

impl EndpointIndex {
    /// Creates a new, empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents of the index with the endpoints of `ids`.
    ///
    /// Objects that are missing from the model or expose fewer than two
    /// points are skipped and reported; extraction continues with the rest.
    /// Directions are not computed; call
    /// [`compute_directions`](Self::compute_directions) afterwards.
    #[instrument(skip(self, store))]
    pub fn extract<S: ModelStore + ?Sized>(&mut self, store: &S, ids: &[ObjectId]) -> ExtractReport {
        self.clear();
        let mut report = ExtractReport::default();

        for &id in ids {
            let Some(geometry) = store.geometry(id) else {
                warn!(%id, "object not found in model, skipped");
                report.skipped.push(SkippedObject {
                    id,
                    reason: SkipReason::NotInModel,
                });
                continue;
            };
            let Some(span) = geometry.endpoints() else {
                warn!(%id, "object does not expose two points, skipped");
                report.skipped.push(SkippedObject {
                    id,
                    reason: SkipReason::TooFewPoints,
                });
                continue;
            };
            self.insert(id, span.start, span.end);
            report.indexed.push(id);
        }

        info!(
            indexed = report.indexed.len(),
            skipped = report.skipped.len(),
            "endpoint extraction complete"
        );
        report
    }

    /// Inserts (or overwrites) the record for `id` without a direction.
    pub fn insert(&mut self, id: ObjectId, start: Point3, end: Point3) -> RecordId {
        let record = EndpointRecord::new(id, [start, end]);
        if let Some(&key) = self.lookup.get(&id) {
            if let Some(slot) = self.records.get_mut(key) {
                *slot = record;
                return key;
            }
        }
        let key = self.records.insert(record);
        self.lookup.insert(id, key);
        key
    }

    /// Recomputes the direction of every record.
    ///
    /// Returns the objects whose endpoints are too close to define a
    /// direction; those records keep no direction.
    pub fn compute_directions(&mut self) -> Vec<ObjectId> {
        let mut degenerate = Vec::new();
        for record in self.records.values_mut() {
            if !record.refresh_direction() {
                warn!(id = %record.id, "bar is too short to define a direction");
                degenerate.push(record.id);
            }
        }
        degenerate
    }

    /// Replaces the first endpoint of `id` that matches `old` within
    /// [`POINT_TOLERANCE`] per axis.
    ///
    /// The other endpoint and the stored direction are left untouched; call
    /// [`compute_directions`](Self::compute_directions) to recompute it.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not indexed or no endpoint matches `old`.
    pub fn update(&mut self, id: ObjectId, old: &Point3, new: Point3) -> Result<(), IndexError> {
        let record = self.record_mut(id)?;
        let slot = record
            .endpoints
            .iter_mut()
            .find(|p| points_equal(p, old, POINT_TOLERANCE))
            .ok_or(IndexError::EndpointNotFound {
                id,
                x: old.x,
                y: old.y,
                z: old.z,
            })?;
        *slot = new;
        debug!(%id, x = new.x, y = new.y, z = new.z, "cached endpoint updated");
        Ok(())
    }

    /// Overwrites both endpoints of `id` and refreshes its direction.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not indexed.
    pub fn set_endpoints(&mut self, id: ObjectId, start: Point3, end: Point3) -> Result<(), IndexError> {
        let record = self.record_mut(id)?;
        record.endpoints = [start, end];
        if !record.refresh_direction() {
            warn!(%id, "bar is too short to define a direction");
        }
        Ok(())
    }

    /// Removes the record for `id`, returning it if it existed.
    pub fn remove(&mut self, id: ObjectId) -> Option<EndpointRecord> {
        let key = self.lookup.remove(&id)?;
        self.records.remove(key)
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.lookup.clear();
    }

    /// Returns the record for `id`, or an error if it is not indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not indexed.
    pub fn record(&self, id: ObjectId) -> Result<&EndpointRecord, IndexError> {
        self.lookup
            .get(&id)
            .and_then(|&key| self.records.get(key))
            .ok_or(IndexError::NotIndexed(id))
    }

    fn record_mut(&mut self, id: ObjectId) -> Result<&mut EndpointRecord, IndexError> {
        self.lookup
            .get(&id)
            .and_then(|&key| self.records.get_mut(key))
            .ok_or(IndexError::NotIndexed(id))
    }

    /// Returns `true` if `id` has a record.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.lookup.contains_key(&id)
    }

    /// Iterates over all records in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &EndpointRecord> {
        self.records.values()
    }

    /// Number of indexed objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
