use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::HostError;
use crate::geometry::{Aabb, BarGeometry};
use crate::index::ObjectId;

use super::{AssemblyStore, ModelStore, SolidGeometry};

/// In-memory model implementing every host trait.
///
/// Edits become visible immediately; `commit` only counts how often it was
/// called. Objects listed with [`reject_edits`](Self::reject_edits) refuse
/// geometry replacement and deletion.
#[derive(Debug, Default)]
pub struct MemoryModel {
    bars: BTreeMap<ObjectId, BarGeometry>,
    boxes: BTreeMap<ObjectId, Aabb>,
    assemblies: BTreeMap<ObjectId, BTreeSet<ObjectId>>,
    locked: HashSet<ObjectId>,
    next_id: i64,
    commits: usize,
    assembly_writes: usize,
}

impl MemoryModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    /// Adds a bar and returns its identifier.
    pub fn add_bar(&mut self, geometry: BarGeometry) -> ObjectId {
        let id = self.allocate();
        self.bars.insert(id, geometry);
        id
    }

    /// Adds a part with a known bounding box and returns its identifier.
    pub fn add_part(&mut self, extent: Aabb) -> ObjectId {
        let id = self.allocate();
        self.boxes.insert(id, extent);
        id
    }

    /// Adds an empty assembly and returns its identifier.
    pub fn add_assembly(&mut self) -> ObjectId {
        let id = self.allocate();
        self.assemblies.insert(id, BTreeSet::new());
        id
    }

    /// Makes every later edit of `id` fail.
    pub fn reject_edits(&mut self, id: ObjectId) {
        self.locked.insert(id);
    }

    /// Members of `assembly`, if it exists.
    #[must_use]
    pub fn members(&self, assembly: ObjectId) -> Option<&BTreeSet<ObjectId>> {
        self.assemblies.get(&assembly)
    }

    /// Number of bars in the model.
    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// How many times `commit` has been called.
    #[must_use]
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// How many times an assembly was written back.
    #[must_use]
    pub fn assembly_writes(&self) -> usize {
        self.assembly_writes
    }

    fn check_unlocked(&self, id: ObjectId) -> Result<(), HostError> {
        if self.locked.contains(&id) {
            Err(HostError::Rejected {
                id,
                reason: "object is locked".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl ModelStore for MemoryModel {
    fn geometry(&self, id: ObjectId) -> Option<&BarGeometry> {
        self.bars.get(&id)
    }

    fn replace_geometry(&mut self, id: ObjectId, geometry: BarGeometry) -> Result<(), HostError> {
        self.check_unlocked(id)?;
        let slot = self.bars.get_mut(&id).ok_or(HostError::ObjectNotFound(id))?;
        *slot = geometry;
        Ok(())
    }

    fn create_bar(&mut self, geometry: BarGeometry) -> Result<ObjectId, HostError> {
        Ok(self.add_bar(geometry))
    }

    fn delete(&mut self, id: ObjectId) -> Result<(), HostError> {
        self.check_unlocked(id)?;
        self.bars
            .remove(&id)
            .map(|_| ())
            .ok_or(HostError::ObjectNotFound(id))
    }

    fn commit(&mut self) -> Result<(), HostError> {
        self.commits += 1;
        Ok(())
    }
}

impl SolidGeometry for MemoryModel {
    fn bounding_box(&self, part: ObjectId) -> Option<Aabb> {
        self.boxes.get(&part).copied()
    }
}

impl AssemblyStore for MemoryModel {
    fn attach(&mut self, assembly: ObjectId, part: ObjectId) -> Result<(), HostError> {
        self.check_unlocked(part)?;
        self.assemblies
            .get_mut(&assembly)
            .ok_or(HostError::ObjectNotFound(assembly))?
            .insert(part);
        Ok(())
    }

    fn modify_assembly(&mut self, assembly: ObjectId) -> Result<(), HostError> {
        if !self.assemblies.contains_key(&assembly) {
            return Err(HostError::ObjectNotFound(assembly));
        }
        self.assembly_writes += 1;
        Ok(())
    }
}
