//! Seams to the host modelling application.
//!
//! The engine never owns model geometry. It reads bar geometry through
//! [`ModelStore`], writes edits back through the same trait, asks
//! [`SolidGeometry`] for part extents, and attaches parts through
//! [`AssemblyStore`].

mod memory;

pub use memory::MemoryModel;

use crate::error::HostError;
use crate::geometry::{Aabb, BarGeometry};
use crate::index::ObjectId;

/// Read/write access to bar objects in the host model.
pub trait ModelStore {
    /// Returns the geometry of `id`, or `None` if the object does not exist.
    fn geometry(&self, id: ObjectId) -> Option<&BarGeometry>;

    /// Replaces the geometry of an existing object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the model rejects the edit.
    fn replace_geometry(&mut self, id: ObjectId, geometry: BarGeometry) -> Result<(), HostError>;

    /// Creates a new bar and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the model rejects the new object.
    fn create_bar(&mut self, geometry: BarGeometry) -> Result<ObjectId, HostError>;

    /// Deletes an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or cannot be deleted.
    fn delete(&mut self, id: ObjectId) -> Result<(), HostError>;

    /// Commits pending edits.
    ///
    /// # Errors
    ///
    /// Returns an error if the model refuses the commit.
    fn commit(&mut self) -> Result<(), HostError>;
}

/// Access to solid extents of model parts.
pub trait SolidGeometry {
    /// Axis-aligned bounding box of `part`, or `None` if it is unavailable.
    fn bounding_box(&self, part: ObjectId) -> Option<Aabb>;
}

/// Assembly membership edits.
pub trait AssemblyStore {
    /// Adds `part` to `assembly`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model rejects the attachment.
    fn attach(&mut self, assembly: ObjectId, part: ObjectId) -> Result<(), HostError>;

    /// Writes back the modified assembly.
    ///
    /// # Errors
    ///
    /// Returns an error if the model rejects the modification.
    fn modify_assembly(&mut self, assembly: ObjectId) -> Result<(), HostError>;
}
