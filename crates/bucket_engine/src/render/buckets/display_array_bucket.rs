//! Per-geometry draw unit of a material bucket

use std::rc::{Rc, Weak};

use crate::foundation::collections::MaterialBucketId;
use crate::render::display_array::{Deformer, DisplayArray, DisplayArrayStorage, MeshMaterial, MeshUser};

/// One (mesh, display array, deformer) tuple drawn with a material
///
/// The geometry references are weak: the scene graph owns the mesh, the
/// array and the deformer. Callers remove a display-array bucket before the
/// objects it refers to are destroyed; accessors return `None` for a
/// reference that was never set or has already gone away.
///
/// A unit is attached to exactly one material bucket and cannot be
/// duplicated:
///
/// ```compile_fail
/// use bucket_engine::prelude::*;
///
/// fn duplicate(unit: DisplayArrayBucket) -> (DisplayArrayBucket, DisplayArrayBucket) {
///     (unit.clone(), unit)
/// }
/// ```
#[derive(Debug)]
pub struct DisplayArrayBucket {
    bucket: MaterialBucketId,
    display_array: Option<Weak<dyn DisplayArray>>,
    mesh: Option<Weak<dyn MeshUser>>,
    mesh_material: Option<Weak<MeshMaterial>>,
    deformer: Option<Weak<dyn Deformer>>,
}

impl DisplayArrayBucket {
    /// Create a draw unit for the given material bucket with no geometry attached
    pub const fn new(bucket: MaterialBucketId) -> Self {
        Self {
            bucket,
            display_array: None,
            mesh: None,
            mesh_material: None,
            deformer: None,
        }
    }

    /// Observe a display array
    #[must_use]
    pub fn with_display_array(mut self, display_array: &Rc<dyn DisplayArray>) -> Self {
        self.display_array = Some(Rc::downgrade(display_array));
        self
    }

    /// Observe the mesh instance that owns the geometry
    #[must_use]
    pub fn with_mesh(mut self, mesh: &Rc<dyn MeshUser>) -> Self {
        self.mesh = Some(Rc::downgrade(mesh));
        self
    }

    /// Observe the mesh material slot
    #[must_use]
    pub fn with_mesh_material(mut self, mesh_material: &Rc<MeshMaterial>) -> Self {
        self.mesh_material = Some(Rc::downgrade(mesh_material));
        self
    }

    /// Observe a deformer
    #[must_use]
    pub fn with_deformer(mut self, deformer: &Rc<dyn Deformer>) -> Self {
        self.deformer = Some(Rc::downgrade(deformer));
        self
    }

    /// Material bucket this unit is drawn with
    pub const fn bucket(&self) -> MaterialBucketId {
        self.bucket
    }

    /// Observed display array
    pub fn display_array(&self) -> Option<Rc<dyn DisplayArray>> {
        upgrade(self.display_array.as_ref())
    }

    /// Observed mesh instance
    pub fn mesh(&self) -> Option<Rc<dyn MeshUser>> {
        upgrade(self.mesh.as_ref())
    }

    /// Observed mesh material slot
    pub fn mesh_material(&self) -> Option<Rc<MeshMaterial>> {
        upgrade(self.mesh_material.as_ref())
    }

    /// Observed deformer
    pub fn deformer(&self) -> Option<Rc<dyn Deformer>> {
        upgrade(self.deformer.as_ref())
    }

    /// True when the display array is stored in batching mode
    pub fn use_batching(&self) -> bool {
        self.display_array()
            .is_some_and(|array| array.storage() == DisplayArrayStorage::Batching)
    }

    /// Point this unit at another material bucket
    ///
    /// Only the back-reference changes. Detaching from the old bucket and
    /// attaching to the new one is up to the caller, see
    /// [`BucketManager::move_display_array_bucket`](super::BucketManager::move_display_array_bucket).
    pub fn change_material_bucket(&mut self, bucket: MaterialBucketId) {
        self.bucket = bucket;
    }
}

fn upgrade<T: ?Sized>(reference: Option<&Weak<T>>) -> Option<Rc<T>> {
    let reference = reference?;
    let upgraded = reference.upgrade();
    debug_assert!(upgraded.is_some(), "display array bucket outlived its geometry");
    upgraded
}
