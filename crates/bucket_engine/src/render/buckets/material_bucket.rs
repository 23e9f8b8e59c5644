//! Per-material aggregation of draw units

use crate::foundation::collections::{DisplayArrayArena, DisplayArrayBucketId, MaterialBucketId};
use crate::render::material::{MaterialRef, WeakMaterialRef};
use crate::render::shader::ShaderRef;

use super::DisplayArrayBucket;

/// Draw units sharing one material
///
/// The material is owned elsewhere and only observed. Callers remove a
/// material from the manager before dropping it.
pub struct MaterialBucket {
    material: WeakMaterialRef,
    shader: Option<ShaderRef>,
    display_array_buckets: DisplayArrayArena<DisplayArrayBucket>,
    /// Attachment order of the units in the arena
    order: Vec<DisplayArrayBucketId>,
}

impl MaterialBucket {
    /// Create an empty bucket observing a material
    pub fn new(material: &MaterialRef) -> Self {
        Self {
            material: material.downgrade(),
            shader: material.shader(),
            display_array_buckets: DisplayArrayArena::with_key(),
            order: Vec::new(),
        }
    }

    /// Material all units of this bucket are drawn with
    ///
    /// `None` once the material was dropped while still bucketed.
    pub fn material(&self) -> Option<MaterialRef> {
        let material = self.material.upgrade();
        debug_assert!(material.is_some(), "material bucket outlived its material");
        material
    }

    /// Non-owning handle to the material
    pub const fn material_handle(&self) -> &WeakMaterialRef {
        &self.material
    }

    /// Whether this bucket is for `material`
    pub fn is_material(&self, material: &MaterialRef) -> bool {
        self.material.is(material)
    }

    /// Material name for logs
    pub fn material_name(&self) -> String {
        self.material
            .upgrade()
            .map_or_else(|| "<dropped>".to_string(), |material| material.name().to_string())
    }

    /// Shader cached from the material at creation or the last
    /// [`update_shader`](Self::update_shader)
    pub const fn shader(&self) -> Option<&ShaderRef> {
        self.shader.as_ref()
    }

    /// Re-read the shader from the material, e.g. after a recompile
    pub fn update_shader(&mut self) {
        self.shader = self.material().and_then(|material| material.shader());
        log::trace!(
            "Updated shader of bucket '{}' (present: {})",
            self.material_name(),
            self.shader.is_some()
        );
    }

    /// Draw units in submission order
    pub fn display_array_buckets(&self) -> impl Iterator<Item = (DisplayArrayBucketId, &DisplayArrayBucket)> {
        self.order
            .iter()
            .filter_map(|&id| self.display_array_buckets.get(id).map(|unit| (id, unit)))
    }

    /// Look up one draw unit
    pub fn display_array_bucket(&self, id: DisplayArrayBucketId) -> Option<&DisplayArrayBucket> {
        self.display_array_buckets.get(id)
    }

    /// Look up one draw unit for modification
    pub fn display_array_bucket_mut(&mut self, id: DisplayArrayBucketId) -> Option<&mut DisplayArrayBucket> {
        self.display_array_buckets.get_mut(id)
    }

    /// Attach a draw unit after all others, taking ownership of it
    pub fn add_display_array_bucket(&mut self, array_bucket: DisplayArrayBucket) -> DisplayArrayBucketId {
        let id = self.display_array_buckets.insert(array_bucket);
        self.order.push(id);
        id
    }

    /// Detach a draw unit and hand it back to the caller
    pub fn remove_display_array_bucket(&mut self, id: DisplayArrayBucketId) -> Option<DisplayArrayBucket> {
        let unit = self.display_array_buckets.remove(id)?;
        self.order.retain(|&attached| attached != id);
        Some(unit)
    }

    /// Number of attached draw units
    pub fn len(&self) -> usize {
        self.display_array_buckets.len()
    }

    /// Whether no draw unit is attached
    pub fn is_empty(&self) -> bool {
        self.display_array_buckets.is_empty()
    }

    /// Point every attached unit at this bucket's new id after a move
    /// between managers
    pub(crate) fn rebind(&mut self, id: MaterialBucketId) {
        for array_bucket in self.display_array_buckets.values_mut() {
            array_bucket.change_material_bucket(id);
        }
    }
}

impl std::fmt::Debug for MaterialBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialBucket")
            .field("material", &self.material)
            .field("has_shader", &self.shader.is_some())
            .field("display_array_buckets", &self.display_array_buckets.len())
            .finish()
    }
}

impl Drop for MaterialBucket {
    fn drop(&mut self) {
        log::trace!(
            "MaterialBucket '{}' dropping with {} display array buckets",
            self.material_name(),
            self.display_array_buckets.len()
        );
    }
}
