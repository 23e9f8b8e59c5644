//! Geometry-side collaborators observed by display-array buckets
//!
//! The scene graph owns these objects. Buckets only keep weak references to
//! them and never extend their lifetime.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Transform};

/// Storage mode of a geometry array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayArrayStorage {
    /// Uploaded once, drawn per object
    #[default]
    Static,
    /// Rewritten by a deformer every frame
    Dynamic,
    /// Merged with other arrays of the same material, drawn in one call
    Batching,
}

/// Vertex and index data for one mesh/material pair
pub trait DisplayArray: fmt::Debug {
    /// Storage mode of the array
    fn storage(&self) -> DisplayArrayStorage;

    /// Number of vertices
    fn vertex_count(&self) -> usize;

    /// Number of indices
    fn index_count(&self) -> usize;
}

/// Mesh instance placed in the scene
pub trait MeshUser: fmt::Debug {
    /// World transform of the instance
    fn model_matrix(&self) -> Mat4;
}

/// Vertex deformer (armature, shape keys) applied to a display array
pub trait Deformer: fmt::Debug {
    /// Whether the deformer rewrites vertices every frame
    fn is_dynamic(&self) -> bool;
}

/// Material slot of a mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshMaterial {
    /// Slot index in the mesh
    pub index: u32,
    /// Name of the slot
    pub name: String,
}

impl MeshMaterial {
    /// Create a material slot
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Plain geometry array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryArray {
    storage: DisplayArrayStorage,
    vertex_count: usize,
    index_count: usize,
}

impl GeometryArray {
    /// Create an array description
    pub const fn new(storage: DisplayArrayStorage, vertex_count: usize, index_count: usize) -> Self {
        Self {
            storage,
            vertex_count,
            index_count,
        }
    }
}

impl DisplayArray for GeometryArray {
    fn storage(&self) -> DisplayArrayStorage {
        self.storage
    }

    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn index_count(&self) -> usize {
        self.index_count
    }
}

/// Named mesh instance with a transform
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInstance {
    /// Instance name
    pub name: String,
    /// World transform
    pub transform: Transform,
}

impl MeshInstance {
    /// Create an instance
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }
}

impl MeshUser for MeshInstance {
    fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }
}
