//! # Rendering System
//!
//! Material bucket management for the rasterizer.
//!
//! ## Architecture
//!
//! - **Buckets**: per-material draw units indexed by render category
//! - **Materials**: identity handles and classification predicates
//! - **Shaders**: the activate/update/deactivate capability bound to a material
//! - **Display arrays**: the scene-owned geometry that draw units observe
//! - **Bucket renderer**: walks category lists and submits them to a rasterizer
//!
//! The scene layer creates buckets through [`BucketManager::find_bucket`] and
//! attaches draw units to them; the frame loop reads category lists in a fixed
//! order through [`BucketRenderer`].

pub mod bucket_renderer;
pub mod buckets;
pub mod config;
pub mod display_array;
pub mod material;
pub mod rasterizer;
pub mod shader;

#[cfg(test)]
pub(crate) mod test_support;

pub use bucket_renderer::{BucketRenderer, DrawStats, RenderPass};
pub use buckets::{BucketCategory, BucketError, BucketManager, BucketResult, DisplayArrayBucket, MaterialBucket};
pub use config::{BucketManagerConfig, LookupStrategy};
pub use display_array::{
    Deformer, DisplayArray, DisplayArrayStorage, GeometryArray, MeshInstance, MeshMaterial, MeshUser,
};
pub use material::{BasicMaterial, MaterialDescriptor, MaterialFlags, MaterialRef, PolyMaterial, WeakMaterialRef};
pub use rasterizer::Rasterizer;
pub use shader::{shader_ref, MaterialShader, ShaderRef, TransformShader};
