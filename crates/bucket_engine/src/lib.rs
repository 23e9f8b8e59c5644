//! # Bucket Engine
//!
//! Material bucket management for a real-time rasterizer.
//!
//! ## Features
//!
//! - **Find-or-create lookup**: one bucket per material identity
//! - **Category index**: solid, alpha, depth sorted alpha, shadow and
//!   instanced lists, with a bucket listed in several at once
//! - **Scene merge**: move every bucket of one manager into another
//! - **Draw submission**: per-pass iteration driving material shaders
//!
//! ## Quick Start
//!
//! ```rust
//! use bucket_engine::prelude::*;
//!
//! let text = MaterialRef::new(BasicMaterial::new("text", MaterialFlags::empty()));
//! let mut manager = BucketManager::new(text);
//!
//! let glass = MaterialRef::new(BasicMaterial::new(
//!     "glass",
//!     MaterialFlags::ALPHA | MaterialFlags::ALPHA_DEPTH,
//! ));
//! let (bucket, created) = manager.find_bucket(&glass);
//! assert!(created);
//! assert!(manager.contains(BucketCategory::AlphaDepth, bucket));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            collections::{DisplayArrayBucketId, MaterialBucketId},
            math::{Mat4, Transform, Vec3},
        },
        render::{
            BasicMaterial, BucketCategory, BucketError, BucketManager, BucketManagerConfig, BucketRenderer,
            BucketResult, DisplayArray, DisplayArrayBucket, DisplayArrayStorage, DrawStats, GeometryArray,
            LookupStrategy, MaterialBucket, MaterialFlags, MaterialRef, MaterialShader, MeshInstance, MeshMaterial,
            MeshUser, PolyMaterial, Rasterizer, RenderPass, ShaderRef, WeakMaterialRef,
        },
    };
}
