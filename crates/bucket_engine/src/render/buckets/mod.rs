//! # Material Buckets
//!
//! Partitions drawable geometry by material and render category.
//!
//! ## Architecture
//!
//! - **BucketManager**: owns every material bucket in an arena and indexes
//!   them into category lists (solid, alpha, shadow and instancing variants)
//! - **MaterialBucket**: the draw units of one material
//! - **DisplayArrayBucket**: one (mesh, display array, deformer) draw unit
//!
//! Category lists hold ids into the arena. The "all" list is the only
//! ownership record, so removing a material has one authoritative deletion
//! point no matter how many categories the bucket was listed in.

mod category;
mod display_array_bucket;
mod error;
mod manager;
mod material_bucket;

pub use category::BucketCategory;
pub use display_array_bucket::DisplayArrayBucket;
pub use error::{BucketError, BucketResult};
pub use manager::BucketManager;
pub use material_bucket::MaterialBucket;
