//! Specialized collection types

pub use slotmap::{Key, SlotMap};

slotmap::new_key_type! {
    /// Stable handle to a material bucket owned by a bucket manager
    pub struct MaterialBucketId;

    /// Stable handle to a display-array bucket owned by a material bucket
    pub struct DisplayArrayBucketId;
}

/// Arena of material buckets keyed by [`MaterialBucketId`]
pub type BucketArena<T> = SlotMap<MaterialBucketId, T>;

/// Arena of display-array buckets keyed by [`DisplayArrayBucketId`]
pub type DisplayArrayArena<T> = SlotMap<DisplayArrayBucketId, T>;
