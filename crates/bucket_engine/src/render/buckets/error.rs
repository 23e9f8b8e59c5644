//! Bucket manager errors

use crate::foundation::collections::{DisplayArrayBucketId, MaterialBucketId};

/// Result type for id-based bucket operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors reported for stale or foreign bucket ids
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BucketError {
    /// The material bucket was removed or belongs to another manager
    #[error("Unknown material bucket: {0:?}")]
    UnknownBucket(MaterialBucketId),

    /// The display-array bucket is not attached to the material bucket
    #[error("Unknown display array bucket {array:?} in material bucket {bucket:?}")]
    UnknownDisplayArrayBucket {
        /// Material bucket that was searched
        bucket: MaterialBucketId,
        /// Missing display-array bucket
        array: DisplayArrayBucketId,
    },
}
