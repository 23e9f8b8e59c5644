//! Test doubles shared by the render unit tests

use crate::foundation::collections::MaterialBucketId;
use crate::foundation::math::Mat4;

use super::buckets::DisplayArrayBucket;
use super::rasterizer::Rasterizer;

/// Draw call seen by [`RecordingRasterizer`], tagged with the material bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedDraw {
    Single(MaterialBucketId),
    Batched(MaterialBucketId),
}

#[derive(Debug, Default)]
pub struct RecordingRasterizer {
    pub model_matrices: Vec<Mat4>,
    pub draws: Vec<RecordedDraw>,
}

impl Rasterizer for RecordingRasterizer {
    fn set_model_matrix(&mut self, matrix: &Mat4) {
        self.model_matrices.push(*matrix);
    }

    fn draw(&mut self, array_bucket: &DisplayArrayBucket) {
        self.draws.push(RecordedDraw::Single(array_bucket.bucket()));
    }

    fn draw_batched(&mut self, array_bucket: &DisplayArrayBucket) {
        self.draws.push(RecordedDraw::Batched(array_bucket.bucket()));
    }
}
