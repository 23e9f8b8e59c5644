//! Rasterizer seam consumed by shaders and draw submission

use crate::foundation::math::Mat4;

use super::buckets::DisplayArrayBucket;

/// Graphics backend that receives draw calls for display-array buckets
///
/// Sorting within a category (back-to-front alpha, front-to-back solid) is
/// the rasterizer's business; buckets arrive in category list order.
pub trait Rasterizer {
    /// Set the model matrix for the next draw
    fn set_model_matrix(&mut self, matrix: &Mat4);

    /// Draw one display-array bucket with the currently bound shader
    fn draw(&mut self, array_bucket: &DisplayArrayBucket);

    /// Draw a display-array bucket whose array is batched with others
    fn draw_batched(&mut self, array_bucket: &DisplayArrayBucket);
}
