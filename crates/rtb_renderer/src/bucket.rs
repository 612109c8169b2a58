//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon, then copied into the frame buffer.

use rayon::prelude::*;
use rtb_core::Scene;
use rtb_math::Real;

use crate::renderer::shade_pixel;
use crate::{Camera, RenderConfig};

/// A clipped square of the frame, rendered as one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Squared distance from the bucket centre to the frame centre, in
    /// half-pixel units so it stays integral.
    fn centre_distance(&self, frame_width: u32, frame_height: u32) -> u64 {
        let dx = i64::from(2 * self.x + self.width) - i64::from(frame_width);
        let dy = i64::from(2 * self.y + self.height) - i64::from(frame_height);
        (dx * dx + dy * dy) as u64
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Split the frame into buckets, ordered centre-out.
///
/// Edge buckets are clipped to the frame, so every pixel belongs to exactly
/// one bucket. Buckets at equal distance keep row-major order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size as usize)
        .flat_map(move |y| {
            (0..width)
                .step_by(size as usize)
                .map(move |x| Bucket::new(x, y, size.min(width - x), size.min(height - y)))
        })
        .collect();

    buckets.sort_by_key(|bucket| bucket.centre_distance(width, height));
    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<[u8; 3]>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<[u8; 3]>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into a full-frame RGB buffer.
    pub fn write_into(&self, frame: &mut [u8], frame_width: u32) {
        let bucket = &self.bucket;
        let row_len = bucket.width as usize;

        for (local_y, row) in self.pixels.chunks_exact(row_len).enumerate() {
            let start = ((bucket.y as usize + local_y) * frame_width as usize + bucket.x as usize) * 3;
            let dest = &mut frame[start..start + row_len * 3];
            for (out, rgb) in dest.chunks_exact_mut(3).zip(row) {
                out.copy_from_slice(rgb);
            }
        }
    }
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket<T: Real>(
    bucket: &Bucket,
    camera: &Camera<T>,
    scene: &Scene<T>,
    config: &RenderConfig,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(shade_pixel(camera, scene, global_x, global_y, config));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Render all buckets on the rayon pool and assemble them into `frame`.
pub(crate) fn render_tiles<T: Real>(
    camera: &Camera<T>,
    scene: &Scene<T>,
    config: &RenderConfig,
    frame: &mut [u8],
) {
    let buckets = generate_buckets(config.width, config.height, config.tile_size);
    log::debug!("Rendering {} buckets of {} px", buckets.len(), config.tile_size);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, config))
        .collect();

    for result in &results {
        result.write_into(frame, config.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtb_core::reference_scene;

    #[test]
    fn test_buckets_cover_frame_centre_out() {
        let (width, height) = (70, 45);
        let buckets = generate_buckets(width, height, 16);
        assert_eq!(buckets.len(), 5 * 3);

        // Bucket holding the centre pixel (35, 22) goes first
        assert_eq!(buckets[0], Bucket::new(32, 16, 16, 16));
        assert!(buckets
            .windows(2)
            .all(|pair| pair[0].centre_distance(width, height) <= pair[1].centre_distance(width, height)));

        let mut coverage = vec![0u8; (width * height) as usize];
        for bucket in &buckets {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    coverage[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(coverage.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_render_bucket_matches_shade_pixel() {
        let scene = reference_scene::<f32>();
        let config = RenderConfig {
            width: 32,
            height: 18,
            ..RenderConfig::default()
        };
        let camera = Camera::<f32>::new(config.width, config.height, config.fov_degrees);

        let bucket = Bucket::new(8, 4, 5, 3);
        let result = render_bucket(&bucket, &camera, &scene, &config);

        assert_eq!(result.pixels.len(), 15);
        assert_eq!(result.pixels[0], shade_pixel(&camera, &scene, 8, 4, &config));
        assert_eq!(result.pixels[14], shade_pixel(&camera, &scene, 12, 6, &config));
    }

    #[test]
    fn test_write_into() {
        let result = BucketResult::new(Bucket::new(1, 1, 2, 1), vec![[1, 2, 3], [4, 5, 6]]);
        let mut frame = vec![0u8; 4 * 2 * 3];

        result.write_into(&mut frame, 4);

        assert_eq!(&frame[15..21], &[1, 2, 3, 4, 5, 6]);
        assert!(frame[..15].iter().all(|&b| b == 0));
    }
}
