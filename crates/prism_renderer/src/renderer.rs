//! Parallel full-frame rendering.
//!
//! Rows are independent tasks on the rayon pool. Each task owns its row of
//! the image and its own RNG; the tracer is only read.

use prism_core::Eye;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::camera::ImagePlane;
use crate::image::RenderImage;
use crate::record::RayRecorder;
use crate::tracer::{TraceContext, Tracer};

/// Render every pixel of a `width` x `height` view of `eye`.
///
/// The same seed gives the same image regardless of thread count.
pub fn render_parallel(tracer: &Tracer, eye: &Eye, width: u32, height: u32, seed: u64) -> RenderImage {
    let plane = ImagePlane::new(eye, width, height);
    let mut image = RenderImage::new(width, height);
    if width == 0 || height == 0 {
        return image;
    }

    let start = std::time::Instant::now();

    image
        .pixels_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rng = StdRng::seed_from_u64(seed ^ (y as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
            let mut recorder = RayRecorder::new();
            let mut ctx = TraceContext::new(&mut rng, &mut recorder);

            for (x, pixel) in row.iter_mut().enumerate() {
                let colour = tracer.pixel_colour(&plane, x as u32, y as u32, &mut ctx);
                *pixel = colour.extend(1.0);
            }
        });

    log::info!(
        "Rendered {}x{} on {} threads in {:.2?}",
        width,
        height,
        rayon::current_num_threads(),
        start.elapsed()
    );

    image
}
