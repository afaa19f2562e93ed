//! Prism Renderer - Whitted-style CPU ray tracing.
//!
//! A recursive ray tracer with Phong shading, mirror and glossy
//! reflection, refraction, and soft shadows from emissive triangles.
//! Images are produced either progressively, one pixel per tick inside a
//! host event loop, or all at once across the rayon pool.

mod camera;
mod config;
mod error;
mod image;
mod object;
mod preview;
mod progressive;
mod record;
mod renderer;
mod sampling;
mod shading;
mod sphere;
mod tracer;
mod triangle;
mod wavefront;
mod world;

pub use camera::ImagePlane;
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use image::RenderImage;
pub use object::{Hit, Intersect, Object, ObjectKind};
pub use preview::PreviewMesh;
pub use progressive::{ProgressiveRender, RenderState, TickOutcome};
pub use record::{RayClass, RayPurpose, RayRecorder, RecordedRay};
pub use renderer::render_parallel;
pub use sampling::{gen_f32, sample_unit_triangle};
pub use shading::{local_illumination, refraction_direction, AIR_IOR, GLASS_IOR};
pub use sphere::Sphere;
pub use tracer::{TraceContext, Tracer};
pub use triangle::Triangle;
pub use wavefront::WavefrontObject;
pub use world::{Origin, World, MIN_HIT_DISTANCE};

/// Re-export common math types from prism_math
pub use prism_math::{Ray, UVec2, Vec3};
