//! Intersectable scene objects.

use prism_core::Material;
use prism_math::{Interval, Ray, Vec2, Vec3};

use crate::preview::PreviewMesh;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use crate::wavefront::WavefrontObject;

/// Record of a ray-object intersection.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit normal at the point
    pub normal: Vec3,
    pub texcoords: Vec2,
    /// Ray parameter of the intersection
    pub t: f32,
    /// Index of the object in the world
    pub object: usize,
    /// Part of the object that was hit (triangle index for meshes, else 0)
    pub part: usize,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Which primitive an object is.
///
/// Convex objects can never be hit by a ray leaving their own surface, so
/// the resolver skips them as a whole. Meshes are still tested, minus
/// the part the ray left from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Sphere,
    Triangle,
    Mesh,
}

impl ObjectKind {
    pub fn is_convex(self) -> bool {
        !matches!(self, ObjectKind::Mesh)
    }
}

/// Something a ray can hit.
pub trait Intersect: Send + Sync {
    /// Nearest intersection with `t` strictly inside `ray_t`.
    ///
    /// `exclude_part` names a part that must not be reported. The returned
    /// hit has `object` set to 0; the world fills in the real index.
    fn intersect<'a>(&'a self, ray: &Ray, exclude_part: Option<usize>, ray_t: Interval) -> Option<Hit<'a>>;

    /// Tessellation for a rasterising preview.
    fn preview(&self) -> PreviewMesh;
}

/// A scene object owning its geometry and a shared material handle.
pub enum Object {
    Sphere(Sphere),
    Triangle(Triangle),
    Mesh(WavefrontObject),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Sphere(_) => ObjectKind::Sphere,
            Object::Triangle(_) => ObjectKind::Triangle,
            Object::Mesh(_) => ObjectKind::Mesh,
        }
    }

    fn as_intersect(&self) -> &dyn Intersect {
        match self {
            Object::Sphere(sphere) => sphere,
            Object::Triangle(triangle) => triangle,
            Object::Mesh(mesh) => mesh,
        }
    }

    pub fn intersect<'a>(&'a self, ray: &Ray, exclude_part: Option<usize>, ray_t: Interval) -> Option<Hit<'a>> {
        self.as_intersect().intersect(ray, exclude_part, ray_t)
    }

    /// Texture colour and alpha at a hit on this object.
    pub fn texture_colour(&self, hit: &Hit<'_>) -> (Vec3, f32) {
        hit.material.texture_colour(hit.texcoords)
    }

    pub fn preview(&self) -> PreviewMesh {
        self.as_intersect().preview()
    }

    /// The triangle, if this object is an emissive triangle.
    pub fn as_area_light(&self) -> Option<&Triangle> {
        match self {
            Object::Triangle(triangle) if triangle.material().is_emissive() => Some(triangle),
            _ => None,
        }
    }

    /// Every material this object can report in a hit.
    pub fn materials(&self) -> Vec<&Material> {
        match self {
            Object::Sphere(sphere) => vec![sphere.material()],
            Object::Triangle(triangle) => vec![triangle.material()],
            Object::Mesh(mesh) => mesh.materials().iter().map(|m| m.as_ref()).collect(),
        }
    }
}
