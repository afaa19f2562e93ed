//! The set of intersectable objects and the nearest-hit resolver.

use std::sync::Arc;

use prism_core::{PointLight, SceneDescription, Shape};
use prism_math::{Interval, Ray};

use crate::object::{Hit, Object};
use crate::record::{RayPurpose, RayRecorder};
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use crate::wavefront::WavefrontObject;

/// Closest accepted hit distance along a unit direction.
pub const MIN_HIT_DISTANCE: f32 = 1e-4;

/// The surface a ray leaves from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Origin {
    pub object: usize,
    pub part: usize,
}

/// Objects and point lights, read-only while rendering.
pub struct World {
    objects: Vec<Object>,
    lights: Vec<PointLight>,
    /// Indices of emissive triangles
    area_lights: Vec<usize>,
    scene_scale: f32,
}

impl World {
    pub fn new(objects: Vec<Object>, lights: Vec<PointLight>, scene_scale: f32) -> Self {
        let area_lights = objects
            .iter()
            .enumerate()
            .filter(|(_, object)| object.as_area_light().is_some())
            .map(|(i, _)| i)
            .collect();

        Self {
            objects,
            lights,
            area_lights,
            scene_scale,
        }
    }

    /// Build objects for every shape, keeping file order.
    pub fn from_scene(scene: &SceneDescription) -> Self {
        let objects = scene
            .shapes
            .iter()
            .map(|shape| match shape {
                Shape::Sphere {
                    center,
                    radius,
                    material,
                } => Object::Sphere(Sphere::new(*center, *radius, Arc::clone(material))),
                Shape::Triangle {
                    vertices,
                    texcoords,
                    material,
                } => Object::Triangle(Triangle::new(*vertices, *texcoords, Arc::clone(material))),
                Shape::Wavefront(wavefront) => Object::Mesh(WavefrontObject::from_wavefront(wavefront)),
            })
            .collect();

        let world = Self::new(objects, scene.lights.clone(), scene.scene_scale);
        log::debug!(
            "World has {} objects, {} point lights, {} area lights",
            world.objects.len(),
            world.lights.len(),
            world.area_lights.len()
        );
        world
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> &Object {
        &self.objects[index]
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Emissive triangles with their object index.
    pub fn area_lights(&self) -> impl Iterator<Item = (usize, &Triangle)> + '_ {
        self.area_lights
            .iter()
            .filter_map(|&i| self.objects[i].as_area_light().map(|tri| (i, tri)))
    }

    pub fn scene_scale(&self) -> f32 {
        self.scene_scale
    }

    /// Nearest hit along `ray` over all objects.
    ///
    /// The direction is normalized first, so `t` is a distance. A convex
    /// origin object is skipped entirely; a mesh origin is tested without
    /// the part the ray left from. Equal distances keep the earlier object.
    pub fn first_hit(
        &self,
        ray: &Ray,
        origin: Option<Origin>,
        purpose: RayPurpose,
        recorder: &mut RayRecorder,
    ) -> Option<Hit<'_>> {
        let ray = ray.normalized();
        let mut ray_t = Interval::new(MIN_HIT_DISTANCE, f32::INFINITY);
        let mut nearest: Option<Hit<'_>> = None;

        for (index, object) in self.objects.iter().enumerate() {
            let exclude_part = match origin {
                Some(o) if o.object == index => {
                    if object.kind().is_convex() {
                        continue;
                    }
                    Some(o.part)
                }
                _ => None,
            };

            if let Some(mut hit) = object.intersect(&ray, exclude_part, ray_t) {
                hit.object = index;
                // Don't accept anything farther than this
                ray_t = ray_t.with_max(hit.t);
                nearest = Some(hit);
            }
        }

        recorder.record(&ray, purpose, nearest.map(|h| h.point), self.scene_scale);
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Material, Mesh};
    use prism_math::Vec3;

    fn material() -> Arc<prism_core::Material> {
        Arc::new(Material::fallback())
    }

    fn spheres() -> World {
        let objects = vec![
            Object::Sphere(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, material())),
            Object::Sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, material())),
        ];
        World::new(objects, Vec::new(), 1.0)
    }

    #[test]
    fn test_nearest_object_wins_regardless_of_order() {
        let world = spheres();
        let mut recorder = RayRecorder::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));

        let hit = world.first_hit(&ray, None, RayPurpose::Shading, &mut recorder).unwrap();
        assert_eq!(hit.object, 1);
        assert!((hit.t - 4.0).abs() < 1e-4, "t is a distance: {}", hit.t);
    }

    #[test]
    fn test_convex_origin_is_skipped() {
        let world = spheres();
        let mut recorder = RayRecorder::new();

        // Leaving the near sphere's front surface toward -Z
        let ray = Ray::new(Vec3::new(0.0, 0.0, -4.0), Vec3::new(0.0, 0.0, -1.0));
        let origin = Some(Origin { object: 1, part: 0 });
        let hit = world.first_hit(&ray, origin, RayPurpose::Shading, &mut recorder).unwrap();
        assert_eq!(hit.object, 0);
    }

    #[test]
    fn test_mesh_origin_can_hit_its_other_faces() {
        let positions = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
        ];
        let mesh = Mesh::new(positions, vec![0, 1, 2, 3, 4, 5], None, None, vec![0, 0]);
        let objects = vec![Object::Mesh(WavefrontObject::new(Arc::new(mesh), vec![material()]))];
        let world = World::new(objects, Vec::new(), 1.0);
        let mut recorder = RayRecorder::new();

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let origin = Some(Origin { object: 0, part: 0 });
        let hit = world.first_hit(&ray, origin, RayPurpose::Shading, &mut recorder).unwrap();
        assert_eq!((hit.object, hit.part), (0, 1));
    }

    #[test]
    fn test_recording_does_not_change_result() {
        let world = spheres();
        let ray = Ray::new(Vec3::new(0.0, 0.3, 0.0), Vec3::new(0.0, 0.0, -1.0));

        let mut quiet = RayRecorder::new();
        let mut loud = RayRecorder::new();
        loud.arm();

        let a = world.first_hit(&ray, None, RayPurpose::Shading, &mut quiet).map(|h| (h.object, h.t));
        let b = world.first_hit(&ray, None, RayPurpose::Shading, &mut loud).map(|h| (h.object, h.t));
        assert_eq!(a, b);
        assert!(quiet.rays().is_empty());
        assert_eq!(loud.rays().len(), 1);
    }

    #[test]
    fn test_area_lights_are_emissive_triangles() {
        let lamp = Arc::new(Material {
            emission: Vec3::ONE,
            ..Material::fallback()
        });
        let objects = vec![
            Object::Sphere(Sphere::new(Vec3::ZERO, 1.0, lamp.clone())),
            Object::Triangle(Triangle::new([Vec3::ZERO, Vec3::X, Vec3::Y], None, material())),
            Object::Triangle(Triangle::new([Vec3::ZERO, Vec3::X, Vec3::Y], None, lamp)),
        ];
        let world = World::new(objects, Vec::new(), 1.0);

        let lights: Vec<usize> = world.area_lights().map(|(i, _)| i).collect();
        assert_eq!(lights, vec![2]);
    }
}
