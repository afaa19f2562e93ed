//! Recursive Whitted-style light transport.
//!
//! Every hit gathers emission and ambient light, a mirror or glossy
//! reflection, direct light from point lights and emissive triangles, and a
//! refracted ray blended in by the surface opacity.

use prism_core::SceneDescription;
use prism_math::{Ray, Vec3, VectorExt};
use rand::RngCore;

use crate::camera::ImagePlane;
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::record::{RayPurpose, RayRecorder, RecordedRay};
use crate::sampling::{gen_f32, sample_unit_triangle};
use crate::shading::{local_illumination, refraction_direction};
use crate::world::{Origin, World};

/// Mutable state threaded through one pixel's ray tree.
pub struct TraceContext<'a> {
    pub rng: &'a mut dyn RngCore,
    pub recorder: &'a mut RayRecorder,
    /// Log every hit at debug level
    pub verbose: bool,
}

impl<'a> TraceContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, recorder: &'a mut RayRecorder) -> Self {
        Self {
            rng,
            recorder,
            verbose: false,
        }
    }
}

/// A scene ready to be traced with fixed settings.
pub struct Tracer {
    world: World,
    config: RenderConfig,
}

impl Tracer {
    pub fn new(scene: &SceneDescription, config: RenderConfig) -> RenderResult<Self> {
        Self::with_world(World::from_scene(scene), config)
    }

    /// Check the configuration and every material's glossiness up front so
    /// tracing itself cannot fail.
    pub fn with_world(world: World, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;

        for object in world.objects() {
            for material in object.materials() {
                if !(0.0..=1.0).contains(&material.glossiness) {
                    return Err(RenderError::Glossiness {
                        material: material.name.clone(),
                        value: material.glossiness,
                    });
                }
            }
        }

        Ok(Self { world, config })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Colour arriving along `ray`, which is at recursion `depth` (primary
    /// rays are depth 1) and leaves from `origin`.
    pub fn trace(&self, ray: &Ray, depth: u32, origin: Option<Origin>, ctx: &mut TraceContext<'_>) -> Vec3 {
        if depth > self.config.max_depth {
            return Vec3::ZERO;
        }

        let Some(hit) = self
            .world
            .first_hit(ray, origin, RayPurpose::Shading, ctx.recorder)
        else {
            return if depth == 1 {
                self.config.background
            } else {
                Vec3::ZERO
            };
        };

        let material = hit.material;
        let n = hit.normal;
        let d = ray.direction().normalize();
        let e = -d;
        let r = e.reflect_about(n);
        let here = Some(Origin {
            object: hit.object,
            part: hit.part,
        });

        let (texture_colour, texture_alpha) = self.world.object(hit.object).texture_colour(&hit);
        let kd = texture_colour * material.diffuse;
        let ks = material.specular;
        let shininess = material.shininess;

        if ctx.verbose {
            let pad = 2 * depth as usize;
            log::debug!("{:pad$}texcoords {}", "", hit.texcoords, pad = pad);
            log::debug!("{:pad$}   colour {}", "", texture_colour, pad = pad);
            log::debug!("{:pad$}       kd {}", "", kd, pad = pad);
            log::debug!("{:pad$}        P {}", "", hit.point, pad = pad);
            log::debug!("{:pad$}        N {}", "", n, pad = pad);
            log::debug!("{:pad$}    alpha {}", "", texture_alpha, pad = pad);
        }

        let mut colour = material.emission + material.ambient * self.config.ambient;

        // Reflection
        let g = material.glossiness;
        if g == 1.0 || self.config.glossy_samples == 1 {
            let incoming = self.trace(&Ray::new(hit.point, r), depth + 1, here, ctx);
            colour += local_illumination(n, r, e, e, kd, ks, shininess, incoming);
        } else if g > 0.0 {
            let half_angle = g.acos();
            let disc_distance = 1.0 / half_angle.tan();
            let (p1, p2) = (r.perp1(), r.perp2());

            let mut glossy = Vec3::ZERO;
            for _ in 0..self.config.glossy_samples {
                let (a, b) = sample_unit_triangle(ctx.rng);
                let dir = disc_distance * r + a * p1 + b * p2;
                let incoming = self.trace(&Ray::new(hit.point, dir), depth + 1, here, ctx);
                glossy += local_illumination(n, r, e, e, kd, ks, shininess, incoming);
            }
            colour += glossy / self.config.glossy_samples as f32;
        }

        // Point lights
        for light in self.world.lights() {
            let to_light = light.position - hit.point;
            if n.dot(to_light) <= 0.0 {
                continue;
            }

            let distance = to_light.length();
            let l = to_light / distance;
            let shadow = Ray::new(hit.point, l);
            let purpose = RayPurpose::Shadow {
                target: light.position,
            };

            let blocked = self
                .world
                .first_hit(&shadow, here, purpose, ctx.recorder)
                .is_some_and(|occluder| occluder.t <= distance);

            if !blocked {
                let lr = l.reflect_about(n);
                colour += local_illumination(n, l, e, lr, kd, ks, shininess, light.colour);
            }
        }

        // Emissive triangles, except the one this ray left from
        let samples = self.config.area_light_samples;
        let source = origin.map(|o| o.object);
        for (index, triangle) in self.world.area_lights() {
            if source == Some(index) {
                continue;
            }

            let intensity = triangle.emission() / samples as f32;
            for _ in 0..samples {
                let (a, b) = sample_unit_triangle(ctx.rng);
                let target = triangle.point_from_barycentric(a, b, 1.0 - a - b);

                let to_light = target - hit.point;
                if n.dot(to_light) <= 0.0 {
                    continue;
                }

                let l = to_light.normalize();
                let shadow = Ray::new(hit.point, l);
                let reaches_light = self
                    .world
                    .first_hit(&shadow, here, RayPurpose::Shadow { target }, ctx.recorder)
                    .is_some_and(|first| first.object == index);

                if reaches_light {
                    let lr = l.reflect_about(n);
                    colour += local_illumination(n, l, e, lr, kd, ks, shininess, intensity);
                }
            }
        }

        // Transparency
        let opacity = texture_alpha * material.alpha;
        if opacity < 1.0 {
            if let Some(dir) = refraction_direction(d, n) {
                let through = self.trace(&Ray::new(hit.point, dir), depth + 1, here, ctx);
                colour = opacity * colour + (1.0 - opacity) * through;
            }
        }

        colour
    }

    /// Average of `pixel_samples²` primary rays through pixel `(x, y)`.
    fn sample_pixel(&self, plane: &ImagePlane, x: u32, y: u32, ctx: &mut TraceContext<'_>) -> Vec3 {
        let n = self.config.pixel_samples;
        let weight = 1.0 / self.config.rays_per_pixel() as f32;
        let cell = 1.0 / n as f32;

        let mut result = Vec3::ZERO;
        for i in 0..n {
            for j in 0..n {
                let (dx, dy) = if self.config.jitter {
                    (cell * (i as f32 + gen_f32(ctx.rng)), cell * (j as f32 + gen_f32(ctx.rng)))
                } else {
                    (gen_f32(ctx.rng), gen_f32(ctx.rng))
                };
                let ray = plane.ray(x as f32 + dx, y as f32 + dy);
                result += weight * self.trace(&ray, 1, None, ctx);
            }
        }
        result
    }

    /// Colour of pixel `(x, y)`.
    ///
    /// The configured debug pixel is traced verbosely. The recorder is
    /// disarmed afterwards, so arming it captures exactly one pixel.
    pub fn pixel_colour(&self, plane: &ImagePlane, x: u32, y: u32, ctx: &mut TraceContext<'_>) -> Vec3 {
        let debugging = self
            .config
            .debug_pixel
            .is_some_and(|p| p.x == x && p.y == y);

        if debugging {
            ctx.verbose = true;
            log::debug!("---------------- start debugging at pixel ({}, {}) ----------------", x, y);
        }

        let colour = self.sample_pixel(plane, x, y, ctx);

        ctx.recorder.disarm();
        if debugging {
            log::debug!("---------------- stop debugging ----------------");
            ctx.verbose = false;
        }

        colour
    }

    /// Trace one pixel verbosely with ray recording on.
    pub fn inspect_pixel(
        &self,
        plane: &ImagePlane,
        x: u32,
        y: u32,
        rng: &mut dyn RngCore,
    ) -> (Vec3, Vec<RecordedRay>) {
        let mut recorder = RayRecorder::new();
        recorder.arm();

        let mut ctx = TraceContext::new(rng, &mut recorder);
        ctx.verbose = true;

        log::debug!("---------------- start debugging at pixel ({}, {}) ----------------", x, y);
        let colour = self.sample_pixel(plane, x, y, &mut ctx);
        log::debug!("---------------- stop debugging ----------------");

        (colour, recorder.take())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::object::Object;
    use crate::record::RayClass;
    use crate::sphere::Sphere;
    use crate::triangle::Triangle;
    use prism_core::{Eye, Material, PointLight, Shape};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn diffuse(name: &str) -> Arc<Material> {
        Arc::new(Material {
            name: name.to_string(),
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::new(0.8, 0.2, 0.2),
            ..Default::default()
        })
    }

    fn tracer(objects: Vec<Object>, lights: Vec<PointLight>, config: RenderConfig) -> Tracer {
        Tracer::with_world(World::new(objects, lights, 1.0), config).unwrap()
    }

    fn trace(tracer: &Tracer, ray: &Ray, depth: u32) -> Vec3 {
        let mut rng = StdRng::seed_from_u64(1);
        let mut recorder = RayRecorder::new();
        let mut ctx = TraceContext::new(&mut rng, &mut recorder);
        tracer.trace(ray, depth, None, &mut ctx)
    }

    fn lit_sphere_scene() -> SceneDescription {
        let eye = Eye::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 45.0_f32.to_radians());
        let mut scene = SceneDescription::new("sphere", eye);
        let material = scene.add_material((*diffuse("red")).clone());
        scene.add_light(PointLight::new(Vec3::new(5.0, 5.0, 10.0), Vec3::ONE));
        scene.add_shape(Shape::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
            material,
        });
        scene
    }

    #[test]
    fn test_sphere_centre_lit_corners_background() {
        let scene = lit_sphere_scene();
        let config = RenderConfig {
            background: Vec3::new(0.2, 0.3, 0.4),
            ..Default::default()
        };
        let tracer = Tracer::new(&scene, config.clone()).unwrap();
        let plane = ImagePlane::new(&scene.eye, 21, 21);

        let mut rng = StdRng::seed_from_u64(42);
        let mut recorder = RayRecorder::new();
        let mut ctx = TraceContext::new(&mut rng, &mut recorder);

        let centre = tracer.pixel_colour(&plane, 10, 10, &mut ctx);
        assert!(centre.length() > 0.0);
        assert_ne!(centre, config.background);

        for (x, y) in [(0, 0), (20, 0), (0, 20), (20, 20)] {
            assert_eq!(tracer.pixel_colour(&plane, x, y, &mut ctx), config.background);
        }
    }

    #[test]
    fn test_miss_returns_background_only_for_primary_rays() {
        let config = RenderConfig {
            background: Vec3::new(0.5, 0.6, 0.7),
            ..Default::default()
        };
        let tracer = tracer(Vec::new(), Vec::new(), config);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.2, 1.0));

        assert_eq!(trace(&tracer, &ray, 1), Vec3::new(0.5, 0.6, 0.7));
        assert_eq!(trace(&tracer, &ray, 2), Vec3::ZERO);
        assert_eq!(trace(&tracer, &ray, 4), Vec3::ZERO);
    }

    #[test]
    fn test_beyond_max_depth_is_black() {
        let objects = vec![Object::Sphere(Sphere::new(Vec3::ZERO, 1.0, diffuse("red")))];
        let config = RenderConfig {
            max_depth: 3,
            ..Default::default()
        };
        let tracer = tracer(objects, vec![PointLight::new(Vec3::splat(5.0), Vec3::ONE)], config);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(trace(&tracer, &ray, 3).length() > 0.0);
        assert_eq!(trace(&tracer, &ray, 4), Vec3::ZERO);
    }

    #[test]
    fn test_depth_limit_truncates_mirror_bounce() {
        let mirror = Arc::new(Material {
            name: "mirror".to_string(),
            ambient: Vec3::splat(0.1),
            specular: Vec3::splat(0.9),
            shininess: 10.0,
            glossiness: 1.0,
            ..Default::default()
        });
        let glow = Arc::new(Material {
            name: "glow".to_string(),
            emission: Vec3::ONE,
            ..Default::default()
        });

        // The glowing sphere sits behind the eye, only visible in the mirror
        let objects = || {
            vec![
                Object::Sphere(Sphere::new(Vec3::ZERO, 1.0, mirror.clone())),
                Object::Sphere(Sphere::new(Vec3::new(0.0, 0.0, 20.0), 5.0, glow.clone())),
            ]
        };
        // Light behind the mirror sphere adds no direct term
        let lights = vec![PointLight::new(Vec3::new(0.0, 0.0, -10.0), Vec3::ONE)];
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let shallow = tracer(objects(), lights.clone(), RenderConfig { max_depth: 1, ..Default::default() });
        let colour = trace(&shallow, &ray, 1);
        assert!((colour - Vec3::splat(0.1)).length() < 1e-6, "got {colour}");

        let deep = tracer(objects(), lights, RenderConfig { max_depth: 2, ..Default::default() });
        let colour = trace(&deep, &ray, 1);
        assert!((colour - Vec3::splat(1.0)).length() < 1e-4, "got {colour}");
    }

    fn floor(material: Arc<Material>) -> Object {
        Object::Triangle(Triangle::new(
            [Vec3::new(-10.0, 0.0, 10.0), Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -10.0)],
            None,
            material,
        ))
    }

    #[test]
    fn test_occluded_point_light_casts_shadow() {
        let objects = vec![
            floor(diffuse("floor")),
            Object::Sphere(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.5, diffuse("ball"))),
        ];
        let lights = vec![PointLight::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE)];
        let tracer = tracer(objects, lights, RenderConfig::default());

        let shadowed = Ray::new(Vec3::new(2.0, 3.0, 0.0), Vec3::new(-2.0, -3.0, 0.0));
        let colour = trace(&tracer, &shadowed, 1);
        assert!((colour - Vec3::splat(0.1)).length() < 1e-6, "only ambient in shadow: {colour}");

        let lit = Ray::new(Vec3::new(3.0, 3.0, 1.0), Vec3::new(0.0, -3.0, -1.0));
        assert!(trace(&tracer, &lit, 1).x > 0.2);
    }

    #[test]
    fn test_emissive_triangle_lights_floor() {
        let lamp = Arc::new(Material {
            name: "lamp".to_string(),
            emission: Vec3::splat(4.0),
            ..Default::default()
        });
        // Panel above the floor
        let panel = Object::Triangle(Triangle::new(
            [Vec3::new(-1.0, 3.0, -1.0), Vec3::new(0.0, 3.0, 1.0), Vec3::new(1.0, 3.0, -1.0)],
            None,
            lamp,
        ));
        let ray = Ray::new(Vec3::new(0.0, 2.0, 4.0), Vec3::new(0.0, -2.0, -4.0));

        let dark = tracer(vec![floor(diffuse("floor"))], Vec::new(), RenderConfig::default());
        let ambient_only = trace(&dark, &ray, 1);
        assert!((ambient_only - Vec3::splat(0.1)).length() < 1e-6);

        let lit = tracer(vec![floor(diffuse("floor")), panel], Vec::new(), RenderConfig::default());
        let colour = trace(&lit, &ray, 1);
        assert!(colour.x > ambient_only.x + 0.1, "got {colour}");
    }

    #[test]
    fn test_ray_leaving_lamp_is_not_lit_by_it() {
        let lamp = Arc::new(Material {
            name: "lamp".to_string(),
            emission: Vec3::splat(4.0),
            ..Default::default()
        });
        let objects = vec![
            Object::Triangle(Triangle::new(
                [Vec3::new(-1.0, 3.0, -1.0), Vec3::new(0.0, 3.0, 1.0), Vec3::new(1.0, 3.0, -1.0)],
                None,
                lamp,
            )),
            floor(diffuse("floor")),
        ];
        let config = RenderConfig {
            max_depth: 2,
            ..Default::default()
        };
        let tracer = tracer(objects, Vec::new(), config);

        let mut rng = StdRng::seed_from_u64(1);
        let mut recorder = RayRecorder::new();
        let mut ctx = TraceContext::new(&mut rng, &mut recorder);
        let from_lamp = Some(Origin { object: 0, part: 0 });
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.1, -1.0, 0.0));

        let colour = tracer.trace(&ray, 2, from_lamp, &mut ctx);
        assert!((colour - Vec3::splat(0.1)).length() < 1e-6, "only floor ambient: {colour}");

        // The same floor point seen from elsewhere is lit by the lamp
        let colour = tracer.trace(&ray, 2, None, &mut ctx);
        assert!(colour.x > 0.2, "got {colour}");
    }

    /// An eye looking down -z at a lamp covering exactly the right half of
    /// a one-pixel image.
    fn half_covered_pixel(config: RenderConfig) -> (Tracer, ImagePlane) {
        let lamp = Arc::new(Material {
            name: "lamp".to_string(),
            emission: Vec3::ONE,
            ..Default::default()
        });
        let panel = Object::Triangle(Triangle::new(
            [Vec3::new(0.0, -50.0, 0.0), Vec3::new(50.0, 0.0, 0.0), Vec3::new(0.0, 50.0, 0.0)],
            None,
            lamp,
        ));
        let config = RenderConfig {
            background: Vec3::ZERO,
            area_light_samples: 1,
            ..config
        };
        let eye = Eye::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 90.0_f32.to_radians());
        (tracer(vec![panel], Vec::new(), config), ImagePlane::new(&eye, 1, 1))
    }

    #[test]
    fn test_pixel_samples_average_across_silhouette() {
        let (tracer, plane) = half_covered_pixel(RenderConfig {
            pixel_samples: 4,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(11);
        let mut recorder = RayRecorder::new();
        let mut ctx = TraceContext::new(&mut rng, &mut recorder);

        let colour = tracer.pixel_colour(&plane, 0, 0, &mut ctx);
        assert!(colour.x > 0.0 && colour.x < 1.0, "got {colour}");
        assert_eq!(colour.x, colour.y);
    }

    #[test]
    fn test_jittered_samples_stay_in_their_cells() {
        let (tracer, plane) = half_covered_pixel(RenderConfig {
            pixel_samples: 4,
            jitter: true,
            ..Default::default()
        });

        // Two of the four sample columns always land on the lamp
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut recorder = RayRecorder::new();
            let mut ctx = TraceContext::new(&mut rng, &mut recorder);

            let colour = tracer.pixel_colour(&plane, 0, 0, &mut ctx);
            assert!((colour - Vec3::splat(0.5)).length() < 1e-5, "seed {seed}: {colour}");
        }
    }

    #[test]
    fn test_total_internal_reflection_is_not_blended() {
        let glass = |alpha| {
            Arc::new(Material {
                name: "glass".to_string(),
                ambient: Vec3::splat(0.3),
                alpha,
                ..Default::default()
            })
        };
        let ball = |alpha| {
            let sphere = Object::Sphere(Sphere::new(Vec3::ZERO, 1.0, glass(alpha)));
            tracer(vec![sphere], Vec::new(), RenderConfig::default())
        };
        let clear = ball(0.5);
        let opaque = ball(1.0);

        // Grazing the inside of the surface, well past the critical angle
        let grazing = Ray::new(Vec3::new(0.0, 0.9, 0.0), Vec3::X);
        let reflected = trace(&opaque, &grazing, 1);
        assert!((trace(&clear, &grazing, 1) - reflected).length() < 1e-6);
        assert!((reflected - Vec3::splat(0.3)).length() < 1e-6, "got {reflected}");

        // Straight out through the surface the refracted ray is blended in
        let straight = Ray::new(Vec3::ZERO, Vec3::X);
        let blended = trace(&clear, &straight, 1);
        assert!((blended - Vec3::splat(0.15)).length() < 1e-6, "got {blended}");
    }

    #[test]
    fn test_transparent_surface_passes_refracted_light() {
        let glass = Arc::new(Material {
            name: "clear".to_string(),
            ambient: Vec3::splat(0.3),
            alpha: 0.0,
            ..Default::default()
        });
        let pane = Object::Triangle(Triangle::new(
            [Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            None,
            glass,
        ));
        let tracer = tracer(vec![pane], Vec::new(), RenderConfig::default());

        // The refracted ray escapes as a secondary ray and brings back black
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(trace(&tracer, &ray, 1), Vec3::ZERO);
    }

    #[test]
    fn test_bad_glossiness_is_rejected() {
        let shiny = Arc::new(Material {
            name: "too-shiny".to_string(),
            glossiness: 1.5,
            ..Default::default()
        });
        let world = World::new(
            vec![Object::Sphere(Sphere::new(Vec3::ZERO, 1.0, shiny))],
            Vec::new(),
            1.0,
        );

        match Tracer::with_world(world, RenderConfig::default()) {
            Err(RenderError::Glossiness { material, value }) => {
                assert_eq!(material, "too-shiny");
                assert_eq!(value, 1.5);
            }
            other => panic!("expected glossiness error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_glossy_cone_samples_average() {
        let satin = Arc::new(Material {
            name: "satin".to_string(),
            specular: Vec3::splat(0.5),
            glossiness: 0.9,
            ..Default::default()
        });
        let glow = Arc::new(Material {
            name: "glow".to_string(),
            emission: Vec3::ONE,
            ..Default::default()
        });
        let objects = vec![
            Object::Sphere(Sphere::new(Vec3::ZERO, 1.0, satin)),
            Object::Sphere(Sphere::new(Vec3::new(0.0, 0.0, 30.0), 25.0, glow)),
        ];
        let config = RenderConfig {
            glossy_samples: 16,
            ..Default::default()
        };
        let tracer = tracer(objects, Vec::new(), config);

        // Every cone ray lands on the huge glowing sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let colour = trace(&tracer, &ray, 1);
        assert!((colour - Vec3::splat(0.5)).length() < 1e-4, "got {colour}");
    }

    #[test]
    fn test_inspect_pixel_records_ray_tree() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();

        let scene = lit_sphere_scene();
        let tracer = Tracer::new(&scene, RenderConfig::default()).unwrap();
        let plane = ImagePlane::new(&scene.eye, 21, 21);

        let mut rng = StdRng::seed_from_u64(3);
        let (colour, rays) = tracer.inspect_pixel(&plane, 10, 10, &mut rng);

        assert!(colour.length() > 0.0);
        // Primary hit, mirror bounce, shadow ray toward the light
        assert_eq!(rays[0].class, RayClass::Hit);
        assert!(rays.iter().any(|r| r.class == RayClass::Shadow));
        assert_eq!(rays[0].start, scene.eye.position);
    }
}
