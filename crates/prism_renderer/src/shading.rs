//! Phong local illumination and refraction.

use prism_math::Vec3;

/// Index of refraction outside objects.
pub const AIR_IOR: f32 = 1.0;
/// Index of refraction inside transparent objects.
pub const GLASS_IOR: f32 = 1.5;

/// Light reflected toward `e` from light `incoming` arriving along `l`.
///
/// `r` is the mirror direction of `l` about `n`. All vectors are unit length.
/// Nothing is reflected when the light is behind the surface; the
/// specular term vanishes when the viewer is outside the lobe.
#[allow(clippy::too_many_arguments)]
pub fn local_illumination(
    n: Vec3,
    l: Vec3,
    e: Vec3,
    r: Vec3,
    kd: Vec3,
    ks: Vec3,
    shininess: f32,
    incoming: Vec3,
) -> Vec3 {
    let n_dot_l = n.dot(l);
    if n_dot_l <= 0.0 {
        return Vec3::ZERO;
    }

    let diffuse = kd * incoming * n_dot_l;

    let r_dot_e = r.dot(e);
    let specular = if r_dot_e > 0.0 {
        ks * incoming * r_dot_e.powf(shininess)
    } else {
        Vec3::ZERO
    };

    diffuse + specular
}

/// Direction of a ray arriving along `direction` after crossing a surface
/// with outward normal `normal`.
///
/// A ray against the normal enters glass from air; a ray along it leaves
/// glass into air. Returns `None` on total internal reflection.
pub fn refraction_direction(direction: Vec3, normal: Vec3) -> Option<Vec3> {
    let d = direction.normalize();
    let entering = d.dot(normal) < 0.0;

    // Normal on the incoming side, and n1/n2
    let (n, ratio) = if entering {
        (normal, AIR_IOR / GLASS_IOR)
    } else {
        (-normal, GLASS_IOR / AIR_IOR)
    };

    let cos_i = -d.dot(n);
    let sin_i = (1.0 - cos_i * cos_i).max(0.0).sqrt();
    let sin_t = ratio * sin_i;
    if sin_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin_t * sin_t).sqrt();

    // In-plane tangent; zero at normal incidence
    let tangent = n.cross(d.cross(n)).normalize_or_zero();

    Some((-cos_t * n + sin_t * tangent).normalize())
}
