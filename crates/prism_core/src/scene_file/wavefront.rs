//! Wavefront OBJ loading via tobj.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use prism_math::{Vec2, Vec3};

use super::{SceneError, SceneResult};
use crate::material::Material;
use crate::mesh::Mesh;
use crate::scene::Wavefront;
use crate::texture::TextureCache;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load the OBJ named in a scene file, relative to `base_dir`.
///
/// When `material_override` is set every face uses it and the file's own
/// materials are ignored. Otherwise MTL materials fill slots 1.. and faces
/// without one fall back to slot 0.
pub fn load_wavefront(
    base_dir: &Path,
    filename: &str,
    material_override: Option<Arc<Material>>,
    textures: &mut TextureCache,
) -> SceneResult<Wavefront> {
    let full_path = base_dir.join(filename);
    let (models, materials) =
        tobj::load_obj(&full_path, &load_options()).map_err(|source| SceneError::Obj {
            path: full_path.display().to_string(),
            source,
        })?;

    let mtl_materials = match materials {
        Ok(materials) => materials,
        Err(e) => {
            log::warn!("Failed to load materials for {}: {}", filename, e);
            Vec::new()
        }
    };

    let obj_dir = Path::new(filename).parent().unwrap_or_else(|| Path::new(""));
    let converted = if material_override.is_some() {
        Vec::new()
    } else {
        mtl_materials
            .iter()
            .map(|m| convert_material(m, obj_dir, textures))
            .collect()
    };

    build_wavefront(filename, &models, converted, material_override)
}

/// Parse OBJ text that is already in memory. `mtllib` references are not
/// followed, so every face uses slot 0.
pub fn parse_wavefront<R: BufRead>(
    reader: &mut R,
    name: &str,
    material_override: Option<Arc<Material>>,
) -> SceneResult<Wavefront> {
    let (models, _) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|source| SceneError::Obj {
        path: name.to_string(),
        source,
    })?;

    build_wavefront(name, &models, Vec::new(), material_override)
}

fn build_wavefront(
    path: &str,
    models: &[tobj::Model],
    file_materials: Vec<Material>,
    material_override: Option<Arc<Material>>,
) -> SceneResult<Wavefront> {
    let override_name = material_override.as_ref().map(|m| m.name.clone());

    let mut materials = vec![material_override.unwrap_or_else(|| Arc::new(Material::fallback()))];
    materials.extend(file_materials.into_iter().map(Arc::new));

    let vertex_total: usize = models.iter().map(|m| m.mesh.positions.len() / 3).sum();
    let all_normals = models
        .iter()
        .all(|m| m.mesh.normals.len() == m.mesh.positions.len());
    let all_uvs = models
        .iter()
        .all(|m| m.mesh.texcoords.len() / 2 == m.mesh.positions.len() / 3);

    let mut positions = Vec::with_capacity(vertex_total);
    let mut normals = Vec::with_capacity(if all_normals { vertex_total } else { 0 });
    let mut uvs = Vec::with_capacity(if all_uvs { vertex_total } else { 0 });
    let mut indices = Vec::new();
    let mut face_materials = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let base = positions.len() as u32;

        positions.extend(mesh.positions.chunks_exact(3).map(Vec3::from_slice));
        if all_normals {
            normals.extend(mesh.normals.chunks_exact(3).map(Vec3::from_slice));
        }
        if all_uvs {
            uvs.extend(mesh.texcoords.chunks_exact(2).map(Vec2::from_slice));
        }

        let slot = match (&override_name, mesh.material_id) {
            (None, Some(id)) if id + 1 < materials.len() => id + 1,
            _ => 0,
        };

        let face_count = mesh.indices.len() / 3;
        indices.extend(mesh.indices[..face_count * 3].iter().map(|i| i + base));
        face_materials.extend(std::iter::repeat(slot).take(face_count));
    }

    if indices.is_empty() {
        return Err(SceneError::EmptyObj(path.to_string()));
    }

    let mesh = Mesh::new(
        positions,
        indices,
        all_normals.then_some(normals),
        (all_uvs && !uvs.is_empty()).then_some(uvs),
        face_materials,
    );

    log::info!(
        "Loaded wavefront {}: {} vertices, {} triangles, {} materials",
        path,
        mesh.vertex_count(),
        mesh.triangle_count(),
        materials.len()
    );

    Ok(Wavefront {
        path: path.to_string(),
        mesh: Arc::new(mesh),
        materials,
        material_override: override_name,
    })
}

/// Convert an MTL material. Fields the file leaves out keep the fallback values.
fn convert_material(m: &tobj::Material, obj_dir: &Path, textures: &mut TextureCache) -> Material {
    let mut material = Material {
        name: m.name.clone(),
        ..Material::fallback()
    };

    if let Some(ka) = m.ambient {
        material.ambient = Vec3::from(ka);
    }
    if let Some(kd) = m.diffuse {
        material.diffuse = Vec3::from(kd);
    }
    if let Some(ks) = m.specular {
        material.specular = Vec3::from(ks);
    }
    if let Some(ns) = m.shininess {
        material.shininess = ns;
    }
    if let Some(d) = m.dissolve {
        material.alpha = d.clamp(0.0, 1.0);
    }

    if let Some(ke) = m.unknown_param.get("Ke") {
        let values: Vec<f32> = ke
            .split_whitespace()
            .filter_map(|t| t.parse().ok())
            .collect();
        match values.as_slice() {
            &[r, g, b] => material.emission = Vec3::new(r, g, b),
            _ => log::warn!("Ignoring malformed Ke '{}' in material {}", ke, m.name),
        }
    }

    if let Some(texture) = &m.diffuse_texture {
        let path = obj_dir.join(texture);
        match textures.load(&path.to_string_lossy()) {
            Ok(texture) => material.texture = Some(texture),
            Err(e) => log::warn!("Material {} keeps no texture: {}", m.name, e),
        }
    }

    material
}
