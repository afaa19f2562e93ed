//! Scene file writer.
//!
//! `SceneDescription` displays in the format the reader accepts. Materials
//! come first so every shape can refer to them by name.

use std::fmt;

use prism_math::Vec3;

use crate::material::Material;
use crate::scene::{SceneDescription, Shape};

struct Triple(Vec3);

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.0.x, self.0.y, self.0.z)
    }
}

fn write_material(f: &mut fmt::Formatter<'_>, material: &Material) -> fmt::Result {
    writeln!(f, "material")?;
    writeln!(f, "  name       {}", material.name)?;
    writeln!(f, "  ambient    {}", Triple(material.ambient))?;
    writeln!(f, "  diffuse    {}", Triple(material.diffuse))?;
    writeln!(f, "  specular   {}", Triple(material.specular))?;
    writeln!(f, "  shininess  {}", material.shininess)?;
    writeln!(f, "  glossiness {}", material.glossiness)?;
    writeln!(f, "  alpha      {}", material.alpha)?;
    if material.is_emissive() {
        writeln!(f, "  emission   {}", Triple(material.emission))?;
    }
    if let Some(texture) = &material.texture {
        writeln!(f, "  texture    {}", texture.path)?;
    }
    Ok(())
}

fn write_shape(f: &mut fmt::Formatter<'_>, shape: &Shape) -> fmt::Result {
    match shape {
        Shape::Sphere {
            center,
            radius,
            material,
        } => {
            writeln!(f, "sphere")?;
            writeln!(f, "  centre   {}", Triple(*center))?;
            writeln!(f, "  radius   {}", radius)?;
            writeln!(f, "  material {}", material.name)
        }
        Shape::Triangle {
            vertices,
            texcoords,
            material,
        } => {
            writeln!(f, "triangle")?;
            for (i, vertex) in vertices.iter().enumerate() {
                match texcoords {
                    Some(uv) => writeln!(f, "  vertex {} {} {}", Triple(*vertex), uv[i].x, uv[i].y)?,
                    None => writeln!(f, "  vertex {}", Triple(*vertex))?,
                }
            }
            writeln!(f, "  material {}", material.name)
        }
        Shape::Wavefront(wavefront) => {
            writeln!(f, "wavefront {}", wavefront.path)?;
            if let Some(name) = &wavefront.material_override {
                writeln!(f, "  material {}", name)?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for SceneDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;

        writeln!(f, "eye")?;
        writeln!(f, "  position {}", Triple(self.eye.position))?;
        writeln!(f, "  lookat   {}", Triple(self.eye.look_at))?;
        writeln!(f, "  up       {}", Triple(self.eye.up))?;
        writeln!(f, "  fovy     {}", self.eye.fovy.to_degrees())?;

        for light in &self.lights {
            writeln!(f, "light")?;
            writeln!(f, "  position {}", Triple(light.position))?;
            writeln!(f, "  colour   {}", Triple(light.colour))?;
        }

        for material in &self.materials {
            write_material(f, material)?;
        }

        for shape in &self.shapes {
            write_shape(f, shape)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::scene_file::parse_scene;

    const SCENE: &str = "
material
  name lamp
  diffuse 0.3 0.3 0.3
  emission 4 4 4
material
  name floor
  diffuse 0.8 0.8 0.8
  glossiness 0.25
triangle
  vertex -1 2 -1
  vertex 1 2 -1
  vertex 0 2 1
  material lamp
sphere
  center 0 -100 0
  radius 99
  material floor
light
  position 0 10 0
  colour 0.5 0.5 0.5
eye
  position 0 1 6
  lookat 0 0 0
  fovy 30
";

    #[test]
    fn test_written_scene_reads_back() {
        let scene = parse_scene(SCENE, "written", Path::new(".")).unwrap();
        let text = scene.to_string();
        let again = parse_scene(&text, "written", Path::new(".")).unwrap();

        assert_eq!(again.eye.position, scene.eye.position);
        assert!((again.eye.fovy - scene.eye.fovy).abs() < 1e-5);
        assert_eq!(again.lights, scene.lights);
        assert_eq!(again.materials.len(), 2);
        assert_eq!(again.materials[0].emission, Vec3::splat(4.0));
        assert_eq!(again.materials[1].glossiness, 0.25);
        assert_eq!(again.shapes.len(), 2);

        match (&scene.shapes[0], &again.shapes[0]) {
            (Shape::Triangle { vertices: a, .. }, Shape::Triangle { vertices: b, material, .. }) => {
                assert_eq!(a, b);
                assert_eq!(material.name, "lamp");
            }
            other => panic!("expected triangles, got {:?}", other),
        }
    }

    #[test]
    fn test_written_header_and_emission() {
        let scene = parse_scene(SCENE, "written", Path::new(".")).unwrap();
        let text = scene.to_string();
        assert!(text.starts_with("# written\neye\n"));
        assert!(text.contains("  emission   4 4 4\n"));
        assert!(!text.contains("wavefront"));
    }
}
