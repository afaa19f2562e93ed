//! Scene file reader.

use std::path::Path;
use std::sync::Arc;

use prism_math::{Vec2, Vec3};

use super::{load_wavefront, SceneError, SceneResult};
use crate::light::{Eye, PointLight};
use crate::material::Material;
use crate::scene::{SceneDescription, Shape, Wavefront};
use crate::texture::TextureCache;

/// One non-blank line, split into tokens with comments removed.
struct Line<'a> {
    number: usize,
    indented: bool,
    tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    fn key(&self) -> &'a str {
        self.tokens[0]
    }

    fn values(&self) -> &[&'a str] {
        &self.tokens[1..]
    }

    fn numbers(&self) -> SceneResult<Vec<f32>> {
        self.values()
            .iter()
            .map(|token| {
                token.parse::<f32>().map_err(|_| SceneError::InvalidNumber {
                    line: self.number,
                    token: token.to_string(),
                })
            })
            .collect()
    }

    fn arity_error(&self, expected: &'static str) -> SceneError {
        SceneError::WrongArity {
            line: self.number,
            attribute: self.key().to_string(),
            expected,
            found: self.values().len(),
        }
    }

    fn vec3(&self) -> SceneResult<Vec3> {
        match self.numbers()?.as_slice() {
            &[x, y, z] => Ok(Vec3::new(x, y, z)),
            _ => Err(self.arity_error("3")),
        }
    }

    fn scalar(&self) -> SceneResult<f32> {
        match self.numbers()?.as_slice() {
            &[value] => Ok(value),
            _ => Err(self.arity_error("1")),
        }
    }

    fn word(&self) -> SceneResult<&'a str> {
        match self.values() {
            &[word] => Ok(word),
            _ => Err(self.arity_error("1")),
        }
    }

    fn unknown_in(&self, record: &'static str) -> SceneError {
        SceneError::UnknownAttribute {
            line: self.number,
            record,
            attribute: self.key().to_string(),
        }
    }
}

/// A command line together with the attribute lines that follow it.
struct Record<'a> {
    header: Line<'a>,
    attributes: Vec<Line<'a>>,
}

impl<'a> Record<'a> {
    fn line(&self) -> usize {
        self.header.number
    }

    fn command(&self) -> &'a str {
        self.header.key()
    }

    fn require<T>(&self, value: Option<T>, record: &'static str, field: &'static str) -> SceneResult<T> {
        value.ok_or(SceneError::MissingField {
            line: self.line(),
            record,
            field,
        })
    }

    fn expect_no_arguments(&self) -> SceneResult<()> {
        if self.header.values().is_empty() {
            Ok(())
        } else {
            Err(self.header.arity_error("0"))
        }
    }
}

fn tokenize(content: &str) -> Vec<Line<'_>> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let text = raw.split('#').next().unwrap_or("");
            let tokens: Vec<&str> = text.split_whitespace().collect();
            if tokens.is_empty() {
                return None;
            }
            Some(Line {
                number: i + 1,
                indented: text.starts_with(char::is_whitespace),
                tokens,
            })
        })
        .collect()
}

fn group_records(lines: Vec<Line<'_>>) -> SceneResult<Vec<Record<'_>>> {
    let mut records: Vec<Record<'_>> = Vec::new();

    for line in lines {
        if !line.indented {
            records.push(Record {
                header: line,
                attributes: Vec::new(),
            });
        } else if let Some(record) = records.last_mut() {
            record.attributes.push(line);
        } else {
            return Err(SceneError::AttributeOutsideRecord { line: line.number });
        }
    }

    Ok(records)
}

/// Parse scene file contents.
///
/// `base_dir` is where wavefront objects and textures are looked up.
pub fn parse_scene(content: &str, name: &str, base_dir: &Path) -> SceneResult<SceneDescription> {
    let records = group_records(tokenize(content))?;

    let mut scene = SceneDescription::new(name, Eye::default());
    let mut textures = TextureCache::with_base_dir(base_dir);
    let mut eye_seen = false;

    for record in &records {
        match record.command() {
            "material" => {
                let material = read_material(record, &mut textures)?;
                scene.add_material(material);
            }
            "sphere" => {
                let sphere = read_sphere(record, &scene)?;
                scene.add_shape(sphere);
            }
            "triangle" => {
                let triangle = read_triangle(record, &scene)?;
                scene.add_shape(triangle);
            }
            "wavefront" => {
                let wavefront = read_wavefront(record, &scene, base_dir, &mut textures)?;
                scene.add_shape(Shape::Wavefront(wavefront));
            }
            "light" => {
                let light = read_light(record)?;
                scene.add_light(light);
            }
            "eye" => {
                scene.eye = read_eye(record)?;
                eye_seen = true;
            }
            other => {
                return Err(SceneError::UnknownCommand {
                    line: record.line(),
                    command: other.to_string(),
                })
            }
        }
    }

    if scene.lights.is_empty() {
        return Err(SceneError::NoLights(name.to_string()));
    }
    if !eye_seen {
        return Err(SceneError::NoEye(name.to_string()));
    }

    Ok(scene)
}

fn lookup_material(scene: &SceneDescription, line: &Line<'_>) -> SceneResult<Arc<Material>> {
    let name = line.word()?;
    scene
        .material(name)
        .cloned()
        .ok_or_else(|| SceneError::UnknownMaterial {
            line: line.number,
            name: name.to_string(),
        })
}

fn read_material(record: &Record<'_>, textures: &mut TextureCache) -> SceneResult<Material> {
    const RECORD: &str = "material";
    record.expect_no_arguments()?;

    let mut material = Material::default();
    let mut name = None;

    for attr in &record.attributes {
        match attr.key() {
            "name" => name = Some(attr.word()?.to_string()),
            "ambient" => material.ambient = attr.vec3()?,
            "diffuse" => material.diffuse = attr.vec3()?,
            "specular" => material.specular = attr.vec3()?,
            "shininess" => material.shininess = attr.scalar()?,
            "glossiness" => material.glossiness = attr.scalar()?,
            "alpha" => material.alpha = attr.scalar()?,
            "emission" => material.emission = attr.vec3()?,
            "texture" => material.texture = Some(textures.load(attr.word()?)?),
            _ => return Err(attr.unknown_in(RECORD)),
        }
    }

    material.name = record.require(name, RECORD, "name")?;
    Ok(material)
}

fn read_sphere(record: &Record<'_>, scene: &SceneDescription) -> SceneResult<Shape> {
    const RECORD: &str = "sphere";
    record.expect_no_arguments()?;

    let (mut center, mut radius, mut material) = (None, None, None);

    for attr in &record.attributes {
        match attr.key() {
            "centre" | "center" => center = Some(attr.vec3()?),
            "radius" => radius = Some(attr.scalar()?),
            "material" => material = Some(lookup_material(scene, attr)?),
            _ => return Err(attr.unknown_in(RECORD)),
        }
    }

    Ok(Shape::Sphere {
        center: record.require(center, RECORD, "centre")?,
        radius: record.require(radius, RECORD, "radius")?,
        material: record.require(material, RECORD, "material")?,
    })
}

fn read_triangle(record: &Record<'_>, scene: &SceneDescription) -> SceneResult<Shape> {
    const RECORD: &str = "triangle";
    record.expect_no_arguments()?;

    let mut vertices: Vec<(Vec3, Option<Vec2>)> = Vec::with_capacity(3);
    let mut material = None;

    for attr in &record.attributes {
        match attr.key() {
            "vertex" => match attr.numbers()?.as_slice() {
                &[x, y, z] => vertices.push((Vec3::new(x, y, z), None)),
                &[x, y, z, u, v] => vertices.push((Vec3::new(x, y, z), Some(Vec2::new(u, v)))),
                _ => return Err(attr.arity_error("3 or 5")),
            },
            "material" => material = Some(lookup_material(scene, attr)?),
            _ => return Err(attr.unknown_in(RECORD)),
        }
    }

    if vertices.len() != 3 {
        return Err(SceneError::WrongArity {
            line: record.line(),
            attribute: "vertex".to_string(),
            expected: "3",
            found: vertices.len(),
        });
    }

    let texcoords = vertices
        .iter()
        .any(|(_, uv)| uv.is_some())
        .then(|| [0, 1, 2].map(|i| vertices[i].1.unwrap_or(Vec2::ZERO)));

    Ok(Shape::Triangle {
        vertices: [vertices[0].0, vertices[1].0, vertices[2].0],
        texcoords,
        material: record.require(material, RECORD, "material")?,
    })
}

fn read_wavefront(
    record: &Record<'_>,
    scene: &SceneDescription,
    base_dir: &Path,
    textures: &mut TextureCache,
) -> SceneResult<Wavefront> {
    const RECORD: &str = "wavefront";

    let filename = match record.header.values() {
        &[filename] => filename,
        &[] => {
            return Err(SceneError::MissingField {
                line: record.line(),
                record: RECORD,
                field: "filename",
            })
        }
        _ => return Err(record.header.arity_error("1")),
    };

    let mut material_override = None;
    for attr in &record.attributes {
        match attr.key() {
            "material" => material_override = Some(lookup_material(scene, attr)?),
            _ => return Err(attr.unknown_in(RECORD)),
        }
    }

    load_wavefront(base_dir, filename, material_override, textures)
}

fn read_light(record: &Record<'_>) -> SceneResult<PointLight> {
    const RECORD: &str = "light";
    record.expect_no_arguments()?;

    let (mut position, mut colour) = (None, None);

    for attr in &record.attributes {
        match attr.key() {
            "position" => position = Some(attr.vec3()?),
            "colour" | "color" => colour = Some(attr.vec3()?),
            _ => return Err(attr.unknown_in(RECORD)),
        }
    }

    Ok(PointLight::new(
        record.require(position, RECORD, "position")?,
        record.require(colour, RECORD, "colour")?,
    ))
}

fn read_eye(record: &Record<'_>) -> SceneResult<Eye> {
    const RECORD: &str = "eye";
    record.expect_no_arguments()?;

    let defaults = Eye::default();
    let (mut position, mut look_at) = (None, None);
    let mut up = defaults.up;
    let mut fovy = defaults.fovy;

    for attr in &record.attributes {
        match attr.key() {
            "position" => position = Some(attr.vec3()?),
            "lookat" => look_at = Some(attr.vec3()?),
            "up" => up = attr.vec3()?,
            "fovy" => fovy = attr.scalar()?.to_radians(),
            _ => return Err(attr.unknown_in(RECORD)),
        }
    }

    Ok(Eye::new(
        record.require(position, RECORD, "position")?,
        record.require(look_at, RECORD, "lookat")?,
        up,
        fovy,
    ))
}
