//! Renderable geometry: mesh parts with per-part PBR material values.

use lumen_math::Vec3;
use lumen_render::{GraphicsDevice, Uniform};

/// Surface parameters bound as uniforms right before a part is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub albedo: Vec3,
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vec3::splat(1.0),
            roughness: 0.4,
            metalness: 0.0,
        }
    }
}

impl Material {
    pub fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.set_uniform("albedo", Uniform::Vector3(self.albedo));
        device.set_uniform("roughness", Uniform::Scalar(self.roughness));
        device.set_uniform("metalness", Uniform::Scalar(self.metalness));
    }
}

/// Non-indexed triangle list: every three positions form one triangle.
/// `normals` runs parallel to `positions`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshPart {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub material: Material,
}

impl MeshPart {
    /// Saturates at `u32::MAX`; the loaders reject parts that large.
    pub fn vertex_count(&self) -> u32 {
        u32::try_from(self.positions.len()).unwrap_or(u32::MAX)
    }
}

/// A mesh made of one or more parts, each with its own material.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub parts: Vec<MeshPart>,
}

impl Mesh {
    pub fn new(parts: Vec<MeshPart>) -> Self {
        Self { parts }
    }

    /// Axis-aligned cube spanning `-1..1` on every axis, 36 vertices.
    pub fn cube() -> Self {
        let faces = [
            (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
            (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
            (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        ];
        let corners: [(f32, f32); 6] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut part = MeshPart::default();
        for (normal, u, v) in faces {
            for (a, b) in corners {
                part.positions.push(normal + u * a + v * b);
                part.normals.push(normal);
            }
        }
        Self::new(vec![part])
    }

    pub fn vertex_count(&self) -> u32 {
        self.parts
            .iter()
            .map(MeshPart::vertex_count)
            .fold(0, u32::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.positions.is_empty())
    }

    /// Issue one draw per part, binding that part's material first.
    pub fn draw(&self, device: &mut dyn GraphicsDevice) {
        for part in &self.parts {
            part.material.bind(device);
            device.draw_primitives(part.vertex_count());
        }
    }
}
