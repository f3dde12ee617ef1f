// Boid mesh: a flat-shaded dart pointing down local +Z.

use glam::Vec3;

/// GPU-ready vertex with position and normal.
///   @location(0) position: vec3<f32>
///   @location(1) normal:   vec3<f32>
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl GpuVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

const TIP: Vec3 = Vec3::new(0.0, 0.0, 0.12);
const LEFT: Vec3 = Vec3::new(-0.045, 0.0, -0.06);
const RIGHT: Vec3 = Vec3::new(0.045, 0.0, -0.06);
const TOP: Vec3 = Vec3::new(0.0, 0.03, -0.06);
const BOTTOM: Vec3 = Vec3::new(0.0, -0.015, -0.06);

/// Triangle soup with one normal per face (vertices are not shared), CCW
/// winding seen from outside.
pub fn boid_mesh() -> (Vec<GpuVertex>, Vec<u16>) {
    let faces = [
        [TIP, LEFT, TOP],
        [TIP, TOP, RIGHT],
        [TIP, RIGHT, BOTTOM],
        [TIP, BOTTOM, LEFT],
        [LEFT, BOTTOM, RIGHT],
        [LEFT, RIGHT, TOP],
    ];
    let centroid = (TIP + LEFT + RIGHT + TOP + BOTTOM) / 5.0;

    let mut vertices = Vec::with_capacity(faces.len() * 3);
    for [a, mut b, mut c] in faces {
        let mut normal = (b - a).cross(c - a).normalize();
        if normal.dot((a + b + c) / 3.0 - centroid) < 0.0 {
            std::mem::swap(&mut b, &mut c);
            normal = -normal;
        }
        for p in [a, b, c] {
            vertices.push(GpuVertex { position: p.to_array(), normal: normal.to_array() });
        }
    }

    let indices = (0..vertices.len() as u16).collect();
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_wind_outward() {
        let (vertices, indices) = boid_mesh();
        assert_eq!(vertices.len(), indices.len());
        for tri in vertices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| Vec3::from_array(tri[i].position));
            let n = Vec3::from_array(tri[0].normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn dart_points_forward() {
        let (vertices, _) = boid_mesh();
        let max_z = vertices.iter().map(|v| v.position[2]).fold(f32::MIN, f32::max);
        assert_eq!(max_z, TIP.z);
    }
}
