// mesh.rs — 内翻球体网格（法线朝内，用于全景贴图）

pub const SPHERE_RADIUS: f32 = 500.0;
pub const SPHERE_WIDTH_SEGMENTS: usize = 60;
pub const SPHERE_HEIGHT_SEGMENTS: usize = 40;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// UV sphere seen from the inside.
///
/// The X axis is mirrored so the equirectangular image reads left-to-right
/// from within, and triangles wind counter-clockwise when viewed from the centre.
/// `v = 0` is the top row of the image (north pole), matching wgpu's texture origin.
pub fn build_inverted_sphere(radius: f32, width_segments: usize, height_segments: usize) -> SphereMesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let mut vertices = Vec::with_capacity((height_segments + 1) * (width_segments + 1));
    let mut indices = Vec::with_capacity(height_segments * width_segments * 6);

    for i in 0..=height_segments {
        let v = i as f32 / height_segments as f32;
        let theta = std::f32::consts::PI * v;
        let y = radius * theta.cos();
        let sin_t = theta.sin();

        for j in 0..=width_segments {
            let u = j as f32 / width_segments as f32;
            let phi = 2.0 * std::f32::consts::PI * u;

            vertices.push(Vertex {
                position: [radius * phi.cos() * sin_t, y, radius * phi.sin() * sin_t],
                uv: [u, v],
            });
        }
    }

    let row = (width_segments + 1) as u32;
    for i in 0..height_segments as u32 {
        for j in 0..width_segments as u32 {
            let a = i * row + j;
            let b = a + row;
            indices.extend_from_slice(&[
                a, b, a + 1,
                b, b + 1, a + 1,
            ]);
        }
    }

    SphereMesh { vertices, indices }
}
