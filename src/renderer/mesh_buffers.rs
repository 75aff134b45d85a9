use wgpu::util::DeviceExt;

use crate::mesh::FlatMesh;

pub const POSITION_STRIDE: u64 = std::mem::size_of::<[f32; 3]>() as u64;
pub const NORMAL_STRIDE: u64 = std::mem::size_of::<[f32; 3]>() as u64;
pub const TEXCOORD_STRIDE: u64 = std::mem::size_of::<[f32; 2]>() as u64;

/// One vertex buffer per FlatMesh stream, bound to slots 0, 1 and 2.
pub struct MeshBuffers {
    pub name: &'static str,
    pub positions: wgpu::Buffer,
    pub normals: wgpu::Buffer,
    pub texcoords: wgpu::Buffer,
    pub vertex_count: u32,
}

impl MeshBuffers {
    pub fn upload(device: &wgpu::Device, name: &'static str, mesh: &FlatMesh) -> Self {
        let create = |label: &str, contents: &[u8]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            })
        };

        Self {
            name,
            positions: create("Position Buffer", bytemuck::cast_slice(&mesh.positions)),
            normals: create("Normal Buffer", bytemuck::cast_slice(&mesh.normals)),
            texcoords: create("Texcoord Buffer", bytemuck::cast_slice(&mesh.texcoords)),
            vertex_count: mesh.vertex_count() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.positions.slice(..));
        render_pass.set_vertex_buffer(1, self.normals.slice(..));
        render_pass.set_vertex_buffer(2, self.texcoords.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

pub fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [
        wgpu::VertexBufferLayout {
            array_stride: POSITION_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        },
        wgpu::VertexBufferLayout {
            array_stride: NORMAL_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            }],
        },
        wgpu::VertexBufferLayout {
            array_stride: TEXCOORD_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            }],
        },
    ]
}
