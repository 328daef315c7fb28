use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::{BufferAddress, VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use editor_core::Mesh;
use editor_core::math::Vec3;

/// 頂点構造体
/// 位置（a_position）と法線（a_normal）を含む
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// a_position のシェーダーロケーション
    pub const POSITION_LOCATION: u32 = 0;
    /// a_normal のシェーダーロケーション
    pub const NORMAL_LOCATION: u32 = 1;

    /// 新しい頂点を作成
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// 法線なし（線分描画用）
    pub fn line(position: Vec3) -> Self {
        Self::new(position.to_array(), [0.0; 3])
    }

    /// 頂点バッファレイアウトを取得
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &[
                // a_position
                VertexAttribute {
                    offset: 0,
                    shader_location: Self::POSITION_LOCATION,
                    format: VertexFormat::Float32x3,
                },
                // a_normal
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as BufferAddress,
                    shader_location: Self::NORMAL_LOCATION,
                    format: VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// 並列配列のメッシュをインターリーブ頂点に変換
pub fn interleave(mesh: &Mesh) -> Vec<Vertex> {
    mesh.vertices
        .iter()
        .zip(&mesh.normals)
        .map(|(p, n)| Vertex::new(p.to_array(), n.to_array()))
        .collect()
}

/// GPUにアップロード済みのメッシュ
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl GpuMesh {
    /// 頂点・インデックスバッファを作成
    pub fn new(device: &wgpu::Device, label: &str, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }

    /// シーンオブジェクトのメッシュをアップロード
    pub fn from_mesh(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        Self::new(device, label, &interleave(mesh), &mesh.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editor_core::ShapeKind;

    #[test]
    fn test_vertex_new() {
        let v = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0]);
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_vertex_size() {
        // 3 floats * 2 attributes * 4 bytes = 24 bytes
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn test_desc_locations() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 24);
        assert_eq!(desc.attributes[0].shader_location, 0);
        assert_eq!(desc.attributes[1].shader_location, 1);
        assert_eq!(desc.attributes[1].offset, 12);
    }

    #[test]
    fn test_interleave_keeps_pairs() {
        let mesh = Mesh::for_kind(ShapeKind::Cylinder);
        let vertices = interleave(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());
        for (i, v) in vertices.iter().enumerate() {
            assert_eq!(v.position, mesh.vertices[i].to_array());
            assert_eq!(v.normal, mesh.normals[i].to_array());
        }
    }

    #[test]
    fn test_line_vertex_has_zero_normal() {
        let v = Vertex::line(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(v.normal, [0.0; 3]);
    }
}
