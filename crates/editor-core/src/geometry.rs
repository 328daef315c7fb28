//! プリミティブ形状のメッシュ生成
//!
//! 立方体・球・円柱をローカル空間で生成する純粋関数群。
//! 頂点・法線は同じインデックスで対応し、インデックスは三角形リスト。

use std::f32::consts::PI;

use crate::components::ShapeKind;
use crate::math::Vec3;

pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_LATITUDE_BANDS: u32 = 30;
pub const SPHERE_LONGITUDE_BANDS: u32 = 30;

pub const CYLINDER_RADIUS: f32 = 1.0;
pub const CYLINDER_HEIGHT: f32 = 2.0;
pub const CYLINDER_SEGMENTS: u32 = 30;

/// メッシュ
/// `vertices` と `normals` は並列配列
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// 空のメッシュを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 形状ごとのデフォルトパラメータでメッシュを生成
    pub fn for_kind(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Cube => Self::cube(),
            ShapeKind::Sphere => {
                Self::sphere(SPHERE_RADIUS, SPHERE_LATITUDE_BANDS, SPHERE_LONGITUDE_BANDS)
            }
            ShapeKind::Cylinder => {
                Self::cylinder(CYLINDER_RADIUS, CYLINDER_HEIGHT, CYLINDER_SEGMENTS)
            }
        }
    }

    /// キューブメッシュを生成（各辺2、原点中心）
    /// 面ごとに4頂点を持ち、隣接面と頂点を共有しない
    pub fn cube() -> Self {
        // (法線, 4隅)
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            // -Z
            (
                [0.0, 0.0, -1.0],
                [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
            ),
            // +Z
            (
                [0.0, 0.0, 1.0],
                [[-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
            ),
            // +Y
            (
                [0.0, 1.0, 0.0],
                [[-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
            ),
            // -Y
            (
                [0.0, -1.0, 0.0],
                [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0]],
            ),
            // +X
            (
                [1.0, 0.0, 0.0],
                [[1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
            ),
            // -X
            (
                [-1.0, 0.0, 0.0],
                [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0]],
            ),
        ];

        let mut mesh = Self::new();
        for (normal, corners) in faces {
            let base = mesh.vertices.len() as u32;
            for corner in corners {
                mesh.vertices.push(Vec3::from_array(corner));
                mesh.normals.push(Vec3::from_array(normal));
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// UV球を生成
    /// 頂点 (lat, long) = radius * (cosφ·sinθ, cosθ, sinφ·sinθ)
    pub fn sphere(radius: f32, latitude_bands: u32, longitude_bands: u32) -> Self {
        let latitude_bands = latitude_bands.max(1);
        let longitude_bands = longitude_bands.max(1);

        let mut mesh = Self::new();
        for lat in 0..=latitude_bands {
            let theta = lat as f32 * PI / latitude_bands as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for long in 0..=longitude_bands {
                let phi = long as f32 * 2.0 * PI / longitude_bands as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let unit = Vec3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
                mesh.vertices.push(unit * radius);
                mesh.normals.push(unit);
            }
        }

        let stride = longitude_bands + 1;
        for lat in 0..latitude_bands {
            for long in 0..longitude_bands {
                let first = lat * stride + long;
                let second = first + stride;
                mesh.indices.extend_from_slice(&[first, second, first + 1]);
                mesh.indices.extend_from_slice(&[second, second + 1, first + 1]);
            }
        }
        mesh
    }

    /// 円柱を生成（Y軸中心、高さ方向に原点対称）
    /// 側面 -> 上面ファン -> 底面ファン の順に頂点を並べる
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(1);
        let half = height / 2.0;
        let ring = |i: u32| {
            let theta = i as f32 * 2.0 * PI / segments as f32;
            theta.sin_cos()
        };

        let mut mesh = Self::new();

        // 側面: 下・上の順で1ペア
        for i in 0..=segments {
            let (sin_theta, cos_theta) = ring(i);
            let normal = Vec3::new(cos_theta, 0.0, sin_theta);
            mesh.vertices.push(Vec3::new(radius * cos_theta, -half, radius * sin_theta));
            mesh.normals.push(normal);
            mesh.vertices.push(Vec3::new(radius * cos_theta, half, radius * sin_theta));
            mesh.normals.push(normal);
        }
        for i in 0..segments {
            let p1 = i * 2;
            let (p2, p3, p4) = (p1 + 1, p1 + 2, p1 + 3);
            mesh.indices.extend_from_slice(&[p1, p2, p3]);
            mesh.indices.extend_from_slice(&[p2, p4, p3]);
        }

        // 上面
        let top_center = mesh.vertices.len() as u32;
        mesh.push_cap_ring(radius, half, Vec3::Y, segments);
        for i in 0..segments {
            mesh.indices
                .extend_from_slice(&[top_center, top_center + i + 1, top_center + i + 2]);
        }

        // 底面（外向きにするため巻き順を反転）
        let bottom_center = mesh.vertices.len() as u32;
        mesh.push_cap_ring(radius, -half, Vec3::NEG_Y, segments);
        for i in 0..segments {
            mesh.indices.extend_from_slice(&[
                bottom_center,
                bottom_center + i + 2,
                bottom_center + i + 1,
            ]);
        }

        mesh
    }

    /// 中心点 + 円周 (segments + 1) 頂点を追加
    fn push_cap_ring(&mut self, radius: f32, y: f32, normal: Vec3, segments: u32) {
        self.vertices.push(Vec3::new(0.0, y, 0.0));
        self.normals.push(normal);
        for i in 0..=segments {
            let theta = i as f32 * 2.0 * PI / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            self.vertices.push(Vec3::new(radius * cos_theta, y, radius * sin_theta));
            self.normals.push(normal);
        }
    }

    /// 頂点数を取得
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// インデックス数を取得
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 三角形数を取得
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 並列配列・インデックス範囲・三角形リストの不変条件を満たすか
    pub fn is_valid(&self) -> bool {
        let count = self.vertices.len() as u32;
        self.normals.len() == self.vertices.len()
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| i < count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shapes_valid() {
        for kind in ShapeKind::ALL {
            let mesh = Mesh::for_kind(kind);
            assert!(mesh.is_valid(), "{kind} mesh violates invariants");
            assert_eq!(mesh.normals.len(), mesh.vertices.len());
            assert!(!mesh.indices.is_empty());
        }
    }

    #[test]
    fn test_cube_counts() {
        let cube = Mesh::cube();
        // 6 faces * 4 vertices
        assert_eq!(cube.vertex_count(), 24);
        // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.index_count(), 36);
    }

    #[test]
    fn test_cube_flat_normals() {
        let cube = Mesh::cube();
        for face in 0..6 {
            let n = cube.normals[face * 4];
            for corner in 0..4 {
                let i = face * 4 + corner;
                assert_eq!(cube.normals[i], n);
                // 面上の頂点は法線方向の座標が1
                assert_eq!(cube.vertices[i].dot(n), 1.0);
            }
        }
    }

    #[test]
    fn test_sphere_counts() {
        let sphere = Mesh::sphere(1.0, 30, 30);
        assert_eq!(sphere.vertex_count(), 31 * 31);
        assert_eq!(sphere.index_count(), 30 * 30 * 6);
    }

    #[test]
    fn test_sphere_normals_point_outward() {
        let sphere = Mesh::sphere(2.5, 12, 16);
        for (v, n) in sphere.vertices.iter().zip(&sphere.normals) {
            assert!(v.dot(*n) > 0.0);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!((v.length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_first_quad_indices() {
        let sphere = Mesh::sphere(1.0, 2, 3);
        // stride = 4
        assert_eq!(&sphere.indices[..6], &[0, 4, 1, 4, 5, 1]);
    }

    #[test]
    fn test_cylinder_counts() {
        let segments = 30;
        let cylinder = Mesh::cylinder(1.0, 2.0, segments);
        let side = 2 * (segments + 1);
        let cap = 1 + (segments + 1);
        assert_eq!(cylinder.vertex_count() as u32, side + 2 * cap);
        assert_eq!(cylinder.index_count() as u32, segments * 6 + segments * 3 * 2);
    }

    #[test]
    fn test_cylinder_normals() {
        let segments = 8;
        let cylinder = Mesh::cylinder(1.0, 2.0, segments);
        let side = (2 * (segments + 1)) as usize;
        let cap = (segments + 2) as usize;

        for n in &cylinder.normals[..side] {
            assert_eq!(n.y, 0.0);
        }
        for n in &cylinder.normals[side..side + cap] {
            assert_eq!(*n, Vec3::Y);
        }
        for n in &cylinder.normals[side + cap..] {
            assert_eq!(*n, Vec3::NEG_Y);
        }
    }

    #[test]
    fn test_cylinder_caps_wind_opposite() {
        let segments = 4;
        let cylinder = Mesh::cylinder(1.0, 2.0, segments);
        let side_indices = (segments * 6) as usize;
        let top = &cylinder.indices[side_indices..side_indices + 3];
        let bottom = &cylinder.indices[side_indices + (segments * 3) as usize..][..3];

        let face_normal = |tri: &[u32]| {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| cylinder.vertices[i as usize]);
            (b - a).cross(c - a)
        };
        // 上面と底面の三角形は逆向きに巻かれる
        assert!(face_normal(top).y * face_normal(bottom).y < 0.0);
    }

    #[test]
    fn test_zero_segments_clamped() {
        assert!(Mesh::cylinder(1.0, 2.0, 0).is_valid());
        assert!(Mesh::sphere(1.0, 0, 0).is_valid());
    }

    #[test]
    fn test_regeneration_is_deterministic() {
        for kind in ShapeKind::ALL {
            assert_eq!(Mesh::for_kind(kind), Mesh::for_kind(kind));
        }
    }
}
