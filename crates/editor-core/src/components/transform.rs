use serde::{Deserialize, Serialize};

use crate::math::{Mat4, Vec3};

/// Scene object transform
/// Uniform size, world position and X/Y/Z Euler rotation in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub size: f32,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    /// Placement every generator starts from
    pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, -5.0);

    /// Create a new Transform with specified values
    pub fn new(size: f32, position: Vec3, rotation: Vec3) -> Self {
        Self {
            size,
            position,
            rotation,
        }
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            size: 1.0,
            position,
            rotation: Vec3::ZERO,
        }
    }

    /// Model matrix: Translate · Scale · RotateX · RotateY · RotateZ
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::splat(self.size))
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
    }

    /// Bake a local vertex into world space for export.
    ///
    /// Works on the vertex directly instead of building a matrix: scale by
    /// `size`, rotate about the local origin, then translate. The per-axis
    /// rotations nest the same way the model matrix composes them, so the
    /// result agrees with `to_matrix().transform_point3(v)`.
    pub fn transform_point(&self, vertex: Vec3) -> Vec3 {
        let scaled = vertex * self.size;
        let rotated = rotate_x(
            rotate_y(rotate_z(scaled, self.rotation.z), self.rotation.y),
            self.rotation.x,
        );
        rotated + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Self::DEFAULT_POSITION)
    }
}

/// Rotate a point about the X axis through the origin
fn rotate_x(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c)
}

/// Rotate a point about the Y axis through the origin
fn rotate_y(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.z * s + p.x * c, p.y, p.z * c - p.x * s)
}

/// Rotate a point about the Z axis through the origin
fn rotate_z(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6};

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.size, 1.0);
        assert_eq!(t.position, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(t.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_to_matrix_identity() {
        let t = Transform::new(1.0, Vec3::ZERO, Vec3::ZERO);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_to_matrix_translation() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let expected = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.to_matrix(), expected);
    }

    #[test]
    fn test_export_matches_model_matrix_quarter_turn() {
        let t = Transform::new(2.0, Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, FRAC_PI_2, 0.0));
        let local = Vec3::new(1.0, 0.0, 0.0);

        let baked = t.transform_point(local);
        let via_matrix = t.to_matrix().transform_point3(local);

        assert_close(baked, via_matrix);
        // (1,0,0) * 2 を Y軸まわりに90度 -> (0,0,-2)、そこに平行移動
        assert_close(baked, Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_export_matches_model_matrix_all_axes() {
        let t = Transform::new(
            1.5,
            Vec3::new(-4.0, 0.5, 9.0),
            Vec3::new(FRAC_PI_6, -FRAC_PI_3, 1.1),
        );
        for local in [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(0.3, -0.7, 0.2),
        ] {
            assert_close(t.transform_point(local), t.to_matrix().transform_point3(local));
        }
    }

    #[test]
    fn test_rotation_is_about_origin_not_position() {
        let t = Transform::new(1.0, Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, FRAC_PI_2));
        // 原点のローカル頂点は回転の影響を受けず位置のみ
        assert_close(t.transform_point(Vec3::ZERO), Vec3::new(10.0, 0.0, 0.0));
        assert_close(t.transform_point(Vec3::X), Vec3::new(10.0, 1.0, 0.0));
    }
}
