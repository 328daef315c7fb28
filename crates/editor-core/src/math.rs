//! 変換パイプラインの行列計算
//!
//! 描画とエクスポートで共通に使う射影・法線行列と、GPUへ渡すUniform

use bytemuck::{Pod, Zeroable};

pub use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// 垂直画角（π/4）
pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// 透視投影行列（右手系、固定の画角とクリップ面）
pub fn perspective(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y, aspect, Z_NEAR, Z_FAR)
}

/// 法線行列 = transpose(inverse(model_viewの左上3x3))
///
/// 非一様スケールでも法線が面に垂直なまま保たれる。
/// 特異行列（サイズ0など）の場合は左上3x3をそのまま返す。
pub fn normal_matrix(model_view: Mat4) -> Mat3 {
    let upper = Mat3::from_mat4(model_view);
    if upper.determinant().abs() <= f32::EPSILON {
        return upper;
    }
    upper.inverse().transpose()
}

/// 1オブジェクト分の変換行列セット
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectMatrices {
    pub model_view: Mat4,
    pub projection: Mat4,
    pub normal: Mat3,
}

impl ObjectMatrices {
    /// model / view / projection から構築する
    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        let model_view = view * model;
        Self {
            model_view,
            projection,
            normal: normal_matrix(model_view),
        }
    }

    /// GPU用のUniformに変換
    pub fn uniform(&self) -> TransformUniform {
        TransformUniform::from_matrices(self)
    }
}

/// GPU用変換Uniform
/// WGSLの `mat3x3<f32>` は列ごとに16バイト境界なので、法線行列は vec4 x 3 で格納する
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformUniform {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
}

impl TransformUniform {
    pub fn from_matrices(matrices: &ObjectMatrices) -> Self {
        let n = matrices.normal;
        Self {
            model_view: matrices.model_view.to_cols_array_2d(),
            projection: matrices.projection.to_cols_array_2d(),
            normal_matrix: [
                n.x_axis.extend(0.0).to_array(),
                n.y_axis.extend(0.0).to_array(),
                n.z_axis.extend(0.0).to_array(),
            ],
        }
    }

    /// 単位行列で初期化
    pub fn identity() -> Self {
        Self::from_matrices(&ObjectMatrices::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY))
    }
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size() {
        // mat4 x 2 (128) + mat3 padded (48)
        assert_eq!(std::mem::size_of::<TransformUniform>(), 176);
    }

    #[test]
    fn test_normal_matrix_identity() {
        assert_eq!(normal_matrix(Mat4::IDENTITY), Mat3::IDENTITY);
    }

    #[test]
    fn test_normal_matrix_non_uniform_scale() {
        let mv = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(mv);
        // 斜め45度の面の法線はスケール後も面に垂直
        let tangent = mv.transform_vector3(Vec3::new(1.0, -1.0, 0.0));
        let normal = n * Vec3::new(1.0, 1.0, 0.0);
        assert!(tangent.dot(normal).abs() < 1e-6);
    }

    #[test]
    fn test_normal_matrix_ignores_translation() {
        let mv = Mat4::from_translation(Vec3::new(3.0, -2.0, 7.0));
        assert_eq!(normal_matrix(mv), Mat3::IDENTITY);
    }

    #[test]
    fn test_object_matrices_model_view_order() {
        let model = Mat4::from_translation(Vec3::X);
        let view = Mat4::from_scale(Vec3::splat(2.0));
        let m = ObjectMatrices::new(model, view, Mat4::IDENTITY);
        // view * model: 先に平行移動、その後スケール
        let p = m.model_view.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_perspective_maps_near_plane() {
        let proj = perspective(1.0);
        let clip = proj * Vec4::new(0.0, 0.0, -Z_NEAR, 1.0);
        assert!((clip.z / clip.w).abs() < 1e-5);
    }
}
