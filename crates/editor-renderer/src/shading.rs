//! シェーディング
//!
//! 発光（isLight）と拡散反射（Lambert）の2種類。GPU用Uniformと、
//! 同じ式をCPUで評価する `shade_fragment` を持つ

use bytemuck::{Pod, Zeroable};

use editor_core::EditorSettings;
use editor_core::math::{Mat4, Vec3};
use editor_core::settings::clamp_light_intensity;

/// 通常オブジェクトの色
pub const OBJECT_COLOR: Vec3 = Vec3::new(0.5, 0.3, 0.4);
/// 発光オブジェクトの色
pub const EMISSIVE_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.8);

/// ワールド空間に固定された点光源
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub position: Vec3,
    intensity: f32,
}

impl Lighting {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity: clamp_light_intensity(intensity),
        }
    }

    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self::new(
            Vec3::from_array(settings.light_position),
            settings.light_intensity,
        )
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// スライダー値を設定（範囲外はクランプ）
    pub fn set_intensity(&mut self, value: f32) {
        self.intensity = clamp_light_intensity(value);
        tracing::debug!(requested = value, intensity = self.intensity, "light intensity changed");
    }

    /// 光の色 = 強度 * 白
    pub fn light_color(&self) -> Vec3 {
        Vec3::splat(self.intensity)
    }

    /// ビュー空間での光源位置
    pub fn view_position(&self, view: Mat4) -> Vec3 {
        view.transform_point3(self.position)
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default())
    }
}

/// GPU用シェーディングUniform
/// WGSLの vec3 は16バイト境界なので、各vec3の後ろに4バイトを置く
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShadingUniform {
    pub light_position: [f32; 3],
    /// 1 = 発光, 0 = 拡散反射
    pub is_light: i32,
    pub light_color: [f32; 3],
    _pad0: f32,
    pub emissive_color: [f32; 3],
    _pad1: f32,
    pub object_color: [f32; 3],
    _pad2: f32,
}

impl ShadingUniform {
    /// 拡散反射用。光源位置はビュー空間で渡す
    pub fn lit(light_position_view: Vec3, light_color: Vec3, object_color: Vec3) -> Self {
        Self {
            light_position: light_position_view.to_array(),
            is_light: 0,
            light_color: light_color.to_array(),
            emissive_color: EMISSIVE_COLOR.to_array(),
            object_color: object_color.to_array(),
            ..Zeroable::zeroed()
        }
    }

    /// 発光用（光源の影響を受けない）
    pub fn emissive(color: Vec3) -> Self {
        Self {
            is_light: 1,
            emissive_color: color.to_array(),
            object_color: OBJECT_COLOR.to_array(),
            ..Zeroable::zeroed()
        }
    }

    /// オブジェクト1つ分のUniform
    pub fn for_object(is_light: bool, lighting: &Lighting, view: Mat4) -> Self {
        if is_light {
            Self::emissive(EMISSIVE_COLOR)
        } else {
            Self::lit(
                lighting.view_position(view),
                lighting.light_color(),
                OBJECT_COLOR,
            )
        }
    }
}

/// フラグメントシェーダーと同じ式をCPUで評価する
///
/// `normal` と `frag_pos` はビュー空間。法線は内部で正規化する
pub fn shade_fragment(normal: Vec3, frag_pos: Vec3, uniform: &ShadingUniform) -> Vec3 {
    if uniform.is_light == 1 {
        return Vec3::from_array(uniform.emissive_color);
    }

    let n = normal.normalize_or_zero();
    let to_light = (Vec3::from_array(uniform.light_position) - frag_pos).normalize_or_zero();
    let diffuse = n.dot(to_light).max(0.0);

    Vec3::from_array(uniform.object_color) * diffuse * Vec3::from_array(uniform.light_color)
}
