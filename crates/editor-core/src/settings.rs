//! エディタ設定
//!
//! JS側から任意で渡される設定値。未指定のフィールドはデフォルト値になる。

use serde::{Deserialize, Serialize};

/// ライト強度スライダーの範囲
pub const LIGHT_INTENSITY_MIN: f32 = 0.0;
pub const LIGHT_INTENSITY_MAX: f32 = 2.0;

/// エディタ全体の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    /// カメラ初期位置（初期向きは原点を向く）
    pub camera_position: [f32; 3],
    /// 1フレームあたりの移動量
    pub camera_speed: f32,
    /// ドラッグ1ピクセルあたりの回転量（ラジアン）
    pub mouse_sensitivity: f32,
    /// ワールド空間の光源位置
    pub light_position: [f32; 3],
    pub light_intensity: f32,
    pub clear_color: [f32; 3],
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            camera_position: [5.0, 5.0, 5.0],
            camera_speed: 0.2,
            mouse_sensitivity: 0.005,
            light_position: [4.0, 4.0, -3.0],
            light_intensity: 1.0,
            clear_color: [0.8, 0.8, 0.8],
        }
    }
}

impl EditorSettings {
    /// 不正値をデフォルトに戻し、ライト強度を範囲内に収める
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.camera_speed.is_finite() && self.camera_speed > 0.0) {
            tracing::warn!(speed = self.camera_speed, "invalid camera speed, using default");
            self.camera_speed = defaults.camera_speed;
        }
        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0) {
            tracing::warn!(
                sensitivity = self.mouse_sensitivity,
                "invalid mouse sensitivity, using default"
            );
            self.mouse_sensitivity = defaults.mouse_sensitivity;
        }
        if !self.camera_position.iter().all(|v| v.is_finite()) {
            self.camera_position = defaults.camera_position;
        }
        if !self.light_position.iter().all(|v| v.is_finite()) {
            self.light_position = defaults.light_position;
        }
        self.light_intensity = clamp_light_intensity(self.light_intensity);

        self
    }
}

/// スライダー値をライト強度の範囲に収める（NaNはデフォルトの1.0）
pub fn clamp_light_intensity(value: f32) -> f32 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(LIGHT_INTENSITY_MIN, LIGHT_INTENSITY_MAX)
}
