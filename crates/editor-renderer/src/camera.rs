use std::f32::consts::FRAC_PI_2;

use editor_core::math::{self, Mat4, Vec3};
use editor_core::EditorSettings;

use crate::input::{InputState, MoveKey};

/// フリールックカメラ
/// 位置とヨー/ピッチで向きを表す。向きベクトルは保持せず毎回導出する
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// XZ平面内の角度（ラジアン）
    pub yaw: f32,
    /// 仰角（ラジアン、[-π/2, π/2]）
    pub pitch: f32,
    pub up: Vec3,
    /// 1フレームあたりの移動量
    pub speed: f32,
    /// ドラッグ1ピクセルあたりの回転量
    pub sensitivity: f32,
    pub aspect: f32,
}

impl Camera {
    /// 原点を向く位置にカメラを作成
    pub fn new(aspect: f32) -> Self {
        Self::from_settings(&EditorSettings::default(), aspect)
    }

    /// 設定から作成（初期向きは原点を注視）
    pub fn from_settings(settings: &EditorSettings, aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::from_array(settings.camera_position),
            yaw: 0.0,
            pitch: 0.0,
            up: Vec3::Y,
            speed: settings.camera_speed,
            sensitivity: settings.mouse_sensitivity,
            aspect,
        };
        camera.look_at(Vec3::ZERO);
        camera
    }

    /// 指定点を向くようにヨー/ピッチを設定
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        let length = dir.length();
        if length <= f32::EPSILON {
            return;
        }
        self.yaw = dir.z.atan2(dir.x);
        self.pitch = (dir.y / length).clamp(-1.0, 1.0).asin();
    }

    /// 前方向ベクトル
    pub fn forward(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize()
    }

    /// 右方向ベクトル
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    /// View行列（右手系、position から position + forward を注視）
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up)
    }

    /// Projection行列
    pub fn projection_matrix(&self) -> Mat4 {
        math::perspective(self.aspect)
    }

    /// ドラッグ量で視点を回転（ピッチは常にクランプ）
    pub fn apply_look_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// 押下中のキーで移動（毎フレーム描画前に呼ぶ）
    pub fn apply_movement(&mut self, input: &InputState) {
        let forward = self.forward();
        let right = self.right();

        let mut delta = Vec3::ZERO;
        if input.is_pressed(MoveKey::Forward) {
            delta += forward * self.speed;
        }
        if input.is_pressed(MoveKey::Backward) {
            delta -= forward * self.speed;
        }
        if input.is_pressed(MoveKey::Left) {
            delta -= right * self.speed;
        }
        if input.is_pressed(MoveKey::Right) {
            delta += right * self.speed;
        }
        if input.is_pressed(MoveKey::Down) {
            delta.y -= self.speed;
        }
        if input.is_pressed(MoveKey::Up) {
            delta.y += self.speed;
        }

        self.position += delta;
    }

    /// カメラ位置を設定
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// アスペクト比を設定
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_camera_new_looks_at_origin() {
        let camera = Camera::new(16.0 / 9.0);
        assert_eq!(camera.position, Vec3::new(5.0, 5.0, 5.0));
        assert!((camera.yaw - (-5.0f32).atan2(-5.0)).abs() < 1e-6);
        assert!((camera.pitch - (-5.0 / 75.0f32.sqrt()).asin()).abs() < 1e-6);
        assert_close(camera.forward(), -camera.position.normalize());
    }

    #[test]
    fn test_view_matrix_moves_origin_in_front() {
        let camera = Camera::new(1.0);
        let p = camera.view_matrix().transform_point3(Vec3::ZERO);
        // 右手系: 前方は -Z
        assert!(p.z < 0.0);
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
        assert!((p.z + 75.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_clamped_down() {
        let mut camera = Camera::new(1.0);
        for _ in 0..10 {
            camera.apply_look_delta(0.0, 100000.0);
            assert_eq!(camera.pitch, -FRAC_PI_2);
        }
    }

    #[test]
    fn test_pitch_clamped_up() {
        let mut camera = Camera::new(1.0);
        camera.apply_look_delta(0.0, -100000.0);
        assert_eq!(camera.pitch, FRAC_PI_2);
    }

    #[test]
    fn test_look_delta_yaw() {
        let mut camera = Camera::new(1.0);
        let yaw = camera.yaw;
        camera.apply_look_delta(100.0, 0.0);
        assert!((camera.yaw - (yaw + 100.0 * 0.005)).abs() < 1e-6);
    }

    #[test]
    fn test_movement_forward_and_back_cancel() {
        let mut camera = Camera::new(1.0);
        let start = camera.position;
        let mut input = InputState::new();
        input.key_down("w");
        input.key_down("S");
        camera.apply_movement(&input);
        assert_close(camera.position, start);
    }

    #[test]
    fn test_movement_forward() {
        let mut camera = Camera::new(1.0);
        camera.yaw = -FRAC_PI_2;
        camera.pitch = 0.0;
        camera.set_position(Vec3::ZERO);

        let mut input = InputState::new();
        input.key_down("W");
        camera.apply_movement(&input);
        assert_close(camera.position, Vec3::new(0.0, 0.0, -0.2));
    }

    #[test]
    fn test_movement_strafe_and_vertical() {
        let mut camera = Camera::new(1.0);
        camera.yaw = -FRAC_PI_2;
        camera.pitch = 0.0;
        camera.set_position(Vec3::ZERO);

        let mut input = InputState::new();
        input.key_down("d");
        input.key_down("e");
        camera.apply_movement(&input);
        // -Z を向いたときの右は +X
        assert_close(camera.position, Vec3::new(0.2, 0.2, 0.0));
    }

    #[test]
    fn test_no_keys_no_movement() {
        let mut camera = Camera::new(1.0);
        let start = camera.position;
        camera.apply_movement(&InputState::new());
        assert_eq!(camera.position, start);
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = Camera::new(1.0);
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
        assert_ne!(camera.projection_matrix(), math::perspective(1.0));
    }
}
