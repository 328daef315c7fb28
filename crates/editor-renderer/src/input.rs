//! 入力状態
//!
//! キー押下状態とポインタドラッグを保持し、カメラが毎フレーム参照する

use std::collections::HashSet;

use editor_core::math::Vec2;

/// カメラ移動の論理方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
    Down,
    Up,
}

impl MoveKey {
    /// W/S/A/D/Q/E（大文字小文字を区別しない）を方向に変換
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" => Some(MoveKey::Forward),
            "s" => Some(MoveKey::Backward),
            "a" => Some(MoveKey::Left),
            "d" => Some(MoveKey::Right),
            "q" => Some(MoveKey::Down),
            "e" => Some(MoveKey::Up),
            _ => None,
        }
    }
}

/// 押下中キーとドラッグ状態
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<MoveKey>,
    drag: PointerDrag,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// キー押下（移動キー以外は無視）
    pub fn key_down(&mut self, key: &str) {
        if let Some(k) = MoveKey::from_key(key) {
            self.pressed.insert(k);
        }
    }

    /// キー解放
    pub fn key_up(&mut self, key: &str) {
        if let Some(k) = MoveKey::from_key(key) {
            self.pressed.remove(&k);
        }
    }

    pub fn is_pressed(&self, key: MoveKey) -> bool {
        self.pressed.contains(&key)
    }

    /// フォーカス喪失時など、全キーを離した扱いにする
    pub fn release_all(&mut self) {
        self.pressed.clear();
        self.drag.end();
    }

    pub fn drag(&self) -> &PointerDrag {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut PointerDrag {
        &mut self.drag
    }
}

/// ポインタドラッグ
/// 絶対座標を受け取り、押下中のみ前回位置からの差分を返す
#[derive(Debug, Clone, Default)]
pub struct PointerDrag {
    last: Option<Vec2>,
}

impl PointerDrag {
    /// ポインタ押下
    pub fn begin(&mut self, x: f32, y: f32) {
        self.last = Some(Vec2::new(x, y));
    }

    /// ポインタ解放
    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// ポインタ移動。ドラッグ中でなければNone
    pub fn moved(&mut self, x: f32, y: f32) -> Option<Vec2> {
        let last = self.last.as_mut()?;
        let current = Vec2::new(x, y);
        let delta = current - *last;
        *last = current;
        Some(delta)
    }
}
