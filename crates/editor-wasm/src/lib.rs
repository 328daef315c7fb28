// crates/editor-wasm/src/lib.rs

mod renderer;
mod shaders;
mod subscription;
mod utils;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use editor_core::components::UnknownShape;
use editor_core::scene::random_placement;
use editor_core::serializer;
use editor_core::{EditorError, EditorSettings, Scene, SceneObject, ShapeKind};
use editor_renderer::{Camera, InputState, Lighting};
use glam::Vec3;

use renderer::Renderer;
use subscription::ObjectListSubscriptionManager;
use utils::{editor_error, object_id, random_unit3};

// パニック時のスタックトレース表示とログ出力の初期化
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("editor wasm module initialized");
}

/// Editor構造体
/// シーン・カメラ・入力・ライト・Rendererを所有し、JSから操作可能なAPIを提供
#[wasm_bindgen]
pub struct Editor {
    scene: Scene,
    camera: Camera,
    input: InputState,
    lighting: Lighting,
    renderer: Renderer,
    subscriptions: ObjectListSubscriptionManager,
    /// 一覧に影響する変更があったか（次のtickで通知）
    list_dirty: bool,
}

#[wasm_bindgen]
impl Editor {
    /// 新しいEditorを作成（非同期）
    ///
    /// `settings` は省略可能。未指定のフィールドはデフォルト値
    pub async fn create(canvas: HtmlCanvasElement, settings: JsValue) -> Result<Editor, JsValue> {
        let settings = parse_settings(settings)?;
        let renderer = Renderer::create(canvas, &settings).await?;
        let camera = Camera::from_settings(&settings, renderer.aspect());

        tracing::info!("editor created");
        Ok(Self {
            scene: Scene::new(),
            camera,
            input: InputState::new(),
            lighting: Lighting::from_settings(&settings),
            renderer,
            subscriptions: ObjectListSubscriptionManager::new(),
            list_dirty: false,
        })
    }

    // ========================================================================
    // オブジェクト操作
    // ========================================================================

    /// 形状を追加してランダムな位置に置き、選択する。IDを返す
    pub fn add_object(&mut self, kind: &str) -> Result<u32, JsValue> {
        let kind: ShapeKind = kind
            .parse()
            .map_err(|e: UnknownShape| JsValue::from_str(&e.to_string()))?;

        let object = SceneObject::new(kind).with_position(random_placement(random_unit3()));
        let id = self.scene.add_and_select(object);
        self.list_dirty = true;
        Ok(id.to_u32())
    }

    /// オブジェクトを削除
    pub fn remove_object(&mut self, id: u32) -> Result<(), JsValue> {
        let id = object_id(id)?;
        self.scene
            .remove(id)
            .ok_or_else(|| editor_error(EditorError::ObjectNotFound(id)))?;
        self.list_dirty = true;
        Ok(())
    }

    pub fn select_object(&mut self, id: u32) -> Result<(), JsValue> {
        self.scene.select(object_id(id)?).map_err(editor_error)?;
        self.list_dirty = true;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.scene.clear_selection();
        self.list_dirty = true;
    }

    /// 選択中のID
    pub fn selected_object(&self) -> Option<u32> {
        self.scene.selected().map(|id| id.to_u32())
    }

    pub fn rename_object(&mut self, id: u32, name: &str) -> Result<(), JsValue> {
        self.scene.rename(object_id(id)?, name).map_err(editor_error)?;
        self.list_dirty = true;
        Ok(())
    }

    pub fn set_size(&mut self, id: u32, size: f32) -> Result<(), JsValue> {
        self.scene.set_size(object_id(id)?, size).map_err(editor_error)
    }

    pub fn set_position(&mut self, id: u32, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.scene
            .set_position(object_id(id)?, Vec3::new(x, y, z))
            .map_err(editor_error)
    }

    /// 回転を設定（ラジアン）
    pub fn set_rotation(&mut self, id: u32, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.scene
            .set_rotation(object_id(id)?, Vec3::new(x, y, z))
            .map_err(editor_error)
    }

    /// 回転を設定（度、プロパティパネル用）
    pub fn set_rotation_degrees(&mut self, id: u32, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.scene
            .set_rotation_degrees(object_id(id)?, Vec3::new(x, y, z))
            .map_err(editor_error)
    }

    /// `{name, kind, size, position, rotationDegrees}`
    pub fn object_properties(&self, id: u32) -> Result<JsValue, JsValue> {
        let properties = self.scene.properties(object_id(id)?).map_err(editor_error)?;
        serde_wasm_bindgen::to_value(&properties)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// 一覧 `[{id, name, kind, selected}]`（シーン順）
    pub fn objects(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.scene.summaries())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn object_count(&self) -> usize {
        self.scene.len()
    }

    /// 一覧の変更を購読する。購読IDを返す
    pub fn subscribe_objects(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.subscriptions.subscribe(callback);
        // 次のtickで現在の一覧を届ける
        self.list_dirty = true;
        id
    }

    pub fn unsubscribe_objects(&mut self, id: u32) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    // ========================================================================
    // 入力
    // ========================================================================

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.input.drag_mut().begin(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.input.drag_mut().end();
    }

    /// ドラッグ中なら視点を回転
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(delta) = self.input.drag_mut().moved(x, y) {
            self.camera.apply_look_delta(delta.x, delta.y);
        }
    }

    /// フォーカス喪失時に押下状態を解除
    pub fn release_input(&mut self) {
        self.input.release_all();
    }

    /// ライト強度（[0, 2] にクランプ）
    pub fn set_light_intensity(&mut self, value: f32) {
        self.lighting.set_intensity(value);
    }

    pub fn light_intensity(&self) -> f32 {
        self.lighting.intensity()
    }

    // ========================================================================
    // ファイル
    // ========================================================================

    /// OBJテキストを生成（ダウンロードはJS側）
    pub fn export_obj(&self, watermark: &str) -> String {
        serializer::export_obj(&self.scene, watermark)
    }

    /// OBJテキストから透かしを取り出す。無ければ undefined
    pub fn extract_watermark(&self, text: &str) -> Option<String> {
        serializer::extract_watermark(text).map(str::to_string)
    }

    /// プロジェクトJSONを生成
    pub fn save_project(&self) -> Result<String, JsValue> {
        serializer::save_project(&self.scene).map_err(editor_error)
    }

    /// プロジェクトJSONでシーンを置き換える。読み込んだ数を返す
    ///
    /// 失敗時はシーンを変更しない
    pub fn open_project(&mut self, json: &str) -> Result<usize, JsValue> {
        let count = serializer::import_project(&mut self.scene, json).map_err(editor_error)?;
        self.list_dirty = true;
        Ok(count)
    }

    // ========================================================================
    // フレーム
    // ========================================================================

    /// フレーム更新（カメラ移動 → 描画 → 一覧通知）
    pub fn tick(&mut self, _delta_time: f32) -> Result<(), JsValue> {
        self.camera.apply_movement(&self.input);
        self.renderer
            .render_scene(&self.scene, &self.camera, &self.lighting)?;
        self.flush_object_list();
        Ok(())
    }

    /// Canvasリサイズ
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.renderer.resize(width, height) {
            self.camera.set_aspect(self.renderer.aspect());
        }
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }
}

impl Editor {
    fn flush_object_list(&mut self) {
        if !self.list_dirty {
            return;
        }
        self.list_dirty = false;

        let summaries = self.scene.summaries();
        self.subscriptions.notify_changed(&summaries, |list| {
            serde_wasm_bindgen::to_value(list)
                .map_err(|e| tracing::warn!(%e, "failed to serialize object list"))
                .ok()
        });
    }
}

/// JSの設定オブジェクトを解析（undefined/null はデフォルト）
fn parse_settings(value: JsValue) -> Result<EditorSettings, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorSettings::default());
    }
    let settings: EditorSettings = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
    Ok(settings.validated())
}
