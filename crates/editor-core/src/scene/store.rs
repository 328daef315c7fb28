use crate::error::{EditorError, Result};
use crate::math::Vec3;

use super::ObjectId;
use super::id::IdAllocator;
use super::object::{ObjectProperties, ObjectSummary, SceneObject};

/// シーンのメインコンテナ
/// 挿入順 = 描画順でオブジェクトを保持し、選択状態を持つ
#[derive(Debug, Clone)]
pub struct Scene {
    /// 挿入順のオブジェクト列
    objects: Vec<(ObjectId, SceneObject)>,
    /// IDの払い出し
    ids: IdAllocator,
    /// 選択中オブジェクト（所有しない）
    selected: Option<ObjectId>,
}

impl Scene {
    /// 空のシーンを作成
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            ids: IdAllocator::new(),
            selected: None,
        }
    }

    /// オブジェクトを末尾に追加
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = self.ids.allocate();
        tracing::debug!(%id, kind = %object.kind, "object added");
        self.objects.push((id, object));
        id
    }

    /// オブジェクトを追加して選択する
    pub fn add_and_select(&mut self, object: SceneObject) -> ObjectId {
        let id = self.add(object);
        self.selected = Some(id);
        id
    }

    /// オブジェクトを削除
    /// 選択中だった場合は選択を解除する。他の選択は維持される
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.index_of(id)?;
        let (_, object) = self.objects.remove(index);

        if self.selected == Some(id) {
            self.selected = None;
        }

        tracing::debug!(%id, "object removed");
        Some(object)
    }

    /// 全オブジェクトを一度に置き換える（インポート用）
    /// 途中状態が描画されないよう、列全体を1ステップで差し替える
    pub fn replace_all(&mut self, objects: Vec<SceneObject>) {
        let replaced: Vec<(ObjectId, SceneObject)> = objects
            .into_iter()
            .map(|object| (self.ids.allocate(), object))
            .collect();

        self.objects = replaced;
        self.selected = None;
        tracing::info!(count = self.objects.len(), "scene replaced");
    }

    /// オブジェクトが存在するか確認
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    /// オブジェクトを取得（不変参照）
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .map(|(_, object)| object)
    }

    /// オブジェクトを取得（可変参照）
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, object)| object)
    }

    /// 挿入順でイテレート
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    /// オブジェクト数を取得
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// 選択中のID
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// 選択中のオブジェクト
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.get(self.selected?)
    }

    /// オブジェクトを選択
    pub fn select(&mut self, id: ObjectId) -> Result<()> {
        if !self.contains(id) {
            return Err(EditorError::ObjectNotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    /// 選択を解除
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// 名前を変更（空文字・重複も許可）
    pub fn rename(&mut self, id: ObjectId, name: impl Into<String>) -> Result<()> {
        self.object_mut(id)?.name.set(name);
        Ok(())
    }

    /// サイズを設定（正の有限値のみ）
    pub fn set_size(&mut self, id: ObjectId, size: f32) -> Result<()> {
        if !(size.is_finite() && size > 0.0) {
            return Err(EditorError::InvalidSize(size));
        }
        self.object_mut(id)?.transform.size = size;
        Ok(())
    }

    /// 位置を設定（各成分は有限値のみ）
    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> Result<()> {
        check_finite("position", position)?;
        self.object_mut(id)?.transform.position = position;
        Ok(())
    }

    /// 回転を設定（ラジアン、各成分は有限値のみ）
    pub fn set_rotation(&mut self, id: ObjectId, rotation: Vec3) -> Result<()> {
        check_finite("rotation", rotation)?;
        self.object_mut(id)?.transform.rotation = rotation;
        Ok(())
    }

    /// 回転を設定（度、プロパティパネル入力用）
    pub fn set_rotation_degrees(&mut self, id: ObjectId, degrees: Vec3) -> Result<()> {
        let radians = Vec3::new(
            degrees.x.to_radians(),
            degrees.y.to_radians(),
            degrees.z.to_radians(),
        );
        self.set_rotation(id, radians)
    }

    // ========================================================================
    // UI views
    // ========================================================================

    /// 一覧表示用のサマリ（挿入順）
    pub fn summaries(&self) -> Vec<ObjectSummary> {
        self.iter()
            .map(|(id, object)| ObjectSummary::new(id, object, self.selected == Some(id)))
            .collect()
    }

    /// プロパティパネル用の値
    pub fn properties(&self, id: ObjectId) -> Result<ObjectProperties> {
        self.get(id)
            .map(ObjectProperties::from_object)
            .ok_or(EditorError::ObjectNotFound(id))
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|(oid, _)| *oid == id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject> {
        self.get_mut(id).ok_or(EditorError::ObjectNotFound(id))
    }
}

fn check_finite(field: &'static str, value: Vec3) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EditorError::InvalidTransform { field, value })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
