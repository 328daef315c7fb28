//! プロジェクトファイル（JSON）の保存と読み込み
//!
//! 形式: `[{ "type": "cube", "size": 1, "position": [x,y,z], "rotation": [x,y,z] }, ...]`
//! 回転はラジアン。メッシュは保存せず、読み込み時に形状から再生成する

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::components::{ShapeKind, Transform};
use crate::error::{EditorError, Result};
use crate::math::Vec3;
use crate::scene::{Scene, SceneObject};

/// プロジェクトファイルの1レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// 小文字の形状名。未知の値は読み込み時にスキップ
    #[serde(rename = "type")]
    pub kind: String,
    pub size: f32,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

impl ProjectRecord {
    pub fn from_object(object: &SceneObject) -> Self {
        let t = &object.transform;
        Self {
            kind: object.kind.as_str().to_string(),
            size: t.size,
            position: t.position.to_array(),
            rotation: t.rotation.to_array(),
        }
    }

    /// 形状を再生成して変換を復元する。不正なサイズはNone
    pub fn to_object(&self, kind: ShapeKind) -> Option<SceneObject> {
        if !(self.size.is_finite() && self.size > 0.0) {
            tracing::warn!(size = self.size, %kind, "skipping project record with invalid size");
            return None;
        }

        let transform = Transform::new(
            self.size,
            Vec3::from_array(self.position),
            Vec3::from_array(self.rotation),
        );
        Some(SceneObject::new(kind).with_transform(transform))
    }
}

/// レコードの `type` を先に読む。未知・欠落ならNone
fn record_kind(value: &Value) -> Option<ShapeKind> {
    let Some(name) = value.get("type").and_then(Value::as_str) else {
        tracing::warn!("skipping project record without type");
        return None;
    };
    match name.parse::<ShapeKind>() {
        Ok(kind) => Some(kind),
        Err(err) => {
            tracing::warn!(%err, "skipping project record");
            None
        }
    }
}

/// シーンをプロジェクトJSON（整形済み）に変換
pub fn save_project(scene: &Scene) -> Result<String> {
    let records: Vec<ProjectRecord> = scene
        .iter()
        .map(|(_, object)| ProjectRecord::from_object(object))
        .collect();

    serde_json::to_string_pretty(&records).map_err(EditorError::ProjectSerialize)
}

/// プロジェクトJSONを解析してオブジェクト列を構築
///
/// シーンには触れない。未知の `type` のレコードは他のフィールドを見ずに
/// スキップし、既知の形状でフィールドが欠けていれば `ProjectFormat` を返す
pub fn load_project(json: &str) -> Result<Vec<SceneObject>> {
    if json.trim().is_empty() {
        return Err(EditorError::NoInput);
    }

    let values: Vec<Value> = serde_json::from_str(json).map_err(EditorError::ProjectFormat)?;

    let mut objects = Vec::with_capacity(values.len());
    for value in &values {
        let Some(kind) = record_kind(value) else {
            continue;
        };
        let record = ProjectRecord::deserialize(value).map_err(EditorError::ProjectFormat)?;
        objects.extend(record.to_object(kind));
    }

    tracing::info!(records = values.len(), loaded = objects.len(), "project parsed");
    Ok(objects)
}

/// プロジェクトJSONを読み込み、シーン全体を置き換える
///
/// 解析に失敗した場合シーンは変更されない。読み込んだオブジェクト数を返す
pub fn import_project(scene: &mut Scene, json: &str) -> Result<usize> {
    let objects = load_project(json)?;
    let count = objects.len();
    scene.replace_all(objects);
    Ok(count)
}
