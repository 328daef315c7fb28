//! オブジェクト一覧の購読管理モジュール
//!
//! 一覧（名前・選択状態を含む）が変化したときだけコールバックを呼び出す

use js_sys::Function;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use editor_core::scene::ObjectSummary;

/// 購読情報
pub struct ObjectListSubscription {
    pub callback: Function,
    /// 最後に通知した一覧のハッシュ（未通知ならNone）
    pub last_hash: Option<u64>,
}

/// 購読マネージャー
pub struct ObjectListSubscriptionManager {
    subscriptions: HashMap<u32, ObjectListSubscription>,
    next_id: u32,
}

impl ObjectListSubscriptionManager {
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn subscribe(&mut self, callback: Function) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        self.subscriptions.insert(
            id,
            ObjectListSubscription {
                callback,
                last_hash: None,
            },
        );

        id
    }

    pub fn unsubscribe(&mut self, id: u32) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    /// ハッシュが変わった購読者にだけ通知する
    ///
    /// `to_js` は通知が必要な場合のみ呼ばれる
    pub fn notify_changed<F>(&mut self, summaries: &[ObjectSummary], to_js: F)
    where
        F: Fn(&[ObjectSummary]) -> Option<wasm_bindgen::JsValue>,
    {
        if self.subscriptions.is_empty() {
            return;
        }

        let hash = calculate_hash(summaries);
        let mut payload = None;

        for (id, sub) in self.subscriptions.iter_mut() {
            if sub.last_hash == Some(hash) {
                continue;
            }
            if payload.is_none() {
                payload = to_js(summaries);
            }
            let Some(value) = payload.as_ref() else {
                return;
            };
            sub.last_hash = Some(hash);
            if let Err(err) = sub.callback.call1(&wasm_bindgen::JsValue::NULL, value) {
                tracing::warn!(subscription = id, ?err, "object list callback threw");
            }
        }
    }
}

impl Default for ObjectListSubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// 一覧のハッシュを計算
pub fn calculate_hash(summaries: &[ObjectSummary]) -> u64 {
    let json = serde_json::to_string(summaries).unwrap_or_default();
    let mut hasher = DefaultHasher::new();
    json.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use editor_core::{Scene, SceneObject, ShapeKind};

    #[test]
    fn test_hash_tracks_name_and_selection() {
        let mut scene = Scene::new();
        let id = scene.add(SceneObject::new(ShapeKind::Cube));
        let before = calculate_hash(&scene.summaries());

        scene.select(id).unwrap();
        let selected = calculate_hash(&scene.summaries());
        assert_ne!(before, selected);

        scene.rename(id, "Box").unwrap();
        assert_ne!(selected, calculate_hash(&scene.summaries()));
    }

    #[test]
    fn test_hash_ignores_transform() {
        let mut scene = Scene::new();
        let id = scene.add(SceneObject::new(ShapeKind::Sphere));
        let before = calculate_hash(&scene.summaries());
        scene.set_size(id, 3.0).unwrap();
        assert_eq!(before, calculate_hash(&scene.summaries()));
    }
}
