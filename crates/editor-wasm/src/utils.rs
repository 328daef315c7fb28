//! ユーティリティモジュール
//!
//! JSへのエラー変換、乱数、ID変換などのヘルパー

use std::fmt;

use wasm_bindgen::prelude::*;

use editor_core::{EditorError, ObjectId};

/// 文脈付きでJSエラーに変換
pub fn js_error(context: &str, err: impl fmt::Debug) -> JsValue {
    let message = format!("{context}: {err:?}");
    tracing::error!("{message}");
    JsValue::from_str(&message)
}

/// エディタ操作のエラーをJSエラーに変換
pub fn editor_error(err: EditorError) -> JsValue {
    tracing::warn!(%err, "editor operation failed");
    JsValue::from_str(&err.to_string())
}

/// JSから渡されたIDを検証
pub fn object_id(id: u32) -> Result<ObjectId, JsValue> {
    ObjectId::from_u32(id).ok_or_else(|| JsValue::from_str(&format!("invalid object id: {id}")))
}

/// [0, 1) の一様乱数を3つ
pub fn random_unit3() -> [f32; 3] {
    [
        js_sys::Math::random() as f32,
        js_sys::Math::random() as f32,
        js_sys::Math::random() as f32,
    ]
}
