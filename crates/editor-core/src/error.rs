//! エラー型
//!
//! シーン編集・シリアライズで発生するエラーを集約する

use crate::math::Vec3;
use crate::scene::ObjectId;

/// エディタ操作のエラー
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// プロジェクトファイルのJSONが不正
    #[error("project file is malformed: {0}")]
    ProjectFormat(#[source] serde_json::Error),

    /// プロジェクトのシリアライズに失敗
    #[error("failed to serialize project: {0}")]
    ProjectSerialize(#[source] serde_json::Error),

    /// 指定IDのオブジェクトが存在しない
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    /// サイズは正の有限値のみ
    #[error("invalid size {0}: must be a positive finite number")]
    InvalidSize(f32),

    /// 位置・回転の成分は有限値のみ
    #[error("invalid {field} {value}: components must be finite")]
    InvalidTransform { field: &'static str, value: Vec3 },

    /// 入力ファイル（テキスト）が指定されていない
    #[error("no input file selected")]
    NoInput,
}

pub type Result<T> = std::result::Result<T, EditorError>;
