//! シェーダーモジュール
//!
//! WGSLシェーダーを外部ファイルから読み込む

/// メインシェーダー（オブジェクト・座標軸共通）
pub const MAIN_SHADER: &str = include_str!("main.wgsl");
