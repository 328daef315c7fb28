//! シーンのシリアライズ
//!
//! - OBJ: ワールド空間に焼き込んだメッシュ + ウォーターマーク
//! - JSON: 編集可能なシーン（形状・サイズ・位置・回転）

pub mod obj;
pub mod project;

pub use obj::{WATERMARK_PREFIX, export_obj, extract_watermark};
pub use project::{ProjectRecord, import_project, load_project, save_project};
