//! シーンストア
//!
//! 挿入順のオブジェクト列と、IDで保持する選択状態

mod id;
pub mod object;
pub mod store;

pub use id::ObjectId;
pub use object::{ObjectProperties, ObjectSummary, SceneObject, random_placement};
pub use store::Scene;
