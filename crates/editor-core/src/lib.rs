pub mod components;
pub mod error;
pub mod geometry;
pub mod math;
pub mod scene;
pub mod serializer;
pub mod settings;

// Re-exports
pub use components::{Name, ShapeKind, Transform};
pub use error::{EditorError, Result};
pub use geometry::Mesh;
pub use math::{ObjectMatrices, TransformUniform};
pub use scene::{ObjectId, Scene, SceneObject};
pub use settings::EditorSettings;
