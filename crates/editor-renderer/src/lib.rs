pub mod axes;
pub mod camera;
pub mod input;
pub mod mesh;
pub mod shading;

pub use axes::{Axis, AxisGrid, AxisLines};
pub use camera::Camera;
pub use input::{InputState, MoveKey, PointerDrag};
pub use mesh::{GpuMesh, Vertex};
pub use shading::{Lighting, ShadingUniform};

// Re-export glam types for consistent version usage
pub use glam;
