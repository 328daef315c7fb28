pub mod name;
pub mod shape;
pub mod transform;

pub use name::Name;
pub use shape::{ShapeKind, UnknownShape};
pub use transform::Transform;
