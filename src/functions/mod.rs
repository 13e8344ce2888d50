pub mod constants;
pub mod primitives;
pub mod registry;
pub mod traits;
pub mod variables;

pub use registry::{NodeRegistry, NodeSpec, SpecKind};
pub use traits::Primitive;
