pub mod flatten;
pub mod obj;

pub use flatten::{FlatMesh, FlattenError, flatten};
pub use obj::{MeshLoadError, load_indexed_mesh};
