pub mod camera;
pub mod gpu;
pub mod lighting;
pub mod mesh_buffers;
pub mod readback;
pub mod texture;

pub use camera::Camera;
pub use gpu::{GpuError, GpuState};
pub use lighting::{SceneUniform, SpotlightRig};
