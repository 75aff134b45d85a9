pub mod ppm;
pub mod session;

use std::path::PathBuf;

use thiserror::Error;

pub use ppm::PixelImage;
pub use session::CaptureSession;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to write capture {}: {source}", .path.display())]
    DumpIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("capture region {width}x{height} is empty")]
    EmptyRegion { width: u32, height: u32 },
    #[error("expected {expected} bytes of pixel data, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("cannot read back pixels in format {0:?}")]
    UnsupportedFormat(wgpu::TextureFormat),
    #[error("readback buffer mapping failed: {0}")]
    Readback(String),
}
