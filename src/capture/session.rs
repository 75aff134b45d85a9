use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::CaptureError;
use super::ppm::{PixelImage, write_ppm};

const EXTENSION: &str = "ppm";

/// Names successive captures `<prefix><n>.ppm`. The counter is shared by
/// every prefix and only advances once a file has been written in full.
pub struct CaptureSession {
    directory: PathBuf,
    next_sequence: u64,
}

impl CaptureSession {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            next_sequence: 0,
        }
    }

    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn path_for(&self, prefix: &str) -> PathBuf {
        self.directory
            .join(format!("{prefix}{}.{EXTENSION}", self.next_sequence))
    }

    pub fn dump(&mut self, prefix: &str, image: &PixelImage) -> Result<PathBuf, CaptureError> {
        let path = self.path_for(prefix);
        write_file(&path, image).map_err(|source| CaptureError::DumpIo {
            path: path.clone(),
            source,
        })?;

        log::info!(
            "capture {} written to {} ({}x{})",
            self.next_sequence,
            path.display(),
            image.width(),
            image.height()
        );
        self.next_sequence += 1;
        Ok(path)
    }
}

fn write_file(path: &Path, image: &PixelImage) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_ppm(&mut out, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_pixel() -> PixelImage {
        PixelImage::from_bottom_up(1, 1, vec![255, 0, 0]).unwrap()
    }

    #[test]
    fn consecutive_dumps_get_consecutive_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = CaptureSession::new(dir.path());

        let first = session.dump("ss", &red_pixel()).unwrap();
        let second = session.dump("ss", &red_pixel()).unwrap();

        assert_eq!(first, dir.path().join("ss0.ppm"));
        assert_eq!(second, dir.path().join("ss1.ppm"));
        assert_eq!(
            std::fs::read_to_string(&first).unwrap(),
            std::fs::read_to_string(&second).unwrap()
        );
        assert_eq!(session.next_sequence(), 2);
    }

    #[test]
    fn counter_is_shared_across_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = CaptureSession::new(dir.path());

        session.dump("ss", &red_pixel()).unwrap();
        let other = session.dump("shot", &red_pixel()).unwrap();

        assert_eq!(other, dir.path().join("shot1.ppm"));
    }

    #[test]
    fn written_file_is_a_p3_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = CaptureSession::new(dir.path());

        let path = session.dump("ss", &red_pixel()).unwrap();
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "P3\n1 1\n255\n255 0 0 \n"
        );
    }

    #[test]
    fn failed_write_keeps_the_number() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = CaptureSession::new(dir.path().join("missing"));

        let err = session.dump("ss", &red_pixel()).unwrap_err();
        assert!(matches!(err, CaptureError::DumpIo { .. }));
        assert_eq!(session.next_sequence(), 0);

        std::fs::create_dir(dir.path().join("missing")).unwrap();
        let path = session.dump("ss", &red_pixel()).unwrap();
        assert!(path.ends_with("ss0.ppm"));
    }
}
