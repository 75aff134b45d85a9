use std::io::{self, Write};

use super::CaptureError;

/// RGB8 pixels with row 0 at the bottom of the image, the order a GPU
/// framebuffer is addressed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl PixelImage {
    pub fn from_bottom_up(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, CaptureError> {
        if width == 0 || height == 0 {
            return Err(CaptureError::EmptyRegion { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(CaptureError::SizeMismatch {
                expected,
                actual: rgb.len(),
            });
        }
        Ok(Self { width, height, rgb })
    }

    pub fn from_top_down(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, CaptureError> {
        let image = Self::from_bottom_up(width, height, rgb)?;
        let row_len = width as usize * 3;
        let rgb = image
            .rgb
            .chunks_exact(row_len)
            .rev()
            .flatten()
            .copied()
            .collect();
        Ok(Self { rgb, ..image })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]
    }

    fn row(&self, y: u32) -> &[u8] {
        let row_len = self.width as usize * 3;
        let start = y as usize * row_len;
        &self.rgb[start..start + row_len]
    }
}

/// Writes a plain-text P3 image, top row first.
pub fn write_ppm<W: Write>(out: &mut W, image: &PixelImage) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for y in (0..image.height).rev() {
        for px in image.row(y).chunks_exact(3) {
            write!(out, "{} {} {} ", px[0], px[1], px[2])?;
        }
        writeln!(out)?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    fn render(image: &PixelImage) -> String {
        let mut out = Vec::new();
        write_ppm(&mut out, image).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn single_row_red() {
        let image = PixelImage::from_bottom_up(2, 1, [RED, RED].concat()).unwrap();
        assert_eq!(render(&image), "P3\n2 1\n255\n255 0 0 255 0 0 \n");
    }

    #[test]
    fn bottom_row_is_written_last() {
        let image = PixelImage::from_bottom_up(1, 2, [GREEN, BLUE].concat()).unwrap();
        assert_eq!(render(&image), "P3\n1 2\n255\n0 0 255 \n0 255 0 \n");
    }

    #[test]
    fn top_down_rows_are_reversed_on_construction() {
        let top_down = PixelImage::from_top_down(1, 2, [BLUE, GREEN].concat()).unwrap();
        let bottom_up = PixelImage::from_bottom_up(1, 2, [GREEN, BLUE].concat()).unwrap();

        assert_eq!(top_down, bottom_up);
        assert_eq!(top_down.pixel(0, 1), BLUE);
    }

    #[test]
    fn rows_keep_left_to_right_order() {
        let image = PixelImage::from_bottom_up(
            2,
            2,
            [RED, GREEN, BLUE, [10, 20, 30]].concat(),
        )
        .unwrap();
        let text = render(&image);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[3], "0 0 255 10 20 30 ");
        assert_eq!(lines[4], "255 0 0 0 255 0 ");
    }

    #[test]
    fn zero_sized_region_is_rejected() {
        assert!(matches!(
            PixelImage::from_bottom_up(0, 4, Vec::new()),
            Err(CaptureError::EmptyRegion { width: 0, height: 4 })
        ));
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(matches!(
            PixelImage::from_bottom_up(2, 2, vec![0; 9]),
            Err(CaptureError::SizeMismatch {
                expected: 12,
                actual: 9
            })
        ));
    }
}
