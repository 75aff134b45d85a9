use crate::capture::{CaptureError, PixelImage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChannelOrder {
    Rgba,
    Bgra,
}

fn channel_order(format: wgpu::TextureFormat) -> Result<ChannelOrder, CaptureError> {
    match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => {
            Ok(ChannelOrder::Rgba)
        }
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
            Ok(ChannelOrder::Bgra)
        }
        other => Err(CaptureError::UnsupportedFormat(other)),
    }
}

pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Drops row padding and alpha, leaving tightly packed RGB rows in the
/// order they were copied (top row first).
fn strip_to_rgb(
    data: &[u8],
    width: u32,
    height: u32,
    padded_row: u32,
    order: ChannelOrder,
) -> Result<Vec<u8>, CaptureError> {
    let expected = padded_row as usize * height as usize;
    if data.len() < expected {
        return Err(CaptureError::SizeMismatch {
            expected,
            actual: data.len(),
        });
    }

    let row_bytes = width as usize * 4;
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for row in data.chunks_exact(padded_row as usize).take(height as usize) {
        for px in row[..row_bytes].chunks_exact(4) {
            match order {
                ChannelOrder::Rgba => rgb.extend_from_slice(&[px[0], px[1], px[2]]),
                ChannelOrder::Bgra => rgb.extend_from_slice(&[px[2], px[1], px[0]]),
            }
        }
    }
    Ok(rgb)
}

/// Copies `texture` into a mappable buffer and blocks until the pixels are
/// back on the CPU.
pub fn read_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> Result<PixelImage, CaptureError> {
    let width = texture.width();
    let height = texture.height();
    let order = channel_order(texture.format())?;
    if width == 0 || height == 0 {
        return Err(CaptureError::EmptyRegion { width, height });
    }

    let padded_row = padded_bytes_per_row(width);
    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Capture Staging Buffer"),
        size: padded_row as u64 * height as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Capture Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::ImageCopyTexture {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::ImageCopyBuffer {
            buffer: &staging,
            layout: wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = device.poll(wgpu::Maintain::Wait);

    match rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(CaptureError::Readback(e.to_string())),
        Err(e) => return Err(CaptureError::Readback(e.to_string())),
    }

    let rgb = {
        let mapped = slice.get_mapped_range();
        strip_to_rgb(&mapped, width, height, padded_row, order)?
    };
    staging.unmap();

    PixelImage::from_top_down(width, height, rgb)
}
