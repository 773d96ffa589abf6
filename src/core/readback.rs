//! CPU-side conversion of a mapped readback buffer into a deliverable image.
//!
//! wgpu requires `bytes_per_row` of a texture-to-buffer copy to be a multiple of
//! [`wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`], so the raw copy carries per-row
//! padding and an alpha channel. Frames leave this module tightly packed, RGB,
//! top-left origin.

use super::geometry::RGB_BYTES_PER_PIXEL;

/// Bytes per pixel of the render target (RGBA8)
pub const RGBA_BYTES_PER_PIXEL: u32 = 4;

/// Where row 0 of a raw readback sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadbackOrigin {
    /// First row is the top of the image (wgpu texture copies)
    TopLeft,
    /// First row is the bottom of the image (GL-style `glReadPixels`)
    BottomLeft,
}

/// Channel order of the raw readback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgba,
    Bgra,
}

impl ChannelOrder {
    pub fn of(format: wgpu::TextureFormat) -> Self {
        match format {
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
                ChannelOrder::Bgra
            }
            _ => ChannelOrder::Rgba,
        }
    }
}

/// Row stride of the staging buffer for a target `width` pixels wide
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * RGBA_BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Strip row padding and alpha, producing `width * height * 3` bytes
pub fn pack_rgb(
    raw: &[u8],
    width: u32,
    height: u32,
    padded_row: u32,
    order: ChannelOrder,
) -> Vec<u8> {
    let width = width as usize;
    let height = height as usize;
    let padded_row = padded_row as usize;
    let mut rgb = Vec::with_capacity(width * height * RGB_BYTES_PER_PIXEL);

    for row in raw.chunks(padded_row).take(height) {
        for px in row[..width * RGBA_BYTES_PER_PIXEL as usize].chunks_exact(4) {
            match order {
                ChannelOrder::Rgba => rgb.extend_from_slice(&px[..3]),
                ChannelOrder::Bgra => rgb.extend_from_slice(&[px[2], px[1], px[0]]),
            }
        }
    }

    rgb
}

/// Reverse row order in place
pub fn flip_vertical(pixels: &mut [u8], width: u32, height: u32) {
    let row_len = width as usize * RGB_BYTES_PER_PIXEL;
    let height = height as usize;

    for top in 0..height / 2 {
        let bottom = height - 1 - top;
        let (upper, lower) = pixels.split_at_mut(bottom * row_len);
        upper[top * row_len..(top + 1) * row_len].swap_with_slice(&mut lower[..row_len]);
    }
}

/// Bring a packed RGB buffer to top-left origin
pub fn to_top_left(pixels: &mut [u8], width: u32, height: u32, origin: ReadbackOrigin) {
    if origin == ReadbackOrigin::BottomLeft {
        flip_vertical(pixels, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_row_is_aligned() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(1280) % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);
    }

    #[test]
    fn pack_drops_padding_and_alpha() {
        let padded = padded_bytes_per_row(2) as usize;
        let mut raw = vec![0xEE; padded * 2];
        raw[..8].copy_from_slice(&[1, 2, 3, 255, 4, 5, 6, 255]);
        raw[padded..padded + 8].copy_from_slice(&[7, 8, 9, 255, 10, 11, 12, 255]);

        let rgb = pack_rgb(&raw, 2, 2, padded as u32, ChannelOrder::Rgba);
        assert_eq!(rgb, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn pack_swizzles_bgra() {
        let padded = padded_bytes_per_row(1);
        let mut raw = vec![0; padded as usize];
        raw[..4].copy_from_slice(&[30, 20, 10, 255]);

        let rgb = pack_rgb(&raw, 1, 1, padded, ChannelOrder::Bgra);
        assert_eq!(rgb, vec![10, 20, 30]);
    }

    #[test]
    fn flip_reverses_rows() {
        // 1 pixel wide, 3 rows
        let mut pixels = vec![1, 1, 1, 2, 2, 2, 3, 3, 3];
        flip_vertical(&mut pixels, 1, 3);
        assert_eq!(pixels, vec![3, 3, 3, 2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn top_left_origin_is_untouched() {
        let mut pixels = vec![1, 1, 1, 2, 2, 2];
        to_top_left(&mut pixels, 1, 2, ReadbackOrigin::TopLeft);
        assert_eq!(pixels, vec![1, 1, 1, 2, 2, 2]);

        to_top_left(&mut pixels, 1, 2, ReadbackOrigin::BottomLeft);
        assert_eq!(pixels, vec![2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn cleared_readback_packs_to_zeros() {
        let (width, height) = (65, 3);
        let padded = padded_bytes_per_row(width);
        let raw = vec![0; (padded * height) as usize];

        let rgb = pack_rgb(&raw, width, height, padded, ChannelOrder::Rgba);
        assert_eq!(rgb.len(), (width * height) as usize * 3);
        assert!(rgb.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn bottom_left_target_is_flipped() {
        let config = crate::core::TargetConfig {
            readback_origin: ReadbackOrigin::BottomLeft,
            ..Default::default()
        };
        let padded = padded_bytes_per_row(1);
        let mut raw = vec![0; padded as usize * 2];
        raw[..4].copy_from_slice(&[1, 1, 1, 255]);
        raw[padded as usize..padded as usize + 4].copy_from_slice(&[2, 2, 2, 255]);

        let mut rgb = pack_rgb(&raw, 1, 2, padded, ChannelOrder::of(config.color_format));
        to_top_left(&mut rgb, 1, 2, config.readback_origin);
        assert_eq!(rgb, vec![2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn channel_order_from_format() {
        assert_eq!(ChannelOrder::of(wgpu::TextureFormat::Rgba8Unorm), ChannelOrder::Rgba);
        assert_eq!(ChannelOrder::of(wgpu::TextureFormat::Bgra8UnormSrgb), ChannelOrder::Bgra);
    }
}
