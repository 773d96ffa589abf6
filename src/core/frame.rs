use super::geometry::RGB_BYTES_PER_PIXEL;

/// Frame - timing plus the delivered RGB image
///
/// `pixels` is `height * width * 3` bytes, rows top to bottom, no padding.
#[derive(Debug, Clone)]
pub struct Frame {
    pub number: u64,
    pub time: f64,
    pub delta: f32,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn new(number: u64, time: f64, delta: f32, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * RGB_BYTES_PER_PIXEL);
        Self {
            number,
            time,
            delta,
            width,
            height,
            pixels,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB triple at (x, y), top-left origin
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * RGB_BYTES_PER_PIXEL;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Consume the frame into an `image` buffer
    pub fn into_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_lookup_is_row_major() {
        let pixels = vec![
            1, 1, 1, 2, 2, 2, // row 0
            3, 3, 3, 4, 4, 4, // row 1
        ];
        let frame = Frame::new(0, 0.0, 0.016, 2, 2, pixels);

        assert_eq!(frame.pixel(0, 0), Some([1, 1, 1]));
        assert_eq!(frame.pixel(1, 0), Some([2, 2, 2]));
        assert_eq!(frame.pixel(0, 1), Some([3, 3, 3]));
        assert_eq!(frame.pixel(2, 0), None);
    }

    #[test]
    fn converts_to_image() {
        let frame = Frame::new(3, 1.0, 0.016, 2, 1, vec![10, 20, 30, 40, 50, 60]);
        let image = frame.into_image().unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(1, 0).0, [40, 50, 60]);
    }
}
