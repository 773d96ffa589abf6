/// Bytes per pixel of a delivered frame (RGB, no alpha)
pub const RGB_BYTES_PER_PIXEL: usize = 3;

/// Display geometry - remote logical size plus device pixel ratio
///
/// The physical size is derived, never stored independently, so it cannot
/// drift from the logical size and ratio it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    /// Width in logical pixels
    pub logical_width: f32,
    /// Height in logical pixels
    pub logical_height: f32,
    /// Physical pixels per logical pixel
    pub pixel_ratio: f32,
}

impl DisplayGeometry {
    /// Create new geometry; an invalid ratio falls back to 1.0
    pub fn new(logical_width: f32, logical_height: f32, pixel_ratio: f32) -> Self {
        Self {
            logical_width: sanitize_extent(logical_width),
            logical_height: sanitize_extent(logical_height),
            pixel_ratio: sanitize_ratio(pixel_ratio),
        }
    }

    /// Logical size as (width, height)
    pub fn logical_size(&self) -> (f32, f32) {
        (self.logical_width, self.logical_height)
    }

    /// Physical size: round(logical * ratio) per axis, at least one pixel
    pub fn physical_size(&self) -> (u32, u32) {
        (
            to_physical(self.logical_width, self.pixel_ratio),
            to_physical(self.logical_height, self.pixel_ratio),
        )
    }

    /// Total number of physical pixels
    pub fn pixel_count(&self) -> usize {
        let (width, height) = self.physical_size();
        width as usize * height as usize
    }

    /// Total size in bytes for an RGB frame
    pub fn buffer_size(&self) -> usize {
        self.pixel_count() * RGB_BYTES_PER_PIXEL
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new(1280.0, 1024.0, 1.0)
    }
}

/// Ratios that are not finite and positive are treated as 1.0
pub fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

fn sanitize_extent(extent: f32) -> f32 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

fn to_physical(logical: f32, ratio: f32) -> u32 {
    let scaled = (logical as f64 * ratio as f64).round();
    scaled.clamp(1.0, u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_session_canvas() {
        let geometry = DisplayGeometry::default();
        assert_eq!(geometry.logical_size(), (1280.0, 1024.0));
        assert_eq!(geometry.pixel_ratio, 1.0);
        assert_eq!(geometry.physical_size(), (1280, 1024));
    }

    #[test]
    fn test_physical_size_rounds() {
        let geometry = DisplayGeometry::new(333.0, 101.0, 1.5);
        // 499.5 -> 500, 151.5 -> 152
        assert_eq!(geometry.physical_size(), (500, 152));
    }

    #[test]
    fn test_fractional_logical_size() {
        let geometry = DisplayGeometry::new(640.4, 480.6, 2.0);
        assert_eq!(geometry.physical_size(), (1281, 961));
    }

    #[test]
    fn test_invalid_ratio_falls_back() {
        for ratio in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            let geometry = DisplayGeometry::new(100.0, 100.0, ratio);
            assert_eq!(geometry.pixel_ratio, 1.0);
        }
    }

    #[test]
    fn test_physical_size_is_never_zero() {
        let geometry = DisplayGeometry::new(0.0, 0.2, 1.0);
        assert_eq!(geometry.physical_size(), (1, 1));
    }

    #[test]
    fn test_buffer_size_rgb() {
        let geometry = DisplayGeometry::new(100.0, 50.0, 2.0);
        assert_eq!(geometry.pixel_count(), 200 * 100);
        assert_eq!(geometry.buffer_size(), 200 * 100 * 3);
    }

    #[test]
    fn test_various_common_resolutions() {
        let cases = [
            (640.0, 480.0, 1.0, (640, 480)),
            (1280.0, 720.0, 1.25, (1600, 900)),
            (1920.0, 1080.0, 2.0, (3840, 2160)),
            (1280.0, 1024.0, 1.5, (1920, 1536)),
        ];

        for (width, height, ratio, expected) in cases {
            let geometry = DisplayGeometry::new(width, height, ratio);
            assert_eq!(geometry.physical_size(), expected);
        }
    }
}
